//! End-to-end demo of the signature scheme.
//!
//! 1. **Parameters**: a parameter blob is parsed into `SystemParameters`; the
//!    G2 generator `g` and the hash-to-curve tag come from it.
//! 2. **Keys**: a secret scalar `x` is sampled and `PK = g^x`.
//! 3. **Signing**: the digest is mapped into G1 as `h = H(m)` and `sigma = h^x`.
//! 4. **Verification**: `e(sigma, g) == e(h, PK)`, once per encoding. The
//!    x-only form decodes to one of `{sigma, sigma^-1}` and is resolved with
//!    a GT inversion instead of a second pairing.

use pairing_sig::{
    Encoding, Group, SystemParameters, generate_keypair, sign, verify_encoded,
};
use rand_core::SeedableRng;
use tracing::info;

fn main() {
    pairing_sig::logging::init_tracing(None);

    let params = SystemParameters::initialize(b"type bls12_381\n").expect("parameters");
    let mut rng = rand_chacha::ChaCha20Rng::from_entropy();
    let keys = generate_keypair(&params, &mut rng).expect("keygen");
    let other = generate_keypair(&params, &mut rng).expect("keygen");

    let digest = b"ABCDEF";
    let signature = sign(&params, &keys.secret, digest).expect("sign");

    for encoding in [Encoding::Full, Encoding::Compressed, Encoding::XOnly] {
        let bytes = signature.encode(encoding).expect("encode");
        assert_eq!(
            bytes.len(),
            params.encoded_len(Group::G1, encoding).expect("length")
        );
        let good = verify_encoded(&params, &bytes, encoding, digest, &keys.public);
        let wrong_key = verify_encoded(&params, &bytes, encoding, digest, &other.public);
        info!(?encoding, len = bytes.len(), ?good, ?wrong_key, "verified");
        assert!(good.is_valid());
        assert!(!wrong_key.is_valid());
    }
}
