use std::num::NonZeroU32;

use pairing_sig::verify::{Rejection, Verdict};
use pairing_sig::{
    Encoding, Error, KeyPair, SecretKey, SystemParameters, generate_keypair, sign, verify,
    verify_encoded, verify_many,
};
use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};

fn fixed_secret(params: &SystemParameters, last: u8) -> SecretKey<'_> {
    let mut bytes = [0u8; 32];
    bytes[31] = last;
    SecretKey::from_bytes(params, &bytes).expect("secret")
}

struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        panic!("entropy source unavailable")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("entropy source unavailable")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("entropy source unavailable")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
        let code = NonZeroU32::new(rand_core::Error::CUSTOM_START).expect("non-zero");
        Err(rand_core::Error::from(code))
    }
}

impl CryptoRng for FailingRng {}

#[test]
fn signatures_verify_under_the_signing_key() {
    let params = SystemParameters::bls12_381();
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let keys = generate_keypair(&params, &mut rng).expect("keygen");
    for digest in [&b""[..], b"ABCDEF", &[0xffu8; 64][..]] {
        let sig = sign(&params, &keys.secret, digest).expect("sign");
        assert_eq!(verify(&params, &sig, digest, &keys.public), Verdict::Valid);
    }
}

#[test]
fn fixed_secret_signs_abcdef_deterministically() {
    let params = SystemParameters::bls12_381();
    let keys = KeyPair::from_secret(fixed_secret(&params, 42));
    let other = KeyPair::from_secret(fixed_secret(&params, 43));

    let first = sign(&params, &keys.secret, b"ABCDEF").expect("sign");
    let second = sign(&params, &keys.secret, b"ABCDEF").expect("sign");
    let first_bytes = first.encode(Encoding::Full).expect("encode");
    assert_eq!(first_bytes, second.encode(Encoding::Full).expect("encode"));
    assert_eq!(first_bytes.len(), 96);

    assert!(verify(&params, &first, b"ABCDEF", &keys.public).is_valid());
    assert_eq!(
        verify(&params, &first, b"ABCDEF", &other.public),
        Verdict::Invalid(Rejection::PairingMismatch)
    );
}

#[test]
fn wrong_digest_is_rejected() {
    let params = SystemParameters::bls12_381();
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let keys = generate_keypair(&params, &mut rng).expect("keygen");
    let sig = sign(&params, &keys.secret, b"ABCDEF").expect("sign");
    assert_eq!(
        verify(&params, &sig, b"ABCDEG", &keys.public),
        Verdict::Invalid(Rejection::PairingMismatch)
    );
}

#[test]
fn public_key_is_generator_to_the_secret() {
    let params = SystemParameters::bls12_381();
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let secret = SecretKey::random(&params, &mut rng).expect("secret");
    let restored = SecretKey::from_bytes(&params, secret.to_bytes().as_slice()).expect("restore");
    assert!(
        secret
            .public_key()
            .element()
            .equal(restored.public_key().element())
            .expect("same group")
    );
}

#[test]
fn zero_secret_is_rejected() {
    let params = SystemParameters::bls12_381();
    let res = SecretKey::from_bytes(&params, &[0u8; 32]);
    assert!(matches!(res, Err(Error::MalformedEncoding)));
}

#[test]
fn secret_key_debug_is_redacted() {
    let params = SystemParameters::bls12_381();
    let secret = fixed_secret(&params, 7);
    assert_eq!(format!("{secret:?}"), "SecretKey(..)");
}

#[test]
fn keygen_fails_when_entropy_is_unavailable() {
    let params = SystemParameters::bls12_381();
    let res = generate_keypair(&params, &mut FailingRng);
    assert!(matches!(res, Err(Error::Randomness)));
}

#[test]
fn keys_from_other_parameters_are_malformed_input() {
    let params = SystemParameters::bls12_381();
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let other_params = SystemParameters::with_random_generator(&mut rng, None).expect("params");
    let keys = generate_keypair(&params, &mut rng).expect("keygen");
    let foreign = generate_keypair(&other_params, &mut rng).expect("keygen");

    let sig = sign(&params, &keys.secret, b"ABCDEF").expect("sign");
    assert_eq!(
        verify(&params, &sig, b"ABCDEF", &foreign.public),
        Verdict::Invalid(Rejection::Malformed(Error::GroupMismatch))
    );
    assert!(matches!(
        sign(&params, &foreign.secret, b"ABCDEF"),
        Err(Error::GroupMismatch)
    ));
}

#[test]
fn custom_generator_parameters_sign_and_verify() {
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let params = SystemParameters::with_random_generator(&mut rng, Some("TEST-DST")).expect("params");
    let keys = generate_keypair(&params, &mut rng).expect("keygen");
    let sig = sign(&params, &keys.secret, b"ABCDEF").expect("sign");
    assert!(verify(&params, &sig, b"ABCDEF", &keys.public).is_valid());
}

#[test]
fn encoded_signatures_verify_in_every_encoding() {
    let params = SystemParameters::bls12_381();
    let mut rng = ChaCha20Rng::seed_from_u64(6);
    let keys = generate_keypair(&params, &mut rng).expect("keygen");
    let sig = sign(&params, &keys.secret, b"ABCDEF").expect("sign");
    for encoding in [Encoding::Full, Encoding::Compressed, Encoding::XOnly] {
        let bytes = sig.encode(encoding).expect("encode");
        let verdict = verify_encoded(&params, &bytes, encoding, b"ABCDEF", &keys.public);
        assert!(verdict.is_valid(), "{encoding:?}: {verdict:?}");
    }
}

#[test]
fn garbage_bytes_are_malformed_not_mismatched() {
    let params = SystemParameters::bls12_381();
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let keys = generate_keypair(&params, &mut rng).expect("keygen");

    let short = vec![0u8; 10];
    assert_eq!(
        verify_encoded(&params, &short, Encoding::Compressed, b"ABCDEF", &keys.public),
        Verdict::Invalid(Rejection::Malformed(Error::MalformedEncoding))
    );

    // Compression flag clear: not a compressed point.
    let bad = vec![0x01u8; 48];
    assert_eq!(
        verify_encoded(&params, &bad, Encoding::XOnly, b"ABCDEF", &keys.public),
        Verdict::Invalid(Rejection::Malformed(Error::MalformedEncoding))
    );
}

#[test]
fn batch_verdicts_match_individual_verdicts() {
    let params = SystemParameters::bls12_381();
    let mut rng = ChaCha20Rng::seed_from_u64(8);
    let alice = generate_keypair(&params, &mut rng).expect("keygen");
    let bob = generate_keypair(&params, &mut rng).expect("keygen");
    let sig_a = sign(&params, &alice.secret, b"one").expect("sign");
    let sig_b = sign(&params, &bob.secret, b"two").expect("sign");

    let items = [
        (&sig_a, &b"one"[..], &alice.public),
        (&sig_b, &b"two"[..], &bob.public),
        (&sig_a, &b"one"[..], &bob.public),
        (&sig_b, &b"one"[..], &bob.public),
    ];
    let verdicts = verify_many(&params, &items);
    let expected: Vec<Verdict> = items
        .iter()
        .map(|(sig, digest, pk)| verify(&params, sig, digest, pk))
        .collect();
    assert_eq!(verdicts, expected);
    assert!(verdicts[0].is_valid() && verdicts[1].is_valid());
    assert!(!verdicts[2].is_valid() && !verdicts[3].is_valid());
}

#[test]
fn concurrent_signing_with_shared_parameters() {
    let params = SystemParameters::bls12_381();
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    let keys = generate_keypair(&params, &mut rng).expect("keygen");
    let expected = sign(&params, &keys.secret, b"ABCDEF")
        .expect("sign")
        .encode(Encoding::Compressed)
        .expect("encode");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let sig = sign(&params, &keys.secret, b"ABCDEF").expect("sign");
                    assert!(verify(&params, &sig, b"ABCDEF", &keys.public).is_valid());
                    sig.encode(Encoding::Compressed).expect("encode")
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread"), expected);
        }
    });
}
