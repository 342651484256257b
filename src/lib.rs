#![forbid(unsafe_code)]
//! BLS-style signatures over the BLS12-381 pairing.
//!
//! Keys live in G2, signatures in G1. Signatures can be shipped in full,
//! compressed, or x-only form; x-only signatures are verified with a
//! two-candidate check that costs no more pairings than a full one.
//!
//! ```
//! use pairing_sig::{Encoding, SystemParameters, generate_keypair, sign, verify_encoded};
//! use rand_core::OsRng;
//!
//! let params = SystemParameters::initialize(b"type bls12_381\n").expect("params");
//! let keys = generate_keypair(&params, &mut OsRng).expect("keygen");
//! let sig = sign(&params, &keys.secret, b"ABCDEF").expect("sign");
//! let bytes = sig.encode(Encoding::XOnly).expect("encode");
//! assert!(verify_encoded(&params, &bytes, Encoding::XOnly, b"ABCDEF", &keys.public).is_valid());
//! ```

pub mod cli;
pub mod codec;
pub mod element;
pub mod keys;
pub mod logging;
pub mod params;
pub mod sign;
pub mod types;
pub mod verify;

pub use crate::codec::{Decoded, XOnlyCandidate};
pub use crate::element::Element;
pub use crate::keys::{KeyPair, PublicKey, SecretKey, generate_keypair};
pub use crate::params::{ParamsConfig, SystemParameters};
pub use crate::sign::{Signature, sign};
pub use crate::types::{Encoding, Error, Group};
pub use crate::verify::{Rejection, Verdict, verify, verify_encoded, verify_many, verify_x_only};
