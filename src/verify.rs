//! Signature verification.
//!
//! A signature `s` on digest `m` under public key `pk` is valid iff
//! `e(s, g) == e(H(m), pk)`, where `g` is the G2 generator of the parameter set.
//! Rejection is a [`Verdict`], never an `Err`: malformed input is reported as
//! [`Rejection::Malformed`] so callers can tell it apart from a signature that
//! simply does not verify.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use crate::codec;
use crate::element::Element;
use crate::keys::PublicKey;
use crate::params::SystemParameters;
use crate::sign::Signature;
use crate::types::{Encoding, Error, Group};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Well-formed input, but the pairing equation does not hold.
    PairingMismatch,
    /// Decoding failed or operands came from the wrong group or parameter set.
    Malformed(Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(Rejection),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    fn from_check(check: Result<bool, Error>) -> Self {
        match check {
            Ok(true) => Verdict::Valid,
            Ok(false) => Verdict::Invalid(Rejection::PairingMismatch),
            Err(err) => Verdict::Invalid(Rejection::Malformed(err)),
        }
    }
}

/// Verifies a decoded signature.
pub fn verify<'a>(
    params: &'a SystemParameters,
    signature: &Signature<'a>,
    digest: &[u8],
    public: &PublicKey<'a>,
) -> Verdict {
    Verdict::from_check(check(params, signature.element(), digest, public))
}

/// Verifies an x-only encoded signature with two pairings.
///
/// The bytes name two points, `A` and `-A`. Only `A` is decoded and paired.
/// Since `e(-A, g) == e(A, g)^-1`, the second candidate is tested by inverting
/// `e(A, g)` in GT instead of computing another pairing.
pub fn verify_x_only<'a>(
    params: &'a SystemParameters,
    bytes: &[u8],
    digest: &[u8],
    public: &PublicKey<'a>,
) -> Verdict {
    Verdict::from_check(check_x_only(params, bytes, digest, public))
}

/// Verifies a signature in any encoding, dispatching x-only input to [`verify_x_only`].
pub fn verify_encoded<'a>(
    params: &'a SystemParameters,
    bytes: &[u8],
    encoding: Encoding,
    digest: &[u8],
    public: &PublicKey<'a>,
) -> Verdict {
    match encoding {
        Encoding::XOnly => verify_x_only(params, bytes, digest, public),
        Encoding::Full | Encoding::Compressed => match Signature::decode(params, bytes, encoding) {
            Ok(signature) => verify(params, &signature, digest, public),
            Err(err) => Verdict::Invalid(Rejection::Malformed(err)),
        },
    }
}

/// Independent verdicts for a batch of `(signature, digest, public key)` triples,
/// in input order.
pub fn verify_many<'a>(
    params: &'a SystemParameters,
    items: &[(&Signature<'a>, &[u8], &PublicKey<'a>)],
) -> Vec<Verdict> {
    #[cfg(feature = "parallel")]
    let verdicts = items
        .par_iter()
        .map(|(signature, digest, public)| verify(params, signature, digest, public))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let verdicts = items
        .iter()
        .map(|(signature, digest, public)| verify(params, signature, digest, public))
        .collect();

    verdicts
}

/// `(e(sig, g), e(H(digest), pk))`.
fn pairing_sides<'a>(
    params: &'a SystemParameters,
    signature: &Element<'a>,
    digest: &[u8],
    public: &PublicKey<'a>,
) -> Result<(Element<'a>, Element<'a>), Error> {
    if signature.group() != Group::G1 || public.element().group() != Group::G2 {
        return Err(Error::GroupMismatch);
    }
    let h = params.hash_to_group(digest, Group::G1)?;
    let lhs = signature.pair(&params.generator())?;
    let rhs = h.pair(public.element())?;
    Ok((lhs, rhs))
}

fn check<'a>(
    params: &'a SystemParameters,
    signature: &Element<'a>,
    digest: &[u8],
    public: &PublicKey<'a>,
) -> Result<bool, Error> {
    let (lhs, rhs) = pairing_sides(params, signature, digest, public)?;
    lhs.equal(&rhs)
}

fn check_x_only<'a>(
    params: &'a SystemParameters,
    bytes: &[u8],
    digest: &[u8],
    public: &PublicKey<'a>,
) -> Result<bool, Error> {
    let candidate = codec::decode(params, Group::G1, Encoding::XOnly, bytes)?.into_candidate()?;
    let (lhs, rhs) = pairing_sides(params, candidate.first(), digest, public)?;
    if lhs.equal(&rhs)? {
        trace!("x-only signature accepted on first candidate");
        return Ok(true);
    }
    let accepted = lhs.invert()?.equal(&rhs)?;
    if accepted {
        trace!("x-only signature accepted on second candidate");
    }
    Ok(accepted)
}
