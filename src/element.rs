//! Group elements tagged by the structure they live in.
//!
//! Every [`Element`] borrows the [`SystemParameters`] it was created from, so an
//! element can never outlive its parameters. Operations mixing elements of
//! different groups, or of different parameter sets, fail with
//! [`Error::GroupMismatch`] after a single tag check.
//!
//! The API uses multiplicative notation throughout: `mul` is the group law,
//! `power` is exponentiation by a Zr element, `invert` is the group inverse.
//! On G1 and G2 these are point addition, scalar multiplication and negation.

use std::fmt;

use blstrs::{G1Projective, G2Projective, Gt, Scalar};
use ff::Field;
use group::{Curve, Group as _};
use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};
use zeroize::{DefaultIsZeroes, Zeroize, Zeroizing};

use crate::params::SystemParameters;
use crate::types::{Error, Group, same_group};

/// A Zr scalar that can be wiped with volatile writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Zr(pub(crate) Scalar);

impl DefaultIsZeroes for Zr {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Value {
    G1(G1Projective),
    G2(G2Projective),
    Gt(Gt),
    Zr(Zr),
}

impl Value {
    fn group(&self) -> Group {
        match self {
            Value::G1(_) => Group::G1,
            Value::G2(_) => Group::G2,
            Value::Gt(_) => Group::Gt,
            Value::Zr(_) => Group::Zr,
        }
    }

    pub(crate) fn identity(group: Group) -> Self {
        match group {
            Group::G1 => Value::G1(G1Projective::identity()),
            Group::G2 => Value::G2(G2Projective::identity()),
            Group::Gt => Value::Gt(Gt::identity()),
            Group::Zr => Value::Zr(Zr(Scalar::ONE)),
        }
    }

    // Zero for Zr, the identity elsewhere: the values `random` must never return.
    fn is_degenerate(&self) -> bool {
        match self {
            Value::G1(p) => bool::from(p.is_identity()),
            Value::G2(q) => bool::from(q.is_identity()),
            Value::Gt(t) => bool::from(t.is_identity()),
            Value::Zr(s) => bool::from(s.0.is_zero()),
        }
    }
}

#[derive(Clone)]
pub struct Element<'a> {
    params: &'a SystemParameters,
    value: Value,
}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::Zr(_) => f.write_str("Element(Zr(..))"),
            other => write!(f, "Element({:?})", other),
        }
    }
}

impl<'a> Element<'a> {
    pub(crate) fn new(params: &'a SystemParameters, value: Value) -> Self {
        Self { params, value }
    }

    pub(crate) fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// The parameter set this element belongs to.
    pub fn params(&self) -> &'a SystemParameters {
        self.params
    }

    pub fn group(&self) -> Group {
        self.value.group()
    }

    /// True for the group identity (the point at infinity on G1/G2, one in GT and Zr).
    pub fn is_identity(&self) -> bool {
        self.value == Value::identity(self.group())
    }

    fn check_params(&self, other: &Element<'_>) -> Result<(), Error> {
        if self.params.fingerprint() != other.params.fingerprint() {
            return Err(Error::GroupMismatch);
        }
        Ok(())
    }

    /// Raises `self` to a Zr exponent, staying in the group of `self`.
    pub fn power(&self, exponent: &Element<'_>) -> Result<Element<'a>, Error> {
        self.check_params(exponent)?;
        match &exponent.value {
            Value::Zr(s) => Ok(self.scale(&s.0)),
            _ => Err(Error::GroupMismatch),
        }
    }

    pub(crate) fn scale(&self, s: &Scalar) -> Element<'a> {
        let value = match &self.value {
            Value::G1(p) => Value::G1(p * s),
            Value::G2(q) => Value::G2(q * s),
            Value::Gt(t) => Value::Gt(*t * s),
            Value::Zr(base) => Value::Zr(Zr(base.0.pow(&scalar_limbs(s)[..]))),
        };
        Element::new(self.params, value)
    }

    /// The bilinear map e: G1 x G2 -> GT. `self` must be in G1 and `other` in G2.
    pub fn pair(&self, other: &Element<'_>) -> Result<Element<'a>, Error> {
        self.check_params(other)?;
        match (&self.value, &other.value) {
            (Value::G1(p), Value::G2(q)) => Ok(Element::new(self.params, Value::Gt(pairing(p, q)))),
            _ => Err(Error::GroupMismatch),
        }
    }

    /// Equality, defined only within one group of one parameter set.
    pub fn equal(&self, other: &Element<'_>) -> Result<bool, Error> {
        self.check_params(other)?;
        same_group(self.group(), other.group())?;
        Ok(self.value == other.value)
    }

    /// The group law.
    pub fn mul(&self, other: &Element<'_>) -> Result<Element<'a>, Error> {
        self.check_params(other)?;
        let value = match (&self.value, &other.value) {
            (Value::G1(a), Value::G1(b)) => Value::G1(a + b),
            (Value::G2(a), Value::G2(b)) => Value::G2(a + b),
            (Value::Gt(a), Value::Gt(b)) => Value::Gt(*a + *b),
            (Value::Zr(a), Value::Zr(b)) => Value::Zr(Zr(a.0 * b.0)),
            _ => return Err(Error::GroupMismatch),
        };
        Ok(Element::new(self.params, value))
    }

    /// The group inverse. Zero has no inverse in Zr.
    pub fn invert(&self) -> Result<Element<'a>, Error> {
        let value = match &self.value {
            Value::G1(p) => Value::G1(-*p),
            Value::G2(q) => Value::G2(-*q),
            Value::Gt(t) => Value::Gt(-*t),
            Value::Zr(s) => {
                let inv = Option::<Scalar>::from(s.0.invert()).ok_or(Error::NotInvertible)?;
                Value::Zr(Zr(inv))
            }
        };
        Ok(Element::new(self.params, value))
    }
}

/// Wipes the scalar held by a Zr element. No-op for other groups.
pub(crate) fn wipe(element: &mut Element<'_>) {
    if let Value::Zr(s) = element.value_mut() {
        s.zeroize();
    }
}

fn pairing(g1: &G1Projective, g2: &G2Projective) -> Gt {
    blstrs::pairing(&g1.to_affine(), &g2.to_affine())
}

fn scalar_limbs(s: &Scalar) -> Zeroizing<[u64; 4]> {
    let bytes = Zeroizing::new(s.to_bytes_le());
    let mut limbs = Zeroizing::new([0u64; 4]);
    let mut word = Zeroizing::new([0u8; 8]);
    for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
        word.copy_from_slice(chunk);
        *limb = u64::from_le_bytes(*word);
    }
    limbs
}

/// Draws a seed from `rng` and expands it into a ChaCha20 stream.
///
/// This is the only point where the caller's entropy source is touched, so a
/// failing source surfaces here as [`Error::Randomness`].
pub(crate) fn seeded_stream<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
) -> Result<ChaCha20Rng, Error> {
    let mut seed = [0u8; 32];
    rng.try_fill_bytes(&mut seed)?;
    let stream = ChaCha20Rng::from_seed(seed);
    seed.zeroize();
    Ok(stream)
}

/// Uniform sample from `group`, rejecting zero and the identity.
pub(crate) fn sample(group: Group, stream: &mut ChaCha20Rng) -> Value {
    loop {
        let value = match group {
            Group::G1 => Value::G1(G1Projective::random(&mut *stream)),
            Group::G2 => Value::G2(G2Projective::random(&mut *stream)),
            Group::Gt => Value::Gt(Gt::random(&mut *stream)),
            Group::Zr => Value::Zr(Zr(Scalar::random(&mut *stream))),
        };
        if !value.is_degenerate() {
            return value;
        }
    }
}
