//! Fixed-length byte encodings for group elements.
//!
//! G1 and G2 points use the zcash BLS12-381 serialization. The three most
//! significant bits of the first byte are flags: compression (`0x80`),
//! infinity (`0x40`) and sign (`0x20`). The sign flag is set iff `y` is the
//! lexicographically larger of the two square roots, which is the rule
//! compressed decoding uses to pick `y`.
//!
//! X-only encoding is the compressed encoding with the sign flag cleared. The
//! flags fit in the spare top bits of `x`, so x-only is no shorter than
//! compressed on this curve; what it gives up is the root selection, and
//! decoding yields one of two candidate points.

use std::io::Cursor;

use blstrs::{Compress, G1Affine, G1Projective, G2Affine, G2Projective, Gt, Scalar};
use group::Curve;

use crate::element::{Element, Value, Zr};
use crate::params::SystemParameters;
use crate::types::{Encoding, Error, Group};

pub const G1_FULL_LEN: usize = 96;
pub const G1_COMPRESSED_LEN: usize = 48;
pub const G2_FULL_LEN: usize = 192;
pub const G2_COMPRESSED_LEN: usize = 96;
pub const GT_COMPRESSED_LEN: usize = 288;
pub const SCALAR_LEN: usize = 32;

const SIGN_FLAG: u8 = 0x20;

/// Length of `encoding` for `group`.
pub fn encoded_len(group: Group, encoding: Encoding) -> Result<usize, Error> {
    match (group, encoding) {
        (Group::G1, Encoding::Full) => Ok(G1_FULL_LEN),
        (Group::G1, Encoding::Compressed | Encoding::XOnly) => Ok(G1_COMPRESSED_LEN),
        (Group::G2, Encoding::Full) => Ok(G2_FULL_LEN),
        (Group::G2, Encoding::Compressed | Encoding::XOnly) => Ok(G2_COMPRESSED_LEN),
        (Group::Gt, Encoding::Compressed) => Ok(GT_COMPRESSED_LEN),
        (Group::Zr, Encoding::Full) => Ok(SCALAR_LEN),
        _ => Err(Error::UnsupportedEncoding),
    }
}

pub fn encode(element: &Element<'_>, encoding: Encoding) -> Result<Vec<u8>, Error> {
    match (element.value(), encoding) {
        (Value::G1(p), Encoding::Full) => Ok(p.to_affine().to_uncompressed().to_vec()),
        (Value::G1(p), Encoding::Compressed) => Ok(p.to_affine().to_compressed().to_vec()),
        (Value::G1(p), Encoding::XOnly) => Ok(strip_sign(p.to_affine().to_compressed().to_vec())),
        (Value::G2(q), Encoding::Full) => Ok(q.to_affine().to_uncompressed().to_vec()),
        (Value::G2(q), Encoding::Compressed) => Ok(q.to_affine().to_compressed().to_vec()),
        (Value::G2(q), Encoding::XOnly) => Ok(strip_sign(q.to_affine().to_compressed().to_vec())),
        (Value::Gt(t), Encoding::Compressed) => gt_to_bytes(t),
        (Value::Zr(s), Encoding::Full) => Ok(s.0.to_bytes_be().to_vec()),
        _ => Err(Error::UnsupportedEncoding),
    }
}

/// Result of decoding: a unique element, or for x-only input, one of two points.
#[derive(Clone, Debug)]
pub enum Decoded<'a> {
    Exact(Element<'a>),
    Candidate(XOnlyCandidate<'a>),
}

impl<'a> Decoded<'a> {
    pub fn into_exact(self) -> Result<Element<'a>, Error> {
        match self {
            Decoded::Exact(element) => Ok(element),
            Decoded::Candidate(_) => Err(Error::UnsupportedEncoding),
        }
    }

    pub fn into_candidate(self) -> Result<XOnlyCandidate<'a>, Error> {
        match self {
            Decoded::Candidate(candidate) => Ok(candidate),
            Decoded::Exact(_) => Err(Error::UnsupportedEncoding),
        }
    }
}

/// The two points sharing an x-coordinate. They are each other's negation.
#[derive(Clone, Debug)]
pub struct XOnlyCandidate<'a> {
    first: Element<'a>,
}

impl<'a> XOnlyCandidate<'a> {
    /// The root decoded with the sign flag clear (the smaller `y`).
    pub fn first(&self) -> &Element<'a> {
        &self.first
    }

    pub fn second(&self) -> Element<'a> {
        let value = match self.first.value() {
            Value::G1(p) => Value::G1(-*p),
            Value::G2(q) => Value::G2(-*q),
            other => *other,
        };
        Element::new(self.first.params(), value)
    }

    pub fn into_first(self) -> Element<'a> {
        self.first
    }
}

pub fn decode<'a>(
    params: &'a SystemParameters,
    group: Group,
    encoding: Encoding,
    bytes: &[u8],
) -> Result<Decoded<'a>, Error> {
    if bytes.len() != encoded_len(group, encoding)? {
        return Err(Error::MalformedEncoding);
    }
    let value = match (group, encoding) {
        (Group::G1, Encoding::Full) => Value::G1(g1_from_uncompressed(bytes)?),
        (Group::G1, Encoding::Compressed) => Value::G1(g1_from_compressed(bytes)?),
        (Group::G2, Encoding::Full) => Value::G2(g2_from_uncompressed(bytes)?),
        (Group::G2, Encoding::Compressed) => Value::G2(g2_from_compressed(bytes)?),
        (Group::G1 | Group::G2, Encoding::XOnly) => {
            if bytes[0] & SIGN_FLAG != 0 {
                return Err(Error::MalformedEncoding);
            }
            let value = if group == Group::G1 {
                Value::G1(g1_from_compressed(bytes)?)
            } else {
                Value::G2(g2_from_compressed(bytes)?)
            };
            return Ok(Decoded::Candidate(XOnlyCandidate {
                first: Element::new(params, value),
            }));
        }
        (Group::Gt, Encoding::Compressed) => Value::Gt(gt_from_bytes(bytes)?),
        (Group::Zr, Encoding::Full) => Value::Zr(Zr(scalar_from_bytes(bytes)?)),
        _ => return Err(Error::UnsupportedEncoding),
    };
    Ok(Decoded::Exact(Element::new(params, value)))
}

fn strip_sign(mut bytes: Vec<u8>) -> Vec<u8> {
    bytes[0] &= !SIGN_FLAG;
    bytes
}

fn g1_from_compressed(bytes: &[u8]) -> Result<G1Projective, Error> {
    let raw: [u8; G1_COMPRESSED_LEN] = bytes.try_into().map_err(|_| Error::MalformedEncoding)?;
    let affine =
        Option::<G1Affine>::from(G1Affine::from_compressed(&raw)).ok_or(Error::MalformedEncoding)?;
    Ok(affine.into())
}

fn g1_from_uncompressed(bytes: &[u8]) -> Result<G1Projective, Error> {
    let raw: [u8; G1_FULL_LEN] = bytes.try_into().map_err(|_| Error::MalformedEncoding)?;
    let affine = Option::<G1Affine>::from(G1Affine::from_uncompressed(&raw))
        .ok_or(Error::MalformedEncoding)?;
    Ok(affine.into())
}

fn g2_from_compressed(bytes: &[u8]) -> Result<G2Projective, Error> {
    let raw: [u8; G2_COMPRESSED_LEN] = bytes.try_into().map_err(|_| Error::MalformedEncoding)?;
    let affine =
        Option::<G2Affine>::from(G2Affine::from_compressed(&raw)).ok_or(Error::MalformedEncoding)?;
    Ok(affine.into())
}

fn g2_from_uncompressed(bytes: &[u8]) -> Result<G2Projective, Error> {
    let raw: [u8; G2_FULL_LEN] = bytes.try_into().map_err(|_| Error::MalformedEncoding)?;
    let affine = Option::<G2Affine>::from(G2Affine::from_uncompressed(&raw))
        .ok_or(Error::MalformedEncoding)?;
    Ok(affine.into())
}

fn gt_to_bytes(t: &Gt) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::with_capacity(GT_COMPRESSED_LEN);
    t.write_compressed(&mut bytes)
        .map_err(|_| Error::UnsupportedEncoding)?;
    Ok(bytes)
}

fn gt_from_bytes(bytes: &[u8]) -> Result<Gt, Error> {
    let mut cursor = Cursor::new(bytes);
    Gt::read_compressed(&mut cursor).map_err(|_| Error::MalformedEncoding)
}

fn scalar_from_bytes(bytes: &[u8]) -> Result<Scalar, Error> {
    let raw: [u8; SCALAR_LEN] = bytes.try_into().map_err(|_| Error::MalformedEncoding)?;
    Option::<Scalar>::from(Scalar::from_bytes_be(&raw)).ok_or(Error::MalformedEncoding)
}
