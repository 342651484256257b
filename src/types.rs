//! Common types and error handling.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of algebraic structures an element can live in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    G1,
    G2,
    Gt,
    Zr,
}

/// Byte encodings a group element can be written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// Both affine coordinates.
    Full,
    /// One coordinate plus the flag that selects the other root.
    Compressed,
    /// One coordinate only; decodes to one of two points.
    XOnly,
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Encoding::Full),
            "compressed" => Ok(Encoding::Compressed),
            "x-only" | "xonly" => Ok(Encoding::XOnly),
            _ => Err(Error::UnsupportedEncoding),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Parameter blob is empty, truncated, or names an unsupported construction.
    Parameter(String),
    /// The entropy source failed.
    Randomness,
    /// Operands belong to the wrong group or to different parameter sets.
    GroupMismatch,
    /// Wrong length or not a valid point/scalar.
    MalformedEncoding,
    /// The encoding is not defined for this group.
    UnsupportedEncoding,
    NotInvertible,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for Error {}

impl From<rand_core::Error> for Error {
    fn from(_: rand_core::Error) -> Self {
        Error::Randomness
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::Parameter(format!("bad hex: {err}"))
    }
}

/// Checks that two elements share a group, returning that group.
pub(crate) fn same_group(a: Group, b: Group) -> Result<Group, Error> {
    if a != b {
        return Err(Error::GroupMismatch);
    }
    Ok(a)
}
