//! Secret and public keys.

use std::fmt;

use ff::Field;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::codec::{self, SCALAR_LEN};
use crate::element::{self, Element, Value};
use crate::params::SystemParameters;
use crate::types::{Encoding, Error, Group};

/// A Zr scalar. Wiped when dropped.
pub struct SecretKey<'a> {
    scalar: Element<'a>,
}

impl Drop for SecretKey<'_> {
    fn drop(&mut self) {
        element::wipe(&mut self.scalar);
    }
}

impl fmt::Debug for SecretKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl<'a> SecretKey<'a> {
    pub fn random<R: RngCore + CryptoRng + ?Sized>(
        params: &'a SystemParameters,
        rng: &mut R,
    ) -> Result<Self, Error> {
        Ok(Self {
            scalar: params.random(Group::Zr, rng)?,
        })
    }

    /// Wraps a Zr element. Zero is rejected.
    pub fn from_element(scalar: Element<'a>) -> Result<Self, Error> {
        if scalar.group() != Group::Zr {
            return Err(Error::GroupMismatch);
        }
        let key = Self { scalar };
        if key.is_zero() {
            return Err(Error::MalformedEncoding);
        }
        Ok(key)
    }

    /// Reads a canonical 32-byte big-endian scalar.
    pub fn from_bytes(params: &'a SystemParameters, bytes: &[u8]) -> Result<Self, Error> {
        let scalar = codec::decode(params, Group::Zr, Encoding::Full, bytes)?.into_exact()?;
        Self::from_element(scalar)
    }

    pub fn to_bytes(&self) -> Zeroizing<[u8; SCALAR_LEN]> {
        let mut out = Zeroizing::new([0u8; SCALAR_LEN]);
        if let Value::Zr(s) = self.scalar.value() {
            out.copy_from_slice(&s.0.to_bytes_be());
        }
        out
    }

    fn is_zero(&self) -> bool {
        matches!(self.scalar.value(), Value::Zr(s) if bool::from(s.0.is_zero()))
    }

    pub(crate) fn element(&self) -> &Element<'a> {
        &self.scalar
    }

    pub fn params(&self) -> &'a SystemParameters {
        self.scalar.params()
    }

    /// `generator ^ secret`.
    pub fn public_key(&self) -> PublicKey<'a> {
        let point = match self.scalar.value() {
            Value::Zr(s) => self.params().generator().scale(&s.0),
            _ => self.params().identity(Group::G2),
        };
        PublicKey { point }
    }
}

/// A G2 point.
#[derive(Clone, Debug)]
pub struct PublicKey<'a> {
    point: Element<'a>,
}

impl<'a> PublicKey<'a> {
    /// Wraps a G2 element. The identity is rejected, since it would verify any signature
    /// on the identity.
    pub fn from_element(point: Element<'a>) -> Result<Self, Error> {
        if point.group() != Group::G2 {
            return Err(Error::GroupMismatch);
        }
        if point.is_identity() {
            return Err(Error::MalformedEncoding);
        }
        Ok(Self { point })
    }

    pub fn element(&self) -> &Element<'a> {
        &self.point
    }

    pub fn encode(&self, encoding: Encoding) -> Result<Vec<u8>, Error> {
        codec::encode(&self.point, encoding)
    }

    /// Decodes a full or compressed public key. X-only keys are ambiguous and rejected.
    pub fn decode(
        params: &'a SystemParameters,
        bytes: &[u8],
        encoding: Encoding,
    ) -> Result<Self, Error> {
        let point = codec::decode(params, Group::G2, encoding, bytes)?.into_exact()?;
        Self::from_element(point)
    }
}

#[derive(Debug)]
pub struct KeyPair<'a> {
    pub secret: SecretKey<'a>,
    pub public: PublicKey<'a>,
}

impl<'a> KeyPair<'a> {
    pub fn from_secret(secret: SecretKey<'a>) -> Self {
        let public = secret.public_key();
        Self { secret, public }
    }
}

/// Samples a secret scalar and derives `public = generator ^ secret`.
pub fn generate_keypair<'a, R: RngCore + CryptoRng + ?Sized>(
    params: &'a SystemParameters,
    rng: &mut R,
) -> Result<KeyPair<'a>, Error> {
    Ok(KeyPair::from_secret(SecretKey::random(params, rng)?))
}
