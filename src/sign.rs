use crate::codec;
use crate::element::Element;
use crate::keys::SecretKey;
use crate::params::SystemParameters;
use crate::types::{Encoding, Error, Group};

/// A G1 point, `hash(digest) ^ secret`.
#[derive(Clone, Debug)]
pub struct Signature<'a> {
    point: Element<'a>,
}

impl<'a> Signature<'a> {
    pub fn from_element(point: Element<'a>) -> Result<Self, Error> {
        if point.group() != Group::G1 {
            return Err(Error::GroupMismatch);
        }
        Ok(Self { point })
    }

    pub fn element(&self) -> &Element<'a> {
        &self.point
    }

    /// Always `params.encoded_len(Group::G1, encoding)` bytes long.
    pub fn encode(&self, encoding: Encoding) -> Result<Vec<u8>, Error> {
        codec::encode(&self.point, encoding)
    }

    /// Decodes a full or compressed signature. X-only bytes decode to two
    /// candidates; pass them to [`crate::verify::verify_x_only`] instead.
    pub fn decode(
        params: &'a SystemParameters,
        bytes: &[u8],
        encoding: Encoding,
    ) -> Result<Self, Error> {
        let point = codec::decode(params, Group::G1, encoding, bytes)?.into_exact()?;
        Ok(Self { point })
    }
}

/// Signs an already-hashed message. Deterministic in `(secret, digest)`.
pub fn sign<'a>(
    params: &'a SystemParameters,
    secret: &SecretKey<'_>,
    digest: &[u8],
) -> Result<Signature<'a>, Error> {
    let h = params.hash_to_group(digest, Group::G1)?;
    let point = h.power(secret.element())?;
    Ok(Signature { point })
}
