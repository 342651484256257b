//! Pairing context: the system parameters every element is bound to.
//!
//! Parameters are read from a small text blob of `key value` lines:
//!
//! ```text
//! type bls12_381
//! g2 <hex of a 96-byte compressed G2 point>   # optional, default generator
//! dst <hash-to-curve domain separation tag>   # optional
//! ```

use blstrs::{G1Projective, G2Affine, G2Projective};
use group::{Curve, Group as _};
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::codec;
use crate::element::{self, Element, Value};
use crate::types::{Encoding, Error, Group};

/// Default hash-to-curve tag: minimal-signature-size BLS, no proof of possession.
pub const DEFAULT_DST: &str = "BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

const CURVE_BLS12_381: &str = "bls12_381";

/// r, the prime order of G1, G2 and GT, big-endian.
const ORDER_BE: [u8; 32] = [
    0x73, 0xed, 0xa7, 0x53, 0x29, 0x9d, 0x7d, 0x48, 0x33, 0x39, 0xd8, 0x08, 0x09, 0xa1, 0xd8, 0x05,
    0x53, 0xbd, 0xa4, 0x02, 0xff, 0xfe, 0x5b, 0xfe, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01,
];

/// Structured form of the parameter blob.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsConfig {
    pub curve: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst: Option<String>,
}

impl Default for ParamsConfig {
    fn default() -> Self {
        Self {
            curve: CURVE_BLS12_381.to_string(),
            g2: None,
            dst: None,
        }
    }
}

impl ParamsConfig {
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.is_empty() {
            return Err(Error::Parameter("empty parameter buffer".into()));
        }
        let text = std::str::from_utf8(bytes)
            .map_err(|_| Error::Parameter("parameter buffer is not utf-8".into()))?;

        let mut curve = None;
        let mut g2 = None;
        let mut dst = None;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = match line.split_once(char::is_whitespace) {
                Some((key, value)) => (key, strip_comment(value)),
                None => (line, ""),
            };
            if value.is_empty() {
                return Err(Error::Parameter(format!("missing value for `{key}`")));
            }
            let slot = match key {
                "type" => &mut curve,
                "g2" => &mut g2,
                "dst" => &mut dst,
                _ => return Err(Error::Parameter(format!("unknown key `{key}`"))),
            };
            if slot.replace(value.to_string()).is_some() {
                return Err(Error::Parameter(format!("duplicate key `{key}`")));
            }
        }

        let curve = curve.ok_or_else(|| Error::Parameter("missing `type`".into()))?;
        Ok(Self { curve, g2, dst })
    }

    /// Renders the config back into the text form accepted by [`ParamsConfig::parse`].
    pub fn render(&self) -> String {
        let mut out = format!("type {}\n", self.curve);
        if let Some(g2) = &self.g2 {
            out.push_str(&format!("g2 {g2}\n"));
        }
        if let Some(dst) = &self.dst {
            out.push_str(&format!("dst {dst}\n"));
        }
        out
    }
}

fn strip_comment(value: &str) -> &str {
    match value.split_once('#') {
        Some((before, _)) => before.trim(),
        None => value.trim(),
    }
}

/// Immutable pairing parameters, shared read-only by every element.
#[derive(Clone, Debug)]
pub struct SystemParameters {
    g2_generator: G2Projective,
    dst: String,
    fingerprint: [u8; 32],
}

impl PartialEq for SystemParameters {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
    }
}

impl Eq for SystemParameters {}

impl SystemParameters {
    /// Parses a parameter blob. See the module docs for the format.
    pub fn initialize(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_config(&ParamsConfig::parse(bytes)?)
    }

    pub fn from_config(config: &ParamsConfig) -> Result<Self, Error> {
        match config.curve.as_str() {
            "bls12_381" | "bls12-381" => {}
            other => {
                return Err(Error::Parameter(format!(
                    "unsupported curve family `{other}`"
                )));
            }
        }
        let g2_generator = match &config.g2 {
            Some(encoded) => parse_generator(encoded)?,
            None => G2Projective::generator(),
        };
        let dst = check_dst(config.dst.as_deref().unwrap_or(DEFAULT_DST))?;
        Ok(Self::assemble(g2_generator, dst.to_string()))
    }

    /// The standard BLS12-381 parameter set.
    pub fn bls12_381() -> Self {
        Self::assemble(G2Projective::generator(), DEFAULT_DST.to_string())
    }

    /// Parameters whose G2 generator is a fresh random point.
    pub fn with_random_generator<R: RngCore + CryptoRng + ?Sized>(
        rng: &mut R,
        dst: Option<&str>,
    ) -> Result<Self, Error> {
        let mut stream = element::seeded_stream(rng)?;
        let Value::G2(g2_generator) = element::sample(Group::G2, &mut stream) else {
            return Err(Error::GroupMismatch);
        };
        let dst = check_dst(dst.unwrap_or(DEFAULT_DST))?;
        Ok(Self::assemble(g2_generator, dst.to_string()))
    }

    fn assemble(g2_generator: G2Projective, dst: String) -> Self {
        let canonical = canonical_config(&g2_generator, &dst).render();
        let digest = Sha256::digest(canonical.as_bytes());
        let mut fingerprint = [0u8; 32];
        fingerprint.copy_from_slice(&digest);
        debug!(fingerprint = %hex::encode(fingerprint), "pairing parameters initialized");
        Self {
            g2_generator,
            dst,
            fingerprint,
        }
    }

    /// Canonical config: every field present, generator in compressed hex.
    pub fn to_config(&self) -> ParamsConfig {
        canonical_config(&self.g2_generator, &self.dst)
    }

    pub fn fingerprint(&self) -> &[u8; 32] {
        &self.fingerprint
    }

    pub fn dst(&self) -> &str {
        &self.dst
    }

    /// r, big-endian.
    pub fn order(&self) -> [u8; 32] {
        ORDER_BE
    }

    /// The G2 generator public keys are derived from.
    pub fn generator(&self) -> Element<'_> {
        Element::new(self, Value::G2(self.g2_generator))
    }

    pub fn identity(&self, group: Group) -> Element<'_> {
        Element::new(self, Value::identity(group))
    }

    /// Uniformly random non-identity element (non-zero scalar for Zr).
    pub fn random<R: RngCore + CryptoRng + ?Sized>(
        &self,
        group: Group,
        rng: &mut R,
    ) -> Result<Element<'_>, Error> {
        let mut stream = element::seeded_stream(rng)?;
        Ok(Element::new(self, element::sample(group, &mut stream)))
    }

    /// Deterministic map from bytes into G1 or G2 under this parameter set's DST.
    pub fn hash_to_group(&self, bytes: &[u8], group: Group) -> Result<Element<'_>, Error> {
        let value = match group {
            Group::G1 => Value::G1(G1Projective::hash_to_curve(bytes, self.dst.as_bytes(), &[])),
            Group::G2 => Value::G2(G2Projective::hash_to_curve(bytes, self.dst.as_bytes(), &[])),
            Group::Gt | Group::Zr => return Err(Error::GroupMismatch),
        };
        Ok(Element::new(self, value))
    }

    /// Byte length of `encoding` for `group`; fixed for a given parameter set.
    pub fn encoded_len(&self, group: Group, encoding: Encoding) -> Result<usize, Error> {
        codec::encoded_len(group, encoding)
    }
}

/// A tag must survive a render/parse round trip: one line, no comment marker,
/// no surrounding whitespace.
fn check_dst(dst: &str) -> Result<&str, Error> {
    if dst.is_empty() {
        return Err(Error::Parameter("empty `dst`".into()));
    }
    if dst.contains(['#', '\n', '\r']) || dst.trim() != dst {
        return Err(Error::Parameter(format!("`dst` cannot be rendered: {dst:?}")));
    }
    Ok(dst)
}

fn canonical_config(g2_generator: &G2Projective, dst: &str) -> ParamsConfig {
    ParamsConfig {
        curve: CURVE_BLS12_381.to_string(),
        g2: Some(hex::encode(g2_generator.to_affine().to_compressed())),
        dst: Some(dst.to_string()),
    }
}

fn parse_generator(encoded: &str) -> Result<G2Projective, Error> {
    let bytes = hex::decode(encoded)?;
    let raw: [u8; 96] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| Error::Parameter(format!("`g2` must be 96 bytes, got {}", bytes.len())))?;
    let point = Option::<G2Affine>::from(G2Affine::from_compressed(&raw))
        .ok_or_else(|| Error::Parameter("`g2` is not a valid G2 point".into()))?;
    let point = G2Projective::from(point);
    if bool::from(point.is_identity()) {
        return Err(Error::Parameter("`g2` is the identity".into()));
    }
    Ok(point)
}
