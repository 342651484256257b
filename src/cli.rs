//! Commands behind the `bls-sig` binary.
//!
//! Keys and signatures travel as JSON files with base64 payloads. `keygen`
//! writes the secret and public halves to separate files so `verify` only ever
//! reads public material.

use std::fs;
use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::keys::{PublicKey, SecretKey, generate_keypair};
use crate::params::SystemParameters;
use crate::sign::sign;
use crate::types::Encoding;
use crate::verify::{Verdict, verify_encoded};

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

pub const USAGE: &str = "bls-sig <cmd> [args]

Commands:
  params --out <file> [--random-generator] [--dst <tag>]
  keygen --params <file> --out <secret file> --pub-out <public file>
  sign --params <file> --key <secret file> --digest <text> [--encoding full|compressed|x-only] --out <file>
  verify --params <file> --pub <public file> --digest <text> --sig <file>";

#[derive(Debug, Serialize, Deserialize)]
pub struct SecretKeyFile {
    pub secret_b64: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PublicKeyFile {
    pub public_b64: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignatureFile {
    pub encoding: Encoding,
    pub signature_b64: String,
}

/// Runs one command. `args[0]` names the command, the rest are its flags.
///
/// `Ok(false)` means the command ran but its answer was negative, i.e. a
/// signature that did not verify.
pub fn run(args: &[String]) -> CliResult<bool> {
    let Some((cmd, rest)) = args.split_first() else {
        return Err(USAGE.into());
    };
    match cmd.as_str() {
        "params" => cmd_params(rest),
        "keygen" => cmd_keygen(rest),
        "sign" => cmd_sign(rest),
        "verify" => cmd_verify(rest),
        other => Err(format!("unknown command `{other}`\n\n{USAGE}").into()),
    }
}

fn cmd_params(args: &[String]) -> CliResult<bool> {
    let out = require_path(args, "--out")?;
    let dst = get_str(args, "--dst");
    let params = if has_flag(args, "--random-generator") {
        SystemParameters::with_random_generator(&mut OsRng, dst.as_deref())?
    } else {
        let mut config = SystemParameters::bls12_381().to_config();
        config.dst = dst.or(config.dst);
        SystemParameters::from_config(&config)?
    };
    fs::write(&out, params.to_config().render())?;
    info!(path = %out.display(), fingerprint = %hex::encode(params.fingerprint()), "wrote parameters");
    Ok(true)
}

fn cmd_keygen(args: &[String]) -> CliResult<bool> {
    let params = load_params(&require_path(args, "--params")?)?;
    let out = require_path(args, "--out")?;
    let pub_out = require_path(args, "--pub-out")?;
    if out == pub_out {
        return Err("--out and --pub-out must differ".into());
    }

    let keys = generate_keypair(&params, &mut OsRng)?;
    let secret = SecretKeyFile {
        secret_b64: STANDARD.encode(keys.secret.to_bytes().as_slice()),
    };
    let json = Zeroizing::new(serde_json::to_string_pretty(&secret)?);
    fs::write(&out, json.as_bytes())?;

    let public = PublicKeyFile {
        public_b64: STANDARD.encode(keys.public.encode(Encoding::Compressed)?),
    };
    fs::write(&pub_out, serde_json::to_string_pretty(&public)?)?;
    info!(secret = %out.display(), public = %pub_out.display(), "wrote key pair");
    Ok(true)
}

fn cmd_sign(args: &[String]) -> CliResult<bool> {
    let params = load_params(&require_path(args, "--params")?)?;
    let key = load_secret(&require_path(args, "--key")?)?;
    let digest = require_str(args, "--digest")?;
    let encoding = match get_str(args, "--encoding") {
        Some(e) => e.parse()?,
        None => Encoding::Full,
    };
    let out = require_path(args, "--out")?;

    let secret_bytes = Zeroizing::new(STANDARD.decode(key.secret_b64.as_bytes())?);
    let secret = SecretKey::from_bytes(&params, &secret_bytes)?;
    let signature = sign(&params, &secret, digest.as_bytes())?;
    let bytes = signature.encode(encoding)?;
    debug!(?encoding, len = bytes.len(), "signed digest");

    let file = SignatureFile {
        encoding,
        signature_b64: STANDARD.encode(&bytes),
    };
    fs::write(&out, serde_json::to_string_pretty(&file)?)?;
    info!(path = %out.display(), "wrote signature");
    Ok(true)
}

fn cmd_verify(args: &[String]) -> CliResult<bool> {
    let params = load_params(&require_path(args, "--params")?)?;
    let key: PublicKeyFile =
        serde_json::from_str(&fs::read_to_string(require_path(args, "--pub")?)?)?;
    let digest = require_str(args, "--digest")?;
    let sig_file: SignatureFile =
        serde_json::from_str(&fs::read_to_string(require_path(args, "--sig")?)?)?;

    let public = PublicKey::decode(
        &params,
        &STANDARD.decode(key.public_b64.as_bytes())?,
        Encoding::Compressed,
    )?;
    let bytes = STANDARD.decode(sig_file.signature_b64.as_bytes())?;
    match verify_encoded(&params, &bytes, sig_file.encoding, digest.as_bytes(), &public) {
        Verdict::Valid => {
            println!("valid");
            Ok(true)
        }
        Verdict::Invalid(reason) => {
            warn!(?reason, "signature rejected");
            println!("invalid: {reason:?}");
            Ok(false)
        }
    }
}

fn load_params(path: &Path) -> CliResult<SystemParameters> {
    let bytes = fs::read(path)?;
    Ok(SystemParameters::initialize(&bytes)?)
}

fn load_secret(path: &Path) -> CliResult<SecretKeyFile> {
    let text = Zeroizing::new(fs::read_to_string(path)?);
    Ok(serde_json::from_str(&text)?)
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn get_str(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|v| v.to_string())
}

fn require_str(args: &[String], key: &str) -> CliResult<String> {
    get_str(args, key).ok_or_else(|| format!("missing {key}").into())
}

fn require_path(args: &[String], key: &str) -> CliResult<PathBuf> {
    require_str(args, key).map(PathBuf::from)
}
