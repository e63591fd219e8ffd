//! Taproot key-path output keys (BIP-341, no script tree)

use crate::script::op_codes::OP_1;
use crate::script::Script;
use crate::util::{tagged_hash, Error, Result};
use secp256k1::{PublicKey, Scalar, Secp256k1, XOnlyPublicKey};

/// Tag of the hash that tweaks an internal key into an output key
pub const TAP_TWEAK_TAG: &str = "TapTweak";

/// Tag of the hash that turns a taproot preimage into a signature digest
pub const TAP_SIGHASH_TAG: &str = "TapSighash";

/// Parses an internal key given either as 33-byte compressed or 32-byte x-only bytes
pub fn internal_key(raw: &[u8]) -> Result<XOnlyPublicKey> {
    match raw.len() {
        32 => Ok(XOnlyPublicKey::from_slice(raw)?),
        33 => Ok(PublicKey::from_slice(raw)?.x_only_public_key().0),
        len => Err(Error::BadArgument(format!("Bad internal key length {}", len))),
    }
}

/// Returns the tweak committing an internal key to an empty script tree
pub fn tap_tweak(internal_key: &XOnlyPublicKey) -> Result<Scalar> {
    let hash = tagged_hash(TAP_TWEAK_TAG, &internal_key.serialize());
    Scalar::from_be_bytes(hash.0).map_err(|_| Error::BadData("Tweak out of range".to_string()))
}

/// Tweaks an internal key into the key the output commits to
pub fn output_key(internal_key: &XOnlyPublicKey) -> Result<XOnlyPublicKey> {
    let secp = Secp256k1::verification_only();
    let (output_key, _parity) = internal_key.add_tweak(&secp, &tap_tweak(internal_key)?)?;
    Ok(output_key)
}

/// Creates the witness v1 lock script for an internal key
pub fn create_lock_script(internal_key_raw: &[u8]) -> Result<Script> {
    let output_key = output_key(&internal_key(internal_key_raw)?)?;
    let mut script = Script::new();
    script.append(OP_1);
    script.append_data(&output_key.serialize());
    Ok(script)
}
