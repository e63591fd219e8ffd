//! Build and sign transactions
//!
//! # Examples
//!
//! Sign a pay-to-public-key-hash input with a key held in memory:
//!
//! ```rust
//! use std::sync::Arc;
//! use txsign::messages::{OutPoint, TxOut};
//! use txsign::network::Network;
//! use txsign::transaction::input::{InputPubKey, InputToSign, MutableTx, PreviousOutput};
//! use txsign::transaction::p2pkh;
//! use txsign::transaction::signer::TransactionSigner;
//! use txsign::util::{hash160, Amount, Hash256};
//! use txsign::wallet::KeyChain;
//!
//! let mut keys = KeyChain::new();
//! let public_key = keys.insert(0, 0, true, [1; 32]).unwrap();
//! let lock_script = p2pkh::create_lock_script(&hash160(&public_key));
//!
//! // Use real values here
//! let out_point = OutPoint { hash: Hash256([7; 32]), index: 0 };
//! let prev = PreviousOutput::new(Amount(10_000), lock_script.clone());
//! let pubkey = InputPubKey { raw: public_key.to_vec(), account: 0, index: 0, external: true };
//!
//! let mut tx = MutableTx::new(1, 0);
//! tx.inputs.push(InputToSign::new(out_point, prev, pubkey));
//! tx.outputs.push(TxOut { amount: Amount(9_000), lock_script });
//!
//! let signer = TransactionSigner::new(Arc::new(keys), Network::Mainnet.sig_hash());
//! signer.sign(&mut tx).unwrap();
//! assert!(!tx.inputs[0].input.unlock_script.is_empty());
//! assert!(!tx.segwit);
//! ```

use crate::util::{Error, Result};
use secp256k1::{ecdsa, schnorr, Keypair, Message, PublicKey, Secp256k1, SecretKey};

pub mod creator;
pub mod input;
pub mod p2pkh;
pub mod p2sh;
pub mod segwit;
pub mod sighash;
pub mod signer;
pub mod taproot;

/// Generates a low-S DER ECDSA signature over a 32-byte digest
///
/// The sighash type byte is not appended.
pub fn sign_ecdsa(private_key: &[u8; 32], digest: &[u8]) -> Result<Vec<u8>> {
    let secp = Secp256k1::signing_only();
    let message = Message::from_digest_slice(digest)?;
    let secret_key = SecretKey::from_slice(private_key)?;
    let mut signature = secp.sign_ecdsa(&message, &secret_key);
    signature.normalize_s();
    Ok(signature.serialize_der().to_vec())
}

/// Verifies a DER ECDSA signature over a 32-byte digest
pub fn verify_ecdsa(public_key: &[u8], digest: &[u8], signature: &[u8]) -> Result<()> {
    let secp = Secp256k1::verification_only();
    let message = Message::from_digest_slice(digest)?;
    let signature = ecdsa::Signature::from_der(signature)?;
    let public_key = PublicKey::from_slice(public_key)?;
    secp.verify_ecdsa(&message, &signature, &public_key)?;
    Ok(())
}

/// Generates a 64-byte BIP-340 signature for a taproot key-path spend
///
/// The key is tweaked with the TapTweak of its own x-only public key, committing to no script
/// tree. No auxiliary randomness is used so the signature is deterministic.
pub fn sign_schnorr(private_key: &[u8; 32], digest: &[u8]) -> Result<Vec<u8>> {
    let secp = Secp256k1::new();
    let message = Message::from_digest_slice(digest)?;
    let secret_key = SecretKey::from_slice(private_key)?;
    let keypair = Keypair::from_secret_key(&secp, &secret_key);
    let (internal_key, _parity) = keypair.x_only_public_key();
    let tweaked = keypair.add_xonly_tweak(&secp, &taproot::tap_tweak(&internal_key)?)?;
    let signature = secp.sign_schnorr_no_aux_rand(&message, &tweaked);
    Ok(signature.serialize().to_vec())
}

/// Verifies a taproot key-path signature against an output's internal key
pub fn verify_schnorr(internal_key_raw: &[u8], digest: &[u8], signature: &[u8]) -> Result<()> {
    if signature.len() != 64 {
        let msg = format!("Bad schnorr signature length {}", signature.len());
        return Err(Error::BadData(msg));
    }
    let secp = Secp256k1::verification_only();
    let message = Message::from_digest_slice(digest)?;
    let signature = schnorr::Signature::from_slice(signature)?;
    let output_key = taproot::output_key(&taproot::internal_key(internal_key_raw)?)?;
    secp.verify_schnorr(&signature, &message, &output_key)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::sha256d;

    #[test]
    fn ecdsa_sign_verify() {
        let secp = Secp256k1::signing_only();
        let private_key = [3; 32];
        let public_key = PublicKey::from_secret_key(&secp, &SecretKey::from_slice(&private_key).unwrap());
        let digest = sha256d(b"message").0;
        let sig = sign_ecdsa(&private_key, &digest).unwrap();
        assert!(sig[0] == 0x30);
        assert!(sig == sign_ecdsa(&private_key, &digest).unwrap());
        assert!(verify_ecdsa(&public_key.serialize(), &digest, &sig).is_ok());
        let other = sha256d(b"other").0;
        assert!(verify_ecdsa(&public_key.serialize(), &other, &sig).is_err());
    }

    #[test]
    fn ecdsa_low_s() {
        let digest = sha256d(b"low s").0;
        for i in 1..20u8 {
            let sig = sign_ecdsa(&[i; 32], &digest).unwrap();
            let parsed = ecdsa::Signature::from_der(&sig).unwrap();
            let mut normalized = parsed;
            normalized.normalize_s();
            assert!(parsed == normalized);
        }
    }

    #[test]
    fn schnorr_sign_verify() {
        let secp = Secp256k1::new();
        let private_key = [9; 32];
        let secret_key = SecretKey::from_slice(&private_key).unwrap();
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);
        let digest = sha256d(b"taproot").0;
        let sig = sign_schnorr(&private_key, &digest).unwrap();
        assert!(sig.len() == 64);
        assert!(sig == sign_schnorr(&private_key, &digest).unwrap());
        assert!(verify_schnorr(&public_key.serialize(), &digest, &sig).is_ok());
        let other = sha256d(b"other").0;
        assert!(verify_schnorr(&public_key.serialize(), &other, &sig).is_err());
        assert!(verify_schnorr(&public_key.serialize(), &digest, &sig[1..]).is_err());
    }

    #[test]
    fn bad_inputs() {
        assert!(sign_ecdsa(&[0; 32], &[1; 32]).is_err());
        assert!(sign_ecdsa(&[1; 32], &[1; 31]).is_err());
        assert!(sign_schnorr(&[0; 32], &[1; 32]).is_err());
    }
}
