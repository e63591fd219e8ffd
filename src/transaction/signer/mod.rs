//! Input signing strategies and the transaction signer that drives them
//!
//! A strategy turns one input into an ordered list of signing items. The first item is the
//! signature and the rest are whatever the unlock data needs alongside it. Signing happens in
//! two halves so an external device can produce the signature:
//!
//! 1. [`InputSigner::prepare`] returns the digest followed by the auxiliary items
//! 2. [`InputSigner::complete`] takes a signature and those auxiliary items back
//!
//! Local signing runs both halves with an in-process key, so the two modes produce the same
//! bytes for the same key.

use crate::transaction::input::{InputToSign, MutableTx};
use crate::util::{Error, Result};
use crate::wallet::KeySource;

mod ecdsa;
mod schnorr;
mod transaction_signer;

pub use self::ecdsa::EcdsaInputSigner;
pub use self::schnorr::SchnorrInputSigner;
pub use self::transaction_signer::TransactionSigner;

/// Produces the signing items of one input
pub trait InputSigner {
    /// Returns the digest to sign followed by the auxiliary items, in assembly order
    fn prepare(&self, tx: &MutableTx, n_input: usize) -> Result<Vec<Vec<u8>>>;

    /// Signs the input with a local key and returns the completed signing items
    fn sig_script_data(&self, tx: &MutableTx, n_input: usize) -> Result<Vec<Vec<u8>>>;

    /// Combines a signature with the auxiliary items returned by `prepare`
    fn complete(&self, signature: Vec<u8>, aux: Vec<Vec<u8>>) -> Vec<Vec<u8>>;
}

/// Returns the input at n_input
pub(crate) fn input_at(tx: &MutableTx, n_input: usize) -> Result<&InputToSign> {
    tx.inputs.get(n_input).ok_or(Error::NoPreviousOutput)
}

/// Looks up the private key for an input's derivation coordinates
pub(crate) fn private_key(keys: &dyn KeySource, input: &InputToSign) -> Result<[u8; 32]> {
    let public_key = &input.public_key;
    keys.private_key(public_key.account, public_key.index, public_key.external)
        .map_err(|e| {
            debug!("No private key for {:?}: {}", public_key, e);
            Error::NoPrivateKey
        })
}

/// Splits the digest off the front of prepared items
pub(crate) fn split_digest(mut items: Vec<Vec<u8>>) -> Result<(Vec<u8>, Vec<Vec<u8>>)> {
    if items.is_empty() {
        return Err(Error::BadData("No digest prepared".to_string()));
    }
    let digest = items.remove(0);
    Ok((digest, items))
}
