//! Builds, signs and serializes transactions
//!
//! Input selection, fees and outputs are the job of a [`TransactionBuilder`] supplied by the
//! caller. The creator signs whatever the builder returns and hands back the wire transaction.

use crate::messages::{OutPoint, Tx};
use crate::transaction::input::{InputPubKey, InputToSign, MutableTx, PreviousOutput};
use crate::transaction::signer::TransactionSigner;
use crate::util::{Amount, Result, Serializable};
use std::collections::HashMap;
use std::sync::Arc;

/// Ordering applied to a built transaction's inputs and outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortType {
    /// Keep the builder's order
    None,
    /// Random order
    Shuffle,
    /// Lexicographic order (BIP-69)
    Bip69,
}

impl Default for SortType {
    fn default() -> SortType {
        SortType::Shuffle
    }
}

/// Request to pay an amount to a destination
#[derive(Debug, Clone, Default)]
pub struct SendRequest {
    /// Destination address
    pub destination: String,
    /// Amount to send
    pub amount: Amount,
    /// Fee rate in satoshis per byte
    pub fee_rate: u64,
    /// Whether the fee is added on top of the amount rather than taken out of it
    pub sender_pays_fee: bool,
    /// Ordering of inputs and outputs
    pub sort_type: SortType,
    /// Extra output data keyed by plugin id
    pub plugin_data: HashMap<u8, Vec<u8>>,
    /// Sign even when the builder would otherwise skip signing
    pub force_sign: bool,
}

/// Request to spend one specific unspent output in full
#[derive(Debug, Clone, Default)]
pub struct SendFromRequest {
    /// Destination address
    pub destination: String,
    /// Fee rate in satoshis per byte
    pub fee_rate: u64,
    /// Ordering of inputs and outputs
    pub sort_type: SortType,
    /// Sign even when the builder would otherwise skip signing
    pub force_sign: bool,
}

/// An output owned by the wallet that can be spent
#[derive(Debug, Clone)]
pub struct UnspentOutput {
    /// Location of the output
    pub out_point: OutPoint,
    /// The output and its spending context
    pub previous_output: PreviousOutput,
    /// Key that unlocks the output
    pub public_key: InputPubKey,
}

impl UnspentOutput {
    /// Returns an unsigned input spending this output
    pub fn to_input(&self) -> InputToSign {
        InputToSign::new(
            self.out_point.clone(),
            self.previous_output.clone(),
            self.public_key.clone(),
        )
    }
}

/// Builds unsigned transactions
pub trait TransactionBuilder: Send + Sync {
    /// Selects inputs and builds a transaction paying the request
    ///
    /// Returns `Error::TransactionAlreadyExists` if an equivalent transaction was already built.
    fn build_transaction(&self, request: &SendRequest) -> Result<MutableTx>;

    /// Builds a transaction that spends a single unspent output
    fn build_transaction_from(
        &self,
        unspent: &UnspentOutput,
        request: &SendFromRequest,
    ) -> Result<MutableTx>;
}

/// Creates signed transactions from a builder and a signer
pub struct TransactionCreator {
    builder: Arc<dyn TransactionBuilder>,
    signer: TransactionSigner,
}

impl TransactionCreator {
    /// Creates a transaction creator
    pub fn new(builder: Arc<dyn TransactionBuilder>, signer: TransactionSigner) -> TransactionCreator {
        TransactionCreator { builder, signer }
    }

    /// Builds and signs a transaction paying the request
    pub fn create(&self, request: &SendRequest) -> Result<Tx> {
        let tx = self.builder.build_transaction(request)?;
        self.sign(tx)
    }

    /// Builds and signs a transaction spending one unspent output
    pub fn create_from(&self, unspent: &UnspentOutput, request: &SendFromRequest) -> Result<Tx> {
        let tx = self.builder.build_transaction_from(unspent, request)?;
        self.sign(tx)
    }

    /// Builds and signs a transaction paying the request and serializes it
    pub fn create_raw(&self, request: &SendRequest) -> Result<Vec<u8>> {
        let tx = self.create(request)?;
        let mut b = Vec::with_capacity(tx.size());
        tx.write(&mut b)?;
        Ok(b)
    }

    fn sign(&self, mut tx: MutableTx) -> Result<Tx> {
        self.signer.sign(&mut tx)?;
        let tx = tx.to_tx();
        info!(
            "Created transaction {} ({} inputs, {} outputs)",
            tx.hash().encode(),
            tx.inputs.len(),
            tx.outputs.len()
        );
        Ok(tx)
    }
}
