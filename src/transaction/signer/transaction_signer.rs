use super::{split_digest, EcdsaInputSigner, InputSigner, SchnorrInputSigner};
use crate::network::SigHashParams;
use crate::script::{Script, ScriptType};
use crate::transaction::input::{InputToSign, MutableTx, UnlockScriptBuilder};
use crate::transaction::sighash::SigHashSerializer;
use crate::transaction::{p2sh, segwit};
use crate::util::{Error, Result};
use crate::wallet::KeySource;
use std::sync::Arc;

/// Signs every input of a transaction and writes its unlock script and witness
///
/// Taproot inputs are signed with Schnorr and all other supported inputs with ECDSA. Signing
/// stops at the first input that fails. Inputs signed before it keep their new unlock data, so
/// a transaction that failed to sign should be rebuilt rather than signed again.
pub struct TransactionSigner {
    ecdsa: EcdsaInputSigner,
    schnorr: SchnorrInputSigner,
}

/// Unlock data for one input, computed in full before anything is written
struct Unlock {
    unlock_script: Script,
    witness: Vec<Vec<u8>>,
}

impl TransactionSigner {
    /// Creates a transaction signer using the consensus preimage serializer
    pub fn new(keys: Arc<dyn KeySource>, sig_hash: SigHashParams) -> TransactionSigner {
        TransactionSigner {
            ecdsa: EcdsaInputSigner::new(keys.clone(), sig_hash),
            schnorr: SchnorrInputSigner::new(keys),
        }
    }

    /// Creates a transaction signer whose strategies share a custom preimage serializer
    pub fn with_serializer(
        keys: Arc<dyn KeySource>,
        sig_hash: SigHashParams,
        serializer: Arc<dyn SigHashSerializer>,
    ) -> TransactionSigner {
        TransactionSigner {
            ecdsa: EcdsaInputSigner::with_serializer(keys.clone(), sig_hash, serializer.clone()),
            schnorr: SchnorrInputSigner::with_serializer(keys, serializer),
        }
    }

    /// Signs every input with keys from the key source
    pub fn sign(&self, tx: &mut MutableTx) -> Result<()> {
        for n_input in 0..tx.inputs.len() {
            let items = self
                .strategy(tx.inputs[n_input].previous_output.script_type)
                .and_then(|strategy| strategy.sig_script_data(tx, n_input));
            self.finish(tx, n_input, items, "local")?;
        }
        Ok(())
    }

    /// Signs every input by passing its digest to an external signer
    ///
    /// The external signer gets the 32-byte digest and the input being signed, and returns
    /// the signature without a sighash type byte: DER for ECDSA inputs, 64 bytes for taproot.
    pub fn sign_with<F>(&self, tx: &mut MutableTx, mut external: F) -> Result<()>
    where
        F: FnMut(&[u8], &InputToSign) -> Result<Vec<u8>>,
    {
        for n_input in 0..tx.inputs.len() {
            let items = self.external_items(tx, n_input, &mut external);
            self.finish(tx, n_input, items, "external")?;
        }
        Ok(())
    }

    fn strategy(&self, script_type: ScriptType) -> Result<&dyn InputSigner> {
        match script_type {
            ScriptType::P2tr => Ok(&self.schnorr),
            ScriptType::Unknown => Err(Error::NotSupportedScriptType),
            _ => Ok(&self.ecdsa),
        }
    }

    fn external_items<F>(&self, tx: &MutableTx, n_input: usize, external: &mut F) -> Result<Vec<Vec<u8>>>
    where
        F: FnMut(&[u8], &InputToSign) -> Result<Vec<u8>>,
    {
        let input = &tx.inputs[n_input];
        let strategy = self.strategy(input.previous_output.script_type)?;
        let (digest, aux) = split_digest(strategy.prepare(tx, n_input)?)?;
        let signature = external(&digest, input)?;
        Ok(strategy.complete(signature, aux))
    }

    fn finish(
        &self,
        tx: &mut MutableTx,
        n_input: usize,
        items: Result<Vec<Vec<u8>>>,
        mode: &str,
    ) -> Result<()> {
        let script_type = tx.inputs[n_input].previous_output.script_type;
        let unlock = match items.and_then(|items| assemble(&tx.inputs[n_input], items)) {
            Ok(unlock) => unlock,
            Err(e) => {
                warn!("Failed to sign input {} ({:?}): {}", n_input, script_type, e);
                return Err(e);
            }
        };

        let input = &mut tx.inputs[n_input].input;
        input.unlock_script = unlock.unlock_script;
        input.witness = unlock.witness;
        debug!("Signed input {} {} ({:?}, {})", n_input, input.prev_output, script_type, mode);
        if script_type.is_witness() {
            tx.segwit = true;
        }
        Ok(())
    }
}

/// Builds the unlock script and witness of an input from its signing items
fn assemble(input: &InputToSign, items: Vec<Vec<u8>>) -> Result<Unlock> {
    let previous_output = &input.previous_output;
    let unlock = match previous_output.script_type {
        ScriptType::P2pkh => Unlock {
            unlock_script: Script::from_pushes(&items),
            witness: vec![],
        },
        ScriptType::P2wpkh | ScriptType::P2tr => Unlock {
            unlock_script: Script::new(),
            witness: items,
        },
        ScriptType::P2wpkhSh => Unlock {
            unlock_script: segwit::create_nested_unlock_script(&input.public_key.hash160()),
            witness: items,
        },
        ScriptType::P2sh => {
            let unlock_script = match &previous_output.unlock_builder {
                UnlockScriptBuilder::Custom(builder) => builder.build(&items),
                UnlockScriptBuilder::Standard => match &previous_output.redeem_script {
                    Some(redeem_script) => p2sh::create_unlock_script(&items, redeem_script),
                    None => return Err(Error::NoRedeemScript),
                },
            };
            Unlock {
                unlock_script,
                witness: vec![],
            }
        }
        ScriptType::P2pk | ScriptType::Unknown => return Err(Error::NotSupportedScriptType),
    };
    Ok(unlock)
}
