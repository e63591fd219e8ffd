use super::{input_at, private_key, split_digest, InputSigner};
use crate::script::ScriptType;
use crate::transaction::input::MutableTx;
use crate::transaction::sighash::{ConsensusSerializer, SigHashSerializer};
use crate::transaction::sign_schnorr;
use crate::transaction::taproot::TAP_SIGHASH_TAG;
use crate::util::{tagged_hash, Error, Result};
use crate::wallet::KeySource;
use std::sync::Arc;

/// Signs taproot key-path inputs with BIP-340 Schnorr signatures
///
/// The only item is the 64-byte signature. SIGHASH_DEFAULT is implied and no type byte is
/// appended.
#[derive(Clone)]
pub struct SchnorrInputSigner {
    keys: Arc<dyn KeySource>,
    serializer: Arc<dyn SigHashSerializer>,
}

impl SchnorrInputSigner {
    /// Creates a signer using the consensus serializer
    pub fn new(keys: Arc<dyn KeySource>) -> SchnorrInputSigner {
        SchnorrInputSigner::with_serializer(keys, Arc::new(ConsensusSerializer::default()))
    }

    /// Creates a signer with a custom preimage serializer
    pub fn with_serializer(
        keys: Arc<dyn KeySource>,
        serializer: Arc<dyn SigHashSerializer>,
    ) -> SchnorrInputSigner {
        SchnorrInputSigner { keys, serializer }
    }
}

impl InputSigner for SchnorrInputSigner {
    fn prepare(&self, tx: &MutableTx, n_input: usize) -> Result<Vec<Vec<u8>>> {
        let input = input_at(tx, n_input)?;
        if input.previous_output.script_type != ScriptType::P2tr {
            return Err(Error::NotSupportedScriptType);
        }
        let preimage = self.serializer.serialize_for_taproot_signature(tx, n_input)?;
        let digest = tagged_hash(TAP_SIGHASH_TAG, &preimage);
        trace!("Input {} taproot digest {}", n_input, hex::encode(&digest.0));
        Ok(vec![digest.0.to_vec()])
    }

    fn sig_script_data(&self, tx: &MutableTx, n_input: usize) -> Result<Vec<Vec<u8>>> {
        let private_key = private_key(self.keys.as_ref(), input_at(tx, n_input)?)?;
        let (digest, aux) = split_digest(self.prepare(tx, n_input)?)?;
        let signature = sign_schnorr(&private_key, &digest)?;
        Ok(self.complete(signature, aux))
    }

    fn complete(&self, signature: Vec<u8>, _aux: Vec<Vec<u8>>) -> Vec<Vec<u8>> {
        vec![signature]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{OutPoint, TxOut};
    use crate::script::Script;
    use crate::transaction::input::{InputPubKey, InputToSign, PreviousOutput};
    use crate::transaction::{taproot, verify_schnorr};
    use crate::util::{Amount, Hash256};
    use crate::wallet::KeyChain;

    fn taproot_tx(keys: &mut KeyChain) -> MutableTx {
        let public_key = keys.insert(1, 3, true, [0x2a; 32]).unwrap();
        let lock_script = taproot::create_lock_script(&public_key).unwrap();
        let prev = PreviousOutput::new(Amount(50_000), lock_script);
        let pubkey = InputPubKey {
            raw: public_key.to_vec(),
            account: 1,
            index: 3,
            external: true,
        };
        let out_point = OutPoint {
            hash: Hash256([0xab; 32]),
            index: 2,
        };
        let mut tx = MutableTx::new(2, 0);
        tx.inputs.push(InputToSign::new(out_point, prev, pubkey));
        tx.outputs.push(TxOut {
            amount: Amount(49_000),
            lock_script: Script(vec![0x51]),
        });
        tx
    }

    #[test]
    fn sign_key_path() {
        let mut keys = KeyChain::new();
        let tx = taproot_tx(&mut keys);
        let signer = SchnorrInputSigner::new(Arc::new(keys));
        let prepared = signer.prepare(&tx, 0).unwrap();
        assert!(prepared.len() == 1 && prepared[0].len() == 32);
        let items = signer.sig_script_data(&tx, 0).unwrap();
        assert!(items.len() == 1 && items[0].len() == 64);
        let internal_key = &tx.inputs[0].public_key.raw;
        assert!(verify_schnorr(internal_key, &prepared[0], &items[0]).is_ok());
    }

    #[test]
    fn deterministic() {
        let mut keys = KeyChain::new();
        let tx = taproot_tx(&mut keys);
        let signer = SchnorrInputSigner::new(Arc::new(keys));
        assert!(signer.sig_script_data(&tx, 0).unwrap() == signer.sig_script_data(&tx, 0).unwrap());
    }

    #[test]
    fn complete_is_signature_only() {
        let signer = SchnorrInputSigner::new(Arc::new(KeyChain::new()));
        assert!(signer.complete(vec![7; 64], vec![]) == vec![vec![7; 64]]);
    }

    #[test]
    fn errors() {
        let mut keys = KeyChain::new();
        let mut tx = taproot_tx(&mut keys);
        let signer = SchnorrInputSigner::new(Arc::new(KeyChain::new()));
        match signer.sig_script_data(&tx, 0) {
            Err(Error::NoPrivateKey) => {}
            _ => panic!("expected NoPrivateKey"),
        }
        tx.inputs[0].previous_output.script_type = ScriptType::P2wpkh;
        match signer.prepare(&tx, 0) {
            Err(Error::NotSupportedScriptType) => {}
            _ => panic!("expected NotSupportedScriptType"),
        }
        match signer.prepare(&tx, 1) {
            Err(Error::NoPreviousOutput) => {}
            _ => panic!("expected NoPreviousOutput"),
        }
    }
}
