use super::{input_at, private_key, split_digest, InputSigner};
use crate::network::SigHashParams;
use crate::script::ScriptType;
use crate::transaction::input::MutableTx;
use crate::transaction::sighash::{ConsensusSerializer, SigHashSerializer};
use crate::transaction::sign_ecdsa;
use crate::util::{sha256d, Error, Result};
use crate::wallet::KeySource;
use byteorder::{LittleEndian, WriteBytesExt};
use std::sync::Arc;

/// Signs legacy and witness v0 inputs with ECDSA
///
/// Items are `[signature || sighash_type, public_key]`, or just the signature when spending a
/// pay-to-public-key output whose lock script already holds the key.
#[derive(Clone)]
pub struct EcdsaInputSigner {
    keys: Arc<dyn KeySource>,
    sig_hash: SigHashParams,
    serializer: Arc<dyn SigHashSerializer>,
}

impl EcdsaInputSigner {
    /// Creates a signer using the consensus serializer for the sighash type
    pub fn new(keys: Arc<dyn KeySource>, sig_hash: SigHashParams) -> EcdsaInputSigner {
        let serializer = Arc::new(ConsensusSerializer::new(sig_hash.value));
        EcdsaInputSigner::with_serializer(keys, sig_hash, serializer)
    }

    /// Creates a signer with a custom preimage serializer
    pub fn with_serializer(
        keys: Arc<dyn KeySource>,
        sig_hash: SigHashParams,
        serializer: Arc<dyn SigHashSerializer>,
    ) -> EcdsaInputSigner {
        EcdsaInputSigner {
            keys,
            sig_hash,
            serializer,
        }
    }
}

impl InputSigner for EcdsaInputSigner {
    fn prepare(&self, tx: &MutableTx, n_input: usize) -> Result<Vec<Vec<u8>>> {
        let input = input_at(tx, n_input)?;
        let script_type = input.previous_output.script_type;
        let witness = match script_type {
            ScriptType::P2wpkh | ScriptType::P2wpkhSh => true,
            _ => self.sig_hash.forked,
        };

        let mut preimage = self.serializer.serialize_for_signature(tx, n_input, witness)?;
        preimage.write_u32::<LittleEndian>(self.sig_hash.value as u32)?;
        let digest = sha256d(&preimage);
        trace!("Input {} digest {} (witness rule: {})", n_input, hex::encode(&digest.0), witness);

        let mut items = vec![digest.0.to_vec(), vec![self.sig_hash.value]];
        if script_type != ScriptType::P2pk {
            if input.public_key.raw.is_empty() {
                return Err(Error::NoPreviousOutputAddress);
            }
            items.push(input.public_key.raw.clone());
        }
        Ok(items)
    }

    fn sig_script_data(&self, tx: &MutableTx, n_input: usize) -> Result<Vec<Vec<u8>>> {
        let private_key = private_key(self.keys.as_ref(), input_at(tx, n_input)?)?;
        let (digest, aux) = split_digest(self.prepare(tx, n_input)?)?;
        let signature = sign_ecdsa(&private_key, &digest)?;
        Ok(self.complete(signature, aux))
    }

    fn complete(&self, signature: Vec<u8>, aux: Vec<Vec<u8>>) -> Vec<Vec<u8>> {
        let mut aux = aux.into_iter();
        let mut signature = signature;
        if let Some(sighash_type) = aux.next() {
            signature.extend_from_slice(&sighash_type);
        }
        let mut items = vec![signature];
        items.extend(aux);
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{OutPoint, TxOut};
    use crate::network::Network;
    use crate::script::Script;
    use crate::transaction::input::{InputPubKey, InputToSign, PreviousOutput};
    use crate::transaction::sighash::SIGHASH_ALL;
    use crate::transaction::{p2pkh, verify_ecdsa};
    use crate::util::{hash160, Amount, Hash256};
    use crate::wallet::KeyChain;
    use hex;

    fn raw_hash(s: &str) -> Hash256 {
        let mut hash = Hash256([0; 32]);
        hash.0.clone_from_slice(&hex::decode(s).unwrap());
        hash
    }

    fn output(amount: i64, lock_script: &str) -> TxOut {
        TxOut {
            amount: Amount(amount),
            lock_script: Script(hex::decode(lock_script).unwrap()),
        }
    }

    // Native P2WPKH example from BIP-143
    fn bip143_tx(keys: &mut KeyChain) -> MutableTx {
        let private_key = "619c335025c7f4012e556c2a58b2506e30b8511b53ade95ea316fd8c3286feb9";
        let mut key = [0; 32];
        key.clone_from_slice(&hex::decode(private_key).unwrap());
        let public_key = keys.insert(0, 1, true, key).unwrap();

        let p2pk = "2103c9f4836b9a4f77fc0d81f7bcb01b7f1b35916864b9476c241ce9fc198bd25432ac";
        let prev0 = PreviousOutput::new(Amount(625000000), Script(hex::decode(p2pk).unwrap()));
        let p2wpkh = "00141d0f172a0ecb48aee1be1f2687d2963ae33f71a1";
        let prev1 = PreviousOutput::new(Amount(600000000), Script(hex::decode(p2wpkh).unwrap()));

        let mut tx = MutableTx::new(1, 17);
        let out0 = OutPoint {
            hash: raw_hash("fff7f7881a8099afa6940d42d1e7f6362bec38171ea3edf433541db4e4ad969f"),
            index: 0,
        };
        let mut input0 = InputToSign::new(out0, prev0, InputPubKey::default());
        input0.input.sequence = 0xffffffee;
        tx.inputs.push(input0);
        let out1 = OutPoint {
            hash: raw_hash("ef51e1b804cc89d182d279655c3aa89e815b1b309fe287d9b2b55d57b90ec68a"),
            index: 1,
        };
        let pubkey = InputPubKey {
            raw: public_key.to_vec(),
            account: 0,
            index: 1,
            external: true,
        };
        tx.inputs.push(InputToSign::new(out1, prev1, pubkey));
        tx.outputs.push(output(
            112340000,
            "76a9148280b37df378db99f66f85c95a783a76ac7a6d5988ac",
        ));
        tx.outputs.push(output(
            223450000,
            "76a9143bde42dbee7e4dbe6a21b2d50ce2f0167faa815988ac",
        ));
        tx
    }

    #[test]
    fn prepare_p2wpkh() {
        let mut keys = KeyChain::new();
        let tx = bip143_tx(&mut keys);
        let signer = EcdsaInputSigner::new(Arc::new(keys), Network::Mainnet.sig_hash());
        let items = signer.prepare(&tx, 1).unwrap();
        assert!(items.len() == 3);
        let expected = "c37af31116d1b27caf68aae9e3ac82f1477929014d5b917657d0eb49478cb670";
        assert!(hex::encode(&items[0]) == expected);
        assert!(items[1] == vec![SIGHASH_ALL]);
        assert!(items[2] == tx.inputs[1].public_key.raw);
    }

    #[test]
    fn sign_p2wpkh() {
        let mut keys = KeyChain::new();
        let tx = bip143_tx(&mut keys);
        let signer = EcdsaInputSigner::new(Arc::new(keys), Network::Mainnet.sig_hash());
        let items = signer.sig_script_data(&tx, 1).unwrap();
        assert!(items.len() == 2);
        let sig = &items[0];
        assert!(sig[sig.len() - 1] == SIGHASH_ALL);
        let digest = signer.prepare(&tx, 1).unwrap().remove(0);
        let public_key = &tx.inputs[1].public_key.raw;
        assert!(verify_ecdsa(public_key, &digest, &sig[..sig.len() - 1]).is_ok());
        assert!(items[1] == *public_key);
    }

    #[test]
    fn p2pk_omits_public_key() {
        let mut keys = KeyChain::new();
        let public_key = keys.insert(2, 0, false, [4; 32]).unwrap();
        let mut lock_script = Script::new();
        lock_script.append_data(&public_key);
        lock_script.append(crate::script::op_codes::OP_CHECKSIG);
        let prev = PreviousOutput::new(Amount(5000), lock_script);
        assert!(prev.script_type == ScriptType::P2pk);
        let pubkey = InputPubKey {
            raw: public_key.to_vec(),
            account: 2,
            index: 0,
            external: false,
        };
        let mut tx = MutableTx::new(1, 0);
        tx.inputs.push(InputToSign::new(OutPoint::default(), prev, pubkey));
        tx.outputs.push(output(4000, "51"));

        let signer = EcdsaInputSigner::new(Arc::new(keys), Network::Mainnet.sig_hash());
        assert!(signer.prepare(&tx, 0).unwrap().len() == 2);
        let items = signer.sig_script_data(&tx, 0).unwrap();
        assert!(items.len() == 1);
    }

    #[test]
    fn forked_network_uses_fork_id() {
        let mut keys = KeyChain::new();
        let public_key = keys.insert(0, 0, true, [5; 32]).unwrap();
        let lock_script = p2pkh::create_lock_script(&hash160(&public_key));
        let prev = PreviousOutput::new(Amount(5000), lock_script.clone());
        let pubkey = InputPubKey {
            raw: public_key.to_vec(),
            account: 0,
            index: 0,
            external: true,
        };
        let mut tx = MutableTx::new(2, 0);
        tx.inputs.push(InputToSign::new(OutPoint::default(), prev, pubkey));
        tx.outputs.push(TxOut {
            amount: Amount(4000),
            lock_script,
        });

        let keys: Arc<dyn KeySource> = Arc::new(keys);
        let legacy = EcdsaInputSigner::new(keys.clone(), Network::Mainnet.sig_hash());
        let forked = EcdsaInputSigner::new(keys, Network::BitcoinSv.sig_hash());
        let a = legacy.sig_script_data(&tx, 0).unwrap();
        let b = forked.sig_script_data(&tx, 0).unwrap();
        assert!(a[0][a[0].len() - 1] == 0x01);
        assert!(b[0][b[0].len() - 1] == 0x41);
        assert!(legacy.prepare(&tx, 0).unwrap()[0] != forked.prepare(&tx, 0).unwrap()[0]);
    }

    #[test]
    fn complete_folds_sighash_type() {
        let signer = EcdsaInputSigner::new(Arc::new(KeyChain::new()), SigHashParams::forked());
        let items = signer.complete(vec![1, 2], vec![vec![0x41], vec![3; 33]]);
        assert!(items == vec![vec![1, 2, 0x41], vec![3; 33]]);
        let items = signer.complete(vec![1, 2], vec![vec![0x41]]);
        assert!(items == vec![vec![1, 2, 0x41]]);
    }

    #[test]
    fn errors() {
        let mut keys = KeyChain::new();
        let tx = bip143_tx(&mut keys);
        let signer = EcdsaInputSigner::new(Arc::new(KeyChain::new()), SigHashParams::standard());
        match signer.sig_script_data(&tx, 1) {
            Err(Error::NoPrivateKey) => {}
            _ => panic!("expected NoPrivateKey"),
        }
        match signer.prepare(&tx, 2) {
            Err(Error::NoPreviousOutput) => {}
            _ => panic!("expected NoPreviousOutput"),
        }
        let mut tx = tx;
        tx.inputs[1].public_key.raw.clear();
        match signer.prepare(&tx, 1) {
            Err(Error::NoPreviousOutputAddress) => {}
            _ => panic!("expected NoPreviousOutputAddress"),
        }
    }
}
