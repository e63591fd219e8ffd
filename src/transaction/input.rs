//! Transaction-in-progress: inputs awaiting signatures and their spending context

use crate::messages::{OutPoint, Tx, TxIn, TxOut, SEQUENCE_FINAL};
use crate::script::{Script, ScriptType};
use crate::util::{hash160, Amount, Hash160};
use std::fmt;
use std::sync::Arc;

/// Builds a non-standard signature script from the signing items of an input
pub trait SigScriptBuilder: Send + Sync {
    /// Returns the complete signature script for the ordered signing items
    fn build(&self, items: &[Vec<u8>]) -> Script;
}

impl<F> SigScriptBuilder for F
where
    F: Fn(&[Vec<u8>]) -> Script + Send + Sync,
{
    fn build(&self, items: &[Vec<u8>]) -> Script {
        self(items)
    }
}

/// How the signature script of a pay-to-script-hash input is assembled
#[derive(Clone)]
pub enum UnlockScriptBuilder {
    /// Push every signing item followed by the redeem script
    Standard,
    /// Hand the signing items to a custom builder and use its script verbatim
    Custom(Arc<dyn SigScriptBuilder>),
}

impl UnlockScriptBuilder {
    /// Wraps a custom signature script builder
    pub fn custom<B: SigScriptBuilder + 'static>(builder: B) -> UnlockScriptBuilder {
        UnlockScriptBuilder::Custom(Arc::new(builder))
    }
}

impl Default for UnlockScriptBuilder {
    fn default() -> UnlockScriptBuilder {
        UnlockScriptBuilder::Standard
    }
}

impl fmt::Debug for UnlockScriptBuilder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnlockScriptBuilder::Standard => f.write_str("Standard"),
            UnlockScriptBuilder::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// The output being spent by an input
#[derive(Debug, Clone)]
pub struct PreviousOutput {
    /// Value of the output
    pub amount: Amount,
    /// Lock script of the output
    pub lock_script: Script,
    /// Spending condition category of the lock script
    pub script_type: ScriptType,
    /// Script whose hash the lock script commits to, for pay-to-script-hash outputs
    pub redeem_script: Option<Script>,
    /// Signature script assembly for pay-to-script-hash outputs
    pub unlock_builder: UnlockScriptBuilder,
}

impl PreviousOutput {
    /// Creates a previous output, classifying its lock script
    pub fn new(amount: Amount, lock_script: Script) -> PreviousOutput {
        let script_type = ScriptType::from_lock_script(&lock_script.0);
        PreviousOutput {
            amount,
            lock_script,
            script_type,
            redeem_script: None,
            unlock_builder: UnlockScriptBuilder::Standard,
        }
    }

    /// Overrides the classified script type
    ///
    /// Nested witness outputs look like any other P2SH output and must be marked explicitly.
    pub fn with_script_type(mut self, script_type: ScriptType) -> PreviousOutput {
        self.script_type = script_type;
        self
    }

    /// Sets the redeem script revealed when spending
    pub fn with_redeem_script(mut self, redeem_script: Script) -> PreviousOutput {
        self.redeem_script = Some(redeem_script);
        self
    }

    /// Sets a custom signature script builder
    pub fn with_unlock_builder(mut self, unlock_builder: UnlockScriptBuilder) -> PreviousOutput {
        self.unlock_builder = unlock_builder;
        self
    }
}

/// Public key that authorizes an input, with the coordinates of its private key
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct InputPubKey {
    /// Serialized public key, 33 bytes compressed
    pub raw: Vec<u8>,
    /// Account index
    pub account: u32,
    /// Address index within the branch
    pub index: u32,
    /// External (receive) branch if true, internal (change) branch otherwise
    pub external: bool,
}

impl InputPubKey {
    /// Hash160 of the public key
    pub fn hash160(&self) -> Hash160 {
        hash160(&self.raw)
    }
}

/// An input together with the context needed to sign it
#[derive(Debug, Clone)]
pub struct InputToSign {
    /// The input whose unlock script and witness are written during signing
    pub input: TxIn,
    /// The output this input spends
    pub previous_output: PreviousOutput,
    /// The key that must sign
    pub public_key: InputPubKey,
}

impl InputToSign {
    /// Creates an input spending out_point with a final sequence
    pub fn new(
        out_point: OutPoint,
        previous_output: PreviousOutput,
        public_key: InputPubKey,
    ) -> InputToSign {
        InputToSign {
            input: TxIn {
                prev_output: out_point,
                unlock_script: Script::new(),
                sequence: SEQUENCE_FINAL,
                witness: vec![],
            },
            previous_output,
            public_key,
        }
    }
}

/// Transaction being signed
///
/// The segwit flag is raised by the first input that needs a witness and never lowered.
#[derive(Debug, Clone)]
pub struct MutableTx {
    /// Transaction version
    pub version: u32,
    /// Lock time
    pub lock_time: u32,
    /// Whether any input is unlocked by a witness
    pub segwit: bool,
    /// Inputs in transaction order
    pub inputs: Vec<InputToSign>,
    /// Outputs in transaction order
    pub outputs: Vec<TxOut>,
}

impl MutableTx {
    /// Creates an empty transaction
    pub fn new(version: u32, lock_time: u32) -> MutableTx {
        MutableTx {
            version,
            lock_time,
            segwit: false,
            inputs: vec![],
            outputs: vec![],
        }
    }

    /// Returns the wire transaction
    pub fn to_tx(&self) -> Tx {
        Tx {
            version: self.version,
            inputs: self.inputs.iter().map(|i| i.input.clone()).collect(),
            outputs: self.outputs.clone(),
            lock_time: self.lock_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::p2pkh;
    use crate::util::Hash256;

    #[test]
    fn previous_output_classifies() {
        let lock_script = p2pkh::create_lock_script(&Hash160([1; 20]));
        let prev = PreviousOutput::new(Amount(10), lock_script);
        assert!(prev.script_type == ScriptType::P2pkh);
        let prev = prev.with_script_type(ScriptType::Unknown);
        assert!(prev.script_type == ScriptType::Unknown);
    }

    #[test]
    fn custom_builder() {
        let builder = UnlockScriptBuilder::custom(|items: &[Vec<u8>]| Script(items.concat()));
        match builder {
            UnlockScriptBuilder::Custom(b) => {
                assert!(b.build(&[vec![1], vec![2, 3]]) == Script(vec![1, 2, 3]))
            }
            UnlockScriptBuilder::Standard => panic!("expected custom"),
        }
        assert!(format!("{:?}", UnlockScriptBuilder::default()) == "Standard");
    }

    #[test]
    fn to_tx() {
        let mut mtx = MutableTx::new(2, 7);
        let out_point = OutPoint {
            hash: Hash256([3; 32]),
            index: 1,
        };
        let prev = PreviousOutput::new(Amount(10), Script::new());
        let mut input = InputToSign::new(out_point.clone(), prev, InputPubKey::default());
        input.input.witness = vec![vec![1]];
        mtx.inputs.push(input);
        mtx.outputs.push(TxOut {
            amount: Amount(9),
            lock_script: Script::new(),
        });
        let tx = mtx.to_tx();
        assert!(tx.version == 2 && tx.lock_time == 7);
        assert!(tx.inputs[0].prev_output == out_point);
        assert!(tx.inputs[0].sequence == SEQUENCE_FINAL);
        assert!(tx.has_witness());
        assert!(tx.outputs.len() == 1);
    }
}
