use crate::script::op_codes::*;

/// Spending condition category of a transaction output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptType {
    /// Pay-to-public-key
    P2pk,
    /// Pay-to-public-key-hash
    P2pkh,
    /// Pay-to-script-hash
    P2sh,
    /// Pay-to-witness-public-key-hash
    P2wpkh,
    /// Pay-to-witness-public-key-hash nested in pay-to-script-hash
    P2wpkhSh,
    /// Pay-to-taproot, spent through the key path
    P2tr,
    /// Any script this library cannot sign for
    Unknown,
}

impl ScriptType {
    /// Classifies a lock script
    ///
    /// A nested witness output is indistinguishable from any other P2SH output by its lock
    /// script alone, so it is reported as `P2sh`.
    pub fn from_lock_script(script: &[u8]) -> ScriptType {
        match script.len() {
            25 if script[0] == OP_DUP
                && script[1] == OP_HASH160
                && script[2] == OP_PUSH + 20
                && script[23] == OP_EQUALVERIFY
                && script[24] == OP_CHECKSIG =>
            {
                ScriptType::P2pkh
            }
            23 if script[0] == OP_HASH160 && script[1] == OP_PUSH + 20 && script[22] == OP_EQUAL => {
                ScriptType::P2sh
            }
            22 if script[0] == OP_0 && script[1] == OP_PUSH + 20 => ScriptType::P2wpkh,
            34 if script[0] == OP_1 && script[1] == OP_PUSH + 32 => ScriptType::P2tr,
            35 if script[0] == OP_PUSH + 33 && script[34] == OP_CHECKSIG => ScriptType::P2pk,
            67 if script[0] == OP_PUSH + 65 && script[66] == OP_CHECKSIG => ScriptType::P2pk,
            _ => ScriptType::Unknown,
        }
    }

    /// Returns whether spending this type requires a witness
    pub fn is_witness(&self) -> bool {
        match self {
            ScriptType::P2wpkh | ScriptType::P2wpkhSh | ScriptType::P2tr => true,
            _ => false,
        }
    }
}
