//! Transaction digest preimages
//!
//! The serializers here produce the bytes that get hashed into a signature digest. ECDSA
//! preimages stop before the 4-byte sighash type, which the signer appends before double
//! hashing. Taproot preimages include the epoch byte and are hashed with the TapSighash tag.

use crate::messages::{OutPoint, TxOut};
use crate::script::{Script, ScriptType};
use crate::transaction::input::{InputToSign, MutableTx};
use crate::transaction::p2pkh;
use crate::util::{sha256, sha256d, var_int, write_var_bytes, Amount, Error, Result, Serializable};
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

/// Taproot only: signs all inputs and outputs with a 64-byte signature
pub const SIGHASH_DEFAULT: u8 = 0x00;
/// Signs all of the outputs
pub const SIGHASH_ALL: u8 = 0x01;
/// Sign none of the outputs so that they may be spent anywhere
pub const SIGHASH_NONE: u8 = 0x02;
/// Sign only the output paired with the the input
pub const SIGHASH_SINGLE: u8 = 0x03;
/// Sign only the input so others may inputs to the transaction
pub const SIGHASH_ANYONECANPAY: u8 = 0x80;
/// Bitcoin Cash / SV sighash flag for use on outputs after the fork
pub const SIGHASH_FORKID: u8 = 0x40;

/// Size of a key-path taproot preimage signed with SIGHASH_DEFAULT
pub const TAPROOT_PREIMAGE_SIZE: usize = 175;

/// Produces digest preimages for an input of a transaction being signed
pub trait SigHashSerializer: Send + Sync {
    /// Serializes the ECDSA preimage using the witness (BIP-143) rule or the legacy rule
    fn serialize_for_signature(&self, tx: &MutableTx, n_input: usize, witness: bool)
        -> Result<Vec<u8>>;

    /// Serializes the taproot key-path preimage (BIP-341)
    fn serialize_for_taproot_signature(&self, tx: &MutableTx, n_input: usize) -> Result<Vec<u8>>;
}

/// Consensus preimage serializer for a fixed ECDSA sighash type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsensusSerializer {
    sighash_type: u8,
}

impl ConsensusSerializer {
    /// Creates a serializer committing to the given sighash type
    pub fn new(sighash_type: u8) -> ConsensusSerializer {
        ConsensusSerializer { sighash_type }
    }
}

impl Default for ConsensusSerializer {
    fn default() -> ConsensusSerializer {
        ConsensusSerializer::new(SIGHASH_ALL)
    }
}

/// Returns the script an input's ECDSA digest commits to
pub fn script_code(input: &InputToSign) -> Script {
    let previous_output = &input.previous_output;
    match previous_output.script_type {
        ScriptType::P2wpkh | ScriptType::P2wpkhSh => {
            p2pkh::create_lock_script(&input.public_key.hash160())
        }
        ScriptType::P2sh => match &previous_output.redeem_script {
            Some(redeem_script) => redeem_script.clone(),
            None => previous_output.lock_script.clone(),
        },
        _ => previous_output.lock_script.clone(),
    }
}

fn check_input(tx: &MutableTx, n_input: usize) -> Result<()> {
    if n_input >= tx.inputs.len() {
        return Err(Error::BadArgument("input out of tx_in range".to_string()));
    }
    Ok(())
}

impl SigHashSerializer for ConsensusSerializer {
    fn serialize_for_signature(
        &self,
        tx: &MutableTx,
        n_input: usize,
        witness: bool,
    ) -> Result<Vec<u8>> {
        check_input(tx, n_input)?;
        if witness {
            self.bip143_preimage(tx, n_input)
        } else {
            self.legacy_preimage(tx, n_input)
        }
    }

    fn serialize_for_taproot_signature(&self, tx: &MutableTx, n_input: usize) -> Result<Vec<u8>> {
        check_input(tx, n_input)?;
        let mut s = Vec::with_capacity(TAPROOT_PREIMAGE_SIZE);

        // Epoch, then the control byte
        s.write_u8(0)?;
        s.write_u8(SIGHASH_DEFAULT)?;

        s.write_u32::<LittleEndian>(tx.version)?;
        s.write_u32::<LittleEndian>(tx.lock_time)?;

        let n = tx.inputs.len();
        let mut prev_outputs = Vec::with_capacity(OutPoint::SIZE * n);
        let mut amounts = Vec::with_capacity(8 * n);
        let mut lock_scripts = Vec::with_capacity(35 * n);
        let mut sequences = Vec::with_capacity(4 * n);
        for input in tx.inputs.iter() {
            input.input.prev_output.write(&mut prev_outputs)?;
            amounts.write_i64::<LittleEndian>(input.previous_output.amount.0)?;
            write_var_bytes(&input.previous_output.lock_script.0, &mut lock_scripts)?;
            sequences.write_u32::<LittleEndian>(input.input.sequence)?;
        }
        s.write_all(&sha256(&prev_outputs).0)?;
        s.write_all(&sha256(&amounts).0)?;
        s.write_all(&sha256(&lock_scripts).0)?;
        s.write_all(&sha256(&sequences).0)?;
        s.write_all(&sha256(&serialize_outputs(&tx.outputs)?).0)?;

        // Key path spend without annex
        s.write_u8(0)?;
        s.write_u32::<LittleEndian>(n_input as u32)?;
        Ok(s)
    }
}

fn serialize_outputs(outputs: &[TxOut]) -> Result<Vec<u8>> {
    let size = outputs.iter().map(|tx_out| tx_out.size()).sum();
    let mut s = Vec::with_capacity(size);
    for tx_out in outputs.iter() {
        tx_out.write(&mut s)?;
    }
    Ok(s)
}

impl ConsensusSerializer {
    /// BIP-143 preimage, also used by forked chains for every spend
    fn bip143_preimage(&self, tx: &MutableTx, n_input: usize) -> Result<Vec<u8>> {
        let mut s = Vec::with_capacity(160);
        let base_type = self.sighash_type & 31;
        let anyone_can_pay = self.sighash_type & SIGHASH_ANYONECANPAY != 0;
        let input = &tx.inputs[n_input];

        // 1. Serialize version
        s.write_u32::<LittleEndian>(tx.version)?;

        // 2. Serialize hash of prevouts
        if !anyone_can_pay {
            let mut prev_outputs = Vec::with_capacity(OutPoint::SIZE * tx.inputs.len());
            for tx_in in tx.inputs.iter() {
                tx_in.input.prev_output.write(&mut prev_outputs)?;
            }
            s.write_all(&sha256d(&prev_outputs).0)?;
        } else {
            s.write_all(&[0; 32])?;
        }

        // 3. Serialize hash of sequences
        if !anyone_can_pay && base_type != SIGHASH_SINGLE && base_type != SIGHASH_NONE {
            let mut sequences = Vec::with_capacity(4 * tx.inputs.len());
            for tx_in in tx.inputs.iter() {
                sequences.write_u32::<LittleEndian>(tx_in.input.sequence)?;
            }
            s.write_all(&sha256d(&sequences).0)?;
        } else {
            s.write_all(&[0; 32])?;
        }

        // 4. Serialize prev output
        input.input.prev_output.write(&mut s)?;

        // 5. Serialize script code
        write_var_bytes(&script_code(input).0, &mut s)?;

        // 6. Serialize amount being spent
        s.write_i64::<LittleEndian>(input.previous_output.amount.0)?;

        // 7. Serialize sequence
        s.write_u32::<LittleEndian>(input.input.sequence)?;

        // 8. Serialize hash of outputs
        if base_type != SIGHASH_SINGLE && base_type != SIGHASH_NONE {
            s.write_all(&sha256d(&serialize_outputs(&tx.outputs)?).0)?;
        } else if base_type == SIGHASH_SINGLE && n_input < tx.outputs.len() {
            let output = serialize_outputs(&tx.outputs[n_input..n_input + 1])?;
            s.write_all(&sha256d(&output).0)?;
        } else {
            s.write_all(&[0; 32])?;
        }

        // 9. Serialize lock_time
        s.write_u32::<LittleEndian>(tx.lock_time)?;

        Ok(s)
    }

    /// Pre-segwit preimage: the transaction with every unlock script blanked except the
    /// signed input's, which carries the script code
    fn legacy_preimage(&self, tx: &MutableTx, n_input: usize) -> Result<Vec<u8>> {
        let mut s = Vec::with_capacity(256);
        let base_type = self.sighash_type & 31;
        let anyone_can_pay = self.sighash_type & SIGHASH_ANYONECANPAY != 0;
        let sub_script = script_code(&tx.inputs[n_input]);

        if base_type == SIGHASH_SINGLE && n_input >= tx.outputs.len() {
            return Err(Error::BadArgument("input out of tx_out range".to_string()));
        }

        // Serialize the version
        s.write_u32::<LittleEndian>(tx.version)?;

        // Serialize the inputs
        let n_inputs = if anyone_can_pay { 1 } else { tx.inputs.len() };
        var_int::write(n_inputs as u64, &mut s)?;
        for i in 0..tx.inputs.len() {
            let i = if anyone_can_pay { n_input } else { i };
            let mut tx_in = tx.inputs[i].input.clone();
            if i == n_input {
                tx_in.unlock_script = sub_script.clone();
            } else {
                tx_in.unlock_script = Script::new();
                if base_type == SIGHASH_NONE || base_type == SIGHASH_SINGLE {
                    tx_in.sequence = 0;
                }
            }
            tx_in.write(&mut s)?;
            if anyone_can_pay {
                break;
            }
        }

        // Serialize the outputs
        let n_outputs = match base_type {
            SIGHASH_NONE => 0,
            SIGHASH_SINGLE => n_input + 1,
            _ => tx.outputs.len(),
        };
        var_int::write(n_outputs as u64, &mut s)?;
        for (i, tx_out) in tx.outputs.iter().take(n_outputs).enumerate() {
            if base_type == SIGHASH_SINGLE && i < n_input {
                let blank = TxOut {
                    amount: Amount(-1),
                    lock_script: Script::new(),
                };
                blank.write(&mut s)?;
            } else {
                tx_out.write(&mut s)?;
            }
        }

        // Serialize the lock time
        s.write_u32::<LittleEndian>(tx.lock_time)?;

        Ok(s)
    }
}
