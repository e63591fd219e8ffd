use crate::messages::OutPoint;
use crate::script::Script;
use crate::util::{read_var_bytes, var_int, write_var_bytes, Result, Serializable};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use std::io::{Read, Write};

/// Default sequence, final and opting out of replace-by-fee
pub const SEQUENCE_FINAL: u32 = 0xffffffff;

/// Transaction input
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct TxIn {
    /// The previous output transaction reference
    pub prev_output: OutPoint,
    /// Signature script for confirming authorization
    pub unlock_script: Script,
    /// Transaction version as defined by the sender for replacement or negotiation
    pub sequence: u32,
    /// Segregated witness stack, serialized apart from the input
    pub witness: Vec<Vec<u8>>,
}

impl TxIn {
    /// Returns the size of the input in bytes, excluding its witness
    pub fn size(&self) -> usize {
        OutPoint::SIZE
            + var_int::size(self.unlock_script.0.len() as u64)
            + self.unlock_script.0.len()
            + 4
    }

    /// Returns the size of the serialized witness stack
    pub fn witness_size(&self) -> usize {
        let items: usize = self
            .witness
            .iter()
            .map(|item| var_int::size(item.len() as u64) + item.len())
            .sum();
        var_int::size(self.witness.len() as u64) + items
    }

    /// Writes the witness stack
    pub fn write_witness(&self, writer: &mut dyn Write) -> io::Result<()> {
        var_int::write(self.witness.len() as u64, writer)?;
        for item in self.witness.iter() {
            write_var_bytes(item, writer)?;
        }
        Ok(())
    }

    /// Reads the witness stack into this input
    pub fn read_witness(&mut self, reader: &mut dyn Read) -> Result<()> {
        let n_items = var_int::read(reader)?;
        let mut witness = Vec::with_capacity(n_items as usize);
        for _i in 0..n_items {
            witness.push(read_var_bytes(reader)?);
        }
        self.witness = witness;
        Ok(())
    }
}

impl Serializable<TxIn> for TxIn {
    fn read(reader: &mut dyn Read) -> Result<TxIn> {
        let prev_output = OutPoint::read(reader)?;
        let unlock_script = Script(read_var_bytes(reader)?);
        let sequence = reader.read_u32::<LittleEndian>()?;
        Ok(TxIn {
            prev_output,
            unlock_script,
            sequence,
            witness: vec![],
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.prev_output.write(writer)?;
        write_var_bytes(&self.unlock_script.0, writer)?;
        writer.write_u32::<LittleEndian>(self.sequence)
    }
}
