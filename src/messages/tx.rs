use crate::messages::{TxIn, TxOut};
use crate::util::{sha256d, var_int, Error, Hash256, Result, Serializable};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io;
use std::io::{Cursor, Read, Write};

/// Marker byte that replaces the input count in witness serialization
const SEGWIT_MARKER: u8 = 0x00;
/// Flag byte following the marker
const SEGWIT_FLAG: u8 = 0x01;

/// Bitcoin transaction
#[derive(Default, PartialEq, Eq, Hash, Clone)]
pub struct Tx {
    /// Transaction version
    pub version: u32,
    /// Transaction inputs
    pub inputs: Vec<TxIn>,
    /// Transaction outputs
    pub outputs: Vec<TxOut>,
    /// The block number or timestamp at which this transaction is unlocked
    pub lock_time: u32,
}

impl Tx {
    /// Calculates the hash of the transaction also known as the txid
    ///
    /// The witness is not committed to.
    pub fn hash(&self) -> Hash256 {
        let mut b = Vec::with_capacity(self.base_size());
        // Writes into a Vec do not fail
        let _ = self.write_base(&mut b);
        sha256d(&b)
    }

    /// Calculates the hash of the transaction including its witness data
    pub fn witness_hash(&self) -> Hash256 {
        let mut b = Vec::with_capacity(self.size());
        let _ = self.write(&mut b);
        sha256d(&b)
    }

    /// Returns whether any input carries a witness stack
    pub fn has_witness(&self) -> bool {
        self.inputs.iter().any(|tx_in| !tx_in.witness.is_empty())
    }

    /// Returns the serialized size without witness data
    pub fn base_size(&self) -> usize {
        let mut size = 8;
        size += var_int::size(self.inputs.len() as u64);
        size += self.inputs.iter().map(|tx_in| tx_in.size()).sum::<usize>();
        size += var_int::size(self.outputs.len() as u64);
        size += self.outputs.iter().map(|tx_out| tx_out.size()).sum::<usize>();
        size
    }

    /// Returns the serialized size, including witness data when present
    pub fn size(&self) -> usize {
        if !self.has_witness() {
            return self.base_size();
        }
        let witness: usize = self.inputs.iter().map(|tx_in| tx_in.witness_size()).sum();
        self.base_size() + 2 + witness
    }

    fn write_base(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.version)?;
        self.write_inputs_outputs(writer)?;
        writer.write_u32::<LittleEndian>(self.lock_time)
    }

    fn write_inputs_outputs(&self, writer: &mut dyn Write) -> io::Result<()> {
        var_int::write(self.inputs.len() as u64, writer)?;
        for tx_in in self.inputs.iter() {
            tx_in.write(writer)?;
        }
        var_int::write(self.outputs.len() as u64, writer)?;
        for tx_out in self.outputs.iter() {
            tx_out.write(writer)?;
        }
        Ok(())
    }
}

impl Serializable<Tx> for Tx {
    fn read(reader: &mut dyn Read) -> Result<Tx> {
        let version = reader.read_u32::<LittleEndian>()?;
        let first = reader.read_u8()?;
        let segwit = first == SEGWIT_MARKER;
        let n_inputs = if segwit {
            let flag = reader.read_u8()?;
            if flag != SEGWIT_FLAG {
                return Err(Error::BadData(format!("Unknown witness flag {}", flag)));
            }
            var_int::read(reader)?
        } else {
            var_int::read(&mut Cursor::new([first]).chain(&mut *reader))?
        };
        let mut inputs = Vec::with_capacity(n_inputs as usize);
        for _i in 0..n_inputs {
            inputs.push(TxIn::read(reader)?);
        }
        let n_outputs = var_int::read(reader)?;
        let mut outputs = Vec::with_capacity(n_outputs as usize);
        for _i in 0..n_outputs {
            outputs.push(TxOut::read(reader)?);
        }
        if segwit {
            for tx_in in inputs.iter_mut() {
                tx_in.read_witness(reader)?;
            }
        }
        let lock_time = reader.read_u32::<LittleEndian>()?;
        Ok(Tx {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        if !self.has_witness() {
            return self.write_base(writer);
        }
        writer.write_u32::<LittleEndian>(self.version)?;
        writer.write_u8(SEGWIT_MARKER)?;
        writer.write_u8(SEGWIT_FLAG)?;
        self.write_inputs_outputs(writer)?;
        for tx_in in self.inputs.iter() {
            tx_in.write_witness(writer)?;
        }
        writer.write_u32::<LittleEndian>(self.lock_time)
    }
}

impl fmt::Debug for Tx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let inputs_str = format!("[<{} inputs>]", self.inputs.len());
        let outputs_str = format!("[<{} outputs>]", self.outputs.len());

        f.debug_struct("Tx")
            .field("version", &self.version)
            .field(
                "inputs",
                if self.inputs.len() <= 3 {
                    &self.inputs
                } else {
                    &inputs_str
                },
            )
            .field(
                "outputs",
                if self.outputs.len() <= 3 {
                    &self.outputs
                } else {
                    &outputs_str
                },
            )
            .field("lock_time", &self.lock_time)
            .finish()
    }
}
