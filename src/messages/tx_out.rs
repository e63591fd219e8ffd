use crate::script::Script;
use crate::util::{read_var_bytes, var_int, write_var_bytes, Amount, Result, Serializable};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use std::io::{Read, Write};

/// Transaction output
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct TxOut {
    /// Number of satoshis to spend
    pub amount: Amount,
    /// Lock script to claim the output
    pub lock_script: Script,
}

impl TxOut {
    /// Returns the size of the transaction output in bytes
    pub fn size(&self) -> usize {
        8 + var_int::size(self.lock_script.0.len() as u64) + self.lock_script.0.len()
    }
}

impl Serializable<TxOut> for TxOut {
    fn read(reader: &mut dyn Read) -> Result<TxOut> {
        let amount = Amount(reader.read_i64::<LittleEndian>()?);
        let lock_script = Script(read_var_bytes(reader)?);
        Ok(TxOut {
            amount,
            lock_script,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_i64::<LittleEndian>(self.amount.0)?;
        write_var_bytes(&self.lock_script.0, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex;

    #[test]
    fn write_layout() {
        let t = TxOut {
            amount: Amount(49990000),
            lock_script: Script(vec![0x51]),
        };
        let mut v = Vec::new();
        t.write(&mut v).unwrap();
        assert!(v.len() == t.size());
        assert!(hex::encode(&v) == "70c9fa02000000000151");
    }
}
