use crate::util::Result;
use std::io;
use std::io::{Read, Write};

/// An object that may be serialized and deserialized in consensus format
pub trait Serializable<T> {
    /// Reads the object from serialized form
    fn read(reader: &mut dyn Read) -> Result<T>
    where
        Self: Sized;

    /// Writes the object to serialized form
    fn write(&self, writer: &mut dyn Write) -> io::Result<()>;
}

/// Reads a var-int length prefixed byte string
pub fn read_var_bytes(reader: &mut dyn Read) -> Result<Vec<u8>> {
    let len = crate::util::var_int::read(reader)?;
    let mut bytes = vec![0; len as usize];
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}

/// Writes a var-int length prefixed byte string
pub fn write_var_bytes(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    crate::util::var_int::write(bytes.len() as u64, writer)?;
    writer.write_all(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn var_bytes() {
        let mut v = Vec::new();
        write_var_bytes(&[7; 300], &mut v).unwrap();
        assert!(v.len() == 303 && v[0] == 0xfd);
        assert!(read_var_bytes(&mut Cursor::new(&v)).unwrap() == vec![7; 300]);

        let mut v = Vec::new();
        write_var_bytes(&[], &mut v).unwrap();
        assert!(v == vec![0]);
    }

    #[test]
    fn var_bytes_truncated() {
        let v = vec![5, 1, 2];
        assert!(read_var_bytes(&mut Cursor::new(&v)).is_err());
    }
}
