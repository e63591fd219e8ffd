//! Compact-size integers used for counts and lengths in transactions

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use std::io::{Read, Write};

/// Returns the number of bytes the encoding of n occupies
pub fn size(n: u64) -> usize {
    match n {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x10000..=0xffffffff => 5,
        _ => 9,
    }
}

/// Writes n as a compact-size integer
pub fn write(n: u64, writer: &mut dyn Write) -> io::Result<()> {
    match n {
        0..=0xfc => writer.write_u8(n as u8),
        0xfd..=0xffff => {
            writer.write_u8(0xfd)?;
            writer.write_u16::<LittleEndian>(n as u16)
        }
        0x10000..=0xffffffff => {
            writer.write_u8(0xfe)?;
            writer.write_u32::<LittleEndian>(n as u32)
        }
        _ => {
            writer.write_u8(0xff)?;
            writer.write_u64::<LittleEndian>(n)
        }
    }
}

/// Reads a compact-size integer
pub fn read(reader: &mut dyn Read) -> io::Result<u64> {
    Ok(match reader.read_u8()? {
        0xff => reader.read_u64::<LittleEndian>()?,
        0xfe => reader.read_u32::<LittleEndian>()? as u64,
        0xfd => reader.read_u16::<LittleEndian>()? as u64,
        n => n as u64,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    #[test]
    fn size() {
        assert!(super::size(0) == 1);
        assert!(super::size(252) == 1);
        assert!(super::size(253) == 3);
        assert!(super::size(0x10000) == 5);
        assert!(super::size(u64::max_value()) == 9);
    }

    #[test]
    fn encoding() {
        let mut v = Vec::new();
        super::write(253, &mut v).unwrap();
        assert!(v == vec![0xfd, 0xfd, 0x00]);

        let mut v = Vec::new();
        super::write(0x10000, &mut v).unwrap();
        assert!(v == vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
        assert!(super::read(&mut Cursor::new(&v)).unwrap() == 0x10000);
    }
}
