//! Binary data reader for KTEX containers

use byteorder::{LittleEndian, ReadBytesExt};
use klei_tex_core::{ParseStage, Result, TexError};
use std::io::{Cursor, Read};

/// Little-endian reader over an in-memory container.
///
/// Every short read is reported as a truncated container at the stage the
/// reader is currently in, so callers only need to move the stage forward.
pub struct BinaryReader<'a> {
    cursor: Cursor<&'a [u8]>,
    stage: ParseStage,
}

impl<'a> BinaryReader<'a> {
    /// Create a new binary reader from byte slice
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
            stage: ParseStage::Magic,
        }
    }

    /// Get current position in the stream
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Get the total length of the data
    pub fn len(&self) -> usize {
        self.cursor.get_ref().len()
    }

    /// Check if the reader is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get remaining bytes from current position
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position() as usize)
    }

    /// Check if we have at least `count` bytes remaining
    pub fn has_bytes(&self, count: usize) -> bool {
        self.remaining() >= count
    }

    /// Stage used when reporting truncation
    pub fn stage(&self) -> ParseStage {
        self.stage
    }

    /// Move to a new parse stage
    pub fn set_stage(&mut self, stage: ParseStage) {
        self.stage = stage;
    }

    fn ensure(&self, count: usize) -> Result<()> {
        if self.has_bytes(count) {
            Ok(())
        } else {
            Err(TexError::truncated(self.stage, count, self.remaining()))
        }
    }

    /// Read an unsigned 32-bit integer
    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.cursor.read_u32::<LittleEndian>()?)
    }

    /// Read a fixed-size byte array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.ensure(N)?;
        let mut buffer = [0u8; N];
        self.cursor.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    /// Read a fixed number of bytes
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.ensure(count)?;
        let mut buffer = vec![0u8; count];
        self.cursor.read_exact(&mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_reading() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u32().unwrap(), 0x04030201);
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.remaining(), 2);
        assert!(reader.has_bytes(2));
        assert!(!reader.has_bytes(3));
    }

    #[test]
    fn test_array_and_bytes() {
        let data = b"KTEXabc";
        let mut reader = BinaryReader::new(data);

        assert_eq!(&reader.read_array::<4>().unwrap(), b"KTEX");
        assert_eq!(reader.read_bytes(3).unwrap(), b"abc".to_vec());
    }

    #[test]
    fn test_truncation_reports_stage() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);
        reader.set_stage(ParseStage::MipRecord(2));

        let err = reader.read_u32().unwrap_err();
        assert_eq!(err.stage(), Some(ParseStage::MipRecord(2)));
        // A failed read does not consume anything
        assert_eq!(reader.remaining(), 2);
    }
}
