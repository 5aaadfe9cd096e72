use std::vec;

/// Sink for the little-endian fields of the binary mesh format.
pub trait ByteWriter: Sized {
    fn write_u8(&mut self, value: u8);
    fn write_u32(&mut self, value: u32) {
        for byte in value.to_le_bytes() {
            self.write_u8(byte);
        }
    }
    fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }
}

impl ByteWriter for Vec<u8> {
    fn write_u8(&mut self, value: u8) {
        self.push(value);
    }

    fn write_u32(&mut self, value: u32) {
        self.extend_from_slice(&value.to_le_bytes());
    }

    fn write_f32(&mut self, value: f32) {
        self.extend_from_slice(&value.to_le_bytes());
    }
}

/// Source of the little-endian fields of the binary mesh format.
pub trait ByteReader {
    fn read_u8(&mut self) -> Result<u8, ReaderErr>;
    fn read_u32(&mut self) -> Result<u32, ReaderErr> {
        let out = [
            self.read_u8()?,
            self.read_u8()?,
            self.read_u8()?,
            self.read_u8()?
        ];
        Ok(u32::from_le_bytes(out))
    }
    fn read_f32(&mut self) -> Result<f32, ReaderErr> {
        Ok(f32::from_bits(self.read_u32()?))
    }
}

impl ByteReader for vec::IntoIter<u8> {
    fn read_u8(&mut self) -> Result<u8, ReaderErr> {
        self.next().ok_or(ReaderErr::NotEnoughData)
    }
}

/// Reading through a slice advances it past the consumed bytes.
impl ByteReader for &[u8] {
    fn read_u8(&mut self) -> Result<u8, ReaderErr> {
        let (&first, rest) = self.split_first().ok_or(ReaderErr::NotEnoughData)?;
        *self = rest;
        Ok(first)
    }

    fn read_u32(&mut self) -> Result<u32, ReaderErr> {
        if self.len() < 4 {
            return Err(ReaderErr::NotEnoughData);
        }
        let (head, rest) = self.split_at(4);
        *self = rest;
        Ok(u32::from_le_bytes([head[0], head[1], head[2], head[3]]))
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderErr {
    #[error("Not enough data to read")]
    NotEnoughData,
}
