use crate::core::bit_coder::{ByteReader, ReaderErr};
use crate::core::BinaryHeader;

pub fn decode_header<W>(reader: &mut W) -> Result<BinaryHeader, ReaderErr>
where
    W: ByteReader,
{
    let points_per_primitive = reader.read_u32()?;
    let point_count = reader.read_u32()?;
    let index_count = reader.read_u32()?;

    Ok(BinaryHeader {
        points_per_primitive,
        point_count,
        index_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bit_coder::ByteWriter;

    #[test]
    fn reads_three_counts() {
        let mut buffer = Vec::new();
        for word in [4, 120, 960] {
            buffer.write_u32(word);
        }
        let header = decode_header(&mut buffer.as_slice()).unwrap();
        assert_eq!(
            header,
            BinaryHeader { points_per_primitive: 4, point_count: 120, index_count: 960 }
        );
    }

    #[test]
    fn short_header() {
        let buffer = vec![4u8, 0, 0, 0, 1, 0];
        assert_eq!(decode_header(&mut buffer.into_iter()), Err(ReaderErr::NotEnoughData));
    }
}
