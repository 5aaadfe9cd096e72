use crate::core::bit_coder::ByteWriter;
use crate::core::BinaryHeader;

#[remain::sorted]
#[derive(thiserror::Error, Debug)]
pub enum Err {
    #[error("{field} of {value} does not fit in the 32-bit header")]
    CountTooLarge { field: &'static str, value: usize },
}

impl BinaryHeader {
    /// Header for caller-supplied arrays: the point count is `points.len() / 3`
    /// and the index count is `indices.len()`.
    pub fn for_arrays(points_per_primitive: u32, num_point_values: usize, num_indices: usize) -> Result<Self, Err> {
        let point_count = num_point_values / 3;
        Ok(Self {
            points_per_primitive,
            point_count: u32::try_from(point_count)
                .map_err(|_| Err::CountTooLarge { field: "point count", value: point_count })?,
            index_count: u32::try_from(num_indices)
                .map_err(|_| Err::CountTooLarge { field: "index count", value: num_indices })?,
        })
    }
}

pub fn encode_header<W>(writer: &mut W, header: &BinaryHeader)
where
    W: ByteWriter,
{
    writer.write_u32(header.points_per_primitive);
    writer.write_u32(header.point_count);
    writer.write_u32(header.index_count);
}
