mod header;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::bit_coder::{ByteReader, ReaderErr};
use crate::core::{BinaryHeader, BinaryMesh};
use crate::io::text;

/// Size of the three leading counts.
const HEADER_LEN: u64 = 12;

#[remain::sorted]
#[derive(thiserror::Error, Debug)]
pub enum Err {
    #[error("{} does not exist", path.display())]
    FileNotFound { path: PathBuf },
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("binary mesh ends early: {0}")]
    Truncated(#[from] ReaderErr),
    #[error("{} holds {len} bytes but its header announces {expected}", path.display())]
    TruncatedFile { path: PathBuf, len: u64, expected: u64 },
}

/// Decodes a binary mesh from the byte stream.
///
/// The arrays grow as values arrive, so a header announcing more data than the
/// stream holds fails with [`Err::Truncated`] instead of allocating up front.
pub fn decode<W>(reader: &mut W) -> Result<BinaryMesh, Err>
where
    W: ByteReader,
{
    let header = header::decode_header(reader)?;
    decode_arrays(reader, &header, false)
}

/// Reads the arrays announced by `header`. `length_checked` means the caller
/// has verified the source holds them all, so they can be reserved up front.
fn decode_arrays<W>(reader: &mut W, header: &BinaryHeader, length_checked: bool) -> Result<BinaryMesh, Err>
where
    W: ByteReader,
{
    let capacity = |n: usize| if length_checked { n } else { 0 };
    let point_count = header.point_count as usize;

    let mut points = Vec::with_capacity(capacity(point_count * 3));
    for _ in 0..point_count * 3 {
        points.push(reader.read_f32()?);
    }
    let mut scalars = Vec::with_capacity(capacity(point_count));
    for _ in 0..point_count {
        scalars.push(reader.read_f32()?);
    }
    let mut indices = Vec::with_capacity(capacity(header.index_count as usize));
    for _ in 0..header.index_count {
        indices.push(reader.read_u32()?);
    }

    Ok(BinaryMesh {
        points_per_primitive: header.points_per_primitive,
        points,
        scalars,
        indices,
    })
}

/// Reads a binary mesh file written by [`crate::encode::export_binary_mesh`]
/// or [`crate::encode::export_binary_raw`].
pub fn import_binary_mesh<P: AsRef<Path>>(path: P) -> Result<BinaryMesh, Err> {
    let path = path.as_ref();
    text::ensure_exists(path).map_err(|_| Err::FileNotFound { path: path.to_path_buf() })?;
    let bytes = std::fs::read(path).map_err(|source| Err::Io { path: path.to_path_buf(), source })?;

    let len = bytes.len() as u64;
    let truncated = |expected| Err::TruncatedFile { path: path.to_path_buf(), len, expected };

    let mut reader = bytes.as_slice();
    let header = header::decode_header(&mut reader).map_err(|_| truncated(HEADER_LEN))?;
    if len < header.file_len() {
        return Err(truncated(header.file_len()));
    }
    let mesh = decode_arrays(&mut reader, &header, true)?;
    debug!(
        path = %path.display(),
        points = mesh.point_count(),
        indices = mesh.index_count(),
        trailing_bytes = reader.len(),
        "read binary mesh"
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;

    fn sample() -> BinaryMesh {
        BinaryMesh {
            points_per_primitive: 4,
            points: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            scalars: vec![0.1, 0.2, 0.3, f32::MAX],
            indices: vec![3, 2, 1, 0],
        }
    }

    #[test]
    fn inverse_of_encode() {
        let mut buffer = Vec::new();
        encode(&sample(), &mut buffer).unwrap();
        assert_eq!(buffer.len(), 12 + 4 * (12 + 4 + 4));
        assert_eq!(decode(&mut buffer.into_iter()).unwrap(), sample());
    }

    #[test]
    fn truncated_stream() {
        let mut buffer = Vec::new();
        encode(&sample(), &mut buffer).unwrap();
        buffer.truncate(buffer.len() - 2);
        assert!(matches!(
            decode(&mut buffer.as_slice()),
            Err(Err::Truncated(ReaderErr::NotEnoughData))
        ));
    }

    #[test]
    fn huge_counts_do_not_preallocate() {
        let mut buffer = Vec::new();
        for word in [4u32, u32::MAX, u32::MAX] {
            buffer.extend_from_slice(&word.to_le_bytes());
        }
        assert!(matches!(decode(&mut buffer.as_slice()), Err(Err::Truncated(_))));
    }

    #[test]
    fn checked_length_reserves_arrays() {
        let mut buffer = Vec::new();
        encode(&sample(), &mut buffer).unwrap();
        let mut reader = &buffer[12..];
        let header = BinaryHeader { points_per_primitive: 4, point_count: 4, index_count: 4 };

        let mesh = decode_arrays(&mut reader, &header, true).unwrap();
        assert_eq!(mesh, sample());
        assert!(mesh.points.capacity() >= 12 && mesh.indices.capacity() >= 4);
        assert!(reader.is_empty());
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin");
        assert!(matches!(import_binary_mesh(&path), Err(Err::FileNotFound { .. })));
    }
}
