pub mod header;

use std::path::Path;

use tracing::debug;

use crate::core::bit_coder::ByteWriter;
use crate::core::mesh::TETRAHEDRON_CORNERS;
use crate::core::shared::{ConfigType, SizeErr};
use crate::core::{BinaryHeader, BinaryMesh, ElementSet, PointSet};
use crate::io::{self, ele, node};

#[remain::sorted]
#[derive(thiserror::Error, Debug)]
pub enum Err {
    #[error("attribute index {index} is out of range for a point set with {available} attributes")]
    AttributeIndexOutOfRange { index: u32, available: u32 },
    #[error("Header encoding error: {0}")]
    HeaderError(#[from] header::Err),
    #[error("unable to write {}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Read(#[from] io::Err),
    #[error("mesh arrays are too short: {0}")]
    SizeMismatch(#[from] SizeErr),
    #[error("point dimension must be 3, found {0}")]
    UnsupportedDimension(u32),
    #[error("nodes per tetrahedron must be 4, found {0}")]
    UnsupportedTopology(u32),
}

impl BinaryMesh {
    /// Pairs the points of `point_set` with the tetrahedra of `element_set`,
    /// keeping attribute `attribute_index` as the per-point scalar.
    ///
    /// A point set without attributes yields all-zero scalars when
    /// `attribute_index` is 0; any other index must be in range.
    pub fn from_sets(point_set: &PointSet, element_set: &ElementSet, attribute_index: u32) -> Result<Self, Err> {
        if point_set.dimension != 3 {
            return Err(Err::UnsupportedDimension(point_set.dimension));
        }
        if element_set.nodes_per_element != TETRAHEDRON_CORNERS {
            return Err(Err::UnsupportedTopology(element_set.nodes_per_element));
        }
        if point_set.attribute_count <= attribute_index && attribute_index != 0 {
            return Err(Err::AttributeIndexOutOfRange {
                index: attribute_index,
                available: point_set.attribute_count,
            });
        }
        point_set.check_sizes()?;
        element_set.check_sizes()?;

        let n = point_set.point_count as usize;
        let a = point_set.attribute_count as usize;
        let scalars = match a {
            0 => vec![0.0; n],
            _ => (0..n)
                .map(|i| point_set.attributes[i * a + attribute_index as usize])
                .collect(),
        };
        let num_indices = element_set.element_count as usize * TETRAHEDRON_CORNERS as usize;

        Ok(Self {
            points_per_primitive: TETRAHEDRON_CORNERS,
            points: point_set.coordinates[..n * 3].to_vec(),
            scalars,
            indices: element_set.nodes[..num_indices].to_vec(),
        })
    }
}

/// Encodes `mesh` into the byte stream.
pub fn encode<W>(mesh: &BinaryMesh, writer: &mut W) -> Result<(), Err>
where
    W: ByteWriter,
{
    encode_raw(&mesh.points, &mesh.scalars, &mesh.indices, mesh.points_per_primitive, writer)
}

/// Encodes caller-supplied arrays as they are. Nothing checks that `scalars`
/// has one value per point or that `points` holds whole triples.
pub fn encode_raw<W>(
    points: &[f32],
    scalars: &[f32],
    indices: &[u32],
    points_per_primitive: u32,
    writer: &mut W,
) -> Result<(), Err>
where
    W: ByteWriter,
{
    let header = BinaryHeader::for_arrays(points_per_primitive, points.len(), indices.len())?;
    header::encode_header(writer, &header);

    for &value in points {
        writer.write_f32(value);
    }
    for &value in scalars {
        writer.write_f32(value);
    }
    for &index in indices {
        writer.write_u32(index);
    }
    Ok(())
}

/// Converts a `.node`/`.ele` pair into a binary mesh file.
pub fn export_binary_mesh<P, Q, R>(point_set_path: P, element_set_path: Q, attribute_index: u32, output_path: R) -> Result<(), Err>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    export_binary_mesh_with(point_set_path, element_set_path, attribute_index, output_path, &io::Config::default())
}

pub fn export_binary_mesh_with<P, Q, R>(
    point_set_path: P,
    element_set_path: Q,
    attribute_index: u32,
    output_path: R,
    cfg: &io::Config,
) -> Result<(), Err>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let element_set = ele::parse_element_set_with(element_set_path, cfg)?;
    let point_set = node::parse_point_set_with(point_set_path, cfg)?;
    let mesh = BinaryMesh::from_sets(&point_set, &element_set, attribute_index)?;
    write_binary_mesh(output_path, &mesh)
}

/// Writes arrays already in memory to a binary mesh file, without validation.
pub fn export_binary_raw<P: AsRef<Path>>(
    points: &[f32],
    scalars: &[f32],
    indices: &[u32],
    points_per_primitive: u32,
    output_path: P,
) -> Result<(), Err> {
    let mut buffer = Vec::with_capacity(4 * (3 + points.len() + scalars.len() + indices.len()));
    encode_raw(points, scalars, indices, points_per_primitive, &mut buffer)?;
    write_buffer(output_path.as_ref(), &buffer)
}

pub fn write_binary_mesh<P: AsRef<Path>>(output_path: P, mesh: &BinaryMesh) -> Result<(), Err> {
    export_binary_raw(&mesh.points, &mesh.scalars, &mesh.indices, mesh.points_per_primitive, output_path)
}

fn write_buffer(path: &Path, buffer: &[u8]) -> Result<(), Err> {
    std::fs::write(path, buffer).map_err(|source| Err::Io { path: path.to_path_buf(), source })?;
    debug!(path = %path.display(), bytes = buffer.len(), "wrote binary mesh");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_points(attribute_count: u32) -> PointSet {
        let mut set = PointSet::new(4, 3, attribute_count, 0);
        let corners: [[f32; 3]; 4] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        for (i, corner) in corners.iter().enumerate() {
            let attributes = (0..attribute_count).map(|a| (10 * i) as f32 + a as f32).collect::<Vec<_>>();
            set.push_point(corner, &attributes, &[]);
        }
        set
    }

    fn one_tet() -> ElementSet {
        let mut set = ElementSet::new(1, 4, 0);
        set.push_element(&[0, 1, 2, 3], &[]);
        set
    }

    #[test]
    fn selects_scalar_attribute() {
        let mesh = BinaryMesh::from_sets(&four_points(2), &one_tet(), 1).unwrap();
        assert_eq!(mesh.scalars, vec![1.0, 11.0, 21.0, 31.0]);
        assert_eq!(mesh.points.len(), 12);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3]);
        assert_eq!(mesh.points_per_primitive, 4);
    }

    #[test]
    fn attribute_index_zero_without_attributes() {
        let mesh = BinaryMesh::from_sets(&four_points(0), &one_tet(), 0).unwrap();
        assert_eq!(mesh.scalars, vec![0.0; 4]);
        assert!(matches!(
            BinaryMesh::from_sets(&four_points(0), &one_tet(), 1),
            Err(Err::AttributeIndexOutOfRange { index: 1, available: 0 })
        ));
        assert!(matches!(
            BinaryMesh::from_sets(&four_points(2), &one_tet(), 2),
            Err(Err::AttributeIndexOutOfRange { index: 2, available: 2 })
        ));
    }

    #[test]
    fn rejects_unsupported_shapes() {
        let mut flat = PointSet::new(1, 2, 0, 0);
        flat.push_point(&[0.0, 0.0], &[], &[]);
        assert!(matches!(
            BinaryMesh::from_sets(&flat, &one_tet(), 0),
            Err(Err::UnsupportedDimension(2))
        ));

        let mut quadratic = ElementSet::new(1, 10, 0);
        quadratic.push_element(&[0, 1, 2, 3, 0, 1, 2, 3, 0, 1], &[]);
        assert!(matches!(
            BinaryMesh::from_sets(&four_points(0), &quadratic, 0),
            Err(Err::UnsupportedTopology(10))
        ));
    }

    #[test]
    fn rejects_missing_records() {
        let mut points = four_points(0);
        points.point_count = 5;
        assert!(matches!(
            BinaryMesh::from_sets(&points, &one_tet(), 0),
            Err(Err::SizeMismatch(SizeErr { array: "coordinates", .. }))
        ));
    }

    #[test]
    fn byte_layout() {
        let mesh = BinaryMesh {
            points_per_primitive: 4,
            points: vec![1.0, 2.0, 3.0],
            scalars: vec![0.5],
            indices: vec![0, 0, 0, 0],
        };
        let mut buffer = Vec::new();
        encode(&mesh, &mut buffer).unwrap();

        let mut expected = Vec::new();
        for word in [4u32, 1, 4] {
            expected.extend_from_slice(&word.to_le_bytes());
        }
        for value in [1.0f32, 2.0, 3.0, 0.5] {
            expected.extend_from_slice(&value.to_le_bytes());
        }
        expected.extend_from_slice(&[0u8; 16]);
        assert_eq!(buffer, expected);
    }
}
