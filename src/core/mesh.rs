use serde::Serialize;

/// Number of corner points of a linear tetrahedron.
pub const TETRAHEDRON_CORNERS: u32 = 4;

/// The three counts leading a binary mesh file, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BinaryHeader {
    pub points_per_primitive: u32,
    pub point_count: u32,
    pub index_count: u32,
}

impl BinaryHeader {
    /// Size in bytes of the header and the arrays it announces.
    pub fn file_len(&self) -> u64 {
        let words = 3 + 4 * u64::from(self.point_count) + u64::from(self.index_count);
        words * 4
    }
}

/// The raw arrays stored in a binary mesh file.
///
/// `points` holds interleaved x,y,z triples, `scalars` one value per point and
/// `indices` zero-based point references, `points_per_primitive` at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinaryMesh {
    pub points_per_primitive: u32,
    pub points: Vec<f32>,
    pub scalars: Vec<f32>,
    pub indices: Vec<u32>,
}

impl BinaryMesh {
    pub fn point_count(&self) -> usize {
        self.points.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn primitive_count(&self) -> usize {
        match self.points_per_primitive {
            0 => 0,
            k => self.indices.len() / k as usize,
        }
    }

    pub fn primitives(&self) -> impl Iterator<Item = &[u32]> + '_ {
        let k = (self.points_per_primitive as usize).max(1);
        self.indices.chunks_exact(k).take(self.primitive_count())
    }

    pub fn summary(&self) -> MeshSummary {
        let scalar_range = self.scalars.iter().fold(None, |acc: Option<[f32; 2]>, &s| match acc {
            None => Some([s, s]),
            Some([lo, hi]) => Some([lo.min(s), hi.max(s)]),
        });
        let bounds = self.points.chunks_exact(3).fold(None, |acc: Option<Bounds>, p| {
            let p = [p[0], p[1], p[2]];
            Some(match acc {
                None => Bounds { min: p, max: p },
                Some(b) => Bounds {
                    min: [b.min[0].min(p[0]), b.min[1].min(p[1]), b.min[2].min(p[2])],
                    max: [b.max[0].max(p[0]), b.max[1].max(p[1]), b.max[2].max(p[2])],
                },
            })
        });
        MeshSummary {
            points_per_primitive: self.points_per_primitive,
            point_count: self.point_count(),
            index_count: self.index_count(),
            primitive_count: self.primitive_count(),
            scalar_range,
            bounds,
        }
    }
}

/// Axis-aligned bounding box of the points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

/// Header counts and value ranges of a binary mesh, suitable for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshSummary {
    pub points_per_primitive: u32,
    pub point_count: usize,
    pub index_count: usize,
    pub primitive_count: usize,
    pub scalar_range: Option<[f32; 2]>,
    pub bounds: Option<Bounds>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_tet() -> BinaryMesh {
        BinaryMesh {
            points_per_primitive: TETRAHEDRON_CORNERS,
            points: vec![
                0.0, 0.0, 0.0,
                1.0, 0.0, 0.0,
                0.0, 2.0, 0.0,
                0.0, 0.0, -3.0,
            ],
            scalars: vec![0.5, -1.0, 4.0, 2.0],
            indices: vec![0, 1, 2, 3],
        }
    }

    #[test]
    fn counts() {
        let mesh = unit_tet();
        assert_eq!(mesh.point_count(), 4);
        assert_eq!(mesh.index_count(), 4);
        assert_eq!(mesh.primitive_count(), 1);
        assert_eq!(mesh.primitives().collect::<Vec<_>>(), vec![&[0, 1, 2, 3][..]]);
    }

    #[test]
    fn header_file_len() {
        let header = BinaryHeader { points_per_primitive: 4, point_count: 4, index_count: 4 };
        assert_eq!(header.file_len(), 12 + 48 + 16 + 16);
    }

    #[test]
    fn summary() {
        let summary = unit_tet().summary();
        assert_eq!(summary.scalar_range, Some([-1.0, 4.0]));
        assert_eq!(
            summary.bounds,
            Some(Bounds { min: [0.0, 0.0, -3.0], max: [1.0, 2.0, 0.0] })
        );

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["point_count"], 4);
        assert_eq!(json["primitive_count"], 1);

        let empty = BinaryMesh::default().summary();
        assert_eq!(empty.primitive_count, 0);
        assert!(empty.bounds.is_none());
    }
}
