/// Little-endian byte sinks and sources used by the binary codec.
pub mod bit_coder;

pub mod element_set;
pub mod header;
pub mod mesh;
pub mod point_set;
pub mod shared;

pub use element_set::ElementSet;
pub use header::HeaderErr;
pub use mesh::{BinaryHeader, BinaryMesh, MeshSummary};
pub use point_set::PointSet;
