// lib.rs

/// Contains the readers and writers of the ASCII `.node` and `.ele` formats.
pub mod io;

/// Defines the binary mesh encoder and the `.node`/`.ele` to binary export.
pub mod encode;

/// Defines the binary mesh decoder.
pub mod decode;

/// Contains the in-memory point, element and mesh types and the byte codec traits.
pub mod core;

/// Contains the most commonly used traits, types, and functions.
pub mod prelude {
    pub use crate::core::{BinaryHeader, BinaryMesh, ElementSet, MeshSummary, PointSet};
    pub use crate::core::shared::ConfigType;
    pub use crate::core::bit_coder::{ByteReader, ByteWriter};
    pub use crate::io::ele::{parse_element_set, write_element_set};
    pub use crate::io::node::{parse_point_set, write_point_set};
    pub use crate::encode::{self, encode, export_binary_mesh, export_binary_raw};
    pub use crate::decode::{self, decode, import_binary_mesh};
}
