//! Asset loading/parsers (meshes, textures, static geometry).
//! OBJ meshes parse into `MeshData` (raw attributes + fan-triangulated corners);
//! textures decode into RGB8 for upload by the host renderer.

pub mod error;
pub mod mesh;
pub mod obj;
pub mod primitives;
pub mod texture;

pub use error::{LoadError, TextureError};
pub use mesh::{Corner, MeshData, MeshVertex, Triangle};
pub use obj::{load_obj_from_path, load_obj_from_reader, load_obj_from_str};
pub use texture::{CubemapData, TextureData};
