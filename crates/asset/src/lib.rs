//! Asset bakers: OBJ meshes and raster textures to C headers.
//! Mesh: parse, fan-triangulate, de-duplicate (position, uv) pairs.
//! Texture: normalise to RGB, nearest-neighbour resize, pack RGB565.

pub mod header;
pub mod mesh;
pub mod obj;
pub mod texture;

pub use header::{HeaderSymbols, render_mesh_header, render_texture_header};
pub use mesh::{MeshData, UniqueVertex};
pub use obj::{ObjSource, load_obj_from_path};
pub use texture::Rgb565Texture;
