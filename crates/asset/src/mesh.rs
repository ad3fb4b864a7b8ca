//! Unique-vertex mesh built from triangulated OBJ faces.

use std::collections::HashMap;

use anyhow::Result;
use corelib::{BakeError, IndexKind};

use crate::obj::{FaceVertexRef, ObjSource};

/// Interleaved output vertex: position followed by texture coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UniqueVertex {
    pub position: [f64; 3],
    pub uv: [f64; 2],
}

impl UniqueVertex {
    pub fn new(position: [f64; 3], uv: [f64; 2]) -> Self {
        Self { position, uv }
    }

    /// `[x, y, z, u, v]`
    pub fn components(&self) -> [f64; 5] {
        let [x, y, z] = self.position;
        let [u, v] = self.uv;
        [x, y, z, u, v]
    }
}

/// De-duplicated vertices plus a flat triangle index list (3 per triangle).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<UniqueVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<UniqueVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Triangulate and de-duplicate every face of `source`, in file order.
    pub fn from_obj(source: &ObjSource) -> Result<Self> {
        if source.faces.is_empty() {
            return Err(BakeError::EmptyMesh.into());
        }

        let mut builder = MeshBuilder::new(source);
        for triangle in source.triangles() {
            for corner in triangle {
                builder.push(corner)?;
            }
        }
        let mesh = builder.finish();

        log::debug!(
            "De-duplicated {} triangle corners into {} vertices",
            mesh.indices.len(),
            mesh.vertices.len()
        );
        Ok(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }
}

/// Maps `(position, texcoord slot)` to the output slot it was first given.
struct MeshBuilder<'a> {
    source: &'a ObjSource,
    slots: HashMap<(usize, usize), u32>,
    vertices: Vec<UniqueVertex>,
    indices: Vec<u32>,
}

impl<'a> MeshBuilder<'a> {
    fn new(source: &'a ObjSource) -> Self {
        Self {
            source,
            slots: HashMap::new(),
            vertices: Vec::new(),
            indices: Vec::with_capacity(source.triangle_count() * 3),
        }
    }

    fn push(&mut self, corner: FaceVertexRef) -> Result<()> {
        let key = (corner.position, corner.texcoord_slot());
        let slot = match self.slots.get(&key) {
            Some(&slot) => slot,
            None => {
                let vertex = self.materialize(corner)?;
                let slot = u32::try_from(self.vertices.len())
                    .map_err(|_| anyhow::anyhow!("Too many vertices in mesh (>{})", u32::MAX))?;
                self.vertices.push(vertex);
                self.slots.insert(key, slot);
                slot
            }
        };
        self.indices.push(slot);
        Ok(())
    }

    fn materialize(&self, corner: FaceVertexRef) -> Result<UniqueVertex> {
        let position = self
            .source
            .positions
            .get(corner.position)
            .copied()
            .ok_or(BakeError::IndexOutOfRange {
                kind: IndexKind::Position,
                index: corner.position + 1,
                len: self.source.positions.len(),
            })?;

        let uv = if self.source.texcoords.is_empty() {
            [0.0, 0.0]
        } else {
            let slot = corner.texcoord_slot();
            self.source
                .texcoords
                .get(slot)
                .copied()
                .ok_or(BakeError::IndexOutOfRange {
                    kind: IndexKind::TexCoord,
                    index: slot + 1,
                    len: self.source.texcoords.len(),
                })?
        };

        Ok(UniqueVertex::new(position, uv))
    }

    fn finish(self) -> MeshData {
        MeshData::new(self.vertices, self.indices)
    }
}
