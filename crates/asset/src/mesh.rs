//! CPU-side mesh representation produced by the OBJ loader.

use bytemuck::{Pod, Zeroable};

/// One corner of a triangle: 0-based indices into the mesh's attribute
/// arrays. `None` means the face did not supply a usable attribute. In a
/// loaded mesh every `Some` texcoord or normal is in range; `position` may
/// not be, and resolves to the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Corner {
    pub position: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

impl Corner {
    pub fn new(position: usize, texcoord: Option<usize>, normal: Option<usize>) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }
}

pub type Triangle = [Corner; 3];

/// Attribute values of a corner after bounds checking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedCorner {
    pub position: [f32; 3],
    pub texcoord: Option<[f32; 2]>,
    pub normal: Option<[f32; 3]>,
}

/// Number of triangle corners whose index points past the parsed data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DanglingRefs {
    pub positions: usize,
    pub texcoords: usize,
    pub normals: usize,
}

impl DanglingRefs {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Parsed mesh: raw attribute arrays plus a fan-triangulated corner stream.
/// Read-only once built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    positions: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
    triangles: Vec<Triangle>,
}

impl MeshData {
    pub fn new(
        positions: Vec<[f32; 3]>,
        texcoords: Vec<[f32; 2]>,
        normals: Vec<[f32; 3]>,
        triangles: Vec<Triangle>,
    ) -> Self {
        Self {
            positions,
            texcoords,
            normals,
            triangles,
        }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn texcoords(&self) -> &[[f32; 2]] {
        &self.texcoords
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Returns `true` if there is at least one triangle to draw.
    pub fn is_renderable(&self) -> bool {
        !self.triangles.is_empty()
    }

    /// Out-of-range positions become the origin; out-of-range texcoords and
    /// normals become absent.
    pub fn resolve(&self, corner: &Corner) -> ResolvedCorner {
        ResolvedCorner {
            position: self
                .positions
                .get(corner.position)
                .copied()
                .unwrap_or([0.0; 3]),
            texcoord: corner.texcoord.and_then(|i| self.texcoords.get(i).copied()),
            normal: corner.normal.and_then(|i| self.normals.get(i).copied()),
        }
    }

    pub fn dangling_refs(&self) -> DanglingRefs {
        let mut refs = DanglingRefs::default();
        for corner in self.triangles.iter().flatten() {
            if corner.position >= self.positions.len() {
                refs.positions += 1;
            }
            if corner.texcoord.is_some_and(|i| i >= self.texcoords.len()) {
                refs.texcoords += 1;
            }
            if corner.normal.is_some_and(|i| i >= self.normals.len()) {
                refs.normals += 1;
            }
        }
        refs
    }

    /// Turns out-of-range texcoord and normal indices into `None`, so every
    /// remaining `Some` indexes its array.
    pub fn without_dangling_attributes(mut self) -> Self {
        let (tex_len, norm_len) = (self.texcoords.len(), self.normals.len());
        for corner in self.triangles.iter_mut().flatten() {
            corner.texcoord = corner.texcoord.filter(|&i| i < tex_len);
            corner.normal = corner.normal.filter(|&i| i < norm_len);
        }
        self
    }

    /// Non-indexed draw buffer, three vertices per triangle. Corners without
    /// a usable texcoord get `(0, 0)`.
    pub fn to_vertex_buffer(&self) -> Vec<MeshVertex> {
        self.triangles
            .iter()
            .flatten()
            .map(|corner| {
                let resolved = self.resolve(corner);
                MeshVertex::new(resolved.position, resolved.texcoord.unwrap_or([0.0; 2]))
            })
            .collect()
    }
}

/// Interleaved position/uv vertex, laid out for direct upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub const fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }
}

#[inline]
pub fn vertex_bytes(vertices: &[MeshVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Splits a convex polygon into `n - 2` triangles sharing its first corner.
/// Fewer than three corners yield nothing.
pub fn fan_triangulate<T: Copy>(polygon: &[T]) -> Vec<[T; 3]> {
    let Some((&first, rest)) = polygon.split_first() else {
        return Vec::new();
    };
    rest.windows(2).map(|pair| [first, pair[0], pair[1]]).collect()
}
