use nalgebra::{Point3, Vector2, Vector3};

/// One corner of a face: zero-based indices into the model's shared
/// position/texcoord/normal stores.
///
/// Each component is independently optional. A reference that was missing,
/// malformed or out of range in the source resolves to `None` rather than
/// failing the parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VertexIndices {
    pub position: Option<usize>,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

/// An ordered polygon corner list. Degenerate faces (fewer than three
/// corners) are kept as parsed; validation is the consumer's concern.
#[derive(Debug, Clone, Default)]
pub struct Face {
    pub corners: Vec<VertexIndices>,
}

/// A material-homogeneous run of faces within an object.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Material name from `usemtl`; empty for the implicit default mesh.
    pub material: String,
    pub faces: Vec<Face>,
}

/// A named group of meshes started by an `o` directive, or synthesized
/// unnamed for files whose faces appear before any `o`.
#[derive(Debug, Clone, Default)]
pub struct Object {
    pub name: String,
    pub meshes: Vec<Mesh>,
}

/// Everything parsed out of one OBJ file.
///
/// Positions, normals and texture coordinates are flat, in order of
/// appearance, and shared across all objects; faces refer to them through
/// [`VertexIndices`]. The model owns all of its data — nothing in here
/// borrows from the mapped file it was parsed from.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub positions: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub texcoords: Vec<Vector2<f32>>,
    pub objects: Vec<Object>,
}

impl Model {
    /// Total number of faces across all objects and meshes.
    pub fn face_count(&self) -> usize {
        self.objects
            .iter()
            .flat_map(|o| &o.meshes)
            .map(|m| m.faces.len())
            .sum()
    }

    /// Total number of face corners across the whole model.
    pub fn corner_count(&self) -> usize {
        self.objects
            .iter()
            .flat_map(|o| &o.meshes)
            .flat_map(|m| &m.faces)
            .map(|f| f.corners.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.objects.is_empty()
    }
}
