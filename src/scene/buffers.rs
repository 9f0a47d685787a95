//! Flattening of a parsed model into the flat buffers the render layer
//! uploads: interleaved position floats and wireframe edge indices.

use crate::scene::model::Model;

/// Interleaved x,y,z position floats, in order of appearance. Ready for
/// direct upload as a vertex buffer.
pub fn position_buffer(model: &Model) -> Vec<f32> {
    let mut out = Vec::with_capacity(model.positions.len() * 3);
    for p in &model.positions {
        out.extend_from_slice(&[p.x, p.y, p.z]);
    }
    out
}

/// Wireframe edge indices: one segment between each pair of consecutive
/// corners of every face, closing the loop for faces with three or more
/// corners. Corners whose position reference failed to resolve are skipped.
pub fn edge_indices(model: &Model) -> Vec<u32> {
    let mut out = Vec::new();
    for face in model
        .objects
        .iter()
        .flat_map(|o| &o.meshes)
        .flat_map(|m| &m.faces)
    {
        let resolved: Vec<u32> = face
            .corners
            .iter()
            .filter_map(|c| c.position)
            .map(|i| i as u32)
            .collect();
        for pair in resolved.windows(2) {
            out.extend_from_slice(pair);
        }
        if resolved.len() >= 3 {
            out.push(resolved[resolved.len() - 1]);
            out.push(resolved[0]);
        }
    }
    out
}
