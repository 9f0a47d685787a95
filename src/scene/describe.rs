use crate::scene::model::Model;
use std::fmt::Write;

/// Renders a human-readable summary of a parsed model: totals first, then
/// every object in order with its meshes, materials and face counts.
///
/// Read-only; callable any number of times.
pub fn describe(model: &Model) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "positions: {}", model.positions.len());
    let _ = writeln!(out, "normals:   {}", model.normals.len());
    let _ = writeln!(out, "texcoords: {}", model.texcoords.len());
    let _ = writeln!(out, "objects:   {}", model.objects.len());
    let _ = writeln!(out, "faces:     {}", model.face_count());

    for object in &model.objects {
        let name = if object.name.is_empty() {
            "(unnamed)"
        } else {
            &object.name
        };
        let _ = writeln!(out, "object '{}':", name);
        for mesh in &object.meshes {
            let material = if mesh.material.is_empty() {
                "(default)"
            } else {
                &mesh.material
            };
            let _ = writeln!(out, "  mesh material='{}' faces={}", material, mesh.faces.len());
        }
    }
    out
}
