use crate::io::error::ObjError;
use crate::io::mapping::MappedFile;
use crate::io::scanner::{lines, tokenize, trim};
use crate::scene::model::{Face, Mesh, Model, Object, VertexIndices};
use log::info;
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file and returns the parsed model.
///
/// The file is memory-mapped for the duration of the parse and unmapped
/// before this returns, on success and on error alike. The returned
/// [`Model`] owns all of its data.
///
/// # Errors
/// [`ObjError::FileAccess`] when the path cannot be opened,
/// [`ObjError::Mapping`] when the mapping fails, and
/// [`ObjError::MalformedNumber`] when a coordinate is not a valid float.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Model, ObjError> {
    let path = path.as_ref();
    info!("Loading OBJ file: {}", path.display());

    let mapped = MappedFile::open(path)?;
    let model = parse_obj(mapped.bytes())?;

    info!(
        "OBJ loaded: {} positions, {} normals, {} texcoords, {} objects, {} faces",
        model.positions.len(),
        model.normals.len(),
        model.texcoords.len(),
        model.objects.len(),
        model.face_count(),
    );
    Ok(model)
}

/// Parses OBJ source from an in-memory buffer in one pass.
///
/// Recognized directives: `v`, `vn`, `vt`, `o`, `usemtl`, `f`. Comments,
/// blank lines, unknown keywords and under-length directives are skipped
/// without error. Keyword matching is case-sensitive on the raw bytes.
pub fn parse_obj(buf: &[u8]) -> Result<Model, ObjError> {
    let mut model = Model::default();
    // Index of the object subsequent faces and usemtl apply to. The current
    // mesh is always that object's last mesh, so Vec growth can never leave
    // a stale cursor behind.
    let mut current_object: Option<usize> = None;

    for (line_no, raw) in lines(buf) {
        let line = trim(raw);
        if line.is_empty() || line[0] == b'#' {
            continue;
        }
        let tokens: Vec<&[u8]> = tokenize(line).collect();
        let Some(&keyword) = tokens.first() else {
            continue;
        };

        match keyword {
            b"v" if tokens.len() >= 4 => {
                let x = parse_float(tokens[1], line_no)?;
                let y = parse_float(tokens[2], line_no)?;
                let z = parse_float(tokens[3], line_no)?;
                model.positions.push(Point3::new(x, y, z));
            }
            b"vn" if tokens.len() >= 4 => {
                let x = parse_float(tokens[1], line_no)?;
                let y = parse_float(tokens[2], line_no)?;
                let z = parse_float(tokens[3], line_no)?;
                model.normals.push(Vector3::new(x, y, z));
            }
            b"vt" if tokens.len() >= 3 => {
                let u = parse_float(tokens[1], line_no)?;
                let v = parse_float(tokens[2], line_no)?;
                model.texcoords.push(Vector2::new(u, v));
            }
            b"o" if tokens.len() >= 2 => {
                model.objects.push(Object {
                    name: owned_name(tokens[1]),
                    meshes: Vec::new(),
                });
                current_object = Some(model.objects.len() - 1);
            }
            b"usemtl" if tokens.len() >= 2 => {
                // Before any object exists there is nothing to apply the
                // material to; the directive is dropped.
                if let Some(idx) = current_object {
                    let material = owned_name(tokens[1]);
                    let object = &mut model.objects[idx];
                    if object.meshes.last().is_none_or(|m| m.material != material) {
                        object.meshes.push(Mesh {
                            material,
                            faces: Vec::new(),
                        });
                    }
                }
            }
            b"f" if tokens.len() >= 2 => {
                parse_face(&mut model, &mut current_object, &tokens[1..]);
            }
            _ => {}
        }
    }

    Ok(model)
}

/// Appends one face to the current mesh, synthesizing an unnamed object
/// and/or mesh when the file declares faces before `o`/`usemtl`.
fn parse_face(model: &mut Model, current_object: &mut Option<usize>, corners: &[&[u8]]) {
    let object_idx = *current_object.get_or_insert_with(|| {
        model.objects.push(Object::default());
        model.objects.len() - 1
    });

    // Index resolution uses the store sizes as of this line, not the final
    // sizes; negative references count back from here.
    let position_count = model.positions.len();
    let texcoord_count = model.texcoords.len();
    let normal_count = model.normals.len();

    let object = &mut model.objects[object_idx];
    if object.meshes.is_empty() {
        object.meshes.push(Mesh::default());
    }
    let Some(mesh) = object.meshes.last_mut() else {
        return;
    };

    let mut face = Face::default();
    for corner in corners {
        face.corners.push(parse_corner(
            corner,
            position_count,
            texcoord_count,
            normal_count,
        ));
    }
    mesh.faces.push(face);
}

/// Parses one `v`, `v/vt`, `v//vn` or `v/vt/vn` corner reference.
fn parse_corner(
    token: &[u8],
    position_count: usize,
    texcoord_count: usize,
    normal_count: usize,
) -> VertexIndices {
    let mut fields = token.split(|&b| b == b'/');
    VertexIndices {
        position: fields.next().and_then(|f| resolve_index(f, position_count)),
        texcoord: fields.next().and_then(|f| resolve_index(f, texcoord_count)),
        normal: fields.next().and_then(|f| resolve_index(f, normal_count)),
    }
}

/// Converts a 1-based or negative-relative OBJ index into a zero-based
/// index into a store currently holding `count` elements.
///
/// `-1` is the most recently added element. Empty, malformed, zero and
/// out-of-range references all resolve to `None`: face indices are
/// deliberately lenient where coordinate floats are fatal.
pub fn resolve_index(token: &[u8], count: usize) -> Option<usize> {
    let value: i64 = std::str::from_utf8(token).ok()?.parse().ok()?;
    let resolved = if value > 0 {
        value - 1
    } else {
        // value == 0 lands on `count` and is rejected below.
        count as i64 + value
    };
    if (0..count as i64).contains(&resolved) {
        Some(resolved as usize)
    } else {
        None
    }
}

fn parse_float(token: &[u8], line: usize) -> Result<f32, ObjError> {
    std::str::from_utf8(token)
        .ok()
        .and_then(|t| t.parse::<f32>().ok())
        .ok_or_else(|| ObjError::MalformedNumber {
            token: String::from_utf8_lossy(token).into_owned(),
            line,
        })
}

fn owned_name(token: &[u8]) -> String {
    String::from_utf8_lossy(token).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_positive_is_one_based() {
        for n in 1..=5 {
            assert_eq!(resolve_index(n.to_string().as_bytes(), 5), Some(n - 1));
        }
        assert_eq!(resolve_index(b"6", 5), None);
    }

    #[test]
    fn resolve_negative_counts_from_end() {
        assert_eq!(resolve_index(b"-1", 4), Some(3));
        assert_eq!(resolve_index(b"-4", 4), Some(0));
        assert_eq!(resolve_index(b"-5", 4), None);
    }

    #[test]
    fn resolve_rejects_zero_empty_and_garbage() {
        assert_eq!(resolve_index(b"0", 4), None);
        assert_eq!(resolve_index(b"", 4), None);
        assert_eq!(resolve_index(b"abc", 4), None);
        assert_eq!(resolve_index(b"1.5", 4), None);
        assert_eq!(resolve_index(b"1", 0), None);
    }

    #[test]
    fn vertices_normals_texcoords_append_in_order() {
        let model = parse_obj(b"v 1 2 3\nvt 0.5 0.5\nvn 0 1 0\nv 4 5 6\n").unwrap();
        assert_eq!(model.positions.len(), 2);
        assert_eq!(model.positions[1], Point3::new(4.0, 5.0, 6.0));
        assert_eq!(model.normals.len(), 1);
        assert_eq!(model.texcoords.len(), 1);
        assert!(model.objects.is_empty());
    }

    #[test]
    fn under_length_directives_are_skipped() {
        let model = parse_obj(b"v 1 2\nvn 1\nvt\no\nusemtl\nv 7 8 9\n").unwrap();
        assert_eq!(model.positions.len(), 1);
        assert!(model.normals.is_empty());
        assert!(model.texcoords.is_empty());
        assert!(model.objects.is_empty());
    }

    #[test]
    fn comments_and_blank_lines_have_no_effect() {
        let model = parse_obj(b"# header\n\n   \n\t# indented comment\nv 1 1 1\n").unwrap();
        assert_eq!(model.positions.len(), 1);
    }

    #[test]
    fn malformed_float_aborts_with_line_number() {
        let err = parse_obj(b"v 0 0 0\nv 1 nope 0\n").unwrap_err();
        match err {
            ObjError::MalformedNumber { token, line } => {
                assert_eq!(token, "nope");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn face_before_any_object_synthesizes_unnamed_object_and_mesh() {
        let model = parse_obj(b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(model.objects.len(), 1);
        assert_eq!(model.objects[0].name, "");
        assert_eq!(model.objects[0].meshes.len(), 1);
        assert_eq!(model.objects[0].meshes[0].material, "");
        assert_eq!(model.objects[0].meshes[0].faces.len(), 1);
    }

    #[test]
    fn face_without_slashes_sets_only_positions() {
        let model = parse_obj(b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        let face = &model.objects[0].meshes[0].faces[0];
        assert_eq!(face.corners.len(), 3);
        for (i, corner) in face.corners.iter().enumerate() {
            assert_eq!(corner.position, Some(i));
            assert_eq!(corner.texcoord, None);
            assert_eq!(corner.normal, None);
        }
    }

    #[test]
    fn corner_forms_with_slashes() {
        let src = b"v 0 0 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 1//1 1/1 1\n";
        let model = parse_obj(src).unwrap();
        let corners = &model.objects[0].meshes[0].faces[0].corners;
        assert_eq!(
            corners[0],
            VertexIndices {
                position: Some(0),
                texcoord: Some(0),
                normal: Some(0)
            }
        );
        assert_eq!(corners[1].texcoord, None);
        assert_eq!(corners[1].normal, Some(0));
        assert_eq!(corners[2].texcoord, Some(0));
        assert_eq!(corners[2].normal, None);
        assert_eq!(corners[3], VertexIndices {
            position: Some(0),
            texcoord: None,
            normal: None
        });
    }

    #[test]
    fn negative_indices_resolve_against_current_store_size() {
        // At the first face only two positions exist, so -1 is index 1;
        // at the second face -1 has moved on to index 2.
        let src = b"v 0 0 0\nv 1 0 0\nf -1 -2\nv 2 0 0\nf -1 1\n";
        let model = parse_obj(src).unwrap();
        let faces = &model.objects[0].meshes[0].faces;
        assert_eq!(faces[0].corners[0].position, Some(1));
        assert_eq!(faces[0].corners[1].position, Some(0));
        assert_eq!(faces[1].corners[0].position, Some(2));
        assert_eq!(faces[1].corners[1].position, Some(0));
    }

    #[test]
    fn out_of_range_index_is_absent_not_fatal() {
        let model = parse_obj(b"v 0 0 0\nf 1 2 99\n").unwrap();
        let corners = &model.objects[0].meshes[0].faces[0].corners;
        assert_eq!(corners[0].position, Some(0));
        assert_eq!(corners[1].position, None);
        assert_eq!(corners[2].position, None);
    }

    #[test]
    fn usemtl_before_object_is_ignored() {
        let model = parse_obj(b"usemtl Red\nv 0 0 0\nf 1\n").unwrap();
        assert_eq!(model.objects.len(), 1);
        // The synthesized mesh has no material; the early usemtl was dropped.
        assert_eq!(model.objects[0].meshes[0].material, "");
    }

    #[test]
    fn repeated_usemtl_with_same_material_reuses_mesh() {
        let src = b"v 0 0 0\no Cube\nusemtl Red\nf 1\nf 1\nusemtl Red\nf 1\n";
        let model = parse_obj(src).unwrap();
        let object = &model.objects[0];
        assert_eq!(object.meshes.len(), 1);
        assert_eq!(object.meshes[0].material, "Red");
        assert_eq!(object.meshes[0].faces.len(), 3);
    }

    #[test]
    fn material_change_starts_a_new_mesh() {
        let src = b"v 0 0 0\no Cube\nusemtl Red\nf 1\nusemtl Blue\nf 1\n";
        let model = parse_obj(src).unwrap();
        let object = &model.objects[0];
        assert_eq!(object.meshes.len(), 2);
        assert_eq!(object.meshes[0].material, "Red");
        assert_eq!(object.meshes[1].material, "Blue");
    }

    #[test]
    fn new_object_does_not_inherit_previous_mesh() {
        let src = b"v 0 0 0\no A\nusemtl Red\nf 1\no B\nf 1\n";
        let model = parse_obj(src).unwrap();
        assert_eq!(model.objects.len(), 2);
        assert_eq!(model.objects[1].name, "B");
        assert_eq!(model.objects[1].meshes.len(), 1);
        assert_eq!(model.objects[1].meshes[0].material, "");
    }

    #[test]
    fn degenerate_faces_are_kept() {
        let model = parse_obj(b"v 0 0 0\nv 1 1 1\nf 1\nf 1 2\n").unwrap();
        let faces = &model.objects[0].meshes[0].faces;
        assert_eq!(faces[0].corners.len(), 1);
        assert_eq!(faces[1].corners.len(), 2);
    }

    #[test]
    fn empty_buffer_parses_to_empty_model() {
        let model = parse_obj(b"").unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn crlf_input_parses_like_lf() {
        let model = parse_obj(b"v 0 0 0\r\nv 1 0 0\r\nf 1 2\r\n").unwrap();
        assert_eq!(model.positions.len(), 2);
        assert_eq!(model.face_count(), 1);
    }

    #[test]
    fn unknown_keywords_are_ignored() {
        let model = parse_obj(b"mtllib cube.mtl\ns off\ng group\nv 1 1 1\n").unwrap();
        assert_eq!(model.positions.len(), 1);
        assert!(model.objects.is_empty());
    }
}
