//! Minimal OBJ parser supporting positions, normals and texture coordinates.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    str::SplitWhitespace,
};

use crate::error::LoadError;
use crate::mesh::{Corner, MeshData, fan_triangulate};

/// Index that could not be resolved at parse time (`0`, or a relative index
/// reaching before the first record). Always out of range on lookup; for
/// texcoords and normals it is cleared to `None` before the mesh is returned.
const UNRESOLVED: usize = usize::MAX;

/// Load an OBJ mesh from a file path. Every call parses the file afresh.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<MeshData, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = parse_obj(BufReader::new(file), path)?;
    log::debug!(
        "Loaded OBJ {:?}: {} positions, {} texcoords, {} triangles",
        path,
        mesh.positions().len(),
        mesh.texcoords().len(),
        mesh.triangles().len()
    );
    Ok(mesh)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> Result<MeshData, LoadError> {
    parse_obj(reader, Path::new("<reader>"))
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> Result<MeshData, LoadError> {
    parse_obj(io::Cursor::new(contents), Path::new("<string>"))
}

/// Per-line parse failure, turned into [`LoadError::Malformed`] by the caller.
struct LineError(String);

fn parse_obj<R: BufRead>(reader: R, source: &Path) -> Result<MeshData, LoadError> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut texcoords: Vec<[f32; 2]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut triangles = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|source_err| LoadError::NotFound {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        let line = match line_no {
            0 => line.strip_prefix('\u{feff}').unwrap_or(line.as_str()),
            _ => line.as_str(),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };

        let parsed = match tag {
            "v" => parse_floats::<3>(&mut parts, "position").map(|p| positions.push(p)),
            "vt" => parse_floats::<2>(&mut parts, "texture coordinate").map(|t| texcoords.push(t)),
            "vn" => parse_floats::<3>(&mut parts, "normal").map(|n| normals.push(n)),
            "f" => parse_face(parts, positions.len(), texcoords.len(), normals.len())
                .map(|face| triangles.extend(face)),
            // Ignore other directives (o/g/s/usemtl/mtllib/etc.)
            _ => Ok(()),
        };

        parsed.map_err(|LineError(reason)| LoadError::Malformed {
            path: source.to_path_buf(),
            line_no: line_no + 1,
            line: trimmed.to_owned(),
            reason,
        })?;
    }

    if triangles.is_empty() {
        return Err(LoadError::Empty {
            path: source.to_path_buf(),
        });
    }

    let mesh = MeshData::new(positions, texcoords, normals, triangles);
    let dangling = mesh.dangling_refs();
    if dangling.positions > 0 {
        log::warn!(
            "{:?}: {} corner(s) reference missing positions; substituting the origin",
            source,
            dangling.positions
        );
    }
    if dangling.texcoords > 0 || dangling.normals > 0 {
        log::warn!(
            "{:?}: {} texcoord and {} normal reference(s) out of range; treated as absent",
            source,
            dangling.texcoords,
            dangling.normals
        );
    }
    Ok(mesh.without_dangling_attributes())
}

fn parse_floats<const N: usize>(
    parts: &mut SplitWhitespace<'_>,
    what: &str,
) -> Result<[f32; N], LineError> {
    let mut out = [0.0; N];
    for (axis, slot) in out.iter_mut().enumerate() {
        let token = parts
            .next()
            .ok_or_else(|| LineError(format!("{what} needs {N} components, got {axis}")))?;
        *slot = token
            .parse::<f32>()
            .map_err(|e| LineError(format!("invalid {what} component '{token}': {e}")))?;
    }
    Ok(out)
}

/// Parses the corners of one face and fan-triangulates them. An attribute
/// missing on any corner is dropped from the whole face.
fn parse_face<'a>(
    parts: impl Iterator<Item = &'a str>,
    pos_count: usize,
    tex_count: usize,
    norm_count: usize,
) -> Result<Vec<[Corner; 3]>, LineError> {
    let mut corners = parts
        .map(|token| parse_corner(token, pos_count, tex_count, norm_count))
        .collect::<Result<Vec<_>, _>>()?;

    if corners.len() < 3 {
        return Err(LineError(format!(
            "face needs at least 3 corners, got {}",
            corners.len()
        )));
    }

    let all_tex = corners.iter().all(|c| c.texcoord.is_some());
    let all_norm = corners.iter().all(|c| c.normal.is_some());
    for corner in &mut corners {
        corner.texcoord = corner.texcoord.filter(|_| all_tex);
        corner.normal = corner.normal.filter(|_| all_norm);
    }

    Ok(fan_triangulate(&corners))
}

fn parse_corner(
    token: &str,
    pos_count: usize,
    tex_count: usize,
    norm_count: usize,
) -> Result<Corner, LineError> {
    let mut split = token.split('/');
    let pos = match split.next() {
        Some(value) if !value.is_empty() => resolve_index(value, pos_count)?,
        _ => return Err(LineError(format!("face corner '{token}' has no position index"))),
    };

    let tex = match split.next() {
        Some(value) if !value.is_empty() => Some(resolve_index(value, tex_count)?),
        _ => None,
    };

    let norm = match split.next() {
        Some(value) if !value.is_empty() => Some(resolve_index(value, norm_count)?),
        _ => None,
    };

    if split.next().is_some() {
        return Err(LineError(format!("face corner '{token}' has too many slots")));
    }

    Ok(Corner::new(pos, tex, norm))
}

/// Converts a 1-based (or negative, relative) OBJ index to 0-based. Range
/// checks happen on lookup, so any integer is accepted here.
fn resolve_index(token: &str, seen: usize) -> Result<usize, LineError> {
    let raw = token
        .parse::<i64>()
        .map_err(|_| LineError(format!("invalid index '{token}'")))?;

    let idx = match raw {
        r if r > 0 => usize::try_from(r - 1).unwrap_or(UNRESOLVED),
        r if r < 0 => usize::try_from(r.unsigned_abs())
            .ok()
            .and_then(|back| seen.checked_sub(back))
            .unwrap_or(UNRESOLVED),
        _ => UNRESOLVED,
    };
    Ok(idx)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_obj(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cityview-{}-{name}.obj", std::process::id()));
        std::fs::write(&path, contents).expect("write temp obj");
        path
    }

    #[test]
    fn parse_simple_triangle() {
        let src = r#"
            v 0.0 0.0 0.0
            v 1.0 0.0 0.0
            v 0.0 1.0 0.0
            vn 0.0 0.0 1.0
            vt 0.0 0.0
            vt 1.0 0.0
            vt 0.0 1.0
            f 1/1/1 2/2/1 3/3/1
        "#;
        let mesh = load_obj_from_str(src).expect("parse triangle");
        assert_eq!(mesh.positions().len(), 3);
        assert_eq!(mesh.triangles().len(), 1);
        assert_eq!(
            mesh.triangles()[0],
            [
                Corner::new(0, Some(0), Some(0)),
                Corner::new(1, Some(1), Some(0)),
                Corner::new(2, Some(2), Some(0)),
            ]
        );
        assert!(mesh.is_renderable());
    }

    #[test]
    fn indices_become_zero_based() {
        let mesh = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").expect("parse");
        let tri = mesh.triangles()[0];
        assert_eq!(tri.map(|c| c.position), [0, 1, 2]);
        assert_eq!(mesh.resolve(&tri[1]).position, [1.0, 0.0, 0.0]);
        assert_eq!(mesh.resolve(&tri[2]).position, [0.0, 1.0, 0.0]);
        assert_eq!(tri[0].texcoord, None);
        assert_eq!(tri[0].normal, None);
    }

    #[test]
    fn quad_is_fan_triangulated() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = load_obj_from_str(src).expect("parse quad");
        let tris: Vec<[usize; 3]> = mesh
            .triangles()
            .iter()
            .map(|t| t.map(|c| c.position))
            .collect();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn ngon_keeps_attribute_alignment() {
        let src = "\
v 0 0 0
v 1 0 0
v 2 1 0
v 1 2 0
v 0 1 0
vt 0 0
vt 0.1 0
vt 0.2 0
vt 0.3 0
vt 0.4 0
f 1/5 2/4 3/3 4/2 5/1
";
        let mesh = load_obj_from_str(src).expect("parse pentagon");
        assert_eq!(mesh.triangles().len(), 3);
        for tri in mesh.triangles() {
            for corner in tri {
                assert_eq!(corner.texcoord, Some(4 - corner.position));
            }
        }
    }

    #[test]
    fn missing_texcoord_slot_is_absent() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nvn 0 0 1\nvn 0 0 1\nf 1//1 2//2 3//3\n";
        let mesh = load_obj_from_str(src).expect("parse");
        let tri = mesh.triangles()[0];
        assert!(tri.iter().all(|c| c.texcoord.is_none()));
        assert_eq!(tri.map(|c| c.position), [0, 1, 2]);
        assert_eq!(tri.map(|c| c.normal), [Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn partial_texcoords_drop_for_whole_face() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nvt 0 0\nvt 1 0\nf 1/1 2/2 3 4\n";
        let mesh = load_obj_from_str(src).expect("parse");
        assert_eq!(mesh.triangles().len(), 2);
        assert!(mesh.triangles().iter().flatten().all(|c| c.texcoord.is_none()));
    }

    #[test]
    fn out_of_range_position_recovers_to_origin() {
        let mesh = load_obj_from_str("v 1 1 1\nv 2 2 2\nv 3 3 3\nf 1 2 99\n").expect("still loads");
        let tri = mesh.triangles()[0];
        assert_eq!(mesh.resolve(&tri[2]).position, [0.0, 0.0, 0.0]);
        assert_eq!(mesh.resolve(&tri[0]).position, [1.0, 1.0, 1.0]);
        assert_eq!(mesh.dangling_refs().positions, 1);
    }

    #[test]
    fn out_of_range_texcoord_degrades_to_absent() {
        let mesh = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.5 0.5\nf 1/1 2/1 3/7\n")
            .expect("parse");
        let tri = mesh.triangles()[0];
        assert_eq!(mesh.resolve(&tri[0]).texcoord, Some([0.5, 0.5]));
        assert_eq!(mesh.resolve(&tri[2]).texcoord, None);
        assert_eq!(tri[0].texcoord, Some(0));
        assert_eq!(tri[2].texcoord, None);
    }

    #[test]
    fn out_of_range_normal_degrades_to_absent() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//5 3//0\n";
        let mesh = load_obj_from_str(src).expect("parse");
        let tri = mesh.triangles()[0];
        assert_eq!(tri.map(|c| c.normal), [Some(0), None, None]);
        assert_eq!(mesh.resolve(&tri[0]).normal, Some([0.0, 0.0, 1.0]));
        assert_eq!(mesh.resolve(&tri[1]).normal, None);
        assert!(
            mesh.triangles()
                .iter()
                .flatten()
                .filter_map(|c| c.normal)
                .all(|i| i < mesh.normals().len())
        );
    }

    #[test]
    fn byte_order_mark_is_skipped() {
        let mesh = load_obj_from_str("\u{feff}v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").expect("parse");
        assert_eq!(mesh.positions().len(), 3);
        assert_eq!(mesh.resolve(&mesh.triangles()[0][1]).position, [1.0, 0.0, 0.0]);
        assert!(mesh.dangling_refs().is_clean());
    }

    #[test]
    fn zero_and_relative_indices() {
        let mesh = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\nf 0 1 2\n")
            .expect("parse");
        assert_eq!(mesh.triangles()[0].map(|c| c.position), [0, 1, 2]);
        assert_eq!(mesh.resolve(&mesh.triangles()[1][0]).position, [0.0; 3]);
        assert_eq!(mesh.dangling_refs().positions, 1);
    }

    #[test]
    fn ignores_comments_and_unknown_records() {
        let src = "# header\nmtllib city.mtl\no Block\nv 0 0 0\ng walls\nv 1 0 0\ns off\nv 0 1 0\nusemtl brick\nf 1 2 3\n";
        let mesh = load_obj_from_str(src).expect("parse");
        assert_eq!(mesh.triangles().len(), 1);
    }

    #[test]
    fn vertices_without_faces_are_empty() {
        let err = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\n").unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn bad_number_is_malformed_with_line() {
        let err = load_obj_from_str("v 0 0 0\nv 1 zero 0\n").unwrap_err();
        match err {
            LoadError::Malformed { line_no, line, .. } => {
                assert_eq!(line_no, 2);
                assert_eq!(line, "v 1 zero 0");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_records_are_malformed() {
        for src in ["v 1 2\n", "vt 1\n", "v 0 0 0\nv 1 0 0\nf 1 2\n", "v 0 0 0\nf 1/x 1 1\n", "f /1 1 1\n"] {
            let err = load_obj_from_str(src).unwrap_err();
            assert!(matches!(err, LoadError::Malformed { .. }), "{src:?} -> {err:?}");
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_obj_from_path("/definitely/not/here/city.obj").unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn loads_from_disk_each_time() {
        let path = temp_obj("disk", "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2/1 3/1\n");
        let first = load_obj_from_path(&path).expect("first load");
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3 4\n").expect("rewrite");
        let second = load_obj_from_path(&path).expect("second load");
        let _ = std::fs::remove_file(&path);
        assert_eq!(first.triangles().len(), 1);
        assert_eq!(second.triangles().len(), 2);
    }
}
