//! OBJ reader: positions, texture coordinates and polygon faces.
//!
//! Normals, groups, materials and every other directive are skipped. Face
//! vertices keep their (position, texcoord) references; de-duplication happens
//! later in [`crate::mesh`].

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};
use corelib::{BakeError, IndexKind};

/// One `f` entry: 0-based position index plus optional 0-based texcoord index.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FaceVertexRef {
    pub position: usize,
    pub texcoord: Option<usize>,
}

impl FaceVertexRef {
    pub fn new(position: usize, texcoord: Option<usize>) -> Self {
        Self { position, texcoord }
    }

    /// Texcoord slot used for de-duplication and lookup.
    ///
    /// A missing texcoord maps to slot 0, so `f 1` and `f 1/1` share a vertex
    /// when the mesh has texture coordinates.
    pub fn texcoord_slot(&self) -> usize {
        self.texcoord.unwrap_or(0)
    }
}

/// Triangle produced by fan triangulation.
pub type Triangle = [FaceVertexRef; 3];

/// Polygon with three or more vertex references, in file order.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    pub refs: Vec<FaceVertexRef>,
    /// 1-based source line, kept for diagnostics.
    pub line: usize,
}

impl Face {
    /// Fan triangulation around the first vertex: `(v0, vi, vi+1)`.
    ///
    /// Only correct for convex planar polygons.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.refs.first().into_iter().flat_map(move |&first| {
            self.refs
                .windows(2)
                .skip(1)
                .map(move |pair| [first, pair[0], pair[1]])
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.refs.len().saturating_sub(2)
    }
}

/// Everything the converter reads from an OBJ file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjSource {
    pub positions: Vec<[f64; 3]>,
    pub texcoords: Vec<[f64; 2]>,
    pub faces: Vec<Face>,
}

impl ObjSource {
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(Face::triangle_count).sum()
    }

    /// All triangles in file order.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().flat_map(|face| face.triangles())
    }

    /// Check every face reference against the final attribute counts.
    ///
    /// Texcoord references are only checked when the mesh has texcoords; without
    /// any, every vertex falls back to (0, 0).
    fn validate(&self) -> Result<()> {
        for face in &self.faces {
            for r in &face.refs {
                if r.position >= self.positions.len() {
                    return Err(BakeError::IndexOutOfRange {
                        kind: IndexKind::Position,
                        index: r.position + 1,
                        len: self.positions.len(),
                    })
                    .with_context(|| format!("Face on line {}", face.line));
                }
                if !self.texcoords.is_empty() && r.texcoord_slot() >= self.texcoords.len() {
                    return Err(BakeError::IndexOutOfRange {
                        kind: IndexKind::TexCoord,
                        index: r.texcoord_slot() + 1,
                        len: self.texcoords.len(),
                    })
                    .with_context(|| format!("Face on line {}", face.line));
                }
            }
        }
        Ok(())
    }
}

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<ObjSource> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open OBJ file: {}", path.as_ref().display()))?;
    load_obj_from_reader(BufReader::new(file))
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> Result<ObjSource> {
    parse_obj(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> Result<ObjSource> {
    parse_obj(io::Cursor::new(contents))
}

/// Directives the baker has no use for but expects to see in exported OBJs.
fn is_known_directive(tag: &str) -> bool {
    tag.starts_with('#')
        || matches!(
            tag,
            "vn" | "vp" | "o" | "g" | "s" | "l" | "p" | "mg" | "usemtl" | "mtllib"
        )
}

fn parse_obj<R: BufRead>(reader: R) -> Result<ObjSource> {
    let mut source = ObjSource::default();
    let mut skipped = 0usize;
    let mut unknown = 0usize;
    // First relative texcoord reference that pointed before entry 1.
    let mut dangling_texcoord: Option<(usize, i64)> = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        let mut parts = line.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };

        match tag {
            "v" => {
                let x = parse_f64(parts.next(), line_no, "x coordinate")?;
                let y = parse_f64(parts.next(), line_no, "y coordinate")?;
                let z = parse_f64(parts.next(), line_no, "z coordinate")?;
                source.positions.push([x, y, z]);
            }
            "vt" => {
                let u = parse_f64(parts.next(), line_no, "u coordinate")?;
                let v = parse_f64(parts.next(), line_no, "v coordinate")?;
                source.texcoords.push([u, v]);
            }
            "f" => {
                let mut refs = Vec::new();
                for part in parts {
                    let (position, texcoord) = parse_face_vertex(
                        part,
                        source.positions.len(),
                        source.texcoords.len(),
                        line_no,
                    )?;
                    let texcoord = match texcoord {
                        TexRef::Missing => None,
                        TexRef::Index(idx) => Some(idx),
                        TexRef::BeforeFirst(raw) => {
                            dangling_texcoord.get_or_insert((line_no + 1, raw));
                            None
                        }
                    };
                    refs.push(FaceVertexRef::new(position, texcoord));
                }
                if refs.len() < 3 {
                    return Err(BakeError::parse(
                        line_no + 1,
                        format!("face needs at least 3 vertices, found {}", refs.len()),
                    )
                    .into());
                }
                source.faces.push(Face {
                    refs,
                    line: line_no + 1,
                });
            }
            tag if is_known_directive(tag) => skipped += 1,
            _ => unknown += 1,
        }
    }

    // Without any texcoords every vertex reads (0, 0), so a dangling relative
    // reference only matters once texcoords exist.
    if let Some((line, raw)) = dangling_texcoord.filter(|_| !source.texcoords.is_empty()) {
        return Err(BakeError::parse(
            line,
            format!("relative texcoord index {raw} reaches before the first entry"),
        )
        .into());
    }

    source.validate()?;

    if unknown > 0 {
        log::warn!("Ignored {unknown} lines with unrecognised OBJ directives");
    }
    log::debug!(
        "OBJ parsed: {} positions, {} texcoords, {} faces, {} lines skipped",
        source.positions.len(),
        source.texcoords.len(),
        source.faces.len(),
        skipped + unknown
    );

    Ok(source)
}

fn parse_f64(value: Option<&str>, line_no: usize, what: &str) -> Result<f64> {
    let token = value.ok_or_else(|| BakeError::parse(line_no + 1, format!("missing {what}")))?;
    let value = token.parse::<f64>().map_err(|e| {
        BakeError::parse(line_no + 1, format!("invalid {what} '{token}': {e}"))
    })?;
    Ok(value)
}

/// Texcoord part of a face token, before the final texcoord count is known.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum TexRef {
    Missing,
    Index(usize),
    /// Relative index pointing before the first `vt` read so far.
    BeforeFirst(i64),
}

/// Parse `v`, `v/t`, `v/t/n` or `v//n`. The normal index is checked but dropped.
fn parse_face_vertex(
    token: &str,
    pos_count: usize,
    tex_count: usize,
    line_no: usize,
) -> Result<(usize, TexRef)> {
    let mut split = token.split('/');
    let pos = split.next().unwrap_or_default();
    let raw = parse_index(pos, line_no)?;
    let position = resolve_index(raw, pos_count).ok_or_else(|| {
        BakeError::parse(
            line_no + 1,
            format!("relative index {raw} reaches before the first entry (len={pos_count})"),
        )
    })?;

    let texcoord = match split.next() {
        Some(value) if !value.is_empty() => {
            let raw = parse_index(value, line_no)?;
            match resolve_index(raw, tex_count) {
                Some(idx) => TexRef::Index(idx),
                None => TexRef::BeforeFirst(raw),
            }
        }
        _ => TexRef::Missing,
    };

    if let Some(normal) = split.next().filter(|n| !n.is_empty()) {
        normal.parse::<i64>().map_err(|_| {
            BakeError::parse(line_no + 1, format!("invalid normal index '{normal}'"))
        })?;
    }

    Ok((position, texcoord))
}

/// Raw non-zero OBJ index.
fn parse_index(token: &str, line_no: usize) -> Result<i64> {
    let raw = token
        .parse::<i64>()
        .map_err(|_| BakeError::parse(line_no + 1, format!("invalid index '{token}'")))?;
    if raw == 0 {
        return Err(BakeError::parse(line_no + 1, "OBJ indices are 1-based; found 0").into());
    }
    Ok(raw)
}

/// 1-based OBJ index to 0-based. Negative values count back from `len`, the
/// number of entries defined so far, and yield `None` past the first entry;
/// positive values are range-checked once the whole file is read.
fn resolve_index(raw: i64, len: usize) -> Option<usize> {
    if raw > 0 {
        return Some((raw - 1) as usize);
    }
    usize::try_from(len as i64 + raw).ok()
}
