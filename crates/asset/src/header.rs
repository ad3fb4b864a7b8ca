//! C header emitters for baked meshes and textures.
//!
//! Both headers are self-contained (`#pragma once`) and byte-for-byte
//! reproducible from the same input.

use std::io::Write;

use anyhow::Result;
use corelib::{
    BakeError,
    codegen::{type_name, write_wrapped},
};

use crate::mesh::MeshData;
use crate::texture::Rgb565Texture;

/// Index values must fit in `uint16_t`.
pub const MAX_MESH_VERTICES: usize = u16::MAX as usize + 1;

const INDICES_PER_LINE: usize = 12;
const PIXELS_PER_LINE: usize = 16;

/// Names used in a generated header.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderSymbols {
    /// File name quoted in the banner comment, e.g. `Car2.obj`.
    pub source_name: String,
    /// Lower-case identifier prefix, e.g. `car2`.
    pub prefix: String,
}

impl HeaderSymbols {
    pub fn new(source_name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            prefix: prefix.into(),
        }
    }
}

/// Vertex struct, vertex array, `uint16_t` index array and count constants.
pub fn write_mesh_header<W: Write>(out: &mut W, mesh: &MeshData, names: &HeaderSymbols) -> Result<()> {
    debug_assert!(mesh.is_valid(), "mesh without vertices or indices");
    let vert_count = mesh.vertex_count();
    let tri_count = mesh.triangle_count();
    if vert_count > MAX_MESH_VERTICES {
        return Err(BakeError::TooManyVertices {
            count: vert_count,
            max: MAX_MESH_VERTICES,
        }
        .into());
    }

    let prefix = &names.prefix;
    let vertex_type = format!("{}Vertex", type_name(prefix));

    writeln!(out, "#pragma once")?;
    writeln!(out, "// Auto-generated from {}", names.source_name)?;
    writeln!(out, "// {vert_count} vertices, {tri_count} triangles")?;
    writeln!(out)?;
    writeln!(out, "struct {vertex_type} {{ float x, y, z, u, v; }};")?;
    writeln!(out)?;
    writeln!(out, "static const {vertex_type} {prefix}_verts[{vert_count}] = {{")?;
    for (i, vertex) in mesh.vertices.iter().enumerate() {
        let [x, y, z, u, v] = vertex.components();
        let comma = if i + 1 < vert_count { "," } else { "" };
        writeln!(out, "  {{{x:.5}f, {y:.5}f, {z:.5}f, {u:.5}f, {v:.5}f}}{comma}")?;
    }
    writeln!(out, "}};")?;
    writeln!(out)?;

    writeln!(out, "static const uint16_t {prefix}_indices[{}] = {{", mesh.indices.len())?;
    write_wrapped(out, &mesh.indices, INDICES_PER_LINE, "  ")?;
    writeln!(out, "}};")?;
    writeln!(out)?;

    writeln!(out, "static const int {prefix}_vert_count = {vert_count};")?;
    writeln!(out, "static const int {prefix}_tri_count  = {tri_count};")?;
    Ok(())
}

/// Render the mesh header into memory.
pub fn render_mesh_header(mesh: &MeshData, names: &HeaderSymbols) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_mesh_header(&mut out, mesh, names)?;
    Ok(out)
}

/// Dimension defines and a `PROGMEM` pixel array in `0xRRRR` form.
pub fn write_texture_header<W: Write>(
    out: &mut W,
    texture: &Rgb565Texture,
    names: &HeaderSymbols,
) -> Result<()> {
    debug_assert!(texture.is_valid(), "pixel count does not match dimensions");
    let (width, height) = (texture.width, texture.height);
    let prefix = &names.prefix;
    let upper = prefix.to_ascii_uppercase();

    writeln!(out, "#pragma once")?;
    writeln!(out, "// {} converted to RGB565, {width}x{height}", names.source_name)?;
    writeln!(out, "#define {upper}_TEX_W {width}")?;
    writeln!(out, "#define {upper}_TEX_H {height}")?;
    writeln!(out)?;
    writeln!(
        out,
        "static const uint16_t {prefix}_texture[{}] PROGMEM = {{",
        texture.pixels.len()
    )?;
    let hex: Vec<String> = texture.pixels.iter().map(|p| format!("0x{p:04X}")).collect();
    write_wrapped(out, &hex, PIXELS_PER_LINE, "")?;
    writeln!(out, "}};")?;
    Ok(())
}

/// Render the texture header into memory.
pub fn render_texture_header(texture: &Rgb565Texture, names: &HeaderSymbols) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_texture_header(&mut out, texture, names)?;
    Ok(out)
}
