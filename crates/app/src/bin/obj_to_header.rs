//! obj-to-header: bake an OBJ mesh into a C header with a flat vertex array
//! and a `uint16_t` triangle index array.

use std::path::PathBuf;

use anyhow::Result;
use asset::{MeshData, load_obj_from_path, render_mesh_header};
use clap::Parser;

#[derive(Parser)]
#[command(name = "obj-to-header")]
#[command(about = "Convert an OBJ mesh to a C header with unique (position, uv) vertices")]
#[command(version)]
struct Cli {
    /// Input OBJ file
    input: PathBuf,

    /// Write the header here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Symbol prefix (default: input file stem)
    #[arg(short, long)]
    name: Option<String>,
}

fn main() -> Result<()> {
    app::init_logging();
    let cli: Cli = app::parse_args();

    let obj = load_obj_from_path(&cli.input)?;
    let mesh = MeshData::from_obj(&obj)?;

    log::info!(
        "Parsed: {} positions, {} UVs, {} faces ({} tris) -> {} unique verts",
        obj.positions.len(),
        obj.texcoords.len(),
        obj.faces.len(),
        mesh.triangle_count(),
        mesh.vertex_count()
    );

    let symbols = app::header_symbols(&cli.input, cli.name.as_deref());
    let header = render_mesh_header(&mesh, &symbols)?;
    app::write_output(&header, cli.output.as_deref())?;
    Ok(())
}
