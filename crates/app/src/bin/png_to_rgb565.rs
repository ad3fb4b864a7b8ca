//! png-to-rgb565: bake an image into a C header of RGB565 pixels, resized
//! with nearest-neighbour sampling.

use std::path::PathBuf;

use anyhow::Result;
use asset::{
    Rgb565Texture, render_texture_header,
    texture::{DEFAULT_HEIGHT, DEFAULT_WIDTH},
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "png-to-rgb565")]
#[command(about = "Convert an image to a C header with RGB565 pixel data")]
#[command(version)]
struct Cli {
    /// Input image (PNG by default; other codecs behind cargo features)
    input: PathBuf,

    /// Target width in pixels
    #[arg(default_value_t = DEFAULT_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Target height in pixels
    #[arg(default_value_t = DEFAULT_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

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

    log::info!(
        "Converting {} -> {}x{} RGB565...",
        cli.input.display(),
        cli.width,
        cli.height
    );

    let texture = Rgb565Texture::load(&cli.input, cli.width, cli.height)?;
    let symbols = app::header_symbols(&cli.input, cli.name.as_deref());
    let header = render_texture_header(&texture, &symbols)?;
    app::write_output(&header, cli.output.as_deref())?;

    log::info!("Done.");
    Ok(())
}
