//! Shared plumbing for the baking binaries: logging, argument parsing and
//! output writing.

use std::{
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};
use asset::HeaderSymbols;
use clap::Parser;
use corelib::codegen::symbol_prefix;

/// Log to stderr, `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

/// Parse the command line; usage errors exit with code 1.
pub fn parse_args<T: Parser>() -> T {
    T::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        // Nothing sensible to do if stderr itself is gone.
        let _ = err.print();
        std::process::exit(code);
    })
}

/// Banner file name and symbol prefix for `input`, unless `name` overrides it.
pub fn header_symbols(input: &Path, name: Option<&str>) -> HeaderSymbols {
    let source_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    HeaderSymbols::new(source_name, symbol_prefix(name.unwrap_or(&stem)))
}

/// Write a fully rendered header to `output`, or to stdout when `None`.
pub fn write_output(header: &[u8], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, header)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {} bytes to {}", header.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(header).context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
