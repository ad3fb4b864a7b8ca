//! Helpers shared by the C header emitters.

use std::fmt::Display;
use std::io::{self, Write};

/// Turn a file stem into a lower-case C identifier prefix.
///
/// Characters outside `[a-z0-9_]` become `_`; a leading digit gets a `_` prefix.
pub fn symbol_prefix(stem: &str) -> String {
    let mut out: String = stem
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if out.is_empty() {
        out.push_str("asset");
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// `car2` -> `Car2`, `wheel_front` -> `WheelFront`.
pub fn type_name(prefix: &str) -> String {
    let name: String = prefix
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Write `values` as comma-separated rows of at most `per_line` entries.
///
/// Every row but the last ends with a trailing comma.
pub fn write_wrapped<W, T>(out: &mut W, values: &[T], per_line: usize, indent: &str) -> io::Result<()>
where
    W: Write,
    T: Display,
{
    let per_line = per_line.max(1);
    let rows = values.len().div_ceil(per_line);
    for (row, chunk) in values.chunks(per_line).enumerate() {
        let line = chunk
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let comma = if row + 1 < rows { "," } else { "" };
        writeln!(out, "{indent}{line}{comma}")?;
    }
    Ok(())
}
