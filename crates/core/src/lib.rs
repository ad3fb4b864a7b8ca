//! Core shared types: error taxonomy and generated-header helpers.

pub mod codegen;

use std::path::PathBuf;

use thiserror::Error;

/// Which OBJ attribute an index refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexKind {
    Position,
    TexCoord,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Position => f.write_str("position"),
            IndexKind::TexCoord => f.write_str("texcoord"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BakeError {
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("{kind} index {index} out of range (len={len})")]
    IndexOutOfRange {
        kind: IndexKind,
        index: usize,
        len: usize,
    },

    #[error("Mesh contains no faces")]
    EmptyMesh,

    #[error("Mesh has {count} unique vertices, uint16_t indices allow at most {max}")]
    TooManyVertices { count: usize, max: usize },

    #[error("Cannot decode {path}: {hint}")]
    UnsupportedImageFormat { path: PathBuf, hint: String },

    #[error("Invalid target dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

impl BakeError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        BakeError::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type BakeResult<T> = Result<T, BakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_line() {
        let err = BakeError::parse(7, "missing z coordinate");
        assert_eq!(
            err.to_string(),
            "Parse error on line 7: missing z coordinate"
        );
    }

    #[test]
    fn index_error_names_kind() {
        let err = BakeError::IndexOutOfRange {
            kind: IndexKind::TexCoord,
            index: 4,
            len: 2,
        };
        assert_eq!(err.to_string(), "texcoord index 4 out of range (len=2)");
    }
}
