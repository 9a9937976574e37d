//! Typed failures reported by the asset loaders.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The mesh file could not be opened or read.
    #[error("mesh file {path:?} not found or unreadable: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file parsed but produced no faces, so there is nothing to draw.
    #[error("mesh file {path:?} contains no faces")]
    Empty { path: PathBuf },
    #[error("malformed record in {path:?} line {line_no} ({reason}): '{line}'")]
    Malformed {
        path: PathBuf,
        line_no: usize,
        line: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("texture file {path:?} not found")]
    NotFound { path: PathBuf },
    #[error("failed to decode texture {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("a cubemap needs exactly 6 faces, got {0}")]
    FaceCount(usize),
}
