//! Contains the crate-wide error type.

use std::{io, path::PathBuf};
use thiserror::Error;

/// The errors that can occur while building a mosaic.
///
/// Every error is terminal for a single run: nothing is retried and no
/// partial result is returned.
#[derive(Debug, Error)]
pub enum Error {
    /// An input file is missing or could not be read.
    #[error("cannot read {}: {source}", path.display())]
    NotFound {
        /// The path that was opened.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An input image is corrupt or in an unsupported format.
    #[cfg(feature = "image")]
    #[error("cannot decode image {}: {source}", path.display())]
    Decode {
        /// The path of the image.
        path: PathBuf,
        /// The underlying decoding error.
        #[source]
        source: image::ImageError,
    },

    /// A palette does not have the expected structure.
    #[error("malformed palette: {0}")]
    MalformedPalette(#[from] serde_json::Error),

    /// A quantizer was given a palette without any entries.
    #[error("palette is empty")]
    EmptyPalette,

    /// An output image could not be written.
    #[cfg(feature = "image")]
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// The destination path.
        path: PathBuf,
        /// The underlying encoding or I/O error.
        #[source]
        source: image::ImageError,
    },
}
