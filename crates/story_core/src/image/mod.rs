//! Image attachment encoding.
//!
//! # Responsibility
//! - Turn raw file bytes into `data:<mime>;base64,<payload>` strings.
//! - Model the encode as a detachable job so hosts can run it off the UI path.
//!
//! # Invariants
//! - Only recognised image formats are encoded; MIME comes from magic bytes.
//! - A job remembers the draft generation it was started for.

pub mod data_url;

pub use data_url::{encode_data_url, sniff_image_mime, ImageError};

/// Pending encode request captured from the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJob {
    generation: u64,
    max_bytes: usize,
    bytes: Vec<u8>,
}

impl ImageJob {
    pub(crate) fn new(generation: u64, max_bytes: usize, bytes: Vec<u8>) -> Self {
        Self {
            generation,
            max_bytes,
            bytes,
        }
    }

    /// Draft generation this job targets.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Size of the raw payload.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Performs the encode. Safe to call on any thread.
    pub fn run(self) -> ImageDecoded {
        let result = encode_data_url(&self.bytes, self.max_bytes);
        ImageDecoded {
            generation: self.generation,
            result,
        }
    }
}

/// Completed encode, ready to hand back to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDecoded {
    pub generation: u64,
    pub result: Result<String, ImageError>,
}

/// Outcome of handing an `ImageDecoded` back to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageApplied {
    /// The draft image was replaced.
    Attached,
    /// The draft was replaced after the job started; result dropped.
    Discarded,
}
