// In: src/artifact.rs

//! Persistence of the encoded blob between the encode and decode halves of a
//! round trip.
//!
//! The driver only talks to the [`ArtifactStore`] trait. Both stores here keep
//! the words verbatim; neither records the element count.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::CodecError;
use crate::io::{read_words, write_words};

/// **CONTRACT:** `load` returns exactly the words last handed to `persist`.
pub trait ArtifactStore {
    fn persist(&mut self, words: &[u32]) -> Result<(), CodecError>;
    fn load(&mut self) -> Result<Vec<u32>, CodecError>;
}

//==================================================================================
// 1. In-Memory Store
//==================================================================================

#[derive(Debug, Default, Clone)]
pub struct MemoryArtifact {
    words: Option<Vec<u32>>,
}

impl MemoryArtifact {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(&self) -> Option<&[u32]> {
        self.words.as_deref()
    }
}

impl ArtifactStore for MemoryArtifact {
    fn persist(&mut self, words: &[u32]) -> Result<(), CodecError> {
        self.words = Some(words.to_vec());
        Ok(())
    }

    fn load(&mut self) -> Result<Vec<u32>, CodecError> {
        self.words.clone().ok_or_else(|| {
            CodecError::InternalError("load called before anything was persisted".to_string())
        })
    }
}

//==================================================================================
// 2. File Store (raw native-endian word dump)
//==================================================================================

#[derive(Debug, Clone)]
pub struct FileArtifact {
    path: PathBuf,
}

impl FileArtifact {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArtifactStore for FileArtifact {
    fn persist(&mut self, words: &[u32]) -> Result<(), CodecError> {
        let file = File::create(&self.path)?;
        write_words(BufWriter::new(file), words)?;
        log::debug!("wrote {} words to {}", words.len(), self.path.display());
        Ok(())
    }

    fn load(&mut self) -> Result<Vec<u32>, CodecError> {
        let file = File::open(&self.path)?;
        read_words(BufReader::new(file))
    }
}
