use sentencepiece::SentencePieceProcessor;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{PipelineError, Result};
use super::SubwordModel;

/// SentencePiece backed subword model
pub struct SentencePieceModel {
    processor: SentencePieceProcessor,
    path: PathBuf,
}

impl SentencePieceModel {
    /// Load a trained `.model` file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PipelineError::FileNotFound(path.display().to_string()));
        }

        let processor =
            SentencePieceProcessor::open(path).map_err(|source| PipelineError::ModelLoad {
                path: path.to_path_buf(),
                source,
            })?;

        debug!("Loaded subword model {} ({} pieces)", path.display(), processor.len());

        Ok(Self {
            processor,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SubwordModel for SentencePieceModel {
    fn encode_pieces(&self, text: &str) -> Result<Vec<String>> {
        let pieces = self.processor.encode(text)?;
        Ok(pieces.into_iter().map(|p| p.piece).collect())
    }

    fn decode_pieces(&self, pieces: &[String]) -> Result<String> {
        Ok(self.processor.decode_pieces(pieces)?)
    }
}
