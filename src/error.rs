use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load subword model {}: {source}", .path.display())]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: sentencepiece::SentencePieceError,
    },

    #[error("SentencePiece error: {0}")]
    SentencePiece(#[from] sentencepiece::SentencePieceError),

    #[error("Subword error: {0}")]
    Subword(String),

    #[error("Translator exited with {status}: {stderr}")]
    TranslatorFailed { status: ExitStatus, stderr: String },

    #[error("Failed to execute translator '{binary}': {source}")]
    TranslatorInvocation {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker error: {0}")]
    Worker(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
