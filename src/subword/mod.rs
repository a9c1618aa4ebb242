// Subword layer
//
// - SubwordModel: the segmentation backend, shared read-only across workers
// - SentencePieceModel: backend loading a trained SentencePiece `.model` file
// - SubwordCodec: line-oriented encode/decode over strings and files

pub mod codec;
pub mod spm;

pub use codec::*;
pub use spm::SentencePieceModel;

use crate::error::Result;

/// Marker SentencePiece puts in front of pieces that start a word
pub const WORD_BOUNDARY: char = '\u{2581}';

/// Trained subword segmentation model
pub trait SubwordModel: Send + Sync {
    /// Segment text into pieces
    fn encode_pieces(&self, text: &str) -> Result<Vec<String>>;

    /// Reassemble pieces into plain text
    fn decode_pieces(&self, pieces: &[String]) -> Result<String>;
}
