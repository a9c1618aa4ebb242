//! nmt-pipeline - subword encoding and OpenNMT translation pipeline
//!
//! Two thin command-line tools share this library: `subword` encodes and
//! decodes text with a SentencePiece model, and `onmt-translate` runs plain
//! text through source encoding, an external `onmt_translate` executable and
//! target decoding.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod subword;
pub mod translate;
pub mod workspace;
