use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

use crate::error::Result;

/// Per-call scratch directory holding the staged pipeline files.
/// The directory and everything in it is removed when this is dropped.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub const PLAIN: &'static str = "plain.txt";
    pub const ENCODED: &'static str = "encoded.txt";
    pub const TRANSLATED: &'static str = "translated.txt";
    pub const DECODED: &'static str = "decoded.txt";

    /// Create a workspace under `root`, or the system temp dir
    pub fn create(root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("nmt-");

        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        debug!("Created workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn plain(&self) -> PathBuf {
        self.dir.path().join(Self::PLAIN)
    }

    pub fn encoded(&self) -> PathBuf {
        self.dir.path().join(Self::ENCODED)
    }

    pub fn translated(&self) -> PathBuf {
        self.dir.path().join(Self::TRANSLATED)
    }

    pub fn decoded(&self) -> PathBuf {
        self.dir.path().join(Self::DECODED)
    }
}
