use std::ffi::{OsStr, OsString};
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::error::{PipelineError, Result};

/// Argument-vector representation of a translator invocation.
/// Nothing goes through a shell, so paths are passed verbatim.
#[derive(Debug, Clone)]
pub struct TranslatorCommand {
    pub binary_path: String,
    pub args: Vec<OsString>,
}

impl TranslatorCommand {
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(args.into_iter().map(|s| s.as_ref().to_os_string()));
        self
    }

    /// Translation model file
    pub fn model<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-model").arg(path.as_ref())
    }

    /// Encoded source file
    pub fn src<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-src").arg(path.as_ref())
    }

    /// File receiving the translated tokens
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-output").arg(path.as_ref())
    }

    pub fn min_length(self, length: u32) -> Self {
        self.arg("-min_length").arg(length.to_string())
    }

    /// GPU device, -1 for CPU
    pub fn gpu(self, device: i32) -> Self {
        self.arg("-gpu").arg(device.to_string())
    }

    /// Render for logging, not for execution
    pub fn display(&self) -> String {
        std::iter::once(self.binary_path.clone())
            .chain(self.args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion with output captured
    pub async fn execute(&self) -> Result<()> {
        info!("Translator command: {}", self.display());

        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| {
                error!("[failed] exception running {}: {:?}", self.binary_path, source);
                PipelineError::TranslatorInvocation {
                    binary: self.binary_path.clone(),
                    source,
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("[failed] {} stderr: [{}]", self.binary_path, stderr);
            return Err(PipelineError::TranslatorFailed {
                status: output.status,
                stderr,
            });
        }

        debug!("Translator stdout: {}", String::from_utf8_lossy(&output.stdout).trim());
        Ok(())
    }
}
