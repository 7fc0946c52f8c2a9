//! Output destinations for the rendered document

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{CombinerError, Result};

/// Where the combined document goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    /// Created or truncated on write
    File(PathBuf),
}

impl Sink {
    /// A file sink when a path is given, stdout otherwise
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Sink::File(path),
            None => Sink::Stdout,
        }
    }

    /// Name used in messages
    pub fn display_name(&self) -> String {
        match self {
            Sink::Stdout => "<stdout>".to_string(),
            Sink::File(path) => path.display().to_string(),
        }
    }

    /// Write `rendered` and flush
    pub fn write(&self, rendered: &str) -> Result<()> {
        match self {
            Sink::Stdout => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                write_all(&mut handle, rendered).map_err(|e| CombinerError::io_error("<stdout>", e))
            }
            Sink::File(path) => {
                let mut file = File::create(path).map_err(|e| CombinerError::io_error(path, e))?;
                write_all(&mut file, rendered).map_err(|e| CombinerError::io_error(path, e))?;
                debug!("Wrote {} bytes to {}", rendered.len(), path.display());
                Ok(())
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Sink::Stdout => None,
            Sink::File(path) => Some(path),
        }
    }
}

fn write_all(writer: &mut impl Write, rendered: &str) -> io::Result<()> {
    writer.write_all(rendered.as_bytes())?;
    writer.flush()
}
