use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use cli_clipboard::{ClipboardContext, ClipboardProvider};
use thiserror::Error;

use crate::config::{ShareConfig, ShareKind};

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
    #[error("failed to write to clipboard: {0}")]
    Clipboard(String),
    #[error("failed to write {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The host's share capability. Callers treat it as an opaque fallible call.
pub trait ShareTarget {
    fn share(&mut self, text: &str) -> Result<(), ShareError>;

    /// Short human-readable destination for status messages.
    fn destination(&self) -> String;
}

pub struct ClipboardShare;

impl ShareTarget for ClipboardShare {
    fn share(&mut self, text: &str) -> Result<(), ShareError> {
        let mut ctx =
            ClipboardContext::new().map_err(|e| ShareError::ClipboardUnavailable(e.to_string()))?;
        ctx.set_contents(text.to_owned())
            .map_err(|e| ShareError::Clipboard(e.to_string()))
    }

    fn destination(&self) -> String {
        String::from("clipboard")
    }
}

/// Appends each shared summary to a file, separated by a blank line.
pub struct FileShare {
    path: PathBuf,
}

impl FileShare {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ShareTarget for FileShare {
    fn share(&mut self, text: &str) -> Result<(), ShareError> {
        let map_err = |source: io::Error| ShareError::File {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(map_err)?;
        writeln!(file, "{}\n", text).map_err(map_err)
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

pub fn from_config(config: &ShareConfig) -> Box<dyn ShareTarget> {
    match (config.target, &config.path) {
        (ShareKind::File, Some(path)) => Box::new(FileShare::new(path.clone())),
        _ => Box::new(ClipboardShare),
    }
}
