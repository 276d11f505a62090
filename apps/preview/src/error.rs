//! # Preview Error Type
//!
//! Everything that can stop a scripted session before it prints a snapshot.

use std::path::PathBuf;

use lamsa_ui::UiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Failed to read script {}: {source}", path.display())]
    ReadScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Ui(#[from] UiError),
}

impl From<serde_json::Error> for PreviewError {
    fn from(err: serde_json::Error) -> Self {
        PreviewError::Ui(UiError::Script(err))
    }
}

pub type PreviewResult<T> = Result<T, PreviewError>;
