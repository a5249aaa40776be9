use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Named stages of a publish run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Launch,
    Authenticate,
    UploadAudio,
    ConfirmSave,
    SetTitle,
    SetDescription,
    SetPublishDate,
    SetExplicitFlag,
    UploadArtwork,
    Submit,
}

impl Stage {
    pub const ALL: [Stage; 10] = [
        Stage::Launch,
        Stage::Authenticate,
        Stage::UploadAudio,
        Stage::ConfirmSave,
        Stage::SetTitle,
        Stage::SetDescription,
        Stage::SetPublishDate,
        Stage::SetExplicitFlag,
        Stage::UploadArtwork,
        Stage::Submit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Launch => "launch and navigate",
            Stage::Authenticate => "authenticate",
            Stage::UploadAudio => "upload audio",
            Stage::ConfirmSave => "confirm save button enabled",
            Stage::SetTitle => "set title",
            Stage::SetDescription => "set description",
            Stage::SetPublishDate => "set publish date",
            Stage::SetExplicitFlag => "set explicit flag",
            Stage::UploadArtwork => "upload artwork",
            Stage::Submit => "submit episode",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Upload not confirmed within {}s", .timeout.as_secs())]
    UploadTimeout { timeout: Duration },

    #[error("Date picker navigation failed: {0}")]
    Navigation(String),

    #[error("Unable to post episode at stage '{stage}': {source}")]
    Workflow {
        stage: Stage,
        #[source]
        source: Box<Error>,
    },

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Timed out after {}ms waiting for {locator}", .timeout.as_millis())]
    WaitTimeout { locator: String, timeout: Duration },

    #[error("Browser backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse episode metadata: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid episode: {0}")]
    InvalidEpisode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Wrap a failure with the stage it happened in
    pub fn at_stage(stage: Stage, source: Error) -> Self {
        Error::Workflow {
            stage,
            source: Box::new(source),
        }
    }

    /// Stage of a wrapped workflow failure
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Workflow { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Innermost cause, unwrapping any stage wrappers
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Workflow { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
