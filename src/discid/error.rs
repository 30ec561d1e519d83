use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscIdError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("{0} is not installed")]
    HelperNotInstalled(String),

    #[error("Unexpected output from {program}: {output}")]
    HelperOutput { program: String, output: String },

    #[error("No strategy could calculate a disc id")]
    NoStrategy,

    #[error("The disc has no audio tracks")]
    NoAudioTracks,

    #[error("A disc holds at most 99 tracks, got track {0}")]
    TooManyTracks(u32),
}

pub type DiscIdResult<T> = Result<T, DiscIdError>;
