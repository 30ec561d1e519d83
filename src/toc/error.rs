use thiserror::Error;

#[derive(Debug, Error)]
pub enum TocError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No disc found in drive {device}, please put an audio disc in first")]
    DiscNotFound { device: String },

    #[error("{program} doesn't recognize the parameters")]
    UnsupportedParameters { program: String },

    #[error("Drive {device} is not found")]
    DeviceNotFound { device: String },

    #[error("No audio tracks found")]
    NoAudioTracks,

    #[error("Malformed track line: {0}")]
    MalformedTrackLine(String),

    #[error(transparent)]
    InvalidMsf(#[from] crate::cd::InvalidMsf),

    #[error("Pregap of {pregap} sectors for track {track} exceeds the length of the previous track")]
    PregapTooLong { track: u32, pregap: i64 },

    #[error("Gaps can only be merged once, after the first track offset has been checked")]
    CorrectionOrder,
}

pub type TocResult<T> = Result<T, TocError>;
