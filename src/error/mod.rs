use crate::discid::error::DiscIdError;
use crate::musicbrainz::error::MusicBrainzError;
use crate::toc::error::TocError;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscIdentifyError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    TocError(#[from] TocError),

    #[error(transparent)]
    DiscIdError(#[from] DiscIdError),

    #[error(transparent)]
    MusicBrainzError(#[from] MusicBrainzError),
}

pub type DiscIdentifyResult<T> = result::Result<T, DiscIdentifyError>;
