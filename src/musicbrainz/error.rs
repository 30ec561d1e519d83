use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MusicBrainzError {
    #[error(transparent)]
    HttpError(#[from] reqwest::Error),

    #[error("MusicBrainz answered with status code {0}: {1}")]
    NoSuccessStatusCode(StatusCode, String),

    #[error(transparent)]
    XmlError(#[from] quick_xml::Error),

    #[error(transparent)]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),
}

pub type MusicBrainzResult<T> = Result<T, MusicBrainzError>;
