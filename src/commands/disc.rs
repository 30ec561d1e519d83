use crate::preferences::{ReleasePreferences, ScanPreferences};
use clap::{Args, Parser};
use std::path::PathBuf;

/// Where the disc layout comes from.
#[derive(Args, Debug, Clone)]
pub struct ScanSource {
    #[command(flatten)]
    pub prefs: ScanPreferences,

    /// Read a saved `cdparanoia -vQ` report instead of querying the drive
    #[arg(long, value_name = "TOC_FILE")]
    pub toc_file: Option<PathBuf>,

    /// cdrdao TOC file used to move gaps in front of their track
    #[arg(long, value_name = "CDRDAO_TOC")]
    pub cdrdao_toc: Option<PathBuf>,

    /// Start sector of a data track following the audio session, e.g. from cd-info
    #[arg(long, value_name = "SECTOR")]
    pub data_track_start: Option<i64>,
}

/// Prints the corrected table of contents of the disc.
#[derive(Parser, Debug, Clone)]
pub struct TocCommand {
    #[command(flatten)]
    pub source: ScanSource,
}

/// Calculates the freedb and MusicBrainz disc ids.
#[derive(Parser, Debug, Clone)]
pub struct IdCommand {
    #[command(flatten)]
    pub source: ScanSource,
}

/// Looks the disc up on MusicBrainz and picks a release.
#[derive(Parser, Debug, Clone)]
pub struct LookupCommand {
    #[command(flatten)]
    pub source: ScanSource,

    #[command(flatten)]
    pub prefs: ReleasePreferences,

    /// Index of the release to use when several match
    #[arg(long, short = 'c', value_name = "INDEX", allow_negative_numbers = true)]
    pub choose: Option<i64>,
}
