use crate::toc::correction::TocCorrector;
use clap::{Args, ValueEnum};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePreference {
    /// Don't look at release dates
    #[default]
    No,
    /// Prefer the oldest release
    Earlier,
    /// Prefer the newest release
    Later,
}

/// Settings for reading the disc layout.
#[derive(Args, Debug, Clone)]
pub struct ScanPreferences {
    /// Device path of the drive
    #[arg(long, short = 'd', value_name = "DEVICE", default_value = "/dev/cdrom")]
    pub cdrom: String,

    /// Rip audio hidden before the first track as track 0
    #[arg(long, default_value_t = false)]
    pub rip_hidden_audio: bool,

    /// Minimum length in seconds hidden audio needs to become its own track
    #[arg(long, value_name = "SECONDS", default_value_t = 2.0)]
    pub min_length_hidden_track: f64,
}

impl ScanPreferences {
    pub fn corrector(&self) -> TocCorrector {
        TocCorrector {
            rip_hidden_audio: self.rip_hidden_audio,
            min_length_hidden_track: self.min_length_hidden_track,
        }
    }
}

/// Settings for picking one release when MusicBrainz knows several.
#[derive(Args, Debug, Clone, Default)]
pub struct ReleasePreferences {
    /// Prefer releases from this country code, e.g. US
    #[arg(long, value_name = "COUNTRY", default_value = "")]
    pub prefer_musicbrainz_countries: String,

    /// Prefer the earlier or later release when several match
    #[arg(long, value_enum, default_value_t = DatePreference::No)]
    pub prefer_musicbrainz_date: DatePreference,

    /// Also fetch release groups to learn the earliest release date
    #[arg(long, default_value_t = false)]
    pub use_earliest_date: bool,
}
