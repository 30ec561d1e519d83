// src/cd/mod.rs
use std::str::FromStr;
use thiserror::Error;

pub const SECTOR_SIZE: usize = 2352;
pub const WAV_HEADER_SIZE: u64 = 44;
pub const FRAMES_PER_SECOND: i64 = 75;
/// Two second lead-in every disc starts with, in frames.
pub const LEAD_IN_FRAMES: i64 = 150;
/// Gap between the audio session and a trailing data session on enhanced discs.
pub const SESSION_GAP_FRAMES: i64 = 11400;
pub const MAX_TRACKS: usize = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Msf {
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u8,
}

impl Msf {
    /// Absolute frame count, without removing the lead-in.
    pub fn to_frames(&self) -> i64 {
        (self.minutes as i64 * 60 + self.seconds as i64) * FRAMES_PER_SECOND + self.frames as i64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid MSF format: {0}")]
pub struct InvalidMsf(pub String);

impl FromStr for Msf {
    type Err = InvalidMsf;

    fn from_str(msf_str: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = msf_str.split(':').collect();
        if parts.len() != 3 {
            return Err(InvalidMsf(msf_str.to_string()));
        }

        let field = |s: &str| s.parse::<u8>().map_err(|_| InvalidMsf(msf_str.to_string()));

        Ok(Msf {
            minutes: field(parts[0])?,
            seconds: field(parts[1])?,
            frames: field(parts[2])?,
        })
    }
}
