use crate::cd::{FRAMES_PER_SECOND, LEAD_IN_FRAMES};
use crate::discid::error::{DiscIdError, DiscIdResult};
use crate::toc::{TocModel, TrackRef};
use std::fmt::Display;

/// freedb/CDDB disc id together with the data needed for a CDDB query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreedbId {
    pub checksum: String,
    pub track_count: u32,
    pub offsets: Vec<i64>,
    pub total_seconds: i64,
}

impl FreedbId {
    pub fn calculate(toc: &TocModel) -> DiscIdResult<Self> {
        if toc.audiotracks == 0 {
            return Err(DiscIdError::NoAudioTracks);
        }

        let offsets: Vec<i64> = toc
            .audio_track_keys()
            .map(|track| toc.start_sector(TrackRef::Track(track)).unwrap_or(0) + LEAD_IN_FRAMES)
            .collect();

        let checksum = offsets
            .iter()
            .map(|offset| cddb_sum(offset / FRAMES_PER_SECOND))
            .sum::<i64>()
            % 0xff;

        let total_seconds = (toc.total_sectors + LEAD_IN_FRAMES) / FRAMES_PER_SECOND;
        let first_track_seconds = offsets[0] / FRAMES_PER_SECOND;

        let id = ((checksum as u32) << 24)
            | (((total_seconds - first_track_seconds) as u32 & 0xffff) << 8)
            | (toc.audiotracks & 0xff);

        Ok(Self {
            checksum: format!("{id:08X}"),
            track_count: toc.audiotracks,
            offsets,
            total_seconds,
        })
    }

    /// Reads the single line printed by `discid` or `cd-discid`.
    pub fn parse(program: &str, line: &str) -> DiscIdResult<Self> {
        let invalid = || DiscIdError::HelperOutput {
            program: program.to_string(),
            output: line.to_string(),
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        let (checksum, track_count) = match fields.as_slice() {
            [checksum, count, ..] if checksum.len() == 8 => {
                (checksum.to_string(), count.parse::<u32>().map_err(|_| invalid())?)
            }
            _ => return Err(invalid()),
        };

        if fields.len() != track_count as usize + 3 {
            return Err(invalid());
        }

        let numbers = fields[2..]
            .iter()
            .map(|f| f.parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        let (total_seconds, offsets) = numbers.split_last().ok_or_else(invalid)?;

        Ok(Self {
            checksum,
            track_count,
            offsets: offsets.to_vec(),
            total_seconds: *total_seconds,
        })
    }

    /// The 8 hex digit id alone.
    pub fn discid(&self) -> &str {
        &self.checksum
    }
}

impl Display for FreedbId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.checksum, self.track_count)?;
        for offset in &self.offsets {
            write!(f, " {offset}")?;
        }
        write!(f, " {}", self.total_seconds)
    }
}

fn cddb_sum(mut n: i64) -> i64 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

#[cfg(test)]
pub mod tests {
    use super::*;

    pub const FREEDB_STRING: &str =
        "7F087C0A 10 150 13359 36689 53647 68322 81247 87332 106882 122368 124230 2174";

    pub fn ten_track_disc() -> TocModel {
        let starts = [
            0, 13209, 36539, 53497, 68172, 81097, 87182, 106732, 122218, 124080,
        ];
        let mut toc = TocModel {
            audiotracks: 10,
            total_sectors: 162919,
            ..Default::default()
        };
        for (i, start) in starts.iter().enumerate() {
            toc.start_sector.insert(i as u32 + 1, *start);
        }
        toc
    }

    #[test]
    fn calculates_freedb_string() {
        let id = FreedbId::calculate(&ten_track_disc()).unwrap();

        assert_eq!(id.to_string(), FREEDB_STRING);
        assert_eq!(id.discid(), "7F087C0A");
    }

    #[test]
    fn parses_helper_output() {
        let id = FreedbId::parse("discid", FREEDB_STRING).unwrap();

        assert_eq!(id.discid(), "7F087C0A");
        assert_eq!(id.track_count, 10);
        assert_eq!(id.offsets.len(), 10);
        assert_eq!(id.total_seconds, 2174);
        assert_eq!(id.to_string(), FREEDB_STRING);
    }

    #[test]
    fn rejects_truncated_helper_output() {
        assert!(FreedbId::parse("discid", "7F087C0A 10 150 13359").is_err());
        assert!(FreedbId::parse("discid", "").is_err());
        assert!(FreedbId::parse("discid", "usage: discid <device>").is_err());
    }

    #[test]
    fn cddb_sum_adds_all_digits() {
        assert_eq!(cddb_sum(0), 0);
        assert_eq!(cddb_sum(178), 16);
        assert_eq!(cddb_sum(1656), 18);
    }

    #[test]
    fn refuses_empty_disc() {
        assert!(matches!(
            FreedbId::calculate(&TocModel::default()),
            Err(DiscIdError::NoAudioTracks)
        ));
    }
}
