use crate::cd::MAX_TRACKS;
use crate::toc::error::{TocError, TocResult};
use crate::toc::models::TocModel;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    static ref TRACK_LINE: Regex = Regex::new(r"^\s+\d+\.").unwrap();
    static ref DEVICE_LINE: Regex = Regex::new(r"CDROM\D*:(?P<name>.*)$").unwrap();
}

pub const CDPARANOIA: &str = "cdparanoia";

/// Parses the `-vQ` query report of cdparanoia.
pub struct TocParser<'a> {
    device: &'a str,
}

impl<'a> TocParser<'a> {
    pub fn new(device: &'a str) -> Self {
        Self { device }
    }

    /// Whether the output says the tool rejected the device argument.
    pub fn is_usage_error(query: &str) -> bool {
        query.contains("USAGE")
    }

    /// Checks the report for drive errors, first match wins.
    pub fn validate(&self, query: &str) -> TocResult<()> {
        if query.contains("Unable to open disc") {
            return Err(TocError::DiscNotFound {
                device: self.device.to_string(),
            });
        }

        if Self::is_usage_error(query) {
            return Err(TocError::UnsupportedParameters {
                program: CDPARANOIA.to_string(),
            });
        }

        if query.contains("No such file or directory") {
            return Err(TocError::DeviceNotFound {
                device: self.device.to_string(),
            });
        }

        Ok(())
    }

    pub fn parse(&self, query: &str) -> TocResult<TocModel> {
        self.validate(query)?;

        let mut toc = TocModel::default();
        let mut current_track = 0u32;

        for line in query.lines() {
            if TRACK_LINE.is_match(line) {
                current_track += 1;
                self.parse_track_line(&mut toc, current_track, line)?;
            } else if let Some(captures) = DEVICE_LINE.captures(line) {
                toc.device_name = Some(captures["name"].trim().to_string());
            } else if line.starts_with("TOTAL") {
                if let Some(playtime) = line
                    .split_whitespace()
                    .nth(2)
                    .and_then(|field| field.get(1..6))
                {
                    toc.playtime_text = playtime.to_string();
                }
            }
        }

        toc.audiotracks = current_track;

        if toc.audiotracks == 0 {
            return Err(TocError::NoAudioTracks);
        }

        toc.recalculate_total();

        debug!(
            "Parsed {} audio tracks starting at track {}, {} sectors in total",
            toc.audiotracks, toc.first_audio_track, toc.total_sectors
        );

        Ok(toc)
    }

    fn parse_track_line(&self, toc: &mut TocModel, key: u32, line: &str) -> TocResult<()> {
        let malformed = || TocError::MalformedTrackLine(line.trim().to_string());

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(malformed());
        }

        let number: u32 = parts[0]
            .trim_end_matches('.')
            .parse()
            .map_err(|_| malformed())?;
        if number == 0 || number as usize > MAX_TRACKS || key as usize > MAX_TRACKS {
            return Err(malformed());
        }

        if key == 1 {
            toc.first_audio_track = number;
        }

        let length: i64 = parts[1].parse().map_err(|_| malformed())?;
        let start: i64 = parts[3].parse().map_err(|_| malformed())?;
        let length_text = parts[2]
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(parts[2]);

        toc.length_sector.insert(key, length);
        toc.start_sector.insert(key, start);
        toc.length_text.insert(key, length_text.to_string());

        Ok(())
    }
}
