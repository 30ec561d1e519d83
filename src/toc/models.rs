// src/toc/models.rs
use crate::cd::{FRAMES_PER_SECOND, SECTOR_SIZE, WAV_HEADER_SIZE};
use std::collections::{BTreeMap, BTreeSet};

/// Either a single track (0 is the hidden pre-gap track) or the whole disc as one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackRef {
    Track(u32),
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum CorrectionStage {
    #[default]
    Parsed,
    OffsetChecked,
    GapsMerged,
}

/// Sector layout of the audio tracks on a disc.
///
/// Track keys are counted from 1 in the order the drive reported them, so on a
/// disc that starts with a data track key 1 is the first *audio* track.
#[derive(Debug, Clone)]
pub struct TocModel {
    pub audiotracks: u32,
    pub first_audio_track: u32,
    pub start_sector: BTreeMap<u32, i64>,
    pub length_sector: BTreeMap<u32, i64>,
    pub length_text: BTreeMap<u32, String>,
    pub data_tracks: BTreeSet<u32>,
    /// Start sectors of data tracks, when a source reported one.
    pub data_track_start: BTreeMap<u32, i64>,
    pub total_sectors: i64,
    pub playtime_text: String,
    pub device_name: Option<String>,
    pub multiple_drive_support: bool,
    pub(crate) stage: CorrectionStage,
}

impl Default for TocModel {
    fn default() -> Self {
        Self {
            audiotracks: 0,
            first_audio_track: 1,
            start_sector: BTreeMap::new(),
            length_sector: BTreeMap::new(),
            length_text: BTreeMap::new(),
            data_tracks: BTreeSet::new(),
            data_track_start: BTreeMap::new(),
            total_sectors: 0,
            playtime_text: "Unknown".to_string(),
            device_name: None,
            multiple_drive_support: true,
            stage: CorrectionStage::Parsed,
        }
    }
}

impl TocModel {
    /// For the image, the start of the lowest present track.
    pub fn start_sector(&self, track: TrackRef) -> Option<i64> {
        match track {
            TrackRef::Track(n) => self.start_sector.get(&n).copied(),
            TrackRef::Image => self.start_sector.values().next().copied(),
        }
    }

    pub fn length_sector(&self, track: TrackRef) -> Option<i64> {
        match track {
            TrackRef::Track(n) => self.length_sector.get(&n).copied(),
            TrackRef::Image => Some(self.total_sectors),
        }
    }

    pub fn length_text(&self, track: TrackRef) -> Option<&str> {
        match track {
            TrackRef::Track(n) => self.length_text.get(&n).map(String::as_str),
            TrackRef::Image => Some(self.playtime_text.as_str()),
        }
    }

    /// Size of the WAV file a rip of `track` produces.
    pub fn file_size(&self, track: TrackRef) -> Option<u64> {
        let sectors = self.length_sector(track)?;
        Some(WAV_HEADER_SIZE + sectors.max(0) as u64 * SECTOR_SIZE as u64)
    }

    pub fn has_hidden_track(&self) -> bool {
        self.start_sector.contains_key(&0)
    }

    /// Keys of the real audio tracks, excluding the hidden track.
    pub fn audio_track_keys(&self) -> impl Iterator<Item = u32> {
        1..=self.audiotracks
    }

    /// Disc track number of the last audio track.
    pub fn last_audio_track(&self) -> u32 {
        self.first_audio_track
            .saturating_add(self.audiotracks.saturating_sub(1))
    }

    /// Data track directly following the audio session, if any.
    pub fn trailing_data_track(&self) -> Option<u32> {
        let next = self.last_audio_track().checked_add(1)?;
        self.data_tracks.contains(&next).then_some(next)
    }

    pub(super) fn recalculate_total(&mut self) {
        self.total_sectors = self.length_sector.values().sum();
    }
}

/// Renders a frame count the way cdparanoia prints lengths, `mm:ss.ff`.
pub fn frames_to_text(frames: i64) -> String {
    let frames = frames.max(0);
    let seconds = frames / FRAMES_PER_SECOND;
    format!(
        "{:02}:{:02}.{:02}",
        seconds / 60,
        seconds % 60,
        frames % FRAMES_PER_SECOND
    )
}
