use crate::cd::FRAMES_PER_SECOND;
use crate::toc::error::{TocError, TocResult};
use crate::toc::models::{CorrectionStage, TocModel, frames_to_text};
use log::{debug, info, warn};

/// Any source that knows the pregap of each track, e.g. a cdrdao TOC.
pub trait PregapSource {
    fn pregap(&self, track: u32) -> i64;
}

/// Repairs the layout quirks of the cdparanoia report.
#[derive(Debug, Clone, Copy)]
pub struct TocCorrector {
    pub rip_hidden_audio: bool,
    /// Minimum length in seconds for hidden audio to become its own track.
    pub min_length_hidden_track: f64,
}

impl TocCorrector {
    /// When a data track opens the disc cdparanoia reports the data track
    /// offset as the start of the first audio track, although ripping ignores
    /// it. Without a data track any offset of track 1 is hidden audio that is
    /// only reachable by rewinding from the first track.
    pub fn check_offset_first_track(&self, toc: &mut TocModel) {
        if toc.stage != CorrectionStage::Parsed {
            warn!("First track offset was already checked, skipping");
            return;
        }
        toc.stage = CorrectionStage::OffsetChecked;

        let offset = toc.start_sector.get(&1).copied().unwrap_or(0);

        if toc.first_audio_track != 1 {
            debug!("Disc starts with data, shifting all tracks by {offset} sectors");
            for start in toc.start_sector.values_mut() {
                *start -= offset;
            }
            toc.data_tracks.extend(1..toc.first_audio_track);
            return;
        }

        // Left alone the region is ripped as pregap silence of track 1.
        if !self.rip_hidden_audio || offset == 0 {
            return;
        }

        if offset as f64 / FRAMES_PER_SECOND as f64 > self.min_length_hidden_track {
            info!("Found {offset} sectors of hidden audio, adding it as track 0");
            toc.start_sector.insert(0, 0);
            toc.length_sector.insert(0, offset);
            toc.length_text.insert(0, frames_to_text(offset));
        } else {
            debug!("Hidden audio of {offset} sectors is too short, prepending it to track 1");
            if let Some(length) = toc.length_sector.get_mut(&1) {
                *length += offset;
            }
            toc.start_sector.insert(1, 0);
        }

        toc.recalculate_total();
    }

    /// cdparanoia appends each gap to the previous track, move it in front of
    /// its own track instead.
    pub fn merge_gaps(&self, toc: &mut TocModel, secondary: &impl PregapSource) -> TocResult<()> {
        if toc.stage != CorrectionStage::OffsetChecked {
            return Err(TocError::CorrectionOrder);
        }

        let pregaps: Vec<(u32, i64)> = (2..=toc.audiotracks)
            .map(|track| (track, secondary.pregap(track)))
            .collect();

        // Earlier merges grow a track before its own gap is taken from it.
        let mut lengths = toc.length_sector.clone();
        for &(track, pregap) in &pregaps {
            let previous = lengths.get(&(track - 1)).copied().unwrap_or(0);
            if pregap < 0 || pregap > previous {
                return Err(TocError::PregapTooLong { track, pregap });
            }
            lengths.insert(track - 1, previous - pregap);
            if let Some(length) = lengths.get_mut(&track) {
                *length += pregap;
            }
        }

        for (track, pregap) in pregaps {
            if let Some(length) = toc.length_sector.get_mut(&(track - 1)) {
                *length -= pregap;
            }
            if let Some(start) = toc.start_sector.get_mut(&track) {
                *start -= pregap;
            }
            if let Some(length) = toc.length_sector.get_mut(&track) {
                *length += pregap;
            }
        }

        toc.stage = CorrectionStage::GapsMerged;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn toc(first: u32, starts: &[i64], lengths: &[i64]) -> TocModel {
        let mut toc = TocModel {
            audiotracks: starts.len() as u32,
            first_audio_track: first,
            ..Default::default()
        };
        for (i, (start, length)) in starts.iter().zip(lengths).enumerate() {
            toc.start_sector.insert(i as u32 + 1, *start);
            toc.length_sector.insert(i as u32 + 1, *length);
        }
        toc.recalculate_total();
        toc
    }

    fn corrector(rip_hidden_audio: bool) -> TocCorrector {
        TocCorrector {
            rip_hidden_audio,
            min_length_hidden_track: 2.0,
        }
    }

    struct Gaps(HashMap<u32, i64>);

    impl PregapSource for Gaps {
        fn pregap(&self, track: u32) -> i64 {
            self.0.get(&track).copied().unwrap_or(0)
        }
    }

    #[test]
    fn leaves_a_normal_disc_untouched() {
        let mut disc = toc(1, &[0, 1000, 3000], &[1000, 2000, 500]);
        let before = disc.clone();

        corrector(false).check_offset_first_track(&mut disc);

        assert_eq!(disc.start_sector, before.start_sector);
        assert_eq!(disc.length_sector, before.length_sector);
        assert_eq!(disc.start_sector[&1], 0);
    }

    #[test]
    fn shifts_every_track_when_disc_starts_with_data() {
        let mut disc = toc(2, &[12000, 13000, 15000], &[1000, 2000, 500]);

        corrector(false).check_offset_first_track(&mut disc);

        assert_eq!(disc.start_sector[&1], 0);
        assert_eq!(disc.start_sector[&2], 1000);
        assert_eq!(disc.start_sector[&3], 3000);
        assert!(disc.data_tracks.contains(&1));
    }

    #[test]
    fn hidden_audio_is_kept_as_pregap_unless_requested() {
        let mut disc = toc(1, &[300, 1000], &[700, 500]);

        corrector(false).check_offset_first_track(&mut disc);

        assert_eq!(disc.start_sector[&1], 300);
        assert!(!disc.has_hidden_track());
    }

    #[test]
    fn long_hidden_audio_becomes_track_zero() {
        let mut disc = toc(1, &[300, 1000], &[700, 500]);

        corrector(true).check_offset_first_track(&mut disc);

        assert!(disc.has_hidden_track());
        assert_eq!(disc.start_sector[&0], 0);
        assert_eq!(disc.length_sector[&0], 300);
        assert_eq!(disc.start_sector[&1], 300);
        assert_eq!(disc.total_sectors, 1500);
    }

    #[test]
    fn short_hidden_audio_is_prepended_to_track_one() {
        let mut disc = toc(1, &[100, 1000], &[900, 500]);

        corrector(true).check_offset_first_track(&mut disc);

        assert!(!disc.has_hidden_track());
        assert_eq!(disc.start_sector[&1], 0);
        assert_eq!(disc.length_sector[&1], 1000);
        assert_eq!(disc.total_sectors, 1500);
    }

    #[test]
    fn merges_pregaps_into_their_own_track() {
        let mut disc = toc(1, &[0, 1000, 3000], &[1000, 2000, 500]);
        let gaps = Gaps(HashMap::from([(2, 150), (3, 32)]));
        let corrector = corrector(false);

        corrector.check_offset_first_track(&mut disc);
        corrector.merge_gaps(&mut disc, &gaps).unwrap();

        assert_eq!(disc.start_sector[&2], 850);
        assert_eq!(disc.start_sector[&3], 2968);
        assert_eq!(disc.length_sector[&1], 850);
        assert_eq!(disc.length_sector[&2], 2000 - 32 + 150);
        assert_eq!(disc.length_sector[&3], 532);
        assert_eq!(disc.length_sector.values().sum::<i64>(), disc.total_sectors);
    }

    #[test]
    fn merging_before_offset_check_is_refused() {
        let mut disc = toc(1, &[0, 1000], &[1000, 500]);
        let err = corrector(false)
            .merge_gaps(&mut disc, &Gaps(HashMap::new()))
            .unwrap_err();
        assert!(matches!(err, TocError::CorrectionOrder));
    }

    #[test]
    fn merging_twice_is_refused() {
        let mut disc = toc(1, &[0, 1000], &[1000, 500]);
        let corrector = corrector(false);
        let gaps = Gaps(HashMap::from([(2, 10)]));

        corrector.check_offset_first_track(&mut disc);
        corrector.merge_gaps(&mut disc, &gaps).unwrap();

        assert!(corrector.merge_gaps(&mut disc, &gaps).is_err());
        assert_eq!(disc.start_sector[&2], 990);
    }

    #[test]
    fn pregap_may_use_sectors_gained_from_an_earlier_merge() {
        let mut disc = toc(1, &[0, 100, 150], &[100, 50, 100]);
        let gaps = Gaps(HashMap::from([(2, 80), (3, 120)]));
        let corrector = corrector(false);
        corrector.check_offset_first_track(&mut disc);

        corrector.merge_gaps(&mut disc, &gaps).unwrap();

        assert_eq!(disc.length_sector[&1], 20);
        assert_eq!(disc.length_sector[&2], 10);
        assert_eq!(disc.length_sector[&3], 220);
        assert_eq!(disc.start_sector[&3], 30);
    }

    #[test]
    fn oversized_pregap_leaves_the_layout_alone() {
        let mut disc = toc(1, &[0, 100, 200], &[100, 100, 100]);
        let gaps = Gaps(HashMap::from([(2, 10), (3, 500)]));
        let corrector = corrector(false);
        corrector.check_offset_first_track(&mut disc);

        let err = corrector.merge_gaps(&mut disc, &gaps).unwrap_err();

        assert!(matches!(err, TocError::PregapTooLong { track: 3, pregap: 500 }));
        assert_eq!(disc.start_sector[&2], 100);
    }
}
