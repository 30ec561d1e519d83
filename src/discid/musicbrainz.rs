use crate::cd::{LEAD_IN_FRAMES, MAX_TRACKS, SESSION_GAP_FRAMES};
use crate::discid::error::{DiscIdError, DiscIdResult};
use crate::toc::{TocModel, TrackRef};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use byteorder::{BigEndian, WriteBytesExt};
use log::debug;
use sha1::{Digest, Sha1};

/// MusicBrainz disc id and the matching web service lookup path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicBrainzId {
    pub id: String,
    pub lookup_path: String,
}

impl MusicBrainzId {
    pub fn calculate(toc: &TocModel) -> DiscIdResult<Self> {
        if toc.audiotracks == 0 {
            return Err(DiscIdError::NoAudioTracks);
        }
        let first = toc.first_audio_track;
        let last = toc.last_audio_track();
        if last as usize > MAX_TRACKS {
            return Err(DiscIdError::TooManyTracks(last));
        }

        let leadout = leadout_offset(toc);
        let offsets: Vec<i64> = toc
            .audio_track_keys()
            .map(|track| toc.start_sector(TrackRef::Track(track)).unwrap_or(0) + LEAD_IN_FRAMES)
            .collect();

        // first, last, then 100 offsets with the leadout in slot 0
        let mut payload = Vec::with_capacity(2 + 4 * (MAX_TRACKS + 1));
        payload.write_u8(first as u8)?;
        payload.write_u8(last as u8)?;
        payload.write_u32::<BigEndian>(leadout as u32)?;
        for offset in &offsets {
            payload.write_u32::<BigEndian>(*offset as u32)?;
        }
        payload.resize(2 + 4 * (MAX_TRACKS + 1), 0);

        let digest = Sha1::digest(hex::encode_upper(&payload).as_bytes());
        let id = STANDARD
            .encode(digest)
            .replace('+', ".")
            .replace('/', "_")
            .replace('=', "-");

        let toc_param = [first as i64, last as i64, leadout]
            .iter()
            .chain(&offsets)
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("+");

        debug!("MusicBrainz disc id {id} for toc {toc_param}");

        Ok(Self {
            lookup_path: format!("discid/{id}?toc={toc_param}"),
            id,
        })
    }
}

/// With a data session behind the audio, the audio leadout sits one session
/// gap before the data track.
fn leadout_offset(toc: &TocModel) -> i64 {
    match toc
        .trailing_data_track()
        .and_then(|track| toc.data_track_start.get(&track))
    {
        Some(data_start) => data_start - SESSION_GAP_FRAMES + LEAD_IN_FRAMES,
        None => toc.total_sectors + LEAD_IN_FRAMES,
    }
}
