use crate::cd::Msf;
use crate::toc::correction::PregapSource;
use crate::toc::error::TocResult;
use crate::toc::models::TocModel;
use log::debug;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdrdaoTrack {
    pub number: u32,
    pub audio: bool,
    pub pregap: i64,
}

/// Track list of a `cdrdao read-toc` file.
#[derive(Debug, Clone, Default)]
pub struct CdrdaoToc {
    pub tracks: Vec<CdrdaoTrack>,
}

impl CdrdaoToc {
    pub async fn from_file(path: impl AsRef<Path>) -> TocResult<Self> {
        let data = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> TocResult<Self> {
        let mut toc = CdrdaoToc::default();

        for line in data.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with("//") {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();

            match parts[0] {
                "TRACK" => {
                    let audio = parts.get(1).is_some_and(|mode| *mode == "AUDIO");
                    toc.tracks.push(CdrdaoTrack {
                        number: toc.tracks.len() as u32 + 1,
                        audio,
                        pregap: 0,
                    });
                }
                "START" => {
                    if let (Some(track), Some(position)) = (toc.tracks.last_mut(), parts.get(1)) {
                        track.pregap = position.parse::<Msf>()?.to_frames();
                    }
                }
                _ => {}
            }
        }

        debug!("Read {} tracks from cdrdao TOC", toc.tracks.len());

        Ok(toc)
    }

    pub fn data_tracks(&self) -> impl Iterator<Item = u32> + '_ {
        self.tracks.iter().filter(|t| !t.audio).map(|t| t.number)
    }

    /// Copies the data tracks cdparanoia doesn't report into `toc`.
    pub fn apply_data_tracks(&self, toc: &mut TocModel) {
        toc.data_tracks.extend(self.data_tracks());
    }
}

impl PregapSource for CdrdaoToc {
    fn pregap(&self, track: u32) -> i64 {
        self.tracks
            .iter()
            .find(|t| t.number == track)
            .map(|t| t.pregap)
            .unwrap_or(0)
    }
}
