use crate::discid::error::{DiscIdError, DiscIdResult};
use crate::discid::freedb::FreedbId;
use crate::discid::helper::{HELPERS, HelperStrategy};
use crate::discid::musicbrainz::MusicBrainzId;
use crate::toc::TocModel;
use crate::util::process::{CommandRunner, Platform};
use log::{debug, info, warn};

pub mod error;
pub mod freedb;
pub mod helper;
pub mod musicbrainz;

/// One way of getting the freedb id of a disc.
pub trait FreedbStrategy {
    fn name(&self) -> &str;

    fn freedb(&self) -> DiscIdResult<FreedbId>;
}

/// Calculates the freedb id from the scanned layout.
pub struct ManualStrategy<'a> {
    pub toc: &'a TocModel,
}

impl FreedbStrategy for ManualStrategy<'_> {
    fn name(&self) -> &str {
        "manual calculation"
    }

    fn freedb(&self) -> DiscIdResult<FreedbId> {
        FreedbId::calculate(self.toc)
    }
}

pub struct DiscIdentifier<'a> {
    toc: &'a TocModel,
    strategies: Vec<Box<dyn FreedbStrategy + 'a>>,
}

impl<'a> DiscIdentifier<'a> {
    /// Helper programs first, manual calculation last.
    pub fn new<R: CommandRunner>(
        toc: &'a TocModel,
        runner: &'a R,
        device: &'a str,
        platform: Platform,
    ) -> Self {
        let mut strategies: Vec<Box<dyn FreedbStrategy + 'a>> = HELPERS
            .iter()
            .map(|&program| {
                Box::new(HelperStrategy {
                    program,
                    device,
                    runner,
                    platform,
                }) as Box<dyn FreedbStrategy + 'a>
            })
            .collect();
        strategies.push(Box::new(ManualStrategy { toc }));

        Self { toc, strategies }
    }

    /// Only the layout itself, for a disc that isn't in the drive.
    pub fn manual(toc: &'a TocModel) -> Self {
        Self {
            toc,
            strategies: vec![Box::new(ManualStrategy { toc })],
        }
    }

    pub fn freedb(&self) -> DiscIdResult<FreedbId> {
        for strategy in &self.strategies {
            match strategy.freedb() {
                Ok(id) => {
                    info!("freedb id {} from {}", id.discid(), strategy.name());
                    return Ok(id);
                }
                Err(DiscIdError::HelperNotInstalled(program)) => {
                    debug!("{program} is not installed, trying the next strategy");
                }
                Err(e) => warn!("{} failed: {e}", strategy.name()),
            }
        }

        Err(DiscIdError::NoStrategy)
    }

    pub fn musicbrainz(&self) -> DiscIdResult<MusicBrainzId> {
        MusicBrainzId::calculate(self.toc)
    }
}
