use crate::toc::correction::TocCorrector;
use crate::toc::error::TocResult;
use crate::toc::parser::{CDPARANOIA, TocParser};
use crate::util::process::CommandRunner;
use log::{debug, warn};

pub mod cdrdao;
pub mod correction;
pub mod error;
pub mod models;
pub mod parser;

pub use models::{TocModel, TrackRef};

/// Queries the drive with cdparanoia and turns the report into a corrected layout.
pub struct TocScanner<'a, R: CommandRunner> {
    runner: &'a R,
    corrector: TocCorrector,
}

impl<'a, R: CommandRunner> TocScanner<'a, R> {
    pub fn new(runner: &'a R, corrector: TocCorrector) -> Self {
        Self { runner, corrector }
    }

    pub fn scan(&self, device: &str) -> TocResult<TocModel> {
        let mut query = self
            .runner
            .launch(CDPARANOIA, &["-d", device, "-vQ"])?;
        let mut multiple_drive_support = true;

        // Older cdparanoia builds don't know the device parameter.
        if TocParser::is_usage_error(&query) {
            warn!("{CDPARANOIA} doesn't support -d, falling back to the default drive");
            query = self.runner.launch(CDPARANOIA, &["-vQ"])?;
            multiple_drive_support = false;
        }

        let mut toc = self.scan_query(device, &query)?;
        toc.multiple_drive_support = multiple_drive_support;

        Ok(toc)
    }

    /// Same as [`TocScanner::scan`] for an already captured report.
    pub fn scan_query(&self, device: &str, query: &str) -> TocResult<TocModel> {
        let mut toc = TocParser::new(device).parse(query)?;
        self.corrector.check_offset_first_track(&mut toc);

        debug!("Corrected layout: {:?}", toc.start_sector);

        Ok(toc)
    }
}
