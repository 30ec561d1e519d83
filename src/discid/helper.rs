use crate::discid::error::{DiscIdError, DiscIdResult};
use crate::discid::freedb::FreedbId;
use crate::discid::FreedbStrategy;
use crate::util::process::{CommandRunner, Platform};
use log::{debug, warn};

/// Helper programs printing a freedb string, in order of preference.
pub const HELPERS: [&str; 2] = ["discid", "cd-discid"];

const DISKUTIL: &str = "diskutil";

/// Unmounts the disc on creation and mounts it again when dropped.
pub struct MountGuard<'a, R: CommandRunner> {
    runner: &'a R,
    device: &'a str,
}

impl<'a, R: CommandRunner> MountGuard<'a, R> {
    pub fn unmount(runner: &'a R, device: &'a str) -> Self {
        if let Err(e) = runner.launch(DISKUTIL, &["unmount", device]) {
            warn!("Could not unmount {device}: {e}");
        }
        Self { runner, device }
    }
}

impl<R: CommandRunner> Drop for MountGuard<'_, R> {
    fn drop(&mut self) {
        if let Err(e) = self.runner.launch(DISKUTIL, &["mount", self.device]) {
            warn!("Could not mount {} again: {e}", self.device);
        }
    }
}

/// Lets an installed helper program compute the freedb string.
pub struct HelperStrategy<'a, R: CommandRunner> {
    pub program: &'static str,
    pub device: &'a str,
    pub runner: &'a R,
    pub platform: Platform,
}

impl<R: CommandRunner> HelperStrategy<'_, R> {
    fn invoke(&self) -> DiscIdResult<String> {
        let _guard = self
            .platform
            .needs_unmount()
            .then(|| MountGuard::unmount(self.runner, self.device));

        Ok(self.runner.launch(self.program, &[self.device])?)
    }
}

impl<R: CommandRunner> FreedbStrategy for HelperStrategy<'_, R> {
    fn name(&self) -> &str {
        self.program
    }

    fn freedb(&self) -> DiscIdResult<FreedbId> {
        if !self.runner.installed(self.program) {
            return Err(DiscIdError::HelperNotInstalled(self.program.to_string()));
        }

        let output = self.invoke()?;
        let line = output.lines().next().unwrap_or_default().trim();

        debug!("{} reported: {line}", self.program);

        FreedbId::parse(self.program, line)
    }
}
