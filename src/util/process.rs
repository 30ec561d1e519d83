use log::debug;
use std::path::Path;
use std::process::Command;

/// Seam for every external program the scanner talks to.
pub trait CommandRunner {
    /// Runs `program` and returns stdout followed by stderr, like `2>&1`.
    fn launch(&self, program: &str, args: &[&str]) -> std::io::Result<String>;

    fn installed(&self, program: &str) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn launch(&self, program: &str, args: &[&str]) -> std::io::Result<String> {
        debug!("Launching: {program} {}", args.join(" "));

        let output = Command::new(program).args(args).output()?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        debug!("{program} exited with {}", output.status);

        Ok(text)
    }

    fn installed(&self, program: &str) -> bool {
        let Some(paths) = std::env::var_os("PATH") else {
            return false;
        };

        std::env::split_paths(&paths).any(|dir| is_executable(&dir.join(program)))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }

    /// macOS keeps inserted discs mounted, which blocks raw TOC access.
    pub fn needs_unmount(&self) -> bool {
        *self == Platform::MacOs
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Scripted runner that records every invocation.
    #[derive(Default)]
    pub struct FakeRunner {
        pub installed: Vec<&'static str>,
        pub replies: HashMap<String, std::io::Result<String>>,
        pub calls: RefCell<Vec<String>>,
    }

    impl FakeRunner {
        pub fn reply(mut self, command_line: &str, output: &str) -> Self {
            self.replies
                .insert(command_line.to_string(), Ok(output.to_string()));
            self
        }

        pub fn fail(mut self, command_line: &str) -> Self {
            self.replies.insert(
                command_line.to_string(),
                Err(std::io::Error::other("scripted failure")),
            );
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl CommandRunner for FakeRunner {
        fn launch(&self, program: &str, args: &[&str]) -> std::io::Result<String> {
            let line = std::iter::once(program)
                .chain(args.iter().copied())
                .collect::<Vec<_>>()
                .join(" ");
            self.calls.borrow_mut().push(line.clone());

            match self.replies.get(&line) {
                Some(Ok(text)) => Ok(text.clone()),
                Some(Err(e)) => Err(std::io::Error::new(e.kind(), e.to_string())),
                None => Ok(String::new()),
            }
        }

        fn installed(&self, program: &str) -> bool {
            self.installed.contains(&program)
        }
    }

    #[test]
    fn only_macos_needs_unmount() {
        assert!(Platform::MacOs.needs_unmount());
        assert!(!Platform::Other.needs_unmount());
    }

    #[test]
    fn missing_program_is_not_installed() {
        assert!(!SystemRunner.installed("surely-not-a-real-program-name"));
    }
}
