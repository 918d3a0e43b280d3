//! Host C toolchain discovery and invocation.

use std::path::Path;
use std::process::Command;

use crate::error::CoreError;

/// Candidate compilers, in preference order. The backend commits to
/// this fixed set ahead of time instead of probing the host for
/// arbitrary toolchains.
pub const COMPILER_CANDIDATES: [&str; 3] = ["cc", "gcc", "clang"];

/// A resolved host C compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    program: &'static str,
}

impl Toolchain {
    /// Resolve the first candidate present on the host.
    pub fn select() -> Result<Toolchain, CoreError> {
        for candidate in COMPILER_CANDIDATES {
            if which::which(candidate).is_ok() {
                return Ok(Toolchain { program: candidate });
            }
        }
        Err(CoreError::ToolchainMissing)
    }

    pub fn program(&self) -> &str {
        self.program
    }

    /// Compile and link `source` into `binary`, blocking until the
    /// compiler exits.
    ///
    /// The wait targets the spawned child itself. There is no
    /// timeout: a hung compiler blocks the whole run. A compiler that
    /// could not be started and one that ran and failed are reported
    /// as distinct errors; neither is retried.
    pub fn invoke(&self, source: &Path, binary: &Path) -> Result<(), CoreError> {
        let status = self
            .command(source, binary)
            .status()
            .map_err(|err| CoreError::ToolchainSpawn {
                compiler: self.program.to_string(),
                source: err,
            })?;
        if !status.success() {
            return Err(CoreError::ToolchainExit {
                source_path: source.to_path_buf(),
                status: status.code().unwrap_or(1),
            });
        }
        Ok(())
    }

    #[cfg(not(windows))]
    fn command(&self, source: &Path, binary: &Path) -> Command {
        let mut command = Command::new(self.program);
        command.arg("-o").arg(binary).arg(source);
        command
    }

    // Windows consoles drive toolchains through the command
    // interpreter; exit codes come back from the interpreter's child.
    #[cfg(windows)]
    fn command(&self, source: &Path, binary: &Path) -> Command {
        let mut command = Command::new("cmd");
        command
            .arg("/C")
            .arg(self.program)
            .arg("-o")
            .arg(binary)
            .arg(source);
        command
    }
}
