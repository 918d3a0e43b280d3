//! Build staging: output directory and deterministic artifact paths.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// Default build-output directory, relative to the working directory.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Name of the generated C translation unit inside the build root.
pub const GENERATED_SOURCE_FILE: &str = "main.c";

/// Binary name used when the caller requests none.
pub const DEFAULT_BINARY_NAME: &str = "main";

/// Staged locations for one compile run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    pub source: PathBuf,
    pub binary: PathBuf,
}

/// Create the build root if it does not exist yet.
///
/// Existence is checked first; an already-present directory is not an
/// error. Any other creation failure is fatal for the compile run.
pub fn ensure_build_dir(root: &Path) -> Result<(), CoreError> {
    if root.exists() {
        return Ok(());
    }
    println!("Creating build directory...");
    fs::create_dir_all(root).map_err(|source| CoreError::CreateBuildDir {
        path: root.to_path_buf(),
        source,
    })
}

/// Resolve the deterministic source and binary paths under `root`.
///
/// Re-running a compile against the same root overwrites both
/// artifacts; there are no append semantics.
pub fn resolve_paths(root: &Path, binary_name: Option<&str>) -> BuildPaths {
    BuildPaths {
        source: root.join(GENERATED_SOURCE_FILE),
        binary: root.join(binary_name.unwrap_or(DEFAULT_BINARY_NAME)),
    }
}

/// Append the host executable extension unless the path already
/// carries it. POSIX hosts use no extension, so the path comes back
/// unchanged there.
pub fn finalize_binary_path(binary: PathBuf) -> PathBuf {
    if cfg!(windows) {
        let already_marked = binary
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("exe"));
        if !already_marked {
            let mut path = binary.into_os_string();
            path.push(".exe");
            return PathBuf::from(path);
        }
    }
    binary
}
