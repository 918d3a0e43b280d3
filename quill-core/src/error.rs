use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to create build directory {}: {}", .path.display(), .source)]
    CreateBuildDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write generated source {}: {}", .path.display(), .source)]
    SourceWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no C compiler found on this host (tried cc, gcc, clang)")]
    ToolchainMissing,
    #[error("failed to start C compiler '{compiler}': {source}")]
    ToolchainSpawn {
        compiler: String,
        source: std::io::Error,
    },
    #[error("compilation of {} failed with status {}", .source_path.display(), .status)]
    ToolchainExit { source_path: PathBuf, status: i32 },
    #[error("lex error at byte {position}: {message}")]
    LexError { position: usize, message: String },
    #[error("parse error: {0}")]
    ParseError(String),
}
