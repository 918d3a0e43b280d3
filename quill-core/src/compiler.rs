//! Compile orchestration: staging, code generation, toolchain
//! invocation and final artifact reporting.

use std::path::PathBuf;

use crate::ast::AstNode;
use crate::codegen_c::{self, CodegenOptions};
use crate::error::CoreError;
use crate::eval::Evaluator;
use crate::stage;
use crate::toolchain::Toolchain;

/// Build phase selector.
///
/// The code generator ignores it; it is carried through for
/// collaborators that distinguish pre-parse from program runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    Preparse,
    #[default]
    Program,
}

/// Inputs for one compile run. Constructed by the caller and consumed
/// exactly once; each run owns the build root for its duration.
#[derive(Debug)]
pub struct CompileRequest<'a> {
    pub module: &'a str,
    pub ast_root: Option<&'a AstNode>,
    pub phase: Phase,
    pub binary_name: Option<String>,
    pub build_root: PathBuf,
    pub codegen: CodegenOptions,
}

impl<'a> CompileRequest<'a> {
    pub fn new(module: &'a str, ast_root: Option<&'a AstNode>) -> Self {
        CompileRequest {
            module,
            ast_root,
            phase: Phase::default(),
            binary_name: None,
            build_root: PathBuf::from(stage::DEFAULT_BUILD_DIR),
            codegen: CodegenOptions::default(),
        }
    }
}

/// Run the whole pipeline for `request` and return the final binary
/// path.
///
/// A failure in any stage aborts the stages after it; artifacts
/// already written stay on disk for inspection. The generated source
/// is fully written and closed before the toolchain runs.
pub fn compile(
    request: CompileRequest<'_>,
    evaluator: &mut dyn Evaluator,
) -> Result<PathBuf, CoreError> {
    println!("Starting compiling...");

    stage::ensure_build_dir(&request.build_root)?;
    let paths = stage::resolve_paths(&request.build_root, request.binary_name.as_deref());

    println!("Compiling Quill code into {}", paths.source.display());
    let program = codegen_c::generate(
        request.ast_root,
        request.module,
        evaluator,
        request.codegen,
    );
    program.write_to(&paths.source)?;

    println!("Compiling the C code into machine code...");
    let toolchain = Toolchain::select()?;
    toolchain.invoke(&paths.source, &paths.binary)?;

    println!("Finished compiling.\n");

    Ok(stage::finalize_binary_path(paths.binary))
}
