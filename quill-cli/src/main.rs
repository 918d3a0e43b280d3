use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use quill_core::eval::NoopEvaluator;
use quill_core::parser::parse_module;
use quill_core::stage::DEFAULT_BUILD_DIR;
use quill_core::{CompileRequest, CoreError, Phase, compile};

/// Ahead-of-time compiler for the Quill language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(short, long, help = "Input module (reads stdin when omitted)")]
    input: Option<String>,

    #[arg(
        short,
        long,
        value_name = "NAME",
        help = "Binary name inside the build directory (defaults to 'main')"
    )]
    output: Option<String>,

    #[arg(
        long,
        value_name = "DIR",
        default_value = DEFAULT_BUILD_DIR,
        help = "Build output directory"
    )]
    build_dir: PathBuf,

    #[arg(
        long,
        value_enum,
        default_value_t = PhaseArg::Program,
        help = "Compile phase selector"
    )]
    phase: PhaseArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PhaseArg {
    Preparse,
    Program,
}

impl From<PhaseArg> for Phase {
    fn from(phase: PhaseArg) -> Self {
        match phase {
            PhaseArg::Preparse => Phase::Preparse,
            PhaseArg::Program => Phase::Program,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = execute(cli) {
        eprintln!("{err:#}");
        std::process::exit(exit_status(&err));
    }
}

fn execute(cli: Cli) -> Result<()> {
    let (module, source) = match cli.input {
        Some(path) => {
            let source = fs::read_to_string(&path)
                .with_context(|| format!("failed to read input file {path}"))?;
            (path, source)
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            ("<stdin>".to_string(), buffer)
        }
    };

    let ast_root = parse_module(&source)?;

    let mut request = CompileRequest::new(&module, ast_root.as_ref());
    request.phase = cli.phase.into();
    request.binary_name = cli.output;
    request.build_root = cli.build_dir;

    let binary = compile(request, &mut NoopEvaluator)?;
    println!("Binary is ready on: {}", binary.display());
    Ok(())
}

/// A toolchain exit failure propagates the toolchain's own status;
/// every other failure exits 1.
fn exit_status(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CoreError>() {
        Some(CoreError::ToolchainExit { status, .. }) => *status,
        _ => 1,
    }
}
