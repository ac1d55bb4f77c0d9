//! minicc - checks a minic source file
//!
//! Usage: minicc [OPTIONS] <input>

use anyhow::Context;
use clap::Parser as ClapParser;
use minic::common::DiagnosticReporter;
use minic::driver::{self, CompileContext, FrontendConfig};
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "minicc")]
#[command(version)]
#[command(about = "Lexer, parser and scope checker for a minimal C-like language", long_about = None)]
struct Args {
    /// Input source file
    #[arg(required = true)]
    input: PathBuf,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,

    /// Dump AST (for debugging)
    #[arg(long)]
    dump_ast: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(true) => {}
        // Diagnostics were already printed by the reporter
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Returns whether the source passed every stage
fn run(args: &Args) -> anyhow::Result<bool> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let filename = args.input.display().to_string();

    let mut reporter = DiagnosticReporter::new();
    let file_id = reporter.add_file(&filename, &source);
    let ctx = CompileContext::new(filename.clone(), file_id, &reporter);

    let config = FrontendConfig {
        dump_tokens: args.dump_tokens,
        dump_ast: args.dump_ast,
    };

    log::info!("checking {}", filename);
    let Ok(program) = driver::compile(&source, &ctx, &config) else {
        return Ok(false);
    };

    if let Some(dump) = &program.token_dump {
        print!("{}", dump);
    }
    if let Some(dump) = &program.ast_dump {
        print!("{}", dump);
    }

    println!(
        "{}: ok (function '{}', {} tokens)",
        filename,
        program.function.name,
        program.tokens.len()
    );
    Ok(true)
}
