pub mod error;
pub mod resolver;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

/// Resolve `@include` directives in a shader ahead of compilation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the shader file to preprocess
    #[arg(required = true, index = 1, value_name = "input")]
    input: PathBuf,
    /// Path the resolved shader is written to
    #[arg(required = true, index = 2, value_name = "output")]
    output: PathBuf,

    /// Enable debug output
    #[arg(long="debug", short='d')]
    debug: bool,
}

fn write_output(output: &Path, data: &str) -> anyhow::Result<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("could not create {:?}", parent))?;
    }
    std::fs::write(output, data)
        .with_context(|| format!("could not write {:?}", output))?;
    Ok(())
}

fn main() -> ExitCode {
    // Bad arguments must exit with code 1, not clap's default 2.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    env_logger::builder()
        .filter(None, log::LevelFilter::Warn)
        .filter_module(
            "preprocess_shader",
            if args.debug
            { log::LevelFilter::Trace }
            else
            { log::LevelFilter::Info }
        )
        .init();

    let input = std::path::absolute(&args.input).unwrap_or(args.input);
    if !input.exists() {
        println!("{}: error: file not found", input.display());
        return ExitCode::FAILURE;
    }
    let output = std::path::absolute(&args.output).unwrap_or(args.output);

    log::info!("Using input shader: {:?}", input);
    log::info!("Using output path:  {:?}", output);

    let data = match resolver::resolve_file(&input) {
        Ok(data) => data,
        Err(errors) => {
            for err in &errors {
                println!("{err}");
            }
            println!("{}: error: failed to process file", input.display());
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = write_output(&output, &data) {
        println!("error: {err:#}");
        return ExitCode::FAILURE;
    }

    println!("{} -> {}", input.display(), output.display());
    ExitCode::SUCCESS
}
