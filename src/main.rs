use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use hsh::{Config, EditorSource, Interpreter, PROMPT, ProcessRunner, StreamSource};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(FromArgs)]
/// Read commands from standard input, one per line, and run each one.
/// Takes no arguments.
struct Args {}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let name = argv.first().map(String::as_str).unwrap_or("hsh");
    let rest: Vec<&str> = argv.iter().skip(1).map(String::as_str).collect();
    if let Err(EarlyExit { output, .. }) = Args::from_args(&[name], &rest) {
        eprintln!("{}", output.trim_end());
        eprintln!("Usage: {name}");
        return ExitCode::FAILURE;
    }

    let config = Config::from_env();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::new(&config.log_filter))
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("hsh: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    tracing::debug!(?config, "starting");
    if config.use_editor() {
        return Interpreter::new(EditorSource::new(PROMPT)?, ProcessRunner).run();
    }
    let mut source = StreamSource::new(io::stdin().lock());
    if config.interactive {
        source = source.with_prompt(PROMPT, Box::new(io::stdout()));
    }
    Interpreter::new(source, ProcessRunner).run()
}
