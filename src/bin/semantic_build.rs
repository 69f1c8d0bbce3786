//! semantic-build: derive semantic objects from a decoded drawing
//!
//! ```text
//! semantic-build <parsed.json> [--selections <file>] [--config <file>]
//!                [--output <file>] [--pretty]
//! ```

use anyhow::{bail, Context, Result};
use dxf_semantics::config::EngineConfig;
use dxf_semantics::io::{read_selections, JsonReader, JsonWriter};
use dxf_semantics::rules::Selections;
use dxf_semantics::SemanticBuilder;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "usage: semantic-build <parsed.json> [--selections <file>] [--config <file>] [--output <file>] [--pretty]";

#[derive(Debug, Default)]
struct Args {
    input: Option<PathBuf>,
    selections: Option<PathBuf>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
}

fn parse_args() -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .map(PathBuf::from)
                .with_context(|| format!("`{}` needs a file path", flag))
        };
        match arg.as_str() {
            "--selections" => parsed.selections = Some(value("--selections")?),
            "--config" => parsed.config = Some(value("--config")?),
            "--output" | "-o" => parsed.output = Some(value("--output")?),
            "--pretty" => parsed.pretty = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            other if other.starts_with('-') => bail!("unknown option {}\n{}", other, USAGE),
            other => {
                if parsed.input.is_some() {
                    bail!("more than one input file\n{}", USAGE);
                }
                parsed.input = Some(PathBuf::from(other));
            }
        }
    }
    Ok(parsed)
}

fn init_logging(config: &EngineConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so stdout stays valid JSON
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let args = parse_args()?;
    let input = args.input.with_context(|| USAGE.to_string())?;

    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::discover().context("loading default config")?,
    };
    init_logging(&config);

    let drawing = JsonReader::from_file(&input)
        .and_then(|reader| reader.read())
        .with_context(|| format!("reading drawing {}", input.display()))?;
    let selections = match &args.selections {
        Some(path) => read_selections(path)
            .with_context(|| format!("reading selections {}", path.display()))?,
        None => Selections::new(),
    };

    let report = SemanticBuilder::new(config)
        .build(&drawing, &selections)
        .context("building semantic objects")?;
    for notification in report.notifications.iter() {
        warn!("{}", notification);
    }

    let writer = if args.pretty {
        JsonWriter::new_pretty(&report.objects)
    } else {
        JsonWriter::new(&report.objects)
    };
    match &args.output {
        Some(path) => writer
            .write_to_file(path)
            .with_context(|| format!("writing {}", path.display()))?,
        None => writer
            .write_to_writer(std::io::stdout().lock())
            .context("writing to stdout")?,
    }

    info!(
        objects = report.objects.len(),
        notifications = report.notifications.len(),
        "done"
    );
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
