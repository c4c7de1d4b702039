use anyhow::{Context, Result};
use clap::Parser;
use id_splits::cli::{Cli, OutputFormat};
use id_splits::config::RunConfig;
use id_splits::progress::{ConsoleProgress, NoProgress, ProgressSink};
use id_splits::report::{self, JsonReport};
use id_splits::runner;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    // A bad --split must fail before the scratch root is touched
    let config = RunConfig::from_cli(&args)?;
    config.validate()?;

    let seed = config.effective_seed();
    let summary = runner::summary(&config, seed);

    // Only the text report shares stdout with the startup block and progress
    let text_mode = args.format == OutputFormat::Text;
    if text_mode {
        print!("{}", report::startup_block(&summary));
    }

    let mut console;
    let mut quiet = NoProgress;
    let progress: &mut dyn ProgressSink = if text_mode && !args.no_progress {
        console = ConsoleProgress::stdout();
        &mut console
    } else {
        &mut quiet
    };

    let outcome = runner::run(&config, seed, progress)?;

    match args.format {
        OutputFormat::Text => print!("{}", report::render_text(&outcome.averages)),
        OutputFormat::Json => println!(
            "{}",
            JsonReport::new(&outcome.summary, &outcome.averages)
                .to_json()
                .context("Failed to serialize report")?
        ),
        OutputFormat::Csv => print!("{}", report::render_csv(&outcome.averages)),
    }

    if args.stats_extended {
        eprintln!("{}", report::render_extended(&outcome.timings));
    }

    Ok(())
}
