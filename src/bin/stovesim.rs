//! stovesim — Simulate a kitchen schedule from a tasklist and recipes.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use stovesim::{load_menu, PerfReport, Scheduler};

/// Simulate a kitchen schedule from a tasklist and recipe files.
#[derive(Parser)]
#[command(name = "stovesim")]
struct Cli {
    /// Tasklist file: one `name arrival` pair per line.
    tasklist: PathBuf,

    /// Directory holding one `<name>.txt` recipe per dish.
    /// Defaults to the tasklist's directory.
    #[arg(long, value_name = "DIR")]
    recipe_dir: Option<PathBuf>,

    /// Print the performance report after the run.
    #[arg(long)]
    summary: bool,

    /// Suppress the tick-by-tick trace.
    #[arg(long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let recipe_dir = match &cli.recipe_dir {
        Some(dir) => dir.clone(),
        None => cli
            .tasklist
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let scenario = load_menu(&cli.tasklist, &recipe_dir)
        .with_context(|| format!("loading menu from {}", cli.tasklist.display()))?;
    let trace = Scheduler::new(scenario).run();

    if !cli.quiet {
        trace.dump();
    }
    if cli.summary {
        print!("{}", PerfReport::from_trace(&trace));
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
