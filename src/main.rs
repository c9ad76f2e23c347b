//! Bad Week entry point
//!
//! Plays one headless round (autopilot by default) and prints a summary.

use anyhow::{Context, Result};
use clap::Parser;

use bad_week::Tuning;
use bad_week::runner::{self, RunConfig, RunSummary};

#[derive(Parser)]
#[command(name = "bad-week")]
#[command(about = "Survive the clock: headless round runner")]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Milliseconds per frame fed to the fixed-step loop
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    frame_ms: f32,
    /// Stop after this many frames even if the round isn't over
    #[arg(long, default_value_t = 60 * 60 * 5)]
    max_frames: u32,
    /// Stand still instead of dodging
    #[arg(long)]
    no_autopilot: bool,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(time_seed);
    let config = RunConfig {
        seed,
        frame_dt: args.frame_ms / 1000.0,
        max_frames: args.max_frames,
        autopilot: !args.no_autopilot,
    };

    let summary = runner::run(&config, &Tuning::default())
        .with_context(|| format!("Failed to run round with seed {seed}"))?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to encode summary")?;
        println!("{json}");
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(12345)
}

fn print_summary(summary: &RunSummary) {
    println!("=== ROUND RESULT ===");
    println!("  Seed:       {}", summary.seed);
    println!("  Outcome:    {:?}", summary.outcome);
    println!("  Survived:   {:.1}s ({} ticks)", summary.survived_secs, summary.ticks);
    println!("  Health:     {}", summary.health);
    println!("  Spawned:    {}", summary.enemies_spawned);
    println!("  Shots:      {}", summary.shots_fired);
    println!("  Hits taken: {}", summary.hits_taken);
}
