mod scenario;

use anyhow::{Context, Result};
use clap::Parser;
use core_types::DeviceProfile;
use dom::debug;
use log::info;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "popstack",
    about = "Replay clicks, taps, and key presses against a scripted popup document"
)]
struct Cli {
    /// Scenario file (TOML)
    scenario: PathBuf,

    /// Treat the host as a touch-capable mobile device
    #[arg(long)]
    touch: bool,

    /// Print the final document tree
    #[arg(long)]
    outline: bool,

    /// Cap on outline lines
    #[arg(long, default_value_t = 200)]
    outline_cap: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.scenario)
        .with_context(|| format!("reading {}", cli.scenario.display()))?;
    let mut scenario: scenario::Scenario = toml::from_str(&text)
        .with_context(|| format!("parsing {}", cli.scenario.display()))?;
    if cli.touch {
        scenario.config.device = DeviceProfile {
            touch: true,
            mobile: true,
        };
    }
    info!(
        "replaying {} steps over {} nodes",
        scenario.steps.len(),
        scenario.nodes.len()
    );

    let (report, doc) = scenario::run(&scenario)?;
    for line in report {
        println!("{line}");
    }
    if cli.outline {
        for line in debug::outline(&doc, cli.outline_cap) {
            println!("{line}");
        }
    }
    Ok(())
}
