use clap::Args;
use pomochill_core::config::Config;
use pomochill_core::error::Result;
use pomochill_core::timer::{advance, Phase};

use crate::common::format_clock;

#[derive(Args)]
pub struct CycleArgs {
    /// Number of upcoming phases to preview
    #[arg(long, default_value_t = 8)]
    count: usize,
    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn run(args: CycleArgs) -> Result<()> {
    let cfg = Config::load()?;
    let durations = cfg.durations();

    let mut phase = Phase::Focus;
    let mut duration = durations.focus_secs;
    let mut completed = 0u32;
    let mut rows = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        rows.push((phase, duration));
        let next = advance(phase, completed, &durations);
        phase = next.phase;
        duration = next.duration_secs;
        completed = next.completed_focus_sessions;
    }

    if args.json {
        let items: Vec<serde_json::Value> = rows
            .iter()
            .map(|(phase, duration_secs)| {
                serde_json::json!({
                    "phase": phase,
                    "duration_secs": duration_secs,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for (i, (phase, duration_secs)) in rows.iter().enumerate() {
            println!("{:>2}. {:<12} {:>6}", i + 1, phase.label(), format_clock(*duration_secs));
        }
    }
    Ok(())
}
