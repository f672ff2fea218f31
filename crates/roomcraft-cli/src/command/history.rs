use std::path::PathBuf;

use roomcraft_store::records::GameRecords;

use crate::{command::ConfigArg, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct HistoryArg {
    /// Only show results for this level
    #[clap(long)]
    level: Option<u32>,
    /// Print the records as JSON
    #[clap(long)]
    json: bool,
    /// Write the JSON to this file instead of stdout (implies `--json`)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(config: &ConfigArg, arg: &HistoryArg) -> anyhow::Result<()> {
    let HistoryArg {
        level,
        json,
        output,
    } = arg;

    let records = GameRecords::new(config.store()?);
    let results = match level {
        Some(level_id) => records.results_for_level(*level_id)?,
        None => records.results()?,
    };

    if *json || output.is_some() {
        return util::Output::save_json(&results, output.as_deref());
    }

    if results.is_empty() {
        eprintln!("No results recorded in {}", config.data_dir().display());
        return Ok(());
    }

    println!(
        "{:<10} {:<16} {:<8} {:>4} {:<5} {:<9} {:>5}  COMPLETED",
        "ID", "LEVEL", "PLAYER", "EFF", "STARS", "OUTCOME", "XP"
    );
    for record in &results {
        println!(
            "{:<10} {:<16} {:<8} {:>3}% {:<5} {:<9} {:>5}  {}",
            record.id,
            record.level_title,
            record.user_id,
            record.efficiency.round(),
            record.stars.to_string(),
            record.outcome.to_string(),
            record.xp_earned,
            record.completed_at.format("%Y-%m-%d %H:%M"),
        );
    }

    if let Some(level_id) = level
        && let Some(best) = records.best_for_level(*level_id)?
    {
        println!();
        println!(
            "Best on level {level_id}: {}% {} ({})",
            best.efficiency.round(),
            best.stars,
            best.id
        );
    }
    if let Some(current) = records.current_game()? {
        eprintln!(
            "Last played: level {} ({})",
            current.level_id, current.record_id
        );
    }
    Ok(())
}
