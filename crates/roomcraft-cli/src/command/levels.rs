use std::path::PathBuf;

use crate::{command::ConfigArg, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct LevelsArg {
    /// Print the full level definitions as JSON
    #[clap(long)]
    json: bool,
    /// Write the JSON to this file instead of stdout (implies `--json`)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(config: &ConfigArg, arg: &LevelsArg) -> anyhow::Result<()> {
    let LevelsArg { json, output } = arg;
    let levels = config.levels()?;

    if *json || output.is_some() {
        return util::Output::save_json(&levels, output.as_deref());
    }

    println!(
        "{:>3}  {:<16} {:<13} {:>5} {:>6} {:>6} {:>5}",
        "ID", "TITLE", "DIFFICULTY", "GRID", "TIME", "TARGET", "XP"
    );
    for level in &levels {
        println!(
            "{:>3}  {:<16} {:<13} {:>5} {:>6} {:>5}% {:>5}",
            level.id,
            level.title,
            level.difficulty.to_string(),
            format!("{}x{}", level.grid.width, level.grid.height),
            util::format_clock(level.time_limit),
            level.target_score,
            level.xp_reward,
        );
        if !level.description.is_empty() {
            println!("     {}", level.description);
        }
    }
    Ok(())
}
