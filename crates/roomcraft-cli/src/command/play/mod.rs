use roomcraft_engine::{LevelDefinition, find_level};
use roomcraft_evaluator::layout_evaluator::LayoutEvaluator;
use roomcraft_store::{KeyValueStore, MemoryStore, records::GameRecords};

use crate::{command::ConfigArg, tui::Runtime};

use self::app::PlayApp;

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Level to play (falls back to the first level if unknown)
    #[clap(long)]
    level: Option<u32>,
    /// Do not record results in the data directory
    #[clap(long)]
    no_save: bool,
}

pub(crate) fn run(config: &ConfigArg, arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { level, no_save } = arg;
    let levels = config.levels()?;

    let chosen = match level {
        Some(id) => find_level(&levels, *id),
        None => levels.first(),
    }
    .cloned()
    .ok_or_else(|| anyhow::anyhow!("No levels to play"))?;
    if level.is_some_and(|id| id != chosen.id) {
        eprintln!("Unknown level, playing {} instead", chosen.title);
    }

    if *no_save {
        play(config, chosen, MemoryStore::new())
    } else {
        play(config, chosen, config.store()?)
    }
}

fn play<S>(config: &ConfigArg, level: LevelDefinition, store: S) -> anyhow::Result<()>
where
    S: KeyValueStore,
{
    let evaluator = LayoutEvaluator::new(config.policy()?);
    let records = GameRecords::new(store);
    let mut app = PlayApp::new(level, Box::new(evaluator), records, config.user());
    Runtime::new().run(&mut app)?;

    for record in app.into_recorded() {
        eprintln!(
            "Recorded {}: {} {}% {} (+{} XP)",
            record.id,
            record.level_title,
            record.efficiency.round(),
            record.stars,
            record.xp_earned
        );
    }
    Ok(())
}
