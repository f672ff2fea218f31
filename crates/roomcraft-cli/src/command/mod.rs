use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use roomcraft_engine::LevelDefinition;
use roomcraft_evaluator::policy::ScoringPolicy;
use roomcraft_store::FileStore;

use crate::util;

use self::{
    chat::ChatArg, evaluate::EvaluateArg, history::HistoryArg, leaderboard::LeaderboardArg,
    levels::LevelsArg, play::PlayArg,
};

mod chat;
mod evaluate;
mod history;
mod leaderboard;
mod levels;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    config: ConfigArg,
    /// What to do (defaults to `play`)
    #[command(subcommand)]
    mode: Option<Mode>,
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// Directory holding player profiles, results and chat history
    #[clap(long, global = true, default_value = "./data/roomcraft/")]
    data_dir: PathBuf,
    /// Level catalog (JSON array) to use instead of the built-in levels
    #[clap(long, global = true)]
    levels: Option<PathBuf>,
    /// Scoring policy overrides (JSON); omitted fields keep their defaults
    #[clap(long, global = true)]
    policy: Option<PathBuf>,
    /// Player results and chats are recorded for
    #[clap(long, global = true, default_value = "guest")]
    user: String,
}

impl ConfigArg {
    pub(crate) fn levels(&self) -> anyhow::Result<Vec<LevelDefinition>> {
        util::load_levels(self.levels.as_deref())
    }

    pub(crate) fn policy(&self) -> anyhow::Result<ScoringPolicy> {
        util::load_policy(self.policy.as_deref())
    }

    pub(crate) fn store(&self) -> anyhow::Result<FileStore> {
        util::open_store(&self.data_dir)
    }

    pub(crate) fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub(crate) fn user(&self) -> &str {
        &self.user
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List the available levels
    Levels(#[clap(flatten)] LevelsArg),
    /// Play a timed layout challenge in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Score a layout described in a JSON file
    Evaluate(#[clap(flatten)] EvaluateArg),
    /// Show recorded challenge results
    History(#[clap(flatten)] HistoryArg),
    /// Rank players by total score
    Leaderboard(#[clap(flatten)] LeaderboardArg),
    /// Ask the design assistant about floor plans
    Chat(#[clap(flatten)] ChatArg),
}

pub fn run() -> anyhow::Result<()> {
    let CommandArgs { config, mode } = CommandArgs::parse();
    match mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Levels(arg) => levels::run(&config, &arg)?,
        Mode::Play(arg) => play::run(&config, &arg)?,
        Mode::Evaluate(arg) => evaluate::run(&config, &arg)?,
        Mode::History(arg) => history::run(&config, &arg)?,
        Mode::Leaderboard(arg) => leaderboard::run(&config, &arg)?,
        Mode::Chat(arg) => chat::run(&config, &arg)?,
    }
    Ok(())
}
