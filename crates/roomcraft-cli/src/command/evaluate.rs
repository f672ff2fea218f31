use std::path::PathBuf;

use anyhow::Context;
use roomcraft_engine::{GridPosition, Layout, LevelDefinition, RoomId, Rotation, ScoreResult};
use roomcraft_evaluator::layout_evaluator::LayoutEvaluator;
use serde::{Deserialize, Serialize};

use crate::{command::ConfigArg, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// Layout file (JSON) to score
    layout_file: PathBuf,
    /// Write the report to this file instead of stdout
    #[clap(long)]
    output: Option<PathBuf>,
}

/// A finished layout as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LayoutFile {
    pub(crate) level_id: u32,
    #[serde(default)]
    pub(crate) time_remaining_secs: u32,
    pub(crate) placements: Vec<PlacementEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PlacementEntry {
    pub(crate) room: RoomId,
    pub(crate) x: i32,
    pub(crate) y: i32,
    #[serde(default)]
    pub(crate) rotation: Rotation,
}

#[derive(Debug, Serialize)]
struct EvaluationReport<'a> {
    level_id: u32,
    level_title: &'a str,
    rounded_efficiency: u32,
    #[serde(flatten)]
    result: &'a ScoreResult,
}

pub(crate) fn run(config: &ConfigArg, arg: &EvaluateArg) -> anyhow::Result<()> {
    let EvaluateArg {
        layout_file,
        output,
    } = arg;

    let levels = config.levels()?;
    let evaluator = LayoutEvaluator::new(config.policy()?);
    let file: LayoutFile = util::read_json_file("layout", layout_file)?;

    let level = levels
        .iter()
        .find(|level| level.id == file.level_id)
        .with_context(|| format!("Unknown level id {}", file.level_id))?;
    let layout = build_layout(level, &file.placements)?;
    if !layout.is_complete() {
        eprintln!(
            "Layout is incomplete: {} of {} rooms placed",
            layout.placed_rooms().count(),
            layout.rooms().len()
        );
    }

    let result = evaluator.evaluate(level, layout.rooms(), file.time_remaining_secs);
    let report = EvaluationReport {
        level_id: level.id,
        level_title: &level.title,
        rounded_efficiency: result.rounded_efficiency(),
        result: &result,
    };
    util::Output::save_json(&report, output.as_deref())
}

/// Applies each placement in order, rotating the room first.
///
/// A room that needs a new rotation is lifted off the grid before turning, so only the
/// final orientation has to fit.
pub(crate) fn build_layout(
    level: &LevelDefinition,
    placements: &[PlacementEntry],
) -> anyhow::Result<Layout> {
    let mut layout = Layout::new(level);
    for entry in placements {
        let current = layout
            .room(&entry.room)
            .with_context(|| format!("Level {} has no room `{}`", level.id, entry.room))?
            .rotation();
        if current != entry.rotation {
            layout.remove(&entry.room)?;
            while layout.rotate(&entry.room)? != entry.rotation {}
        }
        layout
            .place(&entry.room, GridPosition::new(entry.x, entry.y))
            .with_context(|| format!("Failed to place room `{}`", entry.room))?;
    }
    Ok(layout)
}
