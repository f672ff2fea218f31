use roomcraft_store::records::GameRecords;

use crate::command::ConfigArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LeaderboardArg {
    /// Number of players to show
    #[clap(long, default_value_t = 10)]
    limit: usize,
}

pub(crate) fn run(config: &ConfigArg, arg: &LeaderboardArg) -> anyhow::Result<()> {
    let records = GameRecords::new(config.store()?);
    let profiles = records.leaderboard()?;
    if profiles.is_empty() {
        eprintln!("No players yet");
        return Ok(());
    }

    println!("{:>4}  {:<20} {:>8}", "RANK", "PLAYER", "SCORE");
    for (rank, profile) in profiles.iter().take(arg.limit).enumerate() {
        let marker = if profile.id == config.user() { " *" } else { "" };
        println!(
            "{:>4}  {:<20} {:>8}{marker}",
            rank + 1,
            profile.name,
            profile.total_score
        );
    }
    Ok(())
}
