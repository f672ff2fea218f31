//! Player profiles, challenge results and the leaderboard.

use chrono::{DateTime, Utc};
use roomcraft_engine::{LevelDefinition, Stars, Submission, SubmissionKind};
use serde::{Deserialize, Serialize};

use crate::{JsonStoreExt, KeyValueStore, StoreError};

pub const RESULTS_KEY: &str = "challenge_results";
pub const PROFILES_KEY: &str = "user_profiles";
pub const CURRENT_GAME_KEY: &str = "current_game";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
    /// Sum of the rounded efficiencies of every recorded attempt.
    #[serde(default)]
    pub total_score: u64,
}

impl UserProfile {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            institution: None,
            total_score: 0,
        }
    }
}

/// One scored attempt, as kept in the result history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeRecord {
    pub id: String,
    pub level_id: u32,
    pub level_title: String,
    pub user_id: String,
    pub efficiency: f64,
    pub stars: Stars,
    pub passed: bool,
    pub outcome: SubmissionKind,
    pub time_remaining_secs: u32,
    pub xp_earned: u32,
    pub feedback: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

/// The most recently finished attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentGame {
    pub level_id: u32,
    pub record_id: String,
}

/// Experience earned for a result: the level's reward scaled by the stars out of three.
///
/// Never exceeds `xp_reward`.
#[must_use]
pub fn xp_earned(xp_reward: u32, stars: Stars) -> u32 {
    let stars = u64::from(stars.count().min(3));
    u32::try_from(u64::from(xp_reward) * stars / 3).unwrap_or(xp_reward)
}

/// Result history and player profiles over any [`KeyValueStore`].
#[derive(Debug)]
pub struct GameRecords<S> {
    store: S,
}

impl<S> GameRecords<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn profiles(&self) -> Result<Vec<UserProfile>, StoreError> {
        Ok(self.store.load_json(PROFILES_KEY)?.unwrap_or_default())
    }

    pub fn profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self
            .profiles()?
            .into_iter()
            .find(|profile| profile.id == user_id))
    }

    /// Inserts `profile`, or replaces the stored one with the same id.
    pub fn save_profile(&mut self, profile: UserProfile) -> Result<(), StoreError> {
        let mut profiles = self.profiles()?;
        match profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => profiles.push(profile),
        }
        self.store.save_json(PROFILES_KEY, &profiles)
    }

    /// Appends the outcome of a finished attempt and credits it to `user_id`.
    ///
    /// The player's profile is created on first use. The new record also becomes the
    /// current game.
    pub fn record_result(
        &mut self,
        user_id: &str,
        level: &LevelDefinition,
        submission: &Submission,
        completed_at: DateTime<Utc>,
    ) -> Result<ChallengeRecord, StoreError> {
        let mut results = self.results()?;
        let result = &submission.result;
        let record = ChallengeRecord {
            id: format!("result-{}", results.len() + 1),
            level_id: level.id,
            level_title: level.title.clone(),
            user_id: user_id.to_owned(),
            efficiency: result.efficiency(),
            stars: result.stars(),
            passed: result.passed(),
            outcome: submission.kind,
            time_remaining_secs: submission.time_remaining_secs,
            xp_earned: xp_earned(level.xp_reward, result.stars()),
            feedback: result.feedback().to_vec(),
            completed_at,
        };
        results.push(record.clone());
        self.store.save_json(RESULTS_KEY, &results)?;

        let mut profile = self
            .profile(user_id)?
            .unwrap_or_else(|| UserProfile::new(user_id, user_id));
        profile.total_score += u64::from(result.rounded_efficiency());
        self.save_profile(profile)?;

        self.store.save_json(
            CURRENT_GAME_KEY,
            &CurrentGame {
                level_id: level.id,
                record_id: record.id.clone(),
            },
        )?;
        Ok(record)
    }

    /// Every recorded attempt, oldest first.
    pub fn results(&self) -> Result<Vec<ChallengeRecord>, StoreError> {
        Ok(self.store.load_json(RESULTS_KEY)?.unwrap_or_default())
    }

    pub fn results_for_level(&self, level_id: u32) -> Result<Vec<ChallengeRecord>, StoreError> {
        let mut results = self.results()?;
        results.retain(|record| record.level_id == level_id);
        Ok(results)
    }

    /// Highest-efficiency attempt at `level_id`; the earliest wins a tie.
    pub fn best_for_level(&self, level_id: u32) -> Result<Option<ChallengeRecord>, StoreError> {
        Ok(self
            .results_for_level(level_id)?
            .into_iter()
            .reduce(|best, record| {
                if record.efficiency > best.efficiency {
                    record
                } else {
                    best
                }
            }))
    }

    pub fn current_game(&self) -> Result<Option<CurrentGame>, StoreError> {
        self.store.load_json(CURRENT_GAME_KEY)
    }

    /// Profiles ordered by total score, highest first, then by name.
    pub fn leaderboard(&self) -> Result<Vec<UserProfile>, StoreError> {
        let mut profiles = self.profiles()?;
        profiles.sort_by(|a, b| {
            b.total_score
                .cmp(&a.total_score)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use roomcraft_engine::{ScoreResult, builtin_levels};
    use tempfile::TempDir;

    use super::*;
    use crate::{FileStore, MemoryStore};

    fn submission(efficiency: f64, stars: Stars, passed: bool) -> Submission {
        Submission {
            kind: SubmissionKind::Submitted,
            time_remaining_secs: 120,
            result: ScoreResult::new(efficiency, stars, passed, vec!["ok".to_owned()], None),
        }
    }

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, minute, 0).unwrap()
    }

    #[test]
    fn test_xp_scales_with_stars() {
        assert_eq!(xp_earned(150, Stars::ZERO), 0);
        assert_eq!(xp_earned(150, Stars::ONE), 50);
        assert_eq!(xp_earned(150, Stars::TWO), 100);
        assert_eq!(xp_earned(150, Stars::THREE), 150);
        assert_eq!(xp_earned(250, Stars::TWO), 166);
        assert_eq!(xp_earned(u32::MAX, Stars::THREE), u32::MAX);
        assert_eq!(xp_earned(u32::MAX, Stars::TWO), 2_863_311_530);
    }

    #[test]
    fn test_record_result_appends_and_credits_player() {
        let levels = builtin_levels();
        let mut records = GameRecords::new(MemoryStore::new());

        let first = records
            .record_result("ada", &levels[0], &submission(91.6, Stars::THREE, true), at(0))
            .unwrap();
        assert_eq!(first.id, "result-1");
        assert_eq!(first.level_title, "Starter Cabin");
        assert_eq!(first.xp_earned, 150);

        let second = records
            .record_result("ada", &levels[1], &submission(40.2, Stars::ZERO, false), at(5))
            .unwrap();
        assert_eq!(second.xp_earned, 0);

        assert_eq!(records.results().unwrap(), [first, second.clone()]);
        assert_eq!(records.profile("ada").unwrap().unwrap().total_score, 92 + 40);
        assert_eq!(
            records.current_game().unwrap(),
            Some(CurrentGame {
                level_id: 2,
                record_id: second.id
            })
        );
    }

    #[test]
    fn test_results_per_level_and_best() {
        let levels = builtin_levels();
        let mut records = GameRecords::new(MemoryStore::new());
        for (minute, efficiency) in [(0, 70.0), (1, 88.0), (2, 88.0)] {
            records
                .record_result(
                    "ada",
                    &levels[0],
                    &submission(efficiency, Stars::ONE, false),
                    at(minute),
                )
                .unwrap();
        }
        records
            .record_result("ada", &levels[1], &submission(99.0, Stars::THREE, true), at(3))
            .unwrap();

        assert_eq!(records.results_for_level(1).unwrap().len(), 3);
        assert_eq!(records.best_for_level(1).unwrap().unwrap().id, "result-2");
        assert_eq!(records.best_for_level(7).unwrap(), None);
    }

    #[test]
    fn test_leaderboard_order() {
        let mut records = GameRecords::new(MemoryStore::new());
        for (id, name, score) in [("1", "Cleo", 120), ("2", "Bram", 300), ("3", "Ada", 120)] {
            let mut profile = UserProfile::new(id, name);
            profile.total_score = score;
            records.save_profile(profile).unwrap();
        }
        let names = records
            .leaderboard()
            .unwrap()
            .into_iter()
            .map(|profile| profile.name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["Bram", "Ada", "Cleo"]);
    }

    #[test]
    fn test_save_profile_replaces_existing() {
        let mut records = GameRecords::new(MemoryStore::new());
        records.save_profile(UserProfile::new("1", "Ada")).unwrap();
        let mut renamed = UserProfile::new("1", "Ada L.");
        renamed.institution = Some("Analytical Engines".to_owned());
        records.save_profile(renamed.clone()).unwrap();
        assert_eq!(records.profiles().unwrap(), [renamed]);
    }

    #[test]
    fn test_records_survive_reopening_file_store() {
        let dir = TempDir::new().unwrap();
        let level = &builtin_levels()[0];
        let mut records = GameRecords::new(FileStore::open(dir.path()).unwrap());
        records
            .record_result("ada", level, &submission(80.0, Stars::TWO, true), at(0))
            .unwrap();

        let reopened = GameRecords::new(FileStore::open(dir.path()).unwrap());
        assert_eq!(reopened.results().unwrap().len(), 1);
        assert_eq!(reopened.profile("ada").unwrap().unwrap().total_score, 80);
    }
}
