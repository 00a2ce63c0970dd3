// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Deserialize;
use serde::Serialize;

/// Derived statistics achievements are judged against.
#[derive(Clone, Copy, Default, Debug)]
pub struct Progress {
    pub studied_today: u32,
    pub study_streak: u32,
    pub total_points: u32,
    pub quiz_streak: u32,
}

/// An unlock condition over learner progress.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Condition {
    StudiedToday(u32),
    StudyStreak(u32),
    TotalPoints(u32),
    QuizStreak(u32),
}

impl Condition {
    pub fn is_met(&self, progress: &Progress) -> bool {
        match self {
            Condition::StudiedToday(n) => progress.studied_today >= *n,
            Condition::StudyStreak(n) => progress.study_streak >= *n,
            Condition::TotalPoints(n) => progress.total_points >= *n,
            Condition::QuizStreak(n) => progress.quiz_streak >= *n,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub condition: Condition,
    pub unlocked: bool,
}

/// Polls unlock conditions against learner progress.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Achievements {
    achievements: Vec<Achievement>,
}

impl Achievements {
    /// The built-in achievement set, all locked.
    pub fn builtin() -> Self {
        Self {
            achievements: vec![
                achievement(
                    "first-word",
                    "First Steps",
                    "Study your first word of the day",
                    Condition::StudiedToday(1),
                ),
                achievement(
                    "streak-3",
                    "Persistence",
                    "Study three days in a row",
                    Condition::StudyStreak(3),
                ),
                achievement(
                    "streak-7",
                    "Week Warrior",
                    "Study seven days in a row",
                    Condition::StudyStreak(7),
                ),
                achievement(
                    "points-100",
                    "Centurion",
                    "Earn 100 points",
                    Condition::TotalPoints(100),
                ),
                achievement(
                    "points-500",
                    "Point Master",
                    "Earn 500 points",
                    Condition::TotalPoints(500),
                ),
                achievement(
                    "quiz-perfect",
                    "Perfect Run",
                    "Answer ten quiz questions in a row",
                    Condition::QuizStreak(10),
                ),
            ],
        }
    }

    /// Unlock every achievement whose condition is now met. Returns the
    /// newly unlocked achievements; an unlocked achievement never fires
    /// again.
    pub fn check(&mut self, progress: &Progress) -> Vec<Achievement> {
        let mut unlocked = Vec::new();
        for achievement in &mut self.achievements {
            if !achievement.unlocked && achievement.condition.is_met(progress) {
                achievement.unlocked = true;
                log::debug!("Achievement unlocked: {}", achievement.id);
                unlocked.push(achievement.clone());
            }
        }
        unlocked
    }

    /// Carry unlocked flags over from a previously saved set, matching by
    /// id. Saved achievements that no longer exist are dropped.
    pub fn merge_saved(&mut self, saved: &Achievements) {
        for achievement in &mut self.achievements {
            if saved
                .achievements
                .iter()
                .any(|s| s.id == achievement.id && s.unlocked)
            {
                achievement.unlocked = true;
            }
        }
    }

    pub fn all(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn unlocked(&self) -> Vec<&Achievement> {
        self.achievements.iter().filter(|a| a.unlocked).collect()
    }
}

fn achievement(id: &str, name: &str, description: &str, condition: Condition) -> Achievement {
    Achievement {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        condition,
        unlocked: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_starts_locked() {
        let achievements = Achievements::builtin();
        assert_eq!(achievements.all().len(), 6);
        assert!(achievements.unlocked().is_empty());
    }

    #[test]
    fn test_check_unlocks_once() {
        let mut achievements = Achievements::builtin();
        let progress = Progress {
            studied_today: 1,
            ..Progress::default()
        };
        let unlocked = achievements.check(&progress);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, "first-word");
        // The same progress never fires the achievement again.
        assert!(achievements.check(&progress).is_empty());
        assert_eq!(achievements.unlocked().len(), 1);
    }

    #[test]
    fn test_multiple_unlocks() {
        let mut achievements = Achievements::builtin();
        let progress = Progress {
            studied_today: 1,
            study_streak: 3,
            total_points: 150,
            quiz_streak: 0,
        };
        let unlocked = achievements.check(&progress);
        let ids: Vec<&str> = unlocked.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["first-word", "streak-3", "points-100"]);
    }

    #[test]
    fn test_merge_saved() {
        let mut saved = Achievements::builtin();
        saved.check(&Progress {
            quiz_streak: 10,
            ..Progress::default()
        });
        let mut fresh = Achievements::builtin();
        fresh.merge_saved(&saved);
        let unlocked = fresh.unlocked();
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, "quiz-perfect");
    }

    #[test]
    fn test_serde_round_trip() {
        let mut achievements = Achievements::builtin();
        achievements.check(&Progress {
            total_points: 500,
            ..Progress::default()
        });
        let json = serde_json::to_string(&achievements).unwrap();
        let parsed: Achievements = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.unlocked().len(), 2);
    }
}
