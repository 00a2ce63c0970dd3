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

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::Duration;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::types::difficulty::Difficulty;
use crate::types::timestamp::Timestamp;
use crate::types::word::WordId;

/// Days covered by a weekly progress report.
const WEEK_DAYS: i64 = 7;

/// Streak length below which a consistency recommendation fires.
const STREAK_GOAL: u32 = 3;

/// Struggling-word count above which a review recommendation fires.
const STRUGGLING_LIMIT: usize = 5;

/// What the learner studied on a single day.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Ids of the distinct words studied.
    pub words_studied: BTreeSet<WordId>,
    pub total_time_ms: u64,
    pub easy: u32,
    pub normal: u32,
    pub hard: u32,
}

/// One day within a weekly progress report.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct DayProgress {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub words_studied: usize,
    pub time_spent_ms: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum RecommendationKind {
    Consistency,
    Review,
}

/// What the UI should offer when the learner follows a recommendation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum RecommendationAction {
    Study,
    Review,
}

/// A study suggestion for the UI to render.
#[derive(Clone, Debug, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub message: String,
    pub action: RecommendationAction,
}

/// Aggregates per-review study events into daily statistics.
#[derive(Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Analytics {
    days: BTreeMap<String, DailyRecord>,
}

impl Analytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        word_id: WordId,
        difficulty: Difficulty,
        time_spent_ms: u64,
        now: Timestamp,
    ) {
        let record = self.days.entry(date_key(now.date())).or_default();
        record.words_studied.insert(word_id);
        record.total_time_ms += time_spent_ms;
        match difficulty {
            Difficulty::Easy => record.easy += 1,
            Difficulty::Normal => record.normal += 1,
            Difficulty::Hard => record.hard += 1,
        }
    }

    /// Per-day totals for the last seven days, oldest first. Days without
    /// study report zero.
    pub fn weekly_progress(&self, now: Timestamp) -> Vec<DayProgress> {
        let today = now.date();
        let mut progress = Vec::new();
        for offset in (0..WEEK_DAYS).rev() {
            let date = today - Duration::days(offset);
            let key = date_key(date);
            let (words_studied, time_spent_ms) = match self.days.get(&key) {
                Some(record) => (record.words_studied.len(), record.total_time_ms),
                None => (0, 0),
            };
            progress.push(DayProgress {
                date: key,
                words_studied,
                time_spent_ms,
            });
        }
        progress
    }

    /// Consecutive days ending today with at least one word studied.
    pub fn study_streak(&self, now: Timestamp) -> u32 {
        let today = now.date();
        let mut streak = 0;
        loop {
            let date = today - Duration::days(i64::from(streak));
            match self.days.get(&date_key(date)) {
                Some(record) if !record.words_studied.is_empty() => streak += 1,
                _ => break,
            }
        }
        streak
    }

    pub fn recommendations(&self, struggling_words: usize, now: Timestamp) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();
        if self.study_streak(now) < STREAK_GOAL {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Consistency,
                message: "Study a little every day to build a steady habit.".to_string(),
                action: RecommendationAction::Study,
            });
        }
        if struggling_words > STRUGGLING_LIMIT {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Review,
                message: format!("{struggling_words} words need focused review."),
                action: RecommendationAction::Review,
            });
        }
        recommendations
    }
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
