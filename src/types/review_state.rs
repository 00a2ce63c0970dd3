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

use crate::types::difficulty::Difficulty;
use crate::types::timestamp::Timestamp;

/// The minimum review interval in days.
const MIN_INTERVAL: f64 = 1.0;

/// The maximum review interval in days.
const MAX_INTERVAL: f64 = 365.0;

/// Interval multiplier applied on top of the doubling schedule for easy
/// words.
const EASY_BONUS: f64 = 1.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Per-word spaced repetition bookkeeping.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ReviewState {
    /// Mastery level. Zero for new and relapsed words.
    pub level: u32,
    /// When the word is next due for review.
    pub next_review_at: Timestamp,
}

/// Compute the state after a review. `state` is `None` on the first review
/// of a word.
pub fn update_state(
    state: Option<ReviewState>,
    difficulty: Difficulty,
    now: Timestamp,
) -> ReviewState {
    let level = match state {
        Some(state) => state.level,
        None => 0,
    };
    let (level, interval) = match difficulty {
        Difficulty::Hard => (0, MIN_INTERVAL),
        Difficulty::Normal => {
            let level = level + 1;
            (level, interval_days(level, 1.0))
        }
        Difficulty::Easy => {
            let level = level + 2;
            (level, interval_days(level, EASY_BONUS))
        }
    };
    ReviewState {
        level,
        next_review_at: now.plus_seconds((interval * SECONDS_PER_DAY) as i64),
    }
}

fn interval_days(level: u32, bonus: f64) -> f64 {
    let days = 2f64.powi(level.min(32) as i32) * bonus;
    days.clamp(MIN_INTERVAL, MAX_INTERVAL)
}
