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

/// Points for a flashcard marked normal.
const NORMAL_POINTS: u32 = 10;

/// Points for a flashcard marked easy.
const EASY_POINTS: u32 = 15;

/// Points required per level.
const POINTS_PER_LEVEL: u32 = 100;

/// Running totals for the learner.
#[derive(Clone, Copy, Default, Debug, Serialize, Deserialize)]
pub struct UserStats {
    pub total_points: u32,
    /// Flashcards graded today. Quiz answers do not count.
    pub studied_today: u32,
}

impl UserStats {
    pub fn award(&mut self, points: u32) {
        self.total_points += points;
    }

    /// Flat points for grading a flashcard.
    pub fn flashcard_points(difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => EASY_POINTS,
            Difficulty::Normal => NORMAL_POINTS,
            Difficulty::Hard => 0,
        }
    }

    /// The learner's level, derived from the point total.
    pub fn level(&self) -> u32 {
        self.total_points / POINTS_PER_LEVEL + 1
    }
}
