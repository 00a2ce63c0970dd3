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

use serde::Deserialize;
use serde::Serialize;

use crate::types::difficulty::Difficulty;
use crate::types::review_state::ReviewState;
use crate::types::review_state::update_state;
use crate::types::timestamp::Timestamp;
use crate::types::word::WordId;
use crate::words::WordStore;

/// Spaced repetition scheduler: one [`ReviewState`] per reviewed word,
/// created lazily on the first review.
#[derive(Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scheduler {
    states: BTreeMap<WordId, ReviewState>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Review a word and compute its next due time. Returns `None`, without
    /// touching any state, if the word store does not contain the id.
    pub fn review(
        &mut self,
        words: &WordStore,
        word_id: WordId,
        difficulty: Difficulty,
        now: Timestamp,
    ) -> Option<ReviewState> {
        if !words.contains(word_id) {
            log::debug!("Review for unknown word id {word_id}, ignoring.");
            return None;
        }
        let state = update_state(self.states.get(&word_id).copied(), difficulty, now);
        log::debug!(
            "{} {} level={} due={}",
            word_id,
            difficulty.as_str(),
            state.level,
            state.next_review_at
        );
        self.states.insert(word_id, state);
        Some(state)
    }

    pub fn state(&self, word_id: WordId) -> Option<ReviewState> {
        self.states.get(&word_id).copied()
    }

    /// Words due for review at the given time. Never-reviewed words are due.
    pub fn due(&self, words: &WordStore, now: Timestamp) -> Vec<WordId> {
        let mut due = Vec::new();
        for word in words.iter() {
            match self.states.get(&word.id()) {
                None => {
                    // Never reviewed, so it's due.
                    due.push(word.id());
                }
                Some(state) => {
                    if state.next_review_at <= now {
                        due.push(word.id());
                    }
                }
            }
        }
        due
    }

    /// Number of reviewed words whose mastery level is zero.
    pub fn struggling_count(&self) -> usize {
        self.states.values().filter(|state| state.level == 0).count()
    }

    pub fn reviewed_count(&self) -> usize {
        self.states.len()
    }
}
