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

use crate::types::difficulty::Difficulty;
use crate::types::timestamp::Timestamp;
use crate::types::word::WordId;

/// Emitted after every review, whether from flashcard marking or a scored
/// quiz answer.
#[derive(Clone, Copy, Debug)]
pub struct ReviewEvent {
    pub word_id: WordId,
    pub difficulty: Difficulty,
    pub time_spent_ms: u64,
    pub reviewed_at: Timestamp,
}

/// An observer notified after each review event. Hooks run in registration
/// order, after the trainer's own state updates.
pub trait ReviewHook {
    fn on_review(&mut self, event: &ReviewEvent);
}

impl<F> ReviewHook for F
where
    F: FnMut(&ReviewEvent),
{
    fn on_review(&mut self, event: &ReviewEvent) {
        self(event)
    }
}
