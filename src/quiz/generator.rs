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

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::types::quiz::OPTION_COUNT;
use crate::types::quiz::Quiz;
use crate::types::quiz::QuizMode;
use crate::types::quiz::QuizType;
use crate::types::timestamp::Timestamp;
use crate::types::word::Word;
use crate::words::WordStore;

/// Builds multiple-choice questions from a word store.
pub struct QuizGenerator {
    rng: StdRng,
    next_id: u64,
}

impl QuizGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            next_id: 1,
        }
    }

    /// A generator with a fixed seed produces a reproducible question
    /// stream.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Generate one question. Returns `None` when the store has fewer than
    /// four words.
    pub fn generate(&mut self, words: &WordStore, mode: QuizMode, now: Timestamp) -> Option<Quiz> {
        if words.len() < OPTION_COUNT {
            return None;
        }
        let quiz_type = match mode {
            QuizMode::Mixed => QuizType::ALL[self.rng.gen_range(0..QuizType::ALL.len())],
            QuizMode::Only(quiz_type) => quiz_type,
        };
        let correct_word = self.pick(words).clone();
        // Rejection-sample three distinct distractors.
        let mut options: Vec<Word> = vec![correct_word.clone()];
        while options.len() < OPTION_COUNT {
            let candidate = self.pick(words);
            if options.iter().all(|word| word.id() != candidate.id()) {
                options.push(candidate.clone());
            }
        }
        options.shuffle(&mut self.rng);
        let correct_index = options
            .iter()
            .position(|word| word.id() == correct_word.id())
            .expect("correct word is always among the options");
        let id = self.next_id;
        self.next_id += 1;
        log::debug!(
            "Quiz {id} ({}): word {} at index {correct_index}.",
            quiz_type.as_str(),
            correct_word.id()
        );
        Some(Quiz {
            id,
            quiz_type,
            correct_word,
            options,
            correct_index,
            started_at: now,
        })
    }

    fn pick<'a>(&mut self, words: &'a WordStore) -> &'a Word {
        let index = self.rng.gen_range(0..words.len());
        &words.as_slice()[index]
    }
}
