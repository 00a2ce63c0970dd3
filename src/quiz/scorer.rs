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
use crate::types::quiz::Quiz;
use crate::types::quiz::QuizResult;
use crate::types::timestamp::Timestamp;

/// Maximum points awarded for an instant correct answer.
const MAX_REWARD: u32 = 20;

/// Minimum points awarded for any correct answer.
const MIN_REWARD: u32 = 5;

/// Correct answers faster than this count as easy recalls.
const EASY_CUTOFF_MS: u64 = 3_000;

/// Points for a correct answer: faster answers earn more, with a floor.
pub fn reward_points(response_time_ms: u64) -> u32 {
    let seconds = (response_time_ms / 1_000).min(u64::from(MAX_REWARD)) as u32;
    MAX_REWARD.saturating_sub(seconds).max(MIN_REWARD)
}

/// Scores answers and accumulates session statistics. The history is
/// append-only and lives for the session; it is never persisted.
pub struct QuizScorer {
    history: Vec<QuizResult>,
    streak: u32,
}

impl QuizScorer {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            streak: 0,
        }
    }

    /// Check an answer. Consumes the quiz: a question is answered at most
    /// once.
    pub fn check_answer(&mut self, quiz: Quiz, selected_index: usize, now: Timestamp) -> QuizResult {
        let response_time_ms = now.millis_since(quiz.started_at);
        let correct = selected_index == quiz.correct_index;
        let result = QuizResult {
            correct,
            response_time_ms,
            word: quiz.correct_word,
            selected: quiz.options.into_iter().nth(selected_index),
        };
        if correct {
            self.streak += 1;
        } else {
            self.streak = 0;
        }
        self.history.push(result.clone());
        result
    }

    /// The difficulty label a result feeds back into the scheduler.
    pub fn derive_difficulty(result: &QuizResult) -> Difficulty {
        if !result.correct {
            Difficulty::Hard
        } else if result.response_time_ms < EASY_CUTOFF_MS {
            Difficulty::Easy
        } else {
            Difficulty::Normal
        }
    }

    /// Consecutive correct answers, reset on any incorrect answer.
    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn history(&self) -> &[QuizResult] {
        &self.history
    }

    /// Share of correct answers as a rounded percentage. Zero with no
    /// history.
    pub fn accuracy(&self) -> u32 {
        if self.history.is_empty() {
            return 0;
        }
        let correct = self.history.iter().filter(|result| result.correct).count();
        ((correct as f64 / self.history.len() as f64) * 100.0).round() as u32
    }

    /// Mean response time in whole seconds. Zero with no history.
    pub fn average_response_time_secs(&self) -> u32 {
        if self.history.is_empty() {
            return 0;
        }
        let total: u64 = self
            .history
            .iter()
            .map(|result| result.response_time_ms)
            .sum();
        (total as f64 / self.history.len() as f64 / 1_000.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use crate::types::quiz::QuizType;
    use crate::types::word::Word;
    use crate::types::word::WordId;

    use super::*;

    fn now() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2026, 3, 14, 10, 0, 0).unwrap())
    }

    fn word(id: u32) -> Word {
        Word::new(WordId::new(id), format!("word-{id}"), format!("词-{id}"), "", "")
    }

    fn quiz(started_at: Timestamp) -> Quiz {
        Quiz {
            id: 1,
            quiz_type: QuizType::ChineseToEnglish,
            correct_word: word(1),
            options: vec![word(3), word(1), word(2), word(4)],
            correct_index: 1,
            started_at,
        }
    }

    #[test]
    fn test_correct_answer() {
        let mut scorer = QuizScorer::new();
        let answered_at = now().plus_millis(500);
        let result = scorer.check_answer(quiz(now()), 1, answered_at);
        assert!(result.correct);
        assert_eq!(result.response_time_ms, 500);
        assert_eq!(result.word.id(), WordId::new(1));
        assert_eq!(result.selected.unwrap().id(), WordId::new(1));
        assert_eq!(scorer.streak(), 1);
        assert_eq!(reward_points(result.response_time_ms), 20);
    }

    #[test]
    fn test_wrong_answer_resets_streak() {
        let mut scorer = QuizScorer::new();
        scorer.check_answer(quiz(now()), 1, now());
        scorer.check_answer(quiz(now()), 1, now());
        assert_eq!(scorer.streak(), 2);
        let result = scorer.check_answer(quiz(now()), 0, now());
        assert!(!result.correct);
        assert_eq!(result.selected.unwrap().id(), WordId::new(3));
        assert_eq!(scorer.streak(), 0);
    }

    #[test]
    fn test_out_of_range_index_is_wrong() {
        let mut scorer = QuizScorer::new();
        let result = scorer.check_answer(quiz(now()), 17, now());
        assert!(!result.correct);
        assert!(result.selected.is_none());
    }

    #[test]
    fn test_reward_bounds() {
        assert_eq!(reward_points(0), 20);
        assert_eq!(reward_points(999), 20);
        assert_eq!(reward_points(1_000), 19);
        assert_eq!(reward_points(15_000), 5);
        assert_eq!(reward_points(60_000), 5);
    }

    #[test]
    fn test_reward_is_non_increasing() {
        let mut previous = u32::MAX;
        for seconds in 0..30 {
            let reward = reward_points(seconds * 1_000);
            assert!(reward <= previous);
            assert!((MIN_REWARD..=MAX_REWARD).contains(&reward));
            previous = reward;
        }
    }

    #[test]
    fn test_derive_difficulty() {
        let make = |correct, response_time_ms| QuizResult {
            correct,
            response_time_ms,
            word: word(1),
            selected: None,
        };
        assert_eq!(
            QuizScorer::derive_difficulty(&make(true, 2_999)),
            Difficulty::Easy
        );
        assert_eq!(
            QuizScorer::derive_difficulty(&make(true, 3_000)),
            Difficulty::Normal
        );
        assert_eq!(
            QuizScorer::derive_difficulty(&make(false, 100)),
            Difficulty::Hard
        );
    }

    #[test]
    fn test_accuracy_and_average() {
        let mut scorer = QuizScorer::new();
        assert_eq!(scorer.accuracy(), 0);
        assert_eq!(scorer.average_response_time_secs(), 0);
        scorer.check_answer(quiz(now()), 1, now().plus_millis(1_000));
        scorer.check_answer(quiz(now()), 1, now().plus_millis(2_000));
        scorer.check_answer(quiz(now()), 0, now().plus_millis(3_000));
        // Two of three correct, rounded.
        assert_eq!(scorer.accuracy(), 67);
        assert_eq!(scorer.average_response_time_secs(), 2);
        assert_eq!(scorer.history().len(), 3);
    }
}
