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

use crate::achievements::Achievement;
use crate::achievements::Achievements;
use crate::achievements::Progress;
use crate::analytics::Analytics;
use crate::analytics::DayProgress;
use crate::analytics::Recommendation;
use crate::error::Fallible;
use crate::error::fail;
use crate::events::ReviewEvent;
use crate::events::ReviewHook;
use crate::quiz::generator::QuizGenerator;
use crate::quiz::scorer::QuizScorer;
use crate::quiz::scorer::reward_points;
use crate::scheduler::Scheduler;
use crate::stats::UserStats;
use crate::store::ACHIEVEMENTS_KEY;
use crate::store::DAILY_STATS_KEY;
use crate::store::REVIEW_STATES_KEY;
use crate::store::Storage;
use crate::store::USER_STATS_KEY;
use crate::types::difficulty::Difficulty;
use crate::types::quiz::Quiz;
use crate::types::quiz::QuizMode;
use crate::types::quiz::QuizResult;
use crate::types::review_state::ReviewState;
use crate::types::timestamp::Timestamp;
use crate::types::word::WordId;
use crate::words::WordStore;

/// The outcome of grading a flashcard.
pub struct MarkOutcome {
    pub review: ReviewState,
    pub points: u32,
    pub unlocked: Vec<Achievement>,
}

/// The outcome of answering a quiz question.
pub struct QuizOutcome {
    pub result: QuizResult,
    pub points: u32,
    pub unlocked: Vec<Achievement>,
}

/// Owns every piece of learner state. The embedding UI holds a single
/// instance and drives it synchronously; all durable state is written back
/// to storage after every review.
pub struct Trainer {
    words: WordStore,
    store: Box<dyn Storage>,
    scheduler: Scheduler,
    generator: QuizGenerator,
    scorer: QuizScorer,
    stats: UserStats,
    analytics: Analytics,
    achievements: Achievements,
    hooks: Vec<Box<dyn ReviewHook>>,
}

impl Trainer {
    /// Open a trainer over a word store, loading any previously saved state.
    pub fn open(words: WordStore, store: Box<dyn Storage>) -> Fallible<Self> {
        Self::from_parts(words, store, QuizGenerator::new())
    }

    /// Like [`Trainer::open`], with a fixed seed for a reproducible
    /// question stream.
    pub fn open_with_seed(words: WordStore, store: Box<dyn Storage>, seed: u64) -> Fallible<Self> {
        Self::from_parts(words, store, QuizGenerator::with_seed(seed))
    }

    fn from_parts(
        words: WordStore,
        store: Box<dyn Storage>,
        generator: QuizGenerator,
    ) -> Fallible<Self> {
        let scheduler = match store.get(REVIEW_STATES_KEY)? {
            Some(json) => serde_json::from_str(&json)?,
            None => Scheduler::new(),
        };
        let stats = match store.get(USER_STATS_KEY)? {
            Some(json) => serde_json::from_str(&json)?,
            None => UserStats::default(),
        };
        let analytics = match store.get(DAILY_STATS_KEY)? {
            Some(json) => serde_json::from_str(&json)?,
            None => Analytics::new(),
        };
        let achievements = {
            let mut achievements = Achievements::builtin();
            if let Some(json) = store.get(ACHIEVEMENTS_KEY)? {
                let saved: Achievements = serde_json::from_str(&json)?;
                achievements.merge_saved(&saved);
            }
            achievements
        };
        log::debug!(
            "Trainer opened: {} words, {} reviewed.",
            words.len(),
            scheduler.reviewed_count()
        );
        Ok(Self {
            words,
            store,
            scheduler,
            generator,
            scorer: QuizScorer::new(),
            stats,
            analytics,
            achievements,
            hooks: Vec::new(),
        })
    }

    /// Register an observer run after every review, in registration order.
    pub fn add_review_hook(&mut self, hook: Box<dyn ReviewHook>) {
        self.hooks.push(hook);
    }

    /// Grade a flashcard.
    pub fn mark_word(
        &mut self,
        word_id: WordId,
        difficulty: Difficulty,
        time_spent_ms: u64,
    ) -> Fallible<MarkOutcome> {
        self.mark_word_at(word_id, difficulty, time_spent_ms, Timestamp::now())
    }

    pub fn mark_word_at(
        &mut self,
        word_id: WordId,
        difficulty: Difficulty,
        time_spent_ms: u64,
        now: Timestamp,
    ) -> Fallible<MarkOutcome> {
        let review = match self.scheduler.review(&self.words, word_id, difficulty, now) {
            Some(review) => review,
            None => return fail(format!("unknown word id: {word_id}")),
        };
        let points = UserStats::flashcard_points(difficulty);
        self.stats.award(points);
        self.stats.studied_today += 1;
        let unlocked = self.after_review(word_id, difficulty, time_spent_ms, now)?;
        Ok(MarkOutcome {
            review,
            points,
            unlocked,
        })
    }

    /// Generate the next quiz question. `None` when the store is too small.
    pub fn start_quiz(&mut self, mode: QuizMode) -> Option<Quiz> {
        self.start_quiz_at(mode, Timestamp::now())
    }

    pub fn start_quiz_at(&mut self, mode: QuizMode, now: Timestamp) -> Option<Quiz> {
        self.generator.generate(&self.words, mode, now)
    }

    /// Score an answer. Consumes the quiz: each question is answered once.
    pub fn answer_quiz(&mut self, quiz: Quiz, selected_index: usize) -> Fallible<QuizOutcome> {
        self.answer_quiz_at(quiz, selected_index, Timestamp::now())
    }

    pub fn answer_quiz_at(
        &mut self,
        quiz: Quiz,
        selected_index: usize,
        now: Timestamp,
    ) -> Fallible<QuizOutcome> {
        let word_id = quiz.correct_word.id();
        let result = self.scorer.check_answer(quiz, selected_index, now);
        let points = if result.correct {
            reward_points(result.response_time_ms)
        } else {
            0
        };
        self.stats.award(points);
        let difficulty = QuizScorer::derive_difficulty(&result);
        self.scheduler.review(&self.words, word_id, difficulty, now);
        let unlocked = self.after_review(word_id, difficulty, result.response_time_ms, now)?;
        Ok(QuizOutcome {
            result,
            points,
            unlocked,
        })
    }

    fn after_review(
        &mut self,
        word_id: WordId,
        difficulty: Difficulty,
        time_spent_ms: u64,
        now: Timestamp,
    ) -> Fallible<Vec<Achievement>> {
        self.analytics.record(word_id, difficulty, time_spent_ms, now);
        let progress = self.progress_at(now);
        let unlocked = self.achievements.check(&progress);
        let event = ReviewEvent {
            word_id,
            difficulty,
            time_spent_ms,
            reviewed_at: now,
        };
        for hook in &mut self.hooks {
            hook.on_review(&event);
        }
        self.save()?;
        Ok(unlocked)
    }

    /// Snapshot of the statistics achievements are judged against.
    pub fn progress_at(&self, now: Timestamp) -> Progress {
        Progress {
            studied_today: self.stats.studied_today,
            study_streak: self.analytics.study_streak(now),
            total_points: self.stats.total_points,
            quiz_streak: self.scorer.streak(),
        }
    }

    /// Write all durable state to storage under its fixed keys.
    pub fn save(&mut self) -> Fallible<()> {
        let review_states = serde_json::to_string(&self.scheduler)?;
        self.store.put(REVIEW_STATES_KEY, &review_states)?;
        let stats = serde_json::to_string(&self.stats)?;
        self.store.put(USER_STATS_KEY, &stats)?;
        let analytics = serde_json::to_string(&self.analytics)?;
        self.store.put(DAILY_STATS_KEY, &analytics)?;
        let achievements = serde_json::to_string(&self.achievements)?;
        self.store.put(ACHIEVEMENTS_KEY, &achievements)?;
        Ok(())
    }

    pub fn words(&self) -> &WordStore {
        &self.words
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scorer(&self) -> &QuizScorer {
        &self.scorer
    }

    pub fn achievements(&self) -> &[Achievement] {
        self.achievements.all()
    }

    pub fn weekly_progress_at(&self, now: Timestamp) -> Vec<DayProgress> {
        self.analytics.weekly_progress(now)
    }

    pub fn study_streak_at(&self, now: Timestamp) -> u32 {
        self.analytics.study_streak(now)
    }

    pub fn recommendations_at(&self, now: Timestamp) -> Vec<Recommendation> {
        self.analytics
            .recommendations(self.scheduler.struggling_count(), now)
    }

    /// Ids of the words due for review right now.
    pub fn due_words_at(&self, now: Timestamp) -> Vec<WordId> {
        self.scheduler.due(&self.words, now)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::TimeZone;
    use chrono::Utc;

    use crate::store::MemoryStore;
    use crate::store::SqliteStore;
    use crate::types::word::Word;

    use super::*;

    fn now() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2026, 3, 14, 10, 0, 0).unwrap())
    }

    fn store(count: u32) -> WordStore {
        let words = (1..=count)
            .map(|id| {
                Word::new(
                    WordId::new(id),
                    format!("word-{id}"),
                    format!("词-{id}"),
                    "",
                    "",
                )
            })
            .collect();
        WordStore::new(words).unwrap()
    }

    fn trainer(count: u32) -> Trainer {
        Trainer::open_with_seed(store(count), Box::new(MemoryStore::new()), 1).unwrap()
    }

    #[test]
    fn test_mark_word() -> Fallible<()> {
        let mut trainer = trainer(5);
        let outcome = trainer.mark_word_at(WordId::new(1), Difficulty::Normal, 1_000, now())?;
        assert_eq!(outcome.review.level, 1);
        assert_eq!(outcome.points, 10);
        // The first flashcard of the day unlocks an achievement.
        assert_eq!(outcome.unlocked.len(), 1);
        assert_eq!(outcome.unlocked[0].id, "first-word");
        assert_eq!(trainer.stats().total_points, 10);
        assert_eq!(trainer.stats().studied_today, 1);
        Ok(())
    }

    #[test]
    fn test_mark_unknown_word_fails() {
        let mut trainer = trainer(5);
        let result = trainer.mark_word_at(WordId::new(99), Difficulty::Easy, 0, now());
        assert!(result.is_err());
    }

    #[test]
    fn test_quiz_round_trip() -> Fallible<()> {
        let mut trainer = trainer(8);
        let quiz = trainer.start_quiz_at(QuizMode::Mixed, now()).unwrap();
        let word_id = quiz.correct_word.id();
        let correct_index = quiz.correct_index;
        let outcome = trainer.answer_quiz_at(quiz, correct_index, now().plus_millis(500))?;
        assert!(outcome.result.correct);
        assert_eq!(outcome.result.response_time_ms, 500);
        assert_eq!(outcome.points, 20);
        // A fast correct answer counts as an easy review.
        assert_eq!(trainer.scheduler().state(word_id).unwrap().level, 2);
        assert_eq!(trainer.scorer().streak(), 1);
        assert_eq!(trainer.scorer().accuracy(), 100);
        assert_eq!(trainer.stats().total_points, 20);
        Ok(())
    }

    #[test]
    fn test_wrong_answer() -> Fallible<()> {
        let mut trainer = trainer(8);
        let quiz = trainer.start_quiz_at(QuizMode::Mixed, now()).unwrap();
        let word_id = quiz.correct_word.id();
        let wrong_index = (quiz.correct_index + 1) % quiz.options.len();
        let outcome = trainer.answer_quiz_at(quiz, wrong_index, now().plus_millis(500))?;
        assert!(!outcome.result.correct);
        assert_eq!(outcome.points, 0);
        assert_eq!(trainer.scorer().streak(), 0);
        assert_eq!(trainer.stats().total_points, 0);
        // A wrong answer counts as a hard review.
        assert_eq!(trainer.scheduler().state(word_id).unwrap().level, 0);
        Ok(())
    }

    #[test]
    fn test_too_few_words_for_a_quiz() {
        let mut trainer = trainer(3);
        assert!(trainer.start_quiz_at(QuizMode::Mixed, now()).is_none());
    }

    #[test]
    fn test_review_hooks_run() -> Fallible<()> {
        let mut trainer = trainer(5);
        let seen: Rc<RefCell<Vec<WordId>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        trainer.add_review_hook(Box::new(move |event: &ReviewEvent| {
            sink.borrow_mut().push(event.word_id);
        }));
        trainer.mark_word_at(WordId::new(2), Difficulty::Easy, 1_000, now())?;
        trainer.mark_word_at(WordId::new(3), Difficulty::Hard, 1_000, now())?;
        assert_eq!(*seen.borrow(), vec![WordId::new(2), WordId::new(3)]);
        Ok(())
    }

    #[test]
    fn test_state_survives_reopen() -> Fallible<()> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.db");
        let path = path.to_str().unwrap();
        {
            let store = SqliteStore::new(path)?;
            let mut trainer = Trainer::open_with_seed(store_words(), Box::new(store), 1)?;
            trainer.mark_word_at(WordId::new(1), Difficulty::Normal, 1_000, now())?;
            trainer.mark_word_at(WordId::new(1), Difficulty::Normal, 1_000, now())?;
        }
        let store = SqliteStore::new(path)?;
        let mut trainer = Trainer::open_with_seed(store_words(), Box::new(store), 1)?;
        // Progression continues from the persisted level.
        assert_eq!(trainer.scheduler().state(WordId::new(1)).unwrap().level, 2);
        assert_eq!(trainer.stats().total_points, 20);
        let unlocked: Vec<&str> = trainer
            .achievements()
            .iter()
            .filter(|a| a.unlocked)
            .map(|a| a.id.as_str())
            .collect();
        assert!(unlocked.contains(&"first-word"));
        let outcome = trainer.mark_word_at(WordId::new(1), Difficulty::Normal, 1_000, now())?;
        assert_eq!(outcome.review.level, 3);
        Ok(())
    }

    fn store_words() -> WordStore {
        store(5)
    }

    #[test]
    fn test_recommendations_and_due_words() -> Fallible<()> {
        let mut trainer = trainer(8);
        assert_eq!(trainer.due_words_at(now()).len(), 8);
        trainer.mark_word_at(WordId::new(1), Difficulty::Hard, 1_000, now())?;
        assert_eq!(trainer.due_words_at(now()).len(), 7);
        let recs = trainer.recommendations_at(now());
        // One day of study is not yet a streak.
        assert_eq!(recs.len(), 1);
        Ok(())
    }
}
