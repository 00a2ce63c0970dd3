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

use crate::types::timestamp::Timestamp;
use crate::types::word::Word;

/// The number of options in a multiple-choice question.
pub const OPTION_COUNT: usize = 4;

/// What kind of prompt a question presents. Rendering the prompt and the
/// options is the caller's concern; the core only tags the quiz.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum QuizType {
    ChineseToEnglish,
    EnglishToChinese,
    FillBlank,
    Listening,
}

impl QuizType {
    pub const ALL: [QuizType; 4] = [
        QuizType::ChineseToEnglish,
        QuizType::EnglishToChinese,
        QuizType::FillBlank,
        QuizType::Listening,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            QuizType::ChineseToEnglish => "chinese-to-english",
            QuizType::EnglishToChinese => "english-to-chinese",
            QuizType::FillBlank => "fill-blank",
            QuizType::Listening => "listening",
        }
    }
}

/// Question-type selection strategy for the generator.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QuizMode {
    /// Pick uniformly among all question types.
    Mixed,
    /// Always generate the given question type.
    Only(QuizType),
}

/// One generated multiple-choice question. Created by the generator,
/// consumed exactly once by the scorer, then discarded.
#[derive(Clone, Debug)]
pub struct Quiz {
    pub id: u64,
    pub quiz_type: QuizType,
    pub correct_word: Word,
    /// Exactly four words with pairwise distinct ids, one of which is the
    /// correct word.
    pub options: Vec<Word>,
    /// Position of the correct word within `options`.
    pub correct_index: usize,
    pub started_at: Timestamp,
}

/// The outcome of answering a single quiz.
#[derive(Clone, Debug)]
pub struct QuizResult {
    pub correct: bool,
    pub response_time_ms: u64,
    /// The word the quiz was about.
    pub word: Word,
    /// The option the user picked. `None` if the index was out of range.
    pub selected: Option<Word>,
}
