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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

/// Stable identity of a word within a word store.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct WordId(u32);

impl WordId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn into_inner(self) -> u32 {
        self.0
    }
}

impl Display for WordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vocabulary entry. Immutable once constructed; the core only reads it.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Word {
    id: WordId,
    /// The word itself.
    english: String,
    /// The translation.
    chinese: String,
    /// An example sentence using the word.
    example_en: String,
    /// The translation of the example sentence.
    example_zh: String,
}

impl Word {
    pub fn new(
        id: WordId,
        english: impl Into<String>,
        chinese: impl Into<String>,
        example_en: impl Into<String>,
        example_zh: impl Into<String>,
    ) -> Self {
        Self {
            id,
            english: english.into(),
            chinese: chinese.into(),
            example_en: example_en.into(),
            example_zh: example_zh.into(),
        }
    }

    pub fn id(&self) -> WordId {
        self.id
    }

    pub fn english(&self) -> &str {
        &self.english
    }

    pub fn chinese(&self) -> &str {
        &self.chinese
    }

    pub fn example_en(&self) -> &str {
        &self.example_en
    }

    pub fn example_zh(&self) -> &str {
        &self.example_zh
    }
}
