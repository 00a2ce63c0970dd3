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

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::word::Word;
use crate::types::word::WordId;

/// An ordered collection of words with stable, distinct ids.
pub struct WordStore {
    words: Vec<Word>,
    by_id: HashMap<WordId, usize>,
}

impl WordStore {
    /// Construct from an ordered list of words. Ids must be distinct.
    pub fn new(words: Vec<Word>) -> Fallible<Self> {
        let mut by_id = HashMap::new();
        for (index, word) in words.iter().enumerate() {
            if by_id.insert(word.id(), index).is_some() {
                return fail(format!("duplicate word id: {}", word.id()));
            }
        }
        Ok(Self { words, by_id })
    }

    /// Parse a JSON array of word entries, assigning sequential ids starting
    /// from 1 in array order.
    pub fn from_json(json: &str) -> Fallible<Self> {
        let entries: Vec<WordEntry> = match serde_json::from_str(json) {
            Ok(entries) => entries,
            Err(_) => return fail("word data must be a JSON array of word entries."),
        };
        if entries.is_empty() {
            return fail("word data contains no entries.");
        }
        log::debug!("Imported {} words.", entries.len());
        let words = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                Word::new(
                    WordId::new(index as u32 + 1),
                    entry.english,
                    entry.chinese,
                    entry.example.en,
                    entry.example.zh,
                )
            })
            .collect();
        Self::new(words)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, id: WordId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn get(&self, id: WordId) -> Option<&Word> {
        self.by_id.get(&id).map(|index| &self.words[*index])
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }
}

/// A word as it appears in imported JSON, before an id is assigned.
#[derive(Deserialize)]
struct WordEntry {
    english: String,
    chinese: String,
    #[serde(default)]
    example: ExampleEntry,
}

#[derive(Deserialize, Default)]
struct ExampleEntry {
    #[serde(default)]
    en: String,
    #[serde(default)]
    zh: String,
}
