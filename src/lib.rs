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

//! Core engine for a vocabulary learning application: spaced repetition
//! scheduling, multiple-choice quiz generation and scoring, study analytics,
//! and achievements. All durable state is written as JSON under fixed keys
//! in a key-value store. The embedding UI owns a single [`trainer::Trainer`]
//! and drives it synchronously.

pub mod achievements;
pub mod analytics;
pub mod error;
pub mod events;
pub mod quiz;
pub mod scheduler;
pub mod stats;
pub mod store;
pub mod trainer;
pub mod types;
pub mod words;
