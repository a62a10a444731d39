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

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::types::difficulty::Difficulty;

/// The four drill types. Each one instantiates the same session state
/// machine over a different item pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrillKind {
    Vocabulary,
    Prepositions,
    Pronouns,
    Verbs,
}

impl DrillKind {
    pub const ALL: [DrillKind; 4] = [
        DrillKind::Vocabulary,
        DrillKind::Prepositions,
        DrillKind::Pronouns,
        DrillKind::Verbs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DrillKind::Vocabulary => "Vocabulary",
            DrillKind::Prepositions => "Prepositions",
            DrillKind::Pronouns => "Pronouns",
            DrillKind::Verbs => "Verbs",
        }
    }

    /// Whether a success streak in this drill may flip the session into
    /// reverse mode. Vocabulary reverse quizzing only makes sense on the
    /// beginner tier (single-word answers); gap-sentence drills have no
    /// usable reverse prompt.
    pub fn reverse_eligible(&self, difficulty: Difficulty) -> bool {
        match self {
            DrillKind::Vocabulary => difficulty == Difficulty::A,
            DrillKind::Prepositions => false,
            DrillKind::Pronouns => false,
            DrillKind::Verbs => true,
        }
    }
}

impl fmt::Display for DrillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
