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

/// A difficulty tier. Selects the item pool and how strictly the judge
/// grades non-exact answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Beginner.
    A,
    /// Intermediate.
    B,
    /// Advanced.
    C,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::A, Difficulty::B, Difficulty::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::A => "A",
            Difficulty::B => "B",
            Difficulty::C => "C",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::A => "A (beginner)",
            Difficulty::B => "B (intermediate)",
            Difficulty::C => "C (advanced)",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
