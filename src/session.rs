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
use crate::types::feedback::Feedback;
use crate::types::item::DrillItem;
use crate::types::kind::DrillKind;

/// The direction of translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// German to Spanish.
    Forward,
    /// Spanish back to German. A one-shot recall check after a success
    /// streak.
    Reverse,
}

/// Parameters of the session state machine.
#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    /// Consecutive correct forward answers needed to enter reverse mode.
    pub threshold: u32,
    /// Capacity of the recent-correct history.
    pub history_cap: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            threshold: 5,
            history_cap: 5,
        }
    }
}

/// The state of one drill session. Owned by a single drill component; reset
/// whenever the drill kind or difficulty tier changes.
pub struct SessionState {
    config: SessionConfig,
    kind: DrillKind,
    difficulty: Difficulty,
    mode: Mode,
    streak: u32,
    recent_correct: Vec<DrillItem>,
    current: Option<DrillItem>,
    last_answer: Option<String>,
    feedback: Option<Feedback>,
    generation: u64,
}

impl SessionState {
    pub fn new(kind: DrillKind, difficulty: Difficulty, config: SessionConfig) -> Self {
        Self {
            config,
            kind,
            difficulty,
            mode: Mode::Forward,
            streak: 0,
            recent_correct: Vec::new(),
            current: None,
            last_answer: None,
            feedback: None,
            generation: 0,
        }
    }

    pub fn kind(&self) -> DrillKind {
        self.kind
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn threshold(&self) -> u32 {
        self.config.threshold
    }

    pub fn recent_correct(&self) -> &[DrillItem] {
        &self.recent_correct
    }

    pub fn current(&self) -> Option<&DrillItem> {
        self.current.as_ref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn last_answer(&self) -> Option<&str> {
        self.last_answer.as_deref()
    }

    /// The session generation. Feedback computed against an older
    /// generation is stale and must be discarded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_current(&mut self, item: DrillItem) {
        self.current = Some(item);
    }

    /// Start over with a new drill kind and difficulty tier. Bumps the
    /// generation so that in-flight verification results are discarded.
    pub fn reset(&mut self, kind: DrillKind, difficulty: Difficulty) {
        self.kind = kind;
        self.difficulty = difficulty;
        self.mode = Mode::Forward;
        self.streak = 0;
        self.recent_correct.clear();
        self.current = None;
        self.last_answer = None;
        self.feedback = None;
        self.generation += 1;
    }

    /// Apply a verified answer to the session. Returns `false` if the
    /// feedback belongs to an older generation and was discarded.
    ///
    /// A correct forward-mode answer appends the current item to the
    /// recent-correct history (evicting the oldest entry when full) and
    /// increments the streak. An incorrect forward-mode answer resets the
    /// streak. Reverse-mode answers touch neither.
    pub fn apply_feedback(
        &mut self,
        generation: u64,
        answer: String,
        feedback: Feedback,
    ) -> bool {
        if generation != self.generation {
            log::debug!("Discarding stale feedback (generation {generation}).");
            return false;
        }
        if self.mode == Mode::Forward {
            if feedback.correct {
                if let Some(item) = &self.current {
                    self.recent_correct.push(item.clone());
                    if self.recent_correct.len() > self.config.history_cap {
                        self.recent_correct.remove(0);
                    }
                }
                self.streak += 1;
            } else {
                self.streak = 0;
            }
        }
        self.last_answer = Some(answer);
        self.feedback = Some(feedback);
        true
    }

    /// Force the session back to forward mode. Used when reverse-mode item
    /// selection had to fall back to the forward pool.
    pub fn force_forward(&mut self) {
        self.mode = Mode::Forward;
    }

    /// Decide the mode for the next item. Called when the user requests a
    /// new item, never on answer submission.
    ///
    /// A reverse excursion is a single question: leaving reverse mode always
    /// returns to forward. Forward mode flips to reverse once the streak
    /// reaches the threshold, provided the drill is reverse-eligible and the
    /// recent-correct history is non-empty.
    pub fn advance(&mut self) -> Mode {
        self.feedback = None;
        self.last_answer = None;
        self.current = None;
        match self.mode {
            Mode::Reverse => {
                self.mode = Mode::Forward;
            }
            Mode::Forward => {
                if self.streak >= self.config.threshold
                    && self.kind.reverse_eligible(self.difficulty)
                    && !self.recent_correct.is_empty()
                {
                    self.mode = Mode::Reverse;
                    self.streak = 0;
                }
            }
        }
        self.mode
    }
}
