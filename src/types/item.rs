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

use crate::session::Mode;

/// Opaque identifier of a drill item within its pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A German noun article.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Article {
    Der,
    Die,
    Das,
}

impl Article {
    pub fn as_str(&self) -> &'static str {
        match self {
            Article::Der => "der",
            Article::Die => "die",
            Article::Das => "das",
        }
    }
}

/// A single prompt unit. Immutable once loaded from the pool.
#[derive(Clone, Debug, PartialEq)]
pub struct DrillItem {
    id: ItemId,
    content: ItemContent,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ItemContent {
    /// A vocabulary word: German front, Spanish back.
    Vocabulary {
        front: String,
        back: String,
        article: Option<Article>,
        example: Option<String>,
    },
    /// A sentence with a gap to fill, e.g. a missing preposition.
    GapSentence {
        /// The German sentence with the gap rendered as `___`.
        prompt: String,
        gap_answer: String,
        translation: String,
    },
    /// A verb to conjugate for a given pronoun and form.
    VerbForm {
        pronoun: String,
        infinitive: String,
        conjugated: String,
        form: String,
    },
}

impl DrillItem {
    pub fn new(id: ItemId, content: ItemContent) -> Self {
        Self { id, content }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The text shown to the learner.
    pub fn prompt(&self, mode: Mode) -> String {
        match (&self.content, mode) {
            (
                ItemContent::Vocabulary { front, article, .. },
                Mode::Forward,
            ) => match article {
                Some(article) => format!("{} {}", article.as_str(), front),
                None => front.clone(),
            },
            (ItemContent::Vocabulary { back, .. }, Mode::Reverse) => back.clone(),
            (ItemContent::GapSentence { prompt, .. }, _) => prompt.clone(),
            (
                ItemContent::VerbForm {
                    pronoun,
                    infinitive,
                    form,
                    ..
                },
                Mode::Forward,
            ) => format!("{infinitive} \u{2014} {pronoun} ({form})"),
            (
                ItemContent::VerbForm {
                    pronoun, conjugated, ..
                },
                Mode::Reverse,
            ) => format!("{pronoun} {conjugated}"),
        }
    }

    /// A short instruction matching the prompt.
    pub fn instruction(&self, mode: Mode) -> &'static str {
        match (&self.content, mode) {
            (ItemContent::Vocabulary { .. }, Mode::Forward) => "Translate into Spanish",
            (ItemContent::Vocabulary { .. }, Mode::Reverse) => "Translate into German",
            (ItemContent::GapSentence { .. }, _) => "Fill the gap",
            (ItemContent::VerbForm { .. }, Mode::Forward) => "Conjugate",
            (ItemContent::VerbForm { .. }, Mode::Reverse) => "Name the infinitive",
        }
    }

    /// The canonical correct answer for display in feedback.
    pub fn expected_answer(&self, mode: Mode) -> &str {
        match (&self.content, mode) {
            (ItemContent::Vocabulary { back, .. }, Mode::Forward) => back,
            (ItemContent::Vocabulary { front, .. }, Mode::Reverse) => front,
            (ItemContent::GapSentence { gap_answer, .. }, _) => gap_answer,
            (ItemContent::VerbForm { conjugated, .. }, Mode::Forward) => conjugated,
            (ItemContent::VerbForm { infinitive, .. }, Mode::Reverse) => infinitive,
        }
    }

    /// All answers accepted by the exact-match fast path. Vocabulary backs
    /// may list alternatives separated by slashes.
    pub fn accepted_answers(&self, mode: Mode) -> Vec<&str> {
        let expected = self.expected_answer(mode);
        match &self.content {
            ItemContent::Vocabulary { .. } => expected
                .split(['/', ','])
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect(),
            _ => vec![expected],
        }
    }

    /// The German text for speech playback.
    pub fn spoken_text(&self) -> String {
        match &self.content {
            ItemContent::Vocabulary { front, article, .. } => match article {
                Some(article) => format!("{} {}", article.as_str(), front),
                None => front.clone(),
            },
            ItemContent::GapSentence {
                prompt, gap_answer, ..
            } => prompt.replace("___", gap_answer),
            ItemContent::VerbForm {
                pronoun, conjugated, ..
            } => format!("{pronoun} {conjugated}"),
        }
    }

    /// An example sentence, if the item carries one.
    pub fn example(&self) -> Option<&str> {
        match &self.content {
            ItemContent::Vocabulary { example, .. } => example.as_deref(),
            ItemContent::GapSentence { translation, .. } => Some(translation),
            ItemContent::VerbForm { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> DrillItem {
        DrillItem::new(
            ItemId(0),
            ItemContent::Vocabulary {
                front: "Haus".to_string(),
                back: "casa".to_string(),
                article: Some(Article::Das),
                example: Some("Das Haus ist alt.".to_string()),
            },
        )
    }

    #[test]
    fn test_vocabulary_prompts() {
        let item = vocab();
        assert_eq!(item.prompt(Mode::Forward), "das Haus");
        assert_eq!(item.prompt(Mode::Reverse), "casa");
        assert_eq!(item.expected_answer(Mode::Forward), "casa");
        assert_eq!(item.expected_answer(Mode::Reverse), "Haus");
        assert_eq!(item.spoken_text(), "das Haus");
    }

    #[test]
    fn test_accepted_answer_alternatives() {
        let item = DrillItem::new(
            ItemId(1),
            ItemContent::Vocabulary {
                front: "laufen".to_string(),
                back: "correr / caminar".to_string(),
                article: None,
                example: None,
            },
        );
        assert_eq!(
            item.accepted_answers(Mode::Forward),
            vec!["correr", "caminar"]
        );
    }

    #[test]
    fn test_gap_sentence_spoken_text() {
        let item = DrillItem::new(
            ItemId(2),
            ItemContent::GapSentence {
                prompt: "Er hat ___ seiner Krankheit gearbeitet.".to_string(),
                gap_answer: "trotz".to_string(),
                translation: "Trabajó a pesar de su enfermedad.".to_string(),
            },
        );
        assert_eq!(
            item.spoken_text(),
            "Er hat trotz seiner Krankheit gearbeitet."
        );
        assert_eq!(item.prompt(Mode::Forward), item.prompt(Mode::Reverse));
    }

    #[test]
    fn test_verb_form_prompts() {
        let item = DrillItem::new(
            ItemId(3),
            ItemContent::VerbForm {
                pronoun: "ich".to_string(),
                infinitive: "sein".to_string(),
                conjugated: "bin".to_string(),
                form: "Präsens".to_string(),
            },
        );
        assert_eq!(item.prompt(Mode::Forward), "sein \u{2014} ich (Präsens)");
        assert_eq!(item.expected_answer(Mode::Forward), "bin");
        assert_eq!(item.prompt(Mode::Reverse), "ich bin");
        assert_eq!(item.expected_answer(Mode::Reverse), "sein");
    }
}
