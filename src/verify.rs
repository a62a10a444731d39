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

use crate::judge::Judge;
use crate::session::Mode;
use crate::types::difficulty::Difficulty;
use crate::types::feedback::Feedback;
use crate::types::item::DrillItem;

/// Normalization applied to both sides of the exact-match comparison.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Checks submitted answers. An exact match (after normalization) is graded
/// locally; everything else is referred to the judge. A failing or
/// malformed judge response degrades to exact-match grading, so `verify`
/// always produces a `Feedback`.
pub struct Verifier {
    judge: Judge,
}

impl Verifier {
    pub fn new(judge: Judge) -> Self {
        Self { judge }
    }

    pub async fn verify(
        &self,
        item: &DrillItem,
        mode: Mode,
        answer: &str,
        difficulty: Difficulty,
    ) -> Feedback {
        let correct_answer = item.expected_answer(mode).to_string();
        let example = item.example().map(|s| s.to_string());
        let normalized = normalize(answer);
        let exact = item
            .accepted_answers(mode)
            .iter()
            .any(|accepted| normalize(accepted) == normalized);
        if exact {
            return Feedback {
                correct: true,
                submitted_answer: answer.to_string(),
                correct_answer,
                explanation: "Exactly right.".to_string(),
                example,
            };
        }
        match self.judge.judge(item, mode, answer, difficulty).await {
            Ok(verdict) => Feedback {
                correct: verdict.correct,
                submitted_answer: answer.to_string(),
                correct_answer,
                explanation: verdict.explanation,
                example,
            },
            Err(e) => {
                log::warn!("Judge unavailable, falling back to exact match: {e}");
                Feedback {
                    correct: false,
                    submitted_answer: answer.to_string(),
                    correct_answer: correct_answer.clone(),
                    explanation: format!("The correct answer is \"{correct_answer}\"."),
                    example,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::fail;
    use crate::judge::JudgeVerdict;
    use crate::judge::ScriptedJudge;
    use crate::types::item::Article;
    use crate::types::item::ItemContent;
    use crate::types::item::ItemId;

    fn hallo() -> DrillItem {
        DrillItem::new(
            ItemId(0),
            ItemContent::Vocabulary {
                front: "Hallo".to_string(),
                back: "hola".to_string(),
                article: None,
                example: Some("Hallo, wie geht es dir?".to_string()),
            },
        )
    }

    fn trotz() -> DrillItem {
        DrillItem::new(
            ItemId(1),
            ItemContent::GapSentence {
                prompt: "Er hat ___ seiner Krankheit gearbeitet.".to_string(),
                gap_answer: "trotz".to_string(),
                translation: "Trabajó a pesar de su enfermedad.".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_exact_match_bypasses_the_judge() {
        let judge = ScriptedJudge::new(vec![]);
        let verifier = Verifier::new(Judge::Scripted(judge));
        let feedback = verifier
            .verify(&hallo(), Mode::Forward, "hola", Difficulty::A)
            .await;
        assert!(feedback.correct);
        let Judge::Scripted(judge) = &verifier.judge else {
            unreachable!()
        };
        assert_eq!(judge.calls(), 0);
    }

    #[tokio::test]
    async fn test_match_is_case_insensitive_and_trimmed() {
        let verifier = Verifier::new(Judge::Disabled);
        let feedback = verifier
            .verify(&trotz(), Mode::Forward, "  Trotz ", Difficulty::C)
            .await;
        assert!(feedback.correct);
        assert_eq!(feedback.explanation, "Exactly right.");
    }

    #[tokio::test]
    async fn test_alternative_answers_are_accepted() {
        let item = DrillItem::new(
            ItemId(2),
            ItemContent::Vocabulary {
                front: "gehen".to_string(),
                back: "ir / caminar".to_string(),
                article: None,
                example: None,
            },
        );
        let verifier = Verifier::new(Judge::Disabled);
        let feedback = verifier
            .verify(&item, Mode::Forward, "caminar", Difficulty::A)
            .await;
        assert!(feedback.correct);
    }

    #[tokio::test]
    async fn test_reverse_mode_checks_the_german_side() {
        let item = DrillItem::new(
            ItemId(3),
            ItemContent::Vocabulary {
                front: "Haus".to_string(),
                back: "casa".to_string(),
                article: Some(Article::Das),
                example: None,
            },
        );
        let verifier = Verifier::new(Judge::Disabled);
        let feedback = verifier
            .verify(&item, Mode::Reverse, "haus", Difficulty::A)
            .await;
        assert!(feedback.correct);
    }

    #[tokio::test]
    async fn test_non_exact_answer_goes_to_the_judge() {
        let judge = ScriptedJudge::new(vec![Ok(JudgeVerdict {
            correct: true,
            explanation: "A close synonym, accepted at this level.".to_string(),
        })]);
        let verifier = Verifier::new(Judge::Scripted(judge));
        let feedback = verifier
            .verify(&hallo(), Mode::Forward, "buenas", Difficulty::A)
            .await;
        assert!(feedback.correct);
        assert_eq!(feedback.explanation, "A close synonym, accepted at this level.");
    }

    #[tokio::test]
    async fn test_judge_failure_degrades_to_exact_match() {
        let judge = ScriptedJudge::new(vec![fail("connection refused")]);
        let verifier = Verifier::new(Judge::Scripted(judge));
        let feedback = verifier
            .verify(&hallo(), Mode::Forward, "adios", Difficulty::A)
            .await;
        assert!(!feedback.correct);
        assert!(feedback.explanation.contains("hola"));
        assert_eq!(feedback.example.as_deref(), Some("Hallo, wie geht es dir?"));
    }

    #[tokio::test]
    async fn test_disabled_judge_still_yields_feedback() {
        let verifier = Verifier::new(Judge::Disabled);
        let feedback = verifier
            .verify(&hallo(), Mode::Forward, "adios", Difficulty::A)
            .await;
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_answer, "hola");
    }
}
