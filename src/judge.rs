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

use serde_json::Value;
use serde_json::json;

use crate::error::Fallible;
use crate::error::fail;
use crate::session::Mode;
use crate::types::difficulty::Difficulty;
use crate::types::item::DrillItem;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// The external judge's verdict on a non-exact answer.
#[derive(Clone, Debug, PartialEq)]
pub struct JudgeVerdict {
    pub correct: bool,
    pub explanation: String,
}

/// The external answer judge. The verifier only consults it when the
/// exact-match fast path fails, and treats any error as "unavailable".
pub enum Judge {
    /// An OpenAI-compatible chat-completions endpoint.
    Llm(LlmJudge),
    /// No endpoint configured. Grading is exact-match only.
    Disabled,
    #[cfg(test)]
    Scripted(ScriptedJudge),
}

impl Judge {
    pub fn from_env() -> Judge {
        match LlmJudge::from_env() {
            Some(judge) => Judge::Llm(judge),
            None => {
                log::warn!(
                    "SPRACHDRILL_API_KEY is not set; answers are graded by exact match only."
                );
                Judge::Disabled
            }
        }
    }

    pub async fn judge(
        &self,
        item: &DrillItem,
        mode: Mode,
        user_answer: &str,
        difficulty: Difficulty,
    ) -> Fallible<JudgeVerdict> {
        match self {
            Judge::Llm(llm) => llm.judge(item, mode, user_answer, difficulty).await,
            Judge::Disabled => fail("judge is not configured."),
            #[cfg(test)]
            Judge::Scripted(scripted) => scripted.next(),
        }
    }
}

pub struct LlmJudge {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl LlmJudge {
    /// Build a judge from `SPRACHDRILL_API_KEY`, `SPRACHDRILL_API_BASE` and
    /// `SPRACHDRILL_MODEL`. Returns `None` when no key is set.
    pub fn from_env() -> Option<LlmJudge> {
        let api_key = std::env::var("SPRACHDRILL_API_KEY").ok()?;
        let api_base = std::env::var("SPRACHDRILL_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let model =
            std::env::var("SPRACHDRILL_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Some(LlmJudge {
            client: reqwest::Client::new(),
            api_base,
            api_key,
            model,
        })
    }

    pub async fn judge(
        &self,
        item: &DrillItem,
        mode: Mode,
        user_answer: &str,
        difficulty: Difficulty,
    ) -> Fallible<JudgeVerdict> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_message(difficulty) },
                { "role": "user", "content": user_message(item, mode, user_answer) },
            ],
        });
        log::debug!("Asking judge about answer {user_answer:?}.");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return fail(&format!("judge returned HTTP {}.", response.status()));
        }
        let payload: Value = response.json().await?;
        let content = payload
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str());
        match content {
            Some(content) => parse_verdict(content),
            None => fail("judge response has no message content."),
        }
    }
}

fn system_message(difficulty: Difficulty) -> String {
    let strictness = match difficulty {
        Difficulty::A => {
            "The learner is a beginner. Accept close synonyms, minor spelling \
             mistakes, and missing accents or articles."
        }
        Difficulty::B => {
            "The learner is intermediate. Accept close synonyms, but not \
             spelling mistakes."
        }
        Difficulty::C => {
            "The learner is advanced. Grade strictly: only accept answers that \
             are fully correct."
        }
    };
    format!(
        "You grade answers in a German-Spanish language drill. {strictness} \
         Reply with a single JSON object of the form \
         {{\"correct\": true or false, \"explanation\": \"one or two short \
         sentences for the learner\"}} and nothing else."
    )
}

fn user_message(item: &DrillItem, mode: Mode, user_answer: &str) -> String {
    format!(
        "Task: {}.\nPrompt: {}\nExpected answer: {}\nLearner's answer: {}",
        item.instruction(mode),
        item.prompt(mode),
        item.expected_answer(mode),
        user_answer
    )
}

/// Extract the verdict object from the model's reply, tolerating prose or
/// code fences around the JSON.
fn parse_verdict(content: &str) -> Fallible<JudgeVerdict> {
    let start = content.find('{');
    let end = content.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => return fail("judge reply contains no JSON object."),
    };
    let value: Value = serde_json::from_str(json)?;
    let correct = match value.get("correct").and_then(|v| v.as_bool()) {
        Some(correct) => correct,
        None => return fail("judge reply has no boolean `correct` field."),
    };
    let explanation = value
        .get("explanation")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();
    Ok(JudgeVerdict {
        correct,
        explanation,
    })
}

/// A judge that replays a fixed list of outcomes. Test use only.
#[cfg(test)]
pub struct ScriptedJudge {
    replies: std::sync::Mutex<std::collections::VecDeque<Fallible<JudgeVerdict>>>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl ScriptedJudge {
    pub fn new(replies: Vec<Fallible<JudgeVerdict>>) -> Self {
        Self {
            replies: std::sync::Mutex::new(replies.into_iter().collect()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn next(&self) -> Fallible<JudgeVerdict> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match self.replies.lock().unwrap().pop_front() {
            Some(reply) => reply,
            None => fail("scripted judge has no more replies."),
        }
    }
}
