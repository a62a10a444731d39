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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::drill::state::MutableState;
use crate::drill::state::ServerState;
use crate::error::Fallible;
use crate::session::Mode;
use crate::speech::GERMAN;
use crate::types::difficulty::Difficulty;
use crate::types::kind::DrillKind;

#[derive(Debug, Deserialize)]
enum Action {
    Submit,
    Next,
    Speak,
    Change,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    kind: Option<DrillKind>,
    #[serde(default)]
    difficulty: Option<Difficulty>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(state, form).await {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

async fn action_handler(state: ServerState, form: FormData) -> Fallible<()> {
    match form.action {
        Action::Change => {
            let mut mutable = state.mutable.lock().unwrap();
            let kind = form.kind.unwrap_or(mutable.session.kind());
            let difficulty = form.difficulty.unwrap_or(mutable.session.difficulty());
            log::debug!("Switching to {kind} {difficulty}.");
            mutable.session.reset(kind, difficulty);
            mutable.notice = None;
            fetch_next(&mut mutable, &state, Mode::Forward);
        }
        Action::Next => {
            let mut mutable = state.mutable.lock().unwrap();
            if mutable.busy {
                return Ok(());
            }
            let mode = mutable.session.advance();
            mutable.notice = None;
            fetch_next(&mut mutable, &state, mode);
        }
        Action::Speak => {
            let mut mutable = state.mutable.lock().unwrap();
            let text = mutable.session.current().map(|item| item.spoken_text());
            if let Some(text) = text {
                log::debug!("Speaking {text:?}.");
                mutable.speaker.speak(&text, GERMAN);
            }
        }
        Action::Submit => {
            let answer = form.answer.unwrap_or_default();
            if answer.trim().is_empty() {
                let mut mutable = state.mutable.lock().unwrap();
                mutable.notice = Some("Enter an answer first.".to_string());
                return Ok(());
            }
            // Snapshot the session under the lock; verification must not
            // hold it across the await.
            let (item, mode, difficulty, generation) = {
                let mut mutable = state.mutable.lock().unwrap();
                if mutable.busy {
                    log::debug!("Ignoring submission while verification is in flight.");
                    return Ok(());
                }
                if mutable.session.feedback().is_some() {
                    log::debug!(
                        "Ignoring resubmission: already answered {:?}.",
                        mutable.session.last_answer()
                    );
                    return Ok(());
                }
                let item = match mutable.session.current() {
                    Some(item) => item.clone(),
                    None => {
                        mutable.notice =
                            Some("No items available for this selection.".to_string());
                        return Ok(());
                    }
                };
                mutable.busy = true;
                mutable.notice = None;
                (
                    item,
                    mutable.session.mode(),
                    mutable.session.difficulty(),
                    mutable.session.generation(),
                )
            };
            let feedback = state
                .verifier
                .verify(&item, mode, &answer, difficulty)
                .await;
            let mut mutable = state.mutable.lock().unwrap();
            mutable.busy = false;
            if !mutable.session.apply_feedback(generation, answer, feedback) {
                log::debug!("Verification result arrived after a session reset.");
            }
        }
    }
    Ok(())
}

/// Select the next item in the given mode and store it on the session.
fn fetch_next(mutable: &mut MutableState, state: &ServerState, mode: Mode) {
    let pool = state
        .pools
        .items(mutable.session.kind(), mutable.session.difficulty());
    match mutable
        .provider
        .next_item(pool, mode, mutable.session.recent_correct())
    {
        Ok((item, actual_mode)) => {
            if actual_mode != mode {
                mutable.session.force_forward();
            }
            mutable.session.set_current(item);
        }
        Err(e) => {
            log::error!("{e}");
            mutable.notice = Some("No items available for this selection.".to_string());
        }
    }
}

#[derive(Deserialize)]
pub struct UserFeedbackForm {
    email: String,
    message: String,
}

/// User feedback about the tool itself. Unrelated to answer feedback: the
/// message is logged for the operator and acknowledged, nothing else.
pub async fn feedback_handler(
    State(state): State<ServerState>,
    Form(form): Form<UserFeedbackForm>,
) -> Redirect {
    log::info!("User feedback from {}: {}", form.email, form.message);
    let mut mutable = state.mutable.lock().unwrap();
    mutable.notice = Some("Thanks for your feedback!".to_string());
    Redirect::to("/")
}
