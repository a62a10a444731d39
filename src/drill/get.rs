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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::drill::state::ServerState;
use crate::drill::template::page_template;
use crate::session::Mode;
use crate::types::difficulty::Difficulty;
use crate::types::feedback::Feedback;
use crate::types::item::DrillItem;
use crate::types::kind::DrillKind;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut mutable = state.mutable.lock().unwrap();
    let session = &mutable.session;
    let mode = session.mode();
    let streak = format!("{} / {}", session.streak(), session.threshold());
    let selector = selector_form(session.kind(), session.difficulty());
    let notice = mutable.notice.take();
    let content: Markup = if mutable.busy {
        html! {
            div.pending {
                p { "Checking your answer..." }
            }
        }
    } else {
        match mutable.session.current() {
            None => html! {
                div.unavailable {
                    p { "No items available for this selection." }
                }
            },
            Some(item) => match mutable.session.feedback() {
                Some(feedback) => feedback_panel(item, mode, feedback),
                None => prompt_panel(item, mode),
            },
        }
    };
    let utterance = mutable.speaker.take_queued();
    let started = state.session_started_at.format("%Y-%m-%d %H:%M");
    let body = html! {
        div.root
            data-speak-text=[utterance.as_ref().map(|u| u.text.clone())]
            data-speak-lang=[utterance.as_ref().map(|u| u.lang.clone())]
        {
            div.card {
                div.header {
                    h1 { "sprachdrill" }
                    div.status {
                        @if mode == Mode::Reverse {
                            span.mode.reverse { "Reverse" }
                        } @else {
                            span.mode { "Forward" }
                        }
                        span.streak { "Streak: " (streak) }
                    }
                }
                (selector)
                @if let Some(notice) = notice {
                    div.notice { (notice) }
                }
                (content)
                div.footer {
                    span { "Session started at " (started) }
                    details {
                        summary { "Send feedback" }
                        form action="/feedback" method="post" {
                            input type="email" name="email" placeholder="Your email" required;
                            input type="text" name="message" placeholder="Your message" required;
                            input type="submit" value="Send";
                        }
                    }
                }
            }
        }
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

fn selector_form(kind: DrillKind, difficulty: Difficulty) -> Markup {
    html! {
        form.selector action="/" method="post" {
            select name="kind" {
                @for option in DrillKind::ALL {
                    option value=(option.as_str()) selected[option == kind] {
                        (option.as_str())
                    }
                }
            }
            select name="difficulty" {
                @for option in Difficulty::ALL {
                    option value=(option.as_str()) selected[option == difficulty] {
                        (option.label())
                    }
                }
            }
            input id="change" type="submit" name="action" value="Change";
        }
    }
}

fn prompt_panel(item: &DrillItem, mode: Mode) -> Markup {
    html! {
        div.content {
            p.instruction { (item.instruction(mode)) }
            p.prompt { (item.prompt(mode)) }
            form.answer action="/" method="post" {
                input
                    id="answer"
                    type="text"
                    name="answer"
                    autofocus
                    autocomplete="off"
                    placeholder="Your answer";
                input id="submit" type="submit" name="action" value="Submit";
            }
            form.speak action="/" method="post" {
                input id="speak" type="submit" name="action" value="Speak";
            }
        }
    }
}

fn feedback_panel(item: &DrillItem, mode: Mode, feedback: &Feedback) -> Markup {
    html! {
        div.content {
            p.instruction { (item.instruction(mode)) }
            p.prompt { (item.prompt(mode)) }
            @if feedback.correct {
                div.feedback.correct {
                    p.verdict { "Correct!" }
                    p { "Your answer: " b { (feedback.submitted_answer) } }
                    p.explanation { (feedback.explanation) }
                    @if let Some(example) = &feedback.example {
                        p.example { (example) }
                    }
                }
            } @else {
                div.feedback.incorrect {
                    p.verdict { "Not quite." }
                    p { "Your answer: " b { (feedback.submitted_answer) } }
                    p { "Correct answer: " b { (feedback.correct_answer) } }
                    p.explanation { (feedback.explanation) }
                    @if let Some(example) = &feedback.example {
                        p.example { (example) }
                    }
                }
            }
            form.next action="/" method="post" {
                input id="next" type="submit" name="action" value="Next";
            }
            form.speak action="/" method="post" {
                input id="speak" type="submit" name="action" value="Speak";
            }
        }
    }
}
