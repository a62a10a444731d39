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

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use chrono::Local;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::time::sleep;

use crate::drill::post::feedback_handler;
use crate::drill::post::post_handler;
use crate::drill::state::MutableState;
use crate::drill::state::ServerState;
use crate::drill::get::get_handler;
use crate::error::Fallible;
use crate::judge::Judge;
use crate::pool::Pools;
use crate::provider::ItemProvider;
use crate::session::Mode;
use crate::session::SessionConfig;
use crate::session::SessionState;
use crate::speech::PageSpeaker;
use crate::types::difficulty::Difficulty;
use crate::types::kind::DrillKind;
use crate::verify::Verifier;

pub struct ServeOptions {
    pub port: u16,
    /// Seed for the item provider's RNG. `None` seeds from the OS.
    pub seed: Option<u64>,
    pub open_browser: bool,
    pub judge: Judge,
}

impl ServeOptions {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            seed: None,
            open_browser: true,
            judge: Judge::from_env(),
        }
    }
}

pub async fn start_server(options: ServeOptions) -> Fallible<()> {
    let pools = Arc::new(Pools::load()?);
    let mut provider = match options.seed {
        Some(seed) => ItemProvider::seeded(seed),
        None => ItemProvider::new(),
    };
    let mut session = SessionState::new(
        DrillKind::Vocabulary,
        Difficulty::A,
        SessionConfig::default(),
    );
    let mut notice = None;
    let pool = pools.items(session.kind(), session.difficulty());
    match provider.next_item(pool, Mode::Forward, &[]) {
        Ok((item, _)) => session.set_current(item),
        Err(e) => {
            log::error!("{e}");
            notice = Some("No items available for this selection.".to_string());
        }
    }

    let state = ServerState {
        session_started_at: Local::now(),
        pools,
        verifier: Arc::new(Verifier::new(options.judge)),
        mutable: Arc::new(Mutex::new(MutableState {
            session,
            provider,
            speaker: Box::new(PageSpeaker::new()),
            busy: false,
            notice,
        })),
    };
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/feedback", post(feedback_handler));
    let app = app.route("/script.js", get(script));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("0.0.0.0:{}", options.port);

    if options.open_browser {
        // Start a separate task to open the browser.
        let url = format!("http://{bind}/");
        let addr = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&addr).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            let _ = open::that(url);
        });
    }

    // Start the server.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn script() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript")],
        include_str!("script.js"),
    )
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
