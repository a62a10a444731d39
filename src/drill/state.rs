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

use chrono::DateTime;
use chrono::Local;

use crate::pool::Pools;
use crate::provider::ItemProvider;
use crate::session::SessionState;
use crate::speech::Speaker;
use crate::verify::Verifier;

#[derive(Clone)]
pub struct ServerState {
    pub session_started_at: DateTime<Local>,
    pub pools: Arc<Pools>,
    pub verifier: Arc<Verifier>,
    pub mutable: Arc<Mutex<MutableState>>,
}

pub struct MutableState {
    pub session: SessionState,
    pub provider: ItemProvider,
    pub speaker: Box<dyn Speaker>,
    /// A verification request is in flight; input stays disabled until it
    /// completes or fails.
    pub busy: bool,
    /// A one-shot banner message, cleared on the next render.
    pub notice: Option<String>,
}
