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

/// The default language tag for drill prompts.
pub const GERMAN: &str = "de-DE";

/// A queued pronunciation request.
#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
}

/// Audio playback port. Fire-and-forget: implementations must never fail.
/// The state machine only ever talks to this trait, never to a global
/// speech facility.
pub trait Speaker: Send {
    fn speak(&mut self, text: &str, lang: &str);

    /// Hand over the queued utterance, if the implementation queues them
    /// for delivery elsewhere.
    fn take_queued(&mut self) -> Option<Utterance> {
        None
    }
}

/// Queues the utterance for the rendered page, where the browser's speech
/// synthesis picks it up. If the browser has no speech support the page
/// shows a notice instead of failing.
pub struct PageSpeaker {
    queued: Option<Utterance>,
}

impl PageSpeaker {
    pub fn new() -> Self {
        Self { queued: None }
    }
}

impl Speaker for PageSpeaker {
    fn speak(&mut self, text: &str, lang: &str) {
        self.queued = Some(Utterance {
            text: text.to_string(),
            lang: lang.to_string(),
        });
    }

    fn take_queued(&mut self) -> Option<Utterance> {
        self.queued.take()
    }
}

/// Discards all playback requests.
#[cfg(test)]
pub struct NullSpeaker;

#[cfg(test)]
impl Speaker for NullSpeaker {
    fn speak(&mut self, _text: &str, _lang: &str) {}
}
