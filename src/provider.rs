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

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::error::Fallible;
use crate::error::fail;
use crate::session::Mode;
use crate::types::item::DrillItem;

/// Supplies the next drill item. Selection is uniform random with
/// replacement; consecutive repeats are possible. The RNG is seedable so
/// tests are deterministic.
pub struct ItemProvider {
    rng: StdRng,
}

impl ItemProvider {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick the next item from the pool (forward mode) or from the
    /// recent-correct history (reverse mode). Returns the item together
    /// with the mode actually used: a reverse request with an empty history
    /// falls back to forward selection.
    pub fn next_item(
        &mut self,
        pool: &[DrillItem],
        mode: Mode,
        recent: &[DrillItem],
    ) -> Fallible<(DrillItem, Mode)> {
        match mode {
            Mode::Reverse => {
                if let Some(item) = recent.choose(&mut self.rng) {
                    return Ok((item.clone(), Mode::Reverse));
                }
                log::warn!("Reverse selection with empty history; falling back to forward.");
                self.next_item(pool, Mode::Forward, recent)
            }
            Mode::Forward => match pool.choose(&mut self.rng) {
                Some(item) => Ok((item.clone(), Mode::Forward)),
                None => fail("no items available for this selection."),
            },
        }
    }
}

impl Default for ItemProvider {
    fn default() -> Self {
        Self::new()
    }
}
