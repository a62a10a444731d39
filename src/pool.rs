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

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Fallible;
use crate::types::difficulty::Difficulty;
use crate::types::item::Article;
use crate::types::item::DrillItem;
use crate::types::item::ItemContent;
use crate::types::item::ItemId;
use crate::types::kind::DrillKind;

const VOCABULARY_JSON: &str = include_str!("../data/vocabulary.json");
const PREPOSITIONS_JSON: &str = include_str!("../data/prepositions.json");
const PRONOUNS_JSON: &str = include_str!("../data/pronouns.json");
const VERBS_JSON: &str = include_str!("../data/verbs.json");

#[derive(Deserialize)]
struct VocabularyRow {
    tier: Difficulty,
    front: String,
    back: String,
    #[serde(default)]
    article: Option<Article>,
    #[serde(default)]
    example: Option<String>,
}

#[derive(Deserialize)]
struct SentenceRow {
    tier: Difficulty,
    prompt: String,
    gap_answer: String,
    translation: String,
}

#[derive(Deserialize)]
struct VerbRow {
    tier: Difficulty,
    infinitive: String,
    pronoun: String,
    conjugated: String,
    form: String,
}

/// The static item pools, keyed by drill kind and difficulty tier. Loaded
/// once at startup from the embedded fixtures.
pub struct Pools {
    pools: HashMap<(DrillKind, Difficulty), Vec<DrillItem>>,
}

impl Pools {
    pub fn load() -> Fallible<Pools> {
        let mut pools: HashMap<(DrillKind, Difficulty), Vec<DrillItem>> = HashMap::new();
        let mut next_id: u32 = 0;
        let mut push = |pools: &mut HashMap<(DrillKind, Difficulty), Vec<DrillItem>>,
                        kind: DrillKind,
                        tier: Difficulty,
                        content: ItemContent| {
            let item = DrillItem::new(ItemId(next_id), content);
            next_id += 1;
            pools.entry((kind, tier)).or_default().push(item);
        };

        let rows: Vec<VocabularyRow> = serde_json::from_str(VOCABULARY_JSON)?;
        for row in rows {
            push(
                &mut pools,
                DrillKind::Vocabulary,
                row.tier,
                ItemContent::Vocabulary {
                    front: row.front,
                    back: row.back,
                    article: row.article,
                    example: row.example,
                },
            );
        }

        for (kind, json) in [
            (DrillKind::Prepositions, PREPOSITIONS_JSON),
            (DrillKind::Pronouns, PRONOUNS_JSON),
        ] {
            let rows: Vec<SentenceRow> = serde_json::from_str(json)?;
            for row in rows {
                push(
                    &mut pools,
                    kind,
                    row.tier,
                    ItemContent::GapSentence {
                        prompt: row.prompt,
                        gap_answer: row.gap_answer,
                        translation: row.translation,
                    },
                );
            }
        }

        let rows: Vec<VerbRow> = serde_json::from_str(VERBS_JSON)?;
        for row in rows {
            push(
                &mut pools,
                DrillKind::Verbs,
                row.tier,
                ItemContent::VerbForm {
                    pronoun: row.pronoun,
                    infinitive: row.infinitive,
                    conjugated: row.conjugated,
                    form: row.form,
                },
            );
        }

        log::debug!(
            "Loaded {} items into {} pools.",
            next_id,
            pools.len()
        );
        Ok(Pools { pools })
    }

    /// The items for a drill kind and tier. Empty if the fixtures declare
    /// none for this combination.
    pub fn items(&self, kind: DrillKind, difficulty: Difficulty) -> &[DrillItem] {
        self.pools
            .get(&(kind, difficulty))
            .map(|items| items.as_slice())
            .unwrap_or(&[])
    }
}
