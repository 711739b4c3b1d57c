// This file is part of validator-uptime.
// Copyright (C) 2025 Regen Network
// SPDX-License-Identifier: Apache-2.0
// Licensed under the Apache License, Version 2.0 (the "License");
// You may not use this file except in compliance with the License.
// You may obtain a copy of the License at
// http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::{EnrichedValidator, ValidatorAggregate, ValidatorMetadata};
use std::collections::HashMap;

/// Join the given aggregates with the given metadata by validator address. If there are several
/// metadata entries for an address, the first one in the given order wins; validators without
/// metadata get an empty operator address and moniker.
pub fn enrich(
    aggregates: Vec<ValidatorAggregate>,
    metadata: impl IntoIterator<Item = ValidatorMetadata>,
) -> Vec<EnrichedValidator> {
    let mut metadata_by_address = HashMap::new();
    for metadata in metadata {
        metadata_by_address
            .entry(metadata.address.clone())
            .or_insert(metadata);
    }

    aggregates
        .into_iter()
        .map(|aggregate| {
            let ValidatorMetadata {
                operator_address,
                moniker,
                ..
            } = metadata_by_address
                .remove(&aggregate.address)
                .unwrap_or_default();

            EnrichedValidator {
                aggregate,
                operator_address,
                moniker,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::domain::{ValidatorAggregate, ValidatorMetadata, enricher::enrich};

    fn metadata(address: &str, operator_address: &str, moniker: &str) -> ValidatorMetadata {
        ValidatorMetadata {
            address: address.to_owned(),
            operator_address: operator_address.to_owned(),
            moniker: moniker.to_owned(),
        }
    }

    #[test]
    fn test_enrich() {
        let aggregates = vec![ValidatorAggregate::new("v1"), ValidatorAggregate::new("v2")];
        let metadata = vec![
            metadata("v2", "regenvaloper1two", "two"),
            metadata("v1", "regenvaloper1one", "one"),
            metadata("unrelated", "regenvaloper1other", "other"),
        ];

        let enriched = enrich(aggregates, metadata);
        assert_eq!(enriched.len(), 2);

        assert_eq!(enriched[0].aggregate.address, "v1");
        assert_eq!(enriched[0].operator_address, "regenvaloper1one");
        assert_eq!(enriched[0].moniker, "one");

        assert_eq!(enriched[1].aggregate.address, "v2");
        assert_eq!(enriched[1].operator_address, "regenvaloper1two");
        assert_eq!(enriched[1].moniker, "two");
    }

    #[test]
    fn test_enrich_missing_metadata() {
        let mut aggregate = ValidatorAggregate::new("v1");
        aggregate.uptime_count = 3;

        let enriched = enrich(vec![aggregate.clone()], vec![]);
        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].aggregate, aggregate);
        assert!(enriched[0].operator_address.is_empty());
        assert!(enriched[0].moniker.is_empty());
    }

    #[test]
    fn test_enrich_first_match_wins() {
        let metadata = vec![
            metadata("v1", "regenvaloper1first", "first"),
            metadata("v1", "regenvaloper1second", "second"),
        ];

        let enriched = enrich(vec![ValidatorAggregate::new("v1")], metadata);
        assert_eq!(enriched[0].operator_address, "regenvaloper1first");
        assert_eq!(enriched[0].moniker, "first");
    }
}
