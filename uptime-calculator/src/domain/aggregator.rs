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

use crate::domain::{
    BlockRange, BlockRecord, UpgradeWindows, ValidatorAddress, ValidatorAggregate,
};
use std::collections::HashMap;

/// Incrementally counts validator participation per block, e.g. while streaming blocks.
#[derive(Debug, Clone)]
pub struct Aggregator {
    range: BlockRange,
    windows: UpgradeWindows,
    aggregates: HashMap<ValidatorAddress, ValidatorAggregate>,
}

impl Aggregator {
    pub fn new(range: BlockRange, windows: UpgradeWindows) -> Self {
        Self {
            range,
            windows,
            aggregates: HashMap::new(),
        }
    }

    /// Count the participants of the given block; blocks outside of the range are skipped.
    pub fn add_block(&mut self, block: &BlockRecord) {
        let height = block.height;
        if !self.range.contains(height) {
            return;
        }

        // Overlapping windows both count.
        let in_window1 = self.windows.upgrade1.contains(height);
        let in_window2 = self.windows.upgrade2.contains(height);

        for address in &block.participants {
            let aggregate = self
                .aggregates
                .entry(address.to_owned())
                .or_insert_with(|| ValidatorAggregate::new(address));

            aggregate.uptime_count += 1;
            if in_window1 {
                aggregate.window1_count += 1;
            }
            if in_window2 {
                aggregate.window2_count += 1;
            }
        }
    }

    /// One aggregate per distinct validator, in no particular order.
    pub fn finish(self) -> Vec<ValidatorAggregate> {
        self.aggregates.into_values().collect()
    }
}

/// Aggregate the participation of all validators in the given blocks; see [Aggregator].
pub fn aggregate<'a>(
    blocks: impl IntoIterator<Item = &'a BlockRecord>,
    range: BlockRange,
    windows: UpgradeWindows,
) -> Vec<ValidatorAggregate> {
    blocks
        .into_iter()
        .fold(Aggregator::new(range, windows), |mut aggregator, block| {
            aggregator.add_block(block);
            aggregator
        })
        .finish()
}
