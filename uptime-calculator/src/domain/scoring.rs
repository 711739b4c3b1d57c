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

use crate::domain::{BlockRange, EnrichedValidator, ScoredValidator, UpgradeWindow, UpgradeWindows};

/// Uptime points for a validator which participated in every block of a report.
pub const UPTIME_POINTS_SCALE: f64 = 300.0;

/// Immutable scoring parameters of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Points every validator gets for running a node.
    pub node_rewards: u64,
    pub windows: UpgradeWindows,
}

/// Score the given validator for the given range.
///
/// Upgrade points are awarded for the whole span from the start of the respective window up to
/// the end of the range, as soon as the validator participated in at least one block of that
/// window; the window counts themselves are not multiplied. Uptime points are the fraction of
/// `range.end - range.start` blocks the validator participated in, scaled to
/// [UPTIME_POINTS_SCALE].
pub fn score(
    validator: EnrichedValidator,
    range: &BlockRange,
    config: &ScoringConfig,
) -> ScoredValidator {
    let EnrichedValidator {
        aggregate,
        operator_address,
        moniker,
    } = validator;

    let window1_points = window_points(
        &config.windows.upgrade1,
        aggregate.window1_count,
        range.end(),
    );
    let window2_points = window_points(
        &config.windows.upgrade2,
        aggregate.window2_count,
        range.end(),
    );

    let uptime = aggregate.uptime_count as f64 / range.span() as f64;
    let uptime_points = uptime * UPTIME_POINTS_SCALE;

    let node_reward_points = config.node_rewards as f64;
    let total_points = window1_points + window2_points + uptime_points + node_reward_points;

    ScoredValidator {
        address: aggregate.address,
        operator_address,
        moniker,
        uptime_count: aggregate.uptime_count,
        window1_count: aggregate.window1_count,
        window2_count: aggregate.window2_count,
        window1_points,
        window2_points,
        uptime_points,
        node_reward_points,
        total_points,
    }
}

fn window_points(window: &UpgradeWindow, count: u64, end_block: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        window.span_points(end_block) as f64
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{
        BlockRange, BlockRecord, EnrichedValidator, UpgradeWindow, UpgradeWindows,
        ValidatorAggregate,
        aggregator::aggregate,
        enricher::enrich,
        scoring::{ScoringConfig, score},
    };

    const NODE_REWARDS: u64 = 100;

    fn config(upgrade1: UpgradeWindow, upgrade2: UpgradeWindow) -> ScoringConfig {
        ScoringConfig {
            node_rewards: NODE_REWARDS,
            windows: UpgradeWindows { upgrade1, upgrade2 },
        }
    }

    fn enriched(address: &str, uptime: u64, window1: u64, window2: u64) -> EnrichedValidator {
        EnrichedValidator {
            aggregate: ValidatorAggregate {
                address: address.to_owned(),
                uptime_count: uptime,
                window1_count: window1,
                window2_count: window2,
            },
            operator_address: "regenvaloper1v1".to_owned(),
            moniker: "v1".to_owned(),
        }
    }

    #[test]
    fn test_score_full_participation() {
        let blocks = (1..=5)
            .map(|height| BlockRecord::new(height, ["V1"]))
            .collect::<Vec<_>>();
        let range = BlockRange::new(1, 5).expect("range is valid");
        let config = config(
            UpgradeWindow::new("upgrade1", 2, 3, 10).expect("window is valid"),
            UpgradeWindow::unset(20),
        );

        let aggregates = aggregate(&blocks, range, config.windows);
        let mut enriched = enrich(aggregates, vec![]);
        assert_eq!(enriched.len(), 1);

        let scored = score(enriched.remove(0), &range, &config);
        assert_eq!(scored.address, "V1");
        assert_eq!(scored.uptime_count, 5);
        assert_eq!(scored.window1_count, 2);
        assert_eq!(scored.window1_points, 40.0);
        assert_eq!(scored.window2_points, 0.0);
        assert_eq!(scored.uptime_points, 375.0);
        assert_eq!(scored.node_reward_points, NODE_REWARDS as f64);
        assert_eq!(scored.total_points, 40.0 + 375.0 + NODE_REWARDS as f64);
    }

    #[test]
    fn test_score_without_window_participation() {
        let range = BlockRange::new(0, 100).expect("range is valid");
        let config = config(
            UpgradeWindow::new("upgrade1", 50, 60, 10).expect("window is valid"),
            UpgradeWindow::new("upgrade2", 70, 80, 20).expect("window is valid"),
        );

        let scored = score(enriched("v1", 50, 0, 1), &range, &config);
        assert_eq!(scored.window1_points, 0.0);
        assert_eq!(scored.window2_points, (20 * 31) as f64);
        assert_eq!(scored.uptime_points, 150.0);
        assert_eq!(
            scored.total_points,
            (20 * 31) as f64 + 150.0 + NODE_REWARDS as f64
        );
    }

    #[test]
    fn test_score_span_independent_of_window_count() {
        let range = BlockRange::new(0, 100).expect("range is valid");
        let config = config(
            UpgradeWindow::new("upgrade1", 50, 60, 10).expect("window is valid"),
            UpgradeWindow::unset(20),
        );

        let one = score(enriched("v1", 100, 1, 0), &range, &config);
        let all = score(enriched("v2", 100, 11, 0), &range, &config);
        assert_eq!(one.window1_points, (10 * 51) as f64);
        assert_eq!(one.window1_points, all.window1_points);
    }

    #[test]
    fn test_score_no_uptime() {
        let range = BlockRange::new(10, 20).expect("range is valid");
        let config = config(UpgradeWindow::unset(10), UpgradeWindow::unset(20));

        let scored = score(enriched("v1", 0, 0, 0), &range, &config);
        assert_eq!(scored.uptime_points, 0.0);
        assert_eq!(scored.total_points, NODE_REWARDS as f64);
        assert_eq!(scored.operator_address, "regenvaloper1v1");
        assert_eq!(scored.moniker, "v1");
    }
}
