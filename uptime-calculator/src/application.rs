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
    BlockRange, InvalidRangeError, ScoredValidator, UpgradeWindow, UpgradeWindows,
    ValidatorAddress, ValidatorAggregate,
    aggregator::Aggregator,
    enricher::enrich,
    report::ReportEmitter,
    scoring::{ScoringConfig, score},
    storage::Storage,
};
use futures::{TryStreamExt, future::ok};
use itertools::Itertools;
use log::{debug, info, warn};
use serde::Deserialize;
use std::{future::Future, time::Duration};
use thiserror::Error;
use tokio::time::timeout;
use uptime_common::error::BoxError;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Points every validator gets for running a node.
    pub node_rewards: u64,

    /// The "El Choco" upgrade.
    pub upgrade1: UpgradeWindowConfig,

    /// The "Amazonas" upgrade.
    pub upgrade2: UpgradeWindowConfig,

    /// Deadline for each call to the storage.
    #[serde(with = "humantime_serde")]
    pub query_timeout: Duration,
}

impl Config {
    /// The scoring configuration with upgrade windows adjusted to start counting votes from the
    /// block after the respective upgrade.
    pub fn scoring_config(&self) -> Result<ScoringConfig, InvalidRangeError> {
        let windows = UpgradeWindows {
            upgrade1: self.upgrade1.upgrade_window("upgrade1")?,
            upgrade2: self.upgrade2.upgrade_window("upgrade2")?,
        };

        Ok(ScoringConfig {
            node_rewards: self.node_rewards,
            windows,
        })
    }
}

/// Configured upgrade window; a start block of zero means the upgrade has not happened.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UpgradeWindowConfig {
    pub start_block: u64,
    pub end_block: u64,
    pub reward_points_per_block: u64,
}

impl UpgradeWindowConfig {
    fn upgrade_window(&self, name: &'static str) -> Result<UpgradeWindow, InvalidRangeError> {
        let Self {
            start_block,
            end_block,
            reward_points_per_block,
        } = *self;

        if start_block == 0 {
            return Ok(UpgradeWindow::unset(reward_points_per_block));
        }

        // Votes are counted starting with the block after the upgrade.
        UpgradeWindow::new(
            name,
            start_block.saturating_add(1),
            end_block.saturating_add(1),
            reward_points_per_block,
        )
    }
}

/// Calculate the uptime and reward points of all validators which participated in blocks within
/// `[start_block, end_block]` and hand the scored validators, ordered by total points descending
/// and then by address, to the given report emitter. Nothing is emitted if any step fails.
pub async fn run(
    config: Config,
    start_block: u64,
    end_block: u64,
    storage: impl Storage,
    mut report: impl ReportEmitter,
) -> Result<Vec<ScoredValidator>, Error> {
    let range = BlockRange::new(start_block, end_block)?;
    let scoring_config = config.scoring_config()?;
    let query_timeout = config.query_timeout;
    debug!(scoring_config:?; "validated configuration");

    info!(start_block, end_block; "fetching blocks");

    let highest_height = with_deadline("get highest block height", range, query_timeout, async {
        storage
            .get_highest_height()
            .await
            .map_err(|error| DataAccessError::HighestHeight(error.into()))
    })
    .await?;
    match highest_height {
        Some(highest_height) if highest_height < end_block => warn!(
            highest_height,
            end_block;
            "end block beyond highest stored block, uptime will be underestimated"
        ),
        None => warn!("no blocks stored"),
        _ => {}
    }

    let aggregates = with_deadline(
        "aggregate blocks",
        range,
        query_timeout,
        aggregate_blocks(&storage, range, scoring_config.windows),
    )
    .await?;
    info!(validators = aggregates.len(); "aggregated blocks");

    let addresses = aggregates
        .iter()
        .map(|aggregate| aggregate.address.clone())
        .collect::<Vec<_>>();
    let metadata = if addresses.is_empty() {
        vec![]
    } else {
        with_deadline("get validators", range, query_timeout, async {
            storage
                .get_validators(&addresses)
                .await
                .map_err(|error| DataAccessError::GetValidators {
                    range,
                    addresses: addresses.clone(),
                    source: error.into(),
                })
        })
        .await?
    };
    debug!(metadata = metadata.len(); "got validator metadata");

    let validators = enrich(aggregates, metadata)
        .into_iter()
        .map(|validator| score(validator, &range, &scoring_config))
        .sorted_by(|a, b| {
            b.total_points
                .total_cmp(&a.total_points)
                .then_with(|| a.address.cmp(&b.address))
        })
        .collect::<Vec<_>>();

    report
        .emit(&validators)
        .map_err(|error| Error::Report(error.into()))?;
    info!(start_block, end_block, validators = validators.len(); "calculated uptime");

    Ok(validators)
}

/// Stream the blocks within the given range and fold them into validator aggregates.
async fn aggregate_blocks(
    storage: &impl Storage,
    range: BlockRange,
    windows: UpgradeWindows,
) -> Result<Vec<ValidatorAggregate>, DataAccessError> {
    let aggregator = storage
        .get_blocks(range)
        .try_fold(Aggregator::new(range, windows), |mut aggregator, block| {
            aggregator.add_block(&block);
            ok(aggregator)
        })
        .await
        .map_err(|error| DataAccessError::GetBlocks {
            range,
            source: error.into(),
        })?;

    Ok(aggregator.finish())
}

async fn with_deadline<T, F>(
    operation: &'static str,
    range: BlockRange,
    query_timeout: Duration,
    future: F,
) -> Result<T, DataAccessError>
where
    F: Future<Output = Result<T, DataAccessError>>,
{
    timeout(query_timeout, future)
        .await
        .map_err(|_| DataAccessError::Timeout {
            operation,
            range,
            timeout: query_timeout,
        })?
}

/// Error possibly returned by [run]; all of these abort the calculation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid block range")]
    InvalidRange(#[from] InvalidRangeError),

    #[error("cannot access validator data")]
    DataAccess(#[from] DataAccessError),

    #[error("cannot emit report")]
    Report(#[source] BoxError),
}

/// Failure to reach or read the storage.
#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("cannot get highest block height")]
    HighestHeight(#[source] BoxError),

    #[error("cannot get blocks within {range}")]
    GetBlocks {
        range: BlockRange,
        #[source]
        source: BoxError,
    },

    #[error("cannot get metadata of {count} validators within {range}", count = .addresses.len())]
    GetValidators {
        range: BlockRange,
        addresses: Vec<ValidatorAddress>,
        #[source]
        source: BoxError,
    },

    #[error("{operation} for blocks within {range} exceeded deadline of {timeout:?}")]
    Timeout {
        operation: &'static str,
        range: BlockRange,
        timeout: Duration,
    },
}
