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

use crate::domain::ValidatorAddress;

/// Participation counts of a single validator within a block range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorAggregate {
    pub address: ValidatorAddress,
    pub uptime_count: u64,
    pub window1_count: u64,
    pub window2_count: u64,
}

impl ValidatorAggregate {
    pub fn new(address: impl Into<ValidatorAddress>) -> Self {
        Self {
            address: address.into(),
            uptime_count: 0,
            window1_count: 0,
            window2_count: 0,
        }
    }
}

/// Registry data of a validator; operator address and moniker may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorMetadata {
    pub address: ValidatorAddress,
    pub operator_address: String,
    pub moniker: String,
}

/// A [ValidatorAggregate] joined with its [ValidatorMetadata], if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedValidator {
    pub aggregate: ValidatorAggregate,
    pub operator_address: String,
    pub moniker: String,
}

/// Final result row of an uptime report.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredValidator {
    pub address: ValidatorAddress,
    pub operator_address: String,
    pub moniker: String,
    pub uptime_count: u64,
    pub window1_count: u64,
    pub window2_count: u64,
    pub window1_points: f64,
    pub window2_points: f64,
    pub uptime_points: f64,
    pub node_reward_points: f64,
    pub total_points: f64,
}

impl ScoredValidator {
    /// The operator address or, if unknown, the validator address marked as hex address.
    pub fn display_address(&self) -> String {
        if self.operator_address.is_empty() {
            format!("{} (Hex Address)", self.address)
        } else {
            self.operator_address.clone()
        }
    }
}
