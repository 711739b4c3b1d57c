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

use crate::domain::InvalidRangeError;

/// Range of block heights after a network upgrade in which participating validators earn
/// upgrade points. A start height of zero means the upgrade has not (yet) happened: such an
/// unset window neither counts participation nor awards points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpgradeWindow {
    start_height: u64,
    end_height: u64,
    points_per_block: u64,
}

impl UpgradeWindow {
    /// Create a new set or unset (zero start height) [UpgradeWindow]. The given heights are used
    /// as is, i.e. callers are responsible for any offset from the upgrade height.
    pub fn new(
        name: &'static str,
        start_height: u64,
        end_height: u64,
        points_per_block: u64,
    ) -> Result<Self, InvalidRangeError> {
        if start_height != 0 && start_height > end_height {
            return Err(InvalidRangeError::InvertedWindow {
                window: name,
                start: start_height,
                end: end_height,
            });
        }

        Ok(Self {
            start_height,
            end_height,
            points_per_block,
        })
    }

    /// An unset window, i.e. for an upgrade which has not happened.
    pub fn unset(points_per_block: u64) -> Self {
        Self {
            start_height: 0,
            end_height: 0,
            points_per_block,
        }
    }

    pub fn start_height(&self) -> u64 {
        self.start_height
    }

    pub fn end_height(&self) -> u64 {
        self.end_height
    }

    pub fn points_per_block(&self) -> u64 {
        self.points_per_block
    }

    pub fn is_set(&self) -> bool {
        self.start_height != 0
    }

    pub fn contains(&self, height: u64) -> bool {
        self.is_set() && self.start_height <= height && height <= self.end_height
    }

    /// Points for every block from the start of this window up to and including the given end
    /// block of the report; zero if unset or if the window starts after the end block.
    pub fn span_points(&self, end_block: u64) -> u64 {
        if !self.is_set() {
            return 0;
        }

        let blocks = end_block.saturating_add(1).saturating_sub(self.start_height);
        self.points_per_block.saturating_mul(blocks)
    }
}

/// The two upgrade windows of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpgradeWindows {
    pub upgrade1: UpgradeWindow,
    pub upgrade2: UpgradeWindow,
}
