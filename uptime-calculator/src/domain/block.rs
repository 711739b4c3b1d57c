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

use derive_more::Display;
use std::collections::BTreeSet;
use thiserror::Error;

/// The consensus address of a validator as recorded in the participants of a block.
pub type ValidatorAddress = String;

/// The validators which participated in (signed) the block at the given height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRecord {
    pub height: u64,
    pub participants: BTreeSet<ValidatorAddress>,
}

impl BlockRecord {
    /// Create a new [BlockRecord]; duplicate participants are collapsed.
    pub fn new<I, A>(height: u64, participants: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<ValidatorAddress>,
    {
        Self {
            height,
            participants: participants.into_iter().map(Into::into).collect(),
        }
    }
}

/// Inclusive range of block heights `[start, end]` an uptime report is calculated for. The end
/// is always greater than the start, so `end - start` can be used as uptime denominator.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[display("[{start}, {end}]")]
pub struct BlockRange {
    start: u64,
    end: u64,
}

impl BlockRange {
    pub fn new(start: u64, end: u64) -> Result<Self, InvalidRangeError> {
        if start == end {
            return Err(InvalidRangeError::EmptyRange(start));
        }
        if start > end {
            return Err(InvalidRangeError::InvertedRange { start, end });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn contains(&self, height: u64) -> bool {
        self.start <= height && height <= self.end
    }

    /// The distance between start and end, never zero.
    pub fn span(&self) -> u64 {
        self.end - self.start
    }
}

/// Error possibly returned when validating block ranges or upgrade windows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRangeError {
    #[error("start block and end block must not be equal, but both are {0}")]
    EmptyRange(u64),

    #[error("start block {start} must not be greater than end block {end}")]
    InvertedRange { start: u64, end: u64 },

    #[error("{window} start block {start} must not be greater than its end block {end}")]
    InvertedWindow {
        window: &'static str,
        start: u64,
        end: u64,
    },
}
