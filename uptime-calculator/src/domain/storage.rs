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

use crate::domain::{BlockRange, BlockRecord, ValidatorAddress, ValidatorMetadata};
use futures::Stream;
use std::error::Error as StdError;

/// Storage abstraction for blocks and validator metadata.
#[trait_variant::make(Send)]
pub trait Storage
where
    Self: Clone + Send + Sync + 'static,
{
    type Error: StdError + Send + Sync + 'static;

    /// Get the height of the highest stored block, if any.
    async fn get_highest_height(&self) -> Result<Option<u64>, Self::Error>;

    /// Get the blocks within the given range, ordered by height.
    fn get_blocks(
        &self,
        range: BlockRange,
    ) -> impl Stream<Item = Result<BlockRecord, Self::Error>> + Send;

    /// Get the metadata for the given validator addresses. Addresses without metadata are
    /// omitted; several entries for the same address are returned in storage order.
    async fn get_validators(
        &self,
        addresses: &[ValidatorAddress],
    ) -> Result<Vec<ValidatorMetadata>, Self::Error>;
}
