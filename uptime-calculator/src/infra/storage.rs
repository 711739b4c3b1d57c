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

use crate::domain::{self, BlockRange, BlockRecord, ValidatorAddress, ValidatorMetadata};
use fastrace::trace;
use futures::{Stream, StreamExt, TryStreamExt, future::ready, stream};
use indoc::indoc;
use uptime_common::infra::pool::postgres::PostgresPool;

/// Postgres based implementation of [Storage](domain::storage::Storage).
#[derive(Debug, Clone)]
pub struct PostgresStorage {
    pool: PostgresPool,
}

impl PostgresStorage {
    /// Create a new [PostgresStorage].
    pub fn new(pool: PostgresPool) -> Self {
        Self { pool }
    }
}

impl domain::storage::Storage for PostgresStorage {
    type Error = sqlx::Error;

    #[trace]
    async fn get_highest_height(&self) -> Result<Option<u64>, sqlx::Error> {
        let query = indoc! {"
            SELECT max(height)
            FROM blocks
        "};

        let (height,) = sqlx::query_as::<_, (Option<i64>,)>(query)
            .fetch_one(&*self.pool)
            .await?;

        height.map(decode_height).transpose()
    }

    fn get_blocks(
        &self,
        range: BlockRange,
    ) -> impl Stream<Item = Result<BlockRecord, sqlx::Error>> + Send {
        let query = indoc! {"
            SELECT height, validators
            FROM blocks
            WHERE height >= $1
            AND height <= $2
            ORDER BY height
        "};

        let bounds = encode_height(range.start())
            .and_then(|start| encode_height(range.end()).map(|end| (start, end)));
        let (start, end) = match bounds {
            Ok(bounds) => bounds,
            Err(error) => return stream::once(ready(Err(error))).right_stream(),
        };

        sqlx::query_as::<_, (i64, Vec<String>)>(query)
            .bind(start)
            .bind(end)
            .fetch(&*self.pool)
            .and_then(|(height, validators)| {
                ready(decode_height(height).map(|height| BlockRecord::new(height, validators)))
            })
            .left_stream()
    }

    #[trace]
    async fn get_validators(
        &self,
        addresses: &[ValidatorAddress],
    ) -> Result<Vec<ValidatorMetadata>, sqlx::Error> {
        let query = indoc! {"
            SELECT address, operator_address, moniker
            FROM validators
            WHERE address = ANY($1)
            ORDER BY id
        "};

        sqlx::query_as::<_, (String, String, String)>(query)
            .bind(addresses)
            .fetch_all(&*self.pool)
            .await
            .map(|rows| {
                rows.into_iter()
                    .map(|(address, operator_address, moniker)| ValidatorMetadata {
                        address,
                        operator_address,
                        moniker,
                    })
                    .collect()
            })
    }
}

/// Heights are stored as `BIGINT`, hence must not exceed `i64::MAX`.
fn encode_height(height: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(height).map_err(|error| sqlx::Error::Encode(error.into()))
}

fn decode_height(height: i64) -> Result<u64, sqlx::Error> {
    u64::try_from(height).map_err(|error| sqlx::Error::Decode(error.into()))
}
