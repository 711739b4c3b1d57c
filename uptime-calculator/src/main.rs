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

use clap::Parser;
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    use log::error;
    use std::panic;
    use uptime_common::telemetry;

    telemetry::init_logging();
    panic::set_hook(Box::new(|panic| error!(panic:%; "process panicked")));

    if let Err(error) = Cli::parse().run().await {
        let backtrace = error.backtrace();
        let error = format!("{error:#}");
        error!(error, backtrace:%; "process exited with ERROR");
        std::process::exit(1);
    }
}

/// Calculate validator uptime and reward points for a block range.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// First block height of the range, inclusive.
    #[arg(long)]
    start_block: u64,

    /// Last block height of the range, inclusive.
    #[arg(long)]
    end_block: u64,

    /// CSV file to write; overrides the configured output file.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Cli {
    async fn run(self) -> anyhow::Result<()> {
        use anyhow::Context;
        use log::info;
        use std::io;
        use uptime_calculator::{
            application,
            config::Config,
            infra::{self, report::Report, storage::PostgresStorage},
        };
        use uptime_common::{
            config::ConfigExt,
            infra::{migrations, pool::postgres::PostgresPool},
        };

        let config = Config::load().context("load configuration")?;
        info!(config:?; "starting");
        let Config {
            run_migrations,
            application_config,
            infra_config:
                infra::Config {
                    storage_config,
                    report_config,
                },
        } = config;

        let pool = PostgresPool::new(storage_config)
            .await
            .context("create DB pool for Postgres")?;
        if run_migrations {
            migrations::postgres::run(&pool)
                .await
                .context("run Postgres migrations")?;
        }

        let output_file = self.output.unwrap_or(report_config.output_file);
        let storage = PostgresStorage::new(pool);
        let report = Report::new(io::stdout(), &output_file);

        application::run(
            application_config,
            self.start_block,
            self.end_block,
            storage,
            report,
        )
        .await
        .with_context(|| {
            format!(
                "calculate uptime for blocks [{}, {}]",
                self.start_block, self.end_block
            )
        })?;

        info!(output_file:?; "wrote report");

        Ok(())
    }
}
