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

use crate::{application, infra};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub run_migrations: bool,

    #[serde(rename = "application")]
    pub application_config: application::Config,

    #[serde(rename = "infra")]
    pub infra_config: infra::Config,
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use figment::{
        Figment,
        providers::{Format, Yaml},
    };
    use std::{path::Path, time::Duration};

    #[test]
    fn test_config_yaml() -> anyhow::Result<()> {
        let config_file = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.yaml");
        let config = Figment::new()
            .merge(Yaml::file(config_file))
            .merge(("infra.storage.password", "secret"))
            .extract::<Config>()?;

        assert!(config.run_migrations);
        assert_eq!(config.application_config.node_rewards, 100);
        assert_eq!(config.application_config.upgrade1.start_block, 0);
        assert_eq!(
            config.application_config.query_timeout,
            Duration::from_secs(5 * 60)
        );
        assert_eq!(
            config.infra_config.report_config.output_file,
            Path::new("result.csv")
        );

        // Unset upgrades yield windows which never contain a block.
        let scoring_config = config.application_config.scoring_config()?;
        assert!(!scoring_config.windows.upgrade1.is_set());
        assert!(!scoring_config.windows.upgrade2.is_set());

        Ok(())
    }
}
