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

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::de::DeserializeOwned;
use std::{env, path::Path};

/// Environment variable naming the YAML configuration file.
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Extension methods for "configuration structs" which can be deserialized.
pub trait ConfigExt
where
    Self: DeserializeOwned,
{
    /// Load the configuration from the file at `CONFIG_FILE` (defaults to `config.yaml`),
    /// overridden by environment variables prefixed with `APP__`, e.g.
    /// `APP__INFRA__STORAGE__PASSWORD`.
    fn load() -> Result<Self, Box<figment::Error>> {
        let config_file =
            env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_owned());
        Self::load_from(config_file)
    }

    /// Like [ConfigExt::load], but from the given configuration file.
    fn load_from(config_file: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Yaml::file(config_file))
            .merge(Env::prefixed("APP__").split("__"))
            .extract()
            .map_err(Box::new)
    }
}

impl<T> ConfigExt for T where T: DeserializeOwned {}
