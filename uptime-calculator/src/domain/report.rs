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

use crate::domain::ScoredValidator;
use std::error::Error as StdError;

/// Consumer of the scored validators of a report, e.g. rendering them as table or CSV.
pub trait ReportEmitter {
    type Error: StdError + Send + Sync + 'static;

    fn emit(&mut self, validators: &[ScoredValidator]) -> Result<(), Self::Error>;
}
