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

use crate::domain::{ScoredValidator, report::ReportEmitter};
use serde::Deserialize;
use std::{
    io::{self, Write},
    path::PathBuf,
};
use thiserror::Error;

/// Column titles of the CSV export. Rows carry the total points as additional eighth field
/// without a title.
pub const CSV_HEADER: [&str; 7] = [
    "ValOper Address",
    "Moniker",
    "Uptime Count",
    "elChoco Points",
    "Upgrade2 Points",
    "Uptime Points",
    "Node points",
];

const TABLE_HEADER: [&str; 8] = [
    "Operator Addr",
    "Moniker",
    "Uptime Count",
    "Upgrade1 points",
    "Upgrade2 points",
    "Uptime points",
    "Node points",
    "Total points",
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub output_file: PathBuf,
}

/// Renders the report as table and then exports it as CSV file.
#[derive(Debug)]
pub struct Report<W> {
    table: TableReport<W>,
    csv: CsvReport,
}

impl<W> Report<W>
where
    W: Write,
{
    pub fn new(writer: W, output_file: impl Into<PathBuf>) -> Self {
        Self {
            table: TableReport::new(writer),
            csv: CsvReport::new(output_file),
        }
    }
}

impl<W> ReportEmitter for Report<W>
where
    W: Write,
{
    type Error = Error;

    fn emit(&mut self, validators: &[ScoredValidator]) -> Result<(), Error> {
        self.table.emit(validators).map_err(Error::Table)?;
        self.csv.emit(validators).map_err(Error::Csv)?;
        Ok(())
    }
}

/// Error possibly returned by [Report::emit].
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot render table")]
    Table(#[source] io::Error),

    #[error("cannot export CSV file")]
    Csv(#[source] csv::Error),
}

/// Human readable table with aligned columns.
#[derive(Debug)]
pub struct TableReport<W> {
    writer: W,
}

impl<W> TableReport<W>
where
    W: Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W> ReportEmitter for TableReport<W>
where
    W: Write,
{
    type Error = io::Error;

    fn emit(&mut self, validators: &[ScoredValidator]) -> Result<(), io::Error> {
        let header = TABLE_HEADER.map(str::to_owned);
        let rows = validators.iter().map(row).collect::<Vec<_>>();

        let mut widths = header.clone().map(|title| title.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        for row in [&header].into_iter().chain(&rows) {
            let line = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!(" {cell:<width$} "))
                .collect::<Vec<_>>()
                .join("|");
            writeln!(self.writer, "{}", line.trim_end())?;
        }

        self.writer.flush()
    }
}

/// CSV export; an existing file is overwritten.
#[derive(Debug, Clone)]
pub struct CsvReport {
    output_file: PathBuf,
}

impl CsvReport {
    pub fn new(output_file: impl Into<PathBuf>) -> Self {
        Self {
            output_file: output_file.into(),
        }
    }
}

impl ReportEmitter for CsvReport {
    type Error = csv::Error;

    fn emit(&mut self, validators: &[ScoredValidator]) -> Result<(), csv::Error> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&self.output_file)?;

        writer.write_record(CSV_HEADER)?;
        for validator in validators {
            writer.write_record(row(validator))?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn row(validator: &ScoredValidator) -> [String; 8] {
    [
        validator.display_address(),
        validator.moniker.clone(),
        validator.uptime_count.to_string(),
        format!("{:.6}", validator.window1_points),
        format!("{:.6}", validator.window2_points),
        format!("{:.6}", validator.uptime_points),
        format!("{:.6}", validator.node_reward_points),
        format!("{:.6}", validator.total_points),
    ]
}

#[cfg(test)]
mod tests {
    use crate::{
        domain::{ScoredValidator, report::ReportEmitter},
        infra::report::{CSV_HEADER, CsvReport, Report, TableReport},
    };
    use csv::ReaderBuilder;
    use std::{error::Error as StdError, fs};
    use tempfile::TempDir;

    fn validators() -> Vec<ScoredValidator> {
        vec![
            ScoredValidator {
                address: "A1B2".to_owned(),
                operator_address: "regenvaloper1one".to_owned(),
                moniker: "one".to_owned(),
                uptime_count: 5,
                window1_count: 2,
                window2_count: 0,
                window1_points: 40.0,
                window2_points: 0.0,
                uptime_points: 375.0,
                node_reward_points: 100.0,
                total_points: 515.0,
            },
            ScoredValidator {
                address: "C3D4".to_owned(),
                operator_address: String::new(),
                moniker: String::new(),
                uptime_count: 1,
                window1_count: 0,
                window2_count: 0,
                window1_points: 0.0,
                window2_points: 0.0,
                uptime_points: 100.0 / 3.0,
                node_reward_points: 100.0,
                total_points: 100.0 + 100.0 / 3.0,
            },
        ]
    }

    #[test]
    fn test_csv_report() -> Result<(), Box<dyn StdError>> {
        let dir = TempDir::new()?;
        let output_file = dir.path().join("result.csv");

        CsvReport::new(&output_file).emit(&validators())?;

        let mut reader = ReaderBuilder::new().flexible(true).from_path(&output_file)?;
        let header = reader.headers()?.iter().collect::<Vec<_>>();
        assert_eq!(header.len(), 7);
        assert_eq!(header, CSV_HEADER.to_vec());

        // Every row carries the total points as eighth field.
        let records = reader.records().collect::<Result<Vec<_>, _>>()?;
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].iter().collect::<Vec<_>>(),
            vec![
                "regenvaloper1one",
                "one",
                "5",
                "40.000000",
                "0.000000",
                "375.000000",
                "100.000000",
                "515.000000"
            ]
        );
        assert_eq!(
            records[1].iter().collect::<Vec<_>>(),
            vec![
                "C3D4 (Hex Address)",
                "",
                "1",
                "0.000000",
                "0.000000",
                "33.333333",
                "100.000000",
                "133.333333"
            ]
        );

        Ok(())
    }

    #[test]
    fn test_csv_report_empty() -> Result<(), Box<dyn StdError>> {
        let dir = TempDir::new()?;
        let output_file = dir.path().join("result.csv");

        CsvReport::new(&output_file).emit(&[])?;

        let content = fs::read_to_string(&output_file)?;
        assert_eq!(content, format!("{}\n", CSV_HEADER.join(",")));

        Ok(())
    }

    #[test]
    fn test_table_report() -> Result<(), Box<dyn StdError>> {
        let mut table = TableReport::new(Vec::new());
        table.emit(&validators())?;

        let output = String::from_utf8(table.writer)?;
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(" Operator Addr "));
        assert!(lines[1].starts_with(" regenvaloper1one "));
        assert!(lines[2].starts_with(" C3D4 (Hex Address) "));
        assert!(lines[2].ends_with("133.333333"));

        // Columns are aligned.
        let separators = |line: &str| {
            line.char_indices()
                .filter(|(_, c)| *c == '|')
                .map(|(i, _)| i)
                .collect::<Vec<_>>()
        };
        assert_eq!(separators(lines[0]), separators(lines[1]));
        assert_eq!(separators(lines[0]), separators(lines[2]));

        Ok(())
    }

    #[test]
    fn test_report_writes_table_and_csv() -> Result<(), Box<dyn StdError>> {
        let dir = TempDir::new()?;
        let output_file = dir.path().join("result.csv");

        let mut report = Report::new(Vec::new(), &output_file);
        report.emit(&validators())?;

        assert!(!report.table.writer.is_empty());
        let records = ReaderBuilder::new()
            .flexible(true)
            .from_path(&output_file)?
            .records()
            .count();
        assert_eq!(records, 2);

        Ok(())
    }
}
