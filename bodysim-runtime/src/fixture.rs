// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use std::path::Path;

use crate::{core::SampleRow, runtime::Result};

/// Fixture columns in the order the stop-start unit reads them.
pub const HEADERS: [&str; 7] = [
    "Time (seconds)",
    "Speed (km/h)",
    "Tilt Angle (deg)",
    "Internal Temp (C)",
    "External Temp (C)",
    "Door Open",
    "Engine Temp (C)",
];

#[derive(serde::Serialize)]
struct FixtureRecord {
    time: f64,
    speed: f64,
    tilt_angle: f64,
    internal_temp: f64,
    external_temp: f64,
    door_open: u8,
    engine_temp: f64,
}

impl From<&SampleRow> for FixtureRecord {
    fn from(row: &SampleRow) -> Self {
        Self {
            time: row.time,
            speed: row.speed,
            tilt_angle: row.tilt_angle,
            internal_temp: row.internal_temp,
            external_temp: row.external_temp,
            door_open: row.door_open as u8,
            engine_temp: row.engine_temp,
        }
    }
}

/// Fixture dataset writer.
///
/// The header row is written on construction, so an empty run still
/// produces a valid table.
pub struct FixtureWriter<W: std::io::Write> {
    writer: csv::Writer<W>,
}

impl FixtureWriter<std::fs::File> {
    /// Create the fixture file, truncating any existing file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(std::fs::File::create(path)?)
    }
}

impl<W: std::io::Write> FixtureWriter<W> {
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::NonNumeric)
            .has_headers(false)
            .from_writer(inner);

        writer.write_record(HEADERS)?;

        Ok(Self { writer })
    }

    /// Write a single row.
    pub fn write_row(&mut self, row: &SampleRow) -> Result {
        self.writer.serialize(FixtureRecord::from(row))?;
        Ok(())
    }

    /// Write all rows and flush.
    pub fn write_all<'a, I>(&mut self, rows: I) -> Result
    where
        I: IntoIterator<Item = &'a SampleRow>,
    {
        for row in rows {
            self.write_row(row)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| crate::runtime::Error::Io(e.into_error()))
    }
}
