// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use std::path::Path;

use crate::{
    config::ProfileConfig,
    core::ProfileSample,
    runtime::{Error, Result},
};

/// Speed profile reader.
///
/// Reads the time and speed columns from a CSV table with a header row.
/// Numbers may be written with a decimal comma.
pub struct ProfileReader {
    time_column: String,
    speed_column: String,
}

impl ProfileReader {
    pub fn new(config: &ProfileConfig) -> Self {
        Self {
            time_column: config.time_column.clone(),
            speed_column: config.speed_column.clone(),
        }
    }

    /// Read the speed profile from file.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<ProfileSample>> {
        let file = std::fs::File::open(path)?;

        self.read(file)
    }

    /// Read the speed profile.
    ///
    /// Fails on the first row with a missing or non-numeric time or speed.
    pub fn read<R: std::io::Read>(&self, reader: R) -> Result<Vec<ProfileSample>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let time_index = column_index(&headers, &self.time_column)?;
        let speed_index = column_index(&headers, &self.speed_column)?;

        let mut samples = Vec::new();

        for (row, record) in reader.records().enumerate() {
            let record = record?;

            let time = parse_field(&record, time_index, row, &self.time_column)?;
            let speed = parse_field(&record, speed_index, row, &self.speed_column)?;

            samples.push(ProfileSample::new(time, speed));
        }

        debug!("Read {} profile samples", samples.len());

        Ok(samples)
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim_matches('"').eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::MissingColumn(name.to_owned()))
}

fn parse_field(record: &csv::StringRecord, index: usize, row: usize, name: &str) -> Result<f64> {
    let field = record
        .get(index)
        .filter(|field| !field.is_empty())
        .ok_or_else(|| Error::invalid_row(row, format!("missing {}", name)))?;

    parse_decimal(field)
        .ok_or_else(|| Error::invalid_row(row, format!("{} '{}' is not a number", name, field)))
}

/// Parse a number written with either a decimal point or a decimal comma.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let value = value.trim().trim_matches('"').replace(',', ".");

    value.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader() -> ProfileReader {
        ProfileReader::new(&ProfileConfig::default())
    }

    #[test]
    fn decimal_comma() {
        assert_eq!(parse_decimal("12,5"), Some(12.5));
        assert_eq!(parse_decimal(" 7.25 "), Some(7.25));
        assert_eq!(parse_decimal("\"0,0\""), Some(0.0));
        assert_eq!(parse_decimal("40"), Some(40.0));
        assert_eq!(parse_decimal("fast"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal(""), None);
    }

    #[test]
    fn read_profile() {
        let data = "Time (seconds),Speed (km/h)\n0,\"0,0\"\n1,\"3,5\"\n2,\"7,25\"\n";

        let samples = reader().read(data.as_bytes()).unwrap();

        assert_eq!(
            samples,
            vec![
                ProfileSample::new(0.0, 0.0),
                ProfileSample::new(1.0, 3.5),
                ProfileSample::new(2.0, 7.25),
            ]
        );
    }

    #[test]
    fn columns_located_by_header() {
        let data = "Speed (km/h);Note\n";
        assert!(matches!(
            reader().read(data.as_bytes()),
            Err(Error::MissingColumn(_))
        ));

        let data = "Note,speed (KM/H),time (seconds)\nstart,\"12,5\",3\n";
        let samples = reader().read(data.as_bytes()).unwrap();
        assert_eq!(samples, vec![ProfileSample::new(3.0, 12.5)]);
    }

    #[test]
    fn custom_columns() {
        let config = ProfileConfig {
            time_column: "t".to_owned(),
            speed_column: "v".to_owned(),
        };

        let samples = ProfileReader::new(&config)
            .read("t,v\n0,1.5\n".as_bytes())
            .unwrap();

        assert_eq!(samples, vec![ProfileSample::new(0.0, 1.5)]);
    }

    #[test]
    fn malformed_row() {
        // Rows count from zero after the header.
        let data = "Time (seconds),Speed (km/h)\n0,\"0,0\"\n1,abc\n2,\"1,0\"\n";
        assert!(matches!(
            reader().read(data.as_bytes()),
            Err(Error::InvalidInputRow { row: 1, .. })
        ));

        let data = "Time (seconds),Speed (km/h)\n0,\"0,0\"\n1\n";
        assert!(matches!(
            reader().read(data.as_bytes()),
            Err(Error::InvalidInputRow { row: 1, .. })
        ));
    }

    #[test]
    fn header_only() {
        let samples = reader()
            .read("Time (seconds),Speed (km/h)\n".as_bytes())
            .unwrap();

        assert!(samples.is_empty());
    }
}
