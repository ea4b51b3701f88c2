// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use std::{error, fmt};

#[derive(Debug)]
pub enum Error {
    /// Input row is missing a field, is not numeric or breaks the profile ordering.
    InvalidInputRow { row: usize, reason: String },
    /// Speed profile lacks a required column.
    MissingColumn(String),
    /// Configuration is out of range.
    Config(String),
    Io(std::io::Error),
    Csv(csv::Error),
    Toml(toml::de::Error),
}

impl Error {
    pub(crate) fn invalid_row(row: usize, reason: impl Into<String>) -> Self {
        Error::InvalidInputRow {
            row,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInputRow { row, reason } => {
                write!(f, "invalid input row {}: {}", row, reason)
            }
            Error::MissingColumn(name) => write!(f, "missing column '{}'", name),
            Error::Config(e) => write!(f, "configuration error: {}", e),
            Error::Io(e) => write!(f, "{}", e),
            Error::Csv(e) => write!(f, "{}", e),
            Error::Toml(e) => write!(f, "{}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            Error::Toml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Toml(e)
    }
}
