/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T,OdinRadarError>;

/// the failures that terminate a loop. Malformed feed records are not errors (see [`Discard`])
#[derive(Error,Debug)]
pub enum OdinRadarError {

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("config parse error {0}")]
    ConfigParseError( #[from] ron::error::SpannedError),

    #[error("invalid config {0}")]
    ConfigError(String),

    #[error("feed closed by {0}")]
    FeedClosed(String),

    #[error("task failed {0}")]
    JoinError( #[from] tokio::task::JoinError),
}

/// the reason why a feed record was dropped. This is a normal outcome of parsing and does
/// not interrupt ingestion
#[derive(Error,Debug,Clone,PartialEq)]
pub enum Discard {

    #[error("too few fields: got {found}, need {required}")]
    TooFewFields { found: usize, required: usize },

    #[error("missing icao24 identifier")]
    MissingIcao24,

    #[error("empty callsign")]
    EmptyCallsign,

    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },
}

macro_rules! config_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinRadarError::ConfigError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use config_error;
