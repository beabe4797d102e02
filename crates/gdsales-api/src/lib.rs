// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod dto;
pub mod errors;
pub mod params;
pub mod responses;

pub use dto::*;
pub use errors::{ApiError, ApiErrorKind};
pub use responses::{created, ok_data, ok_data_message, ok_message};

pub const CRATE_NAME: &str = "gdsales-api";
