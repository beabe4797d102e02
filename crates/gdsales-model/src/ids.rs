// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const ID_MAX_LEN: usize = 64;
pub const SKU_MAX_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Trimmed(&'static str),
    TooLong(&'static str, usize),
    UnknownLabel(&'static str, String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Trimmed(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::UnknownLabel(name, value) => write!(f, "unknown {name}: {value}"),
        }
    }
}

impl std::error::Error for ParseError {}

fn parse_bounded(input: &str, field: &'static str, max: usize) -> Result<String, ParseError> {
    if input.is_empty() {
        return Err(ParseError::Empty(field));
    }
    if input.trim() != input {
        return Err(ParseError::Trimmed(field));
    }
    if input.len() > max {
        return Err(ParseError::TooLong(field, max));
    }
    Ok(input.to_string())
}

macro_rules! string_id {
    ($name:ident, $field:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn parse(input: &str) -> Result<Self, ParseError> {
                parse_bounded(input, $field, ID_MAX_LEN).map(Self)
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(ProductId, "product_id");
string_id!(CustomerId, "customer_id");
string_id!(OrderId, "order_id");
string_id!(UserId, "user_id");

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parse_bounded(input, "sku", SKU_MAX_LEN).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Sku {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_round_trips_through_serde() {
        let id = ProductId::parse("prod-001").expect("valid id");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"prod-001\"");
        let back: ProductId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn ids_reject_empty_and_padded_input() {
        assert_eq!(ProductId::parse(""), Err(ParseError::Empty("product_id")));
        assert_eq!(
            CustomerId::parse(" c1"),
            Err(ParseError::Trimmed("customer_id"))
        );
        let long = "x".repeat(ID_MAX_LEN + 1);
        assert_eq!(
            OrderId::parse(&long),
            Err(ParseError::TooLong("order_id", ID_MAX_LEN))
        );
    }

    #[test]
    fn sku_enforces_its_own_bound() {
        assert!(Sku::parse("SH-001").is_ok());
        let long = "s".repeat(SKU_MAX_LEN + 1);
        assert_eq!(
            Sku::parse(&long),
            Err(ParseError::TooLong("sku", SKU_MAX_LEN))
        );
    }
}
