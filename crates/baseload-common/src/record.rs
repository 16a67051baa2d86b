//! The client record and its flat-file parser
//!
//! Each input line carries eight whitespace-separated fields in a fixed
//! order. Optional fields use the literal sentinel `NULL`; amounts use a
//! comma decimal separator; document fields may carry punctuation that is
//! stripped down to digits.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::document::{cnpj, cpf};
use crate::error::ParseError;

/// Number of whitespace-separated fields per input line.
pub const FIELD_COUNT: usize = 8;

/// Literal marker for an absent optional field.
const NULL_SENTINEL: &str = "NULL";

const DATE_FORMAT: &str = "%Y-%m-%d";

// Compiled once per process; both patterns run on every input line.
static NON_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\D").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// A customer record.
///
/// `id` is assigned by the database on first insert and absent before it.
/// The three `valid_*` flags are `None` until [`Client::validate_documents`]
/// has run for the record in its current state; they carry no meaning before
/// that.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Client {
    pub id: Option<i64>,
    pub cpf: String,
    pub private: bool,
    pub incomplete: bool,
    pub last_order_date: Option<NaiveDate>,
    pub average_ticket: Option<f64>,
    pub last_order_ticket: Option<f64>,
    pub most_frequent_store: Option<String>,
    pub last_order_store: Option<String>,

    pub valid_cpf: Option<bool>,
    pub valid_most_frequent_store: Option<bool>,
    pub valid_last_order_store: Option<bool>,
}

impl Client {
    /// Builds a client from the eight positional fields of one input line.
    ///
    /// Strict: the first malformed field fails the whole record; no partial
    /// records are produced. Validity flags start unset.
    pub fn from_fields(fields: &[&str]) -> Result<Self, ParseError> {
        if fields.len() != FIELD_COUNT {
            return Err(ParseError::FieldCount {
                expected: FIELD_COUNT,
                actual: fields.len(),
            });
        }

        let last_order_date = match fields[3] {
            NULL_SENTINEL => None,
            raw => Some(NaiveDate::parse_from_str(raw, DATE_FORMAT)?),
        };

        Ok(Self {
            cpf: strip_non_digits(fields[0]),
            private: fields[1] == "1",
            incomplete: fields[2] == "1",
            last_order_date,
            average_ticket: parse_amount(fields[4])?,
            last_order_ticket: parse_amount(fields[5])?,
            most_frequent_store: parse_store(fields[6]),
            last_order_store: parse_store(fields[7]),
            ..Self::default()
        })
    }

    /// Parses one raw input line, splitting on whitespace runs.
    pub fn parse_line(line: &str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = WHITESPACE_RUN.split(line.trim()).collect();
        Self::from_fields(&fields)
    }

    /// Validates the client documents and stores the result in the record.
    ///
    /// An absent store document counts as not validated, never as skipped.
    pub fn validate_documents(&mut self) {
        self.valid_cpf = Some(cpf::validate(&self.cpf));
        self.valid_most_frequent_store =
            Some(self.most_frequent_store.as_deref().is_some_and(cnpj::validate));
        self.valid_last_order_store =
            Some(self.last_order_store.as_deref().is_some_and(cnpj::validate));
    }
}

fn strip_non_digits(raw: &str) -> String {
    NON_DIGIT.replace_all(raw, "").into_owned()
}

/// `NULL` is absent; anything else is a decimal amount with `,` separator.
fn parse_amount(raw: &str) -> Result<Option<f64>, ParseError> {
    if raw == NULL_SENTINEL {
        return Ok(None);
    }

    Ok(Some(raw.replacen(',', ".", 1).parse()?))
}

/// `NULL` is absent; anything else is a store document, stripped to digits.
fn parse_store(raw: &str) -> Option<String> {
    if raw == NULL_SENTINEL {
        return None;
    }

    Some(strip_non_digits(raw))
}
