use crate::checksum::mod97_remainder;
use crate::reference::{iban_length, MIN_IBAN_LENGTH};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IbanError {
    TooShort {
        length: usize,
    },
    UnknownCountry(String),
    LengthMismatch {
        country: String,
        expected: usize,
        actual: usize,
    },
    IllegalCharacter(char),
    ChecksumFailed {
        remainder: u32,
    },
}

impl IbanError {
    /// Stable name of the failure category, used as a report key.
    pub fn kind(&self) -> &'static str {
        match self {
            IbanError::TooShort { .. } => "too-short",
            IbanError::UnknownCountry(_) => "unknown-country",
            IbanError::LengthMismatch { .. } => "length-mismatch",
            IbanError::IllegalCharacter(_) => "illegal-character",
            IbanError::ChecksumFailed { .. } => "checksum-failed",
        }
    }
}

impl fmt::Display for IbanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IbanError::TooShort { length } => write!(
                f,
                "IBAN is too short ({} characters, minimum {})",
                length, MIN_IBAN_LENGTH
            ),
            IbanError::UnknownCountry(code) => {
                write!(f, "IBAN country code '{}' is not supported", code)
            }
            IbanError::LengthMismatch {
                country,
                expected,
                actual,
            } => write!(
                f,
                "IBAN length {} does not match {} specification ({})",
                actual, country, expected
            ),
            IbanError::IllegalCharacter(ch) => {
                write!(f, "IBAN contains invalid character {:?}", ch)
            }
            IbanError::ChecksumFailed { remainder } => write!(
                f,
                "IBAN check digits are invalid (mod 97 = {}, expected 1)",
                remainder
            ),
        }
    }
}

impl std::error::Error for IbanError {}

/// Normalized pieces of an IBAN that passed every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IbanParts {
    pub country_code: String,
    pub check_digits: String,
    pub bban: String,
}

impl IbanParts {
    pub fn electronic(&self) -> String {
        format!("{}{}{}", self.country_code, self.check_digits, self.bban)
    }
}

/// Strips space characters and uppercases ASCII letters. Non-ASCII characters
/// are kept as-is so the checksum step rejects them.
pub fn normalize_iban(input: &str) -> String {
    input
        .chars()
        .filter(|ch| *ch != ' ')
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

pub fn validate_iban(input: &str) -> Result<IbanParts, IbanError> {
    let result = validate_normalized(&normalize_iban(input));
    if let Err(err) = &result {
        log::trace!("IBAN candidate rejected: {}", err.kind());
    }
    result
}

pub fn is_valid_iban(input: &str) -> bool {
    validate_iban(input).is_ok()
}

fn validate_normalized(iban: &str) -> Result<IbanParts, IbanError> {
    let length = iban.chars().count();
    if length < MIN_IBAN_LENGTH {
        return Err(IbanError::TooShort { length });
    }

    let country: String = iban.chars().take(2).collect();
    let Some(expected) = iban_length(&country) else {
        return Err(IbanError::UnknownCountry(country));
    };
    if length != expected {
        return Err(IbanError::LengthMismatch {
            country,
            expected,
            actual: length,
        });
    }

    let rearranged = iban.chars().skip(4).chain(iban.chars().take(4));
    let remainder = mod97_remainder(rearranged)?;
    if remainder != 1 {
        return Err(IbanError::ChecksumFailed { remainder });
    }

    Ok(IbanParts {
        country_code: country,
        check_digits: iban.chars().skip(2).take(2).collect(),
        bban: iban.chars().skip(4).collect(),
    })
}
