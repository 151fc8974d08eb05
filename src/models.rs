use serde::{Deserialize, Serialize};

/// One row of a batch check result file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IbanCheckRecord {
    pub iban: String,
    pub valid: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}
