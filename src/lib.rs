//! IBAN validation: per-country length rules and the ISO 7064 mod-97 check.
//!
//! ```
//! assert!(iban_check::is_valid_iban("GB82 WEST 1234 5698 7654 32"));
//! assert!(!iban_check::is_valid_iban("GB82 WEST 1234 5698 7654 33"));
//! ```

pub mod batch;
pub mod checksum;
pub mod logging;
pub mod models;
pub mod mutate;
pub mod reference;
pub mod validation;

pub use reference::iban_length;
pub use validation::{is_valid_iban, normalize_iban, validate_iban, IbanError, IbanParts};
