use crate::batch::read_ibans;
use crate::validation::{is_valid_iban, validate_iban, IbanParts};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;

const DIGITS: &[u8] = b"0123456789";
const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeSummary {
    pub sources: usize,
    pub skipped: usize,
    pub trials: usize,
    pub detected: usize,
}

impl ProbeSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn detection_rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.detected as f64 / self.trials as f64
    }
}

/// Replaces one random BBAN character with a different character of the same
/// class (digit for digit, letter for letter) and returns the electronic form.
pub fn mutate_bban<R: Rng + ?Sized>(parts: &IbanParts, rng: &mut R) -> Option<String> {
    let mut bban: Vec<u8> = parts.bban.bytes().collect();
    if bban.is_empty() {
        return None;
    }
    let position = rng.gen_range(0..bban.len());
    let current = bban[position];
    let charset = if current.is_ascii_digit() {
        DIGITS
    } else if current.is_ascii_uppercase() {
        LETTERS
    } else {
        return None;
    };
    let current_idx = charset.iter().position(|ch| *ch == current)?;
    let mut idx = rng.gen_range(0..charset.len() - 1);
    if idx >= current_idx {
        idx += 1;
    }
    bban[position] = charset[idx];

    let bban = String::from_utf8(bban).ok()?;
    Some(format!("{}{}{}", parts.country_code, parts.check_digits, bban))
}

pub fn probe_ibans<S: AsRef<str>>(
    ibans: &[S],
    trials_per_iban: usize,
    seed: u64,
) -> ProbeSummary {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut summary = ProbeSummary::new();

    for iban in ibans {
        let Ok(parts) = validate_iban(iban.as_ref()) else {
            summary.skipped += 1;
            continue;
        };
        summary.sources += 1;
        for _ in 0..trials_per_iban {
            let Some(mutated) = mutate_bban(&parts, &mut rng) else {
                continue;
            };
            summary.trials += 1;
            if !is_valid_iban(&mutated) {
                summary.detected += 1;
            }
        }
    }

    summary
}

pub fn probe_csv(
    input: &Path,
    column: &str,
    trials_per_iban: usize,
    seed: u64,
) -> Result<ProbeSummary, String> {
    if trials_per_iban == 0 {
        return Err("trials must be at least 1".to_string());
    }
    let ibans = read_ibans(input, column)?;
    let summary = probe_ibans(&ibans, trials_per_iban, seed);
    if summary.sources == 0 {
        return Err(format!("no valid IBANs found in {}", input.display()));
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "GB82WEST12345698765432",
        "DE89370400440532013000",
        "FR1420041010050500013M02606",
        "NL91ABNA0417164300",
        "MT84MALT011000012345MTLCAST001S",
        "NO9386011117947",
        "QA58DOHB00001234567890ABCDEFG",
    ];

    #[test]
    fn mutation_changes_exactly_one_bban_character() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for sample in SAMPLES {
            let parts = validate_iban(sample).unwrap();
            for _ in 0..50 {
                let mutated = mutate_bban(&parts, &mut rng).unwrap();
                assert_eq!(mutated.len(), sample.len());
                assert_eq!(&mutated[..4], &sample[..4]);
                let diffs: Vec<(u8, u8)> = mutated
                    .bytes()
                    .zip(sample.bytes())
                    .filter(|(a, b)| a != b)
                    .collect();
                assert_eq!(diffs.len(), 1, "{sample} -> {mutated}");
                let (new, old) = diffs[0];
                assert_eq!(new.is_ascii_digit(), old.is_ascii_digit());
            }
        }
    }

    #[test]
    fn single_character_mutations_are_detected() {
        let summary = probe_ibans(SAMPLES, 200, 42);
        assert_eq!(summary.sources, SAMPLES.len());
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.trials, SAMPLES.len() * 200);
        assert!(summary.detection_rate() >= 0.95, "{summary:?}");
    }

    #[test]
    fn every_single_digit_substitution_fails_checksum() {
        let sample = "GB82WEST12345698765432";
        for position in 8..sample.len() {
            for digit in DIGITS {
                let mut bytes = sample.as_bytes().to_vec();
                if bytes[position] == *digit {
                    continue;
                }
                bytes[position] = *digit;
                let mutated = String::from_utf8(bytes).unwrap();
                assert!(!is_valid_iban(&mutated), "{mutated}");
            }
        }
    }

    #[test]
    fn invalid_sources_are_skipped() {
        let ibans = ["GB82WEST12345698765433", "", "DE89370400440532013000"];
        let summary = probe_ibans(&ibans, 10, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.sources, 1);
        assert_eq!(summary.trials, 10);
    }

    #[test]
    fn same_seed_same_summary() {
        assert_eq!(probe_ibans(SAMPLES, 25, 9), probe_ibans(SAMPLES, 25, 9));
    }

    #[test]
    fn empty_probe_has_zero_rate() {
        let empty: [&str; 0] = [];
        assert_eq!(probe_ibans(&empty, 10, 1).detection_rate(), 0.0);
    }
}
