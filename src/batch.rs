use crate::models::IbanCheckRecord;
use crate::validation::validate_iban;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub by_reason: BTreeMap<&'static str, usize>,
    pub valid_by_country: BTreeMap<String, usize>,
}

impl BatchReport {
    pub fn reason_count(&self, kind: &str) -> usize {
        self.by_reason.get(kind).copied().unwrap_or(0)
    }
}

/// Reads the named column of a CSV file with a header row.
pub fn read_ibans(path: &Path, column: &str) -> Result<Vec<String>, String> {
    let mut reader = csv::Reader::from_path(path).map_err(|err| err.to_string())?;
    let headers = reader.headers().map_err(|err| err.to_string())?;
    let index = headers
        .iter()
        .position(|header| header.trim() == column)
        .ok_or_else(|| format!("column '{}' not found in {}", column, path.display()))?;

    let mut ibans = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|err| err.to_string())?;
        ibans.push(record.get(index).unwrap_or_default().to_string());
    }
    Ok(ibans)
}

pub fn check_ibans<S: AsRef<str>>(ibans: &[S]) -> (BatchReport, Vec<IbanCheckRecord>) {
    let mut report = BatchReport::default();
    let mut rows = Vec::with_capacity(ibans.len());

    for iban in ibans {
        let iban = iban.as_ref();
        report.total += 1;
        match validate_iban(iban) {
            Ok(parts) => {
                report.valid += 1;
                *report
                    .valid_by_country
                    .entry(parts.country_code.clone())
                    .or_insert(0) += 1;
                rows.push(IbanCheckRecord {
                    iban: iban.to_string(),
                    valid: true,
                    reason: None,
                    country: Some(parts.country_code),
                });
            }
            Err(err) => {
                report.invalid += 1;
                *report.by_reason.entry(err.kind()).or_insert(0) += 1;
                rows.push(IbanCheckRecord {
                    iban: iban.to_string(),
                    valid: false,
                    reason: Some(err.to_string()),
                    country: None,
                });
            }
        }
    }

    (report, rows)
}

pub fn check_csv(
    input: &Path,
    column: &str,
    output: Option<&Path>,
) -> Result<BatchReport, String> {
    let ibans = read_ibans(input, column)?;
    let (report, rows) = check_ibans(&ibans);

    if let Some(output) = output {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| err.to_string())?;
            }
        }
        let mut writer = csv::Writer::from_path(output).map_err(|err| err.to_string())?;
        for row in rows {
            writer.serialize(row).map_err(|err| err.to_string())?;
        }
        writer.flush().map_err(|err| err.to_string())?;
    }

    Ok(report)
}
