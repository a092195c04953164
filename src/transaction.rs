// Transaction records and CSV ingest
// Records are immutable values: "updates" construct a new record and leave
// the original untouched.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// An immutable ledger entry.
///
/// Amounts are non-negative currency values. Sequence order is insertion
/// order; it matters for first-match access and is irrelevant for the
/// aggregate operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub customer_id: String,
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(date: NaiveDate, customer_id: impl Into<String>, amount: Decimal) -> Self {
        Transaction {
            date,
            customer_id: customer_id.into(),
            amount,
        }
    }

    /// Copy-with-update: same record, corrected amount.
    pub fn with_amount(&self, amount: Decimal) -> Self {
        Transaction {
            amount,
            ..self.clone()
        }
    }

    /// Copy-with-update: same record, corrected date.
    pub fn with_date(&self, date: NaiveDate) -> Self {
        Transaction {
            date,
            ..self.clone()
        }
    }

    /// Copy-with-update: same record, reassigned customer.
    pub fn with_customer_id(&self, customer_id: impl Into<String>) -> Self {
        Transaction {
            customer_id: customer_id.into(),
            ..self.clone()
        }
    }
}

/// Load transactions from a `date,customer_id,amount` CSV file.
///
/// Dates are `YYYY-MM-DD`, a header row is required, and rows stay in file
/// order. A row that violates the non-negative-amount invariant or fails to
/// parse aborts the load with its line number.
pub fn load_csv(path: &Path) -> Result<Vec<Transaction>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let mut transactions = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let line = row + 2; // +2 because: 1-indexed + header row
        let record =
            result.with_context(|| format!("Failed to parse CSV line {line}"))?;

        let date_field = record.get(0).unwrap_or("").trim();
        let customer_field = record.get(1).unwrap_or("").trim();
        let amount_field = record.get(2).unwrap_or("").trim();

        let date = NaiveDate::parse_from_str(date_field, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{date_field}' on line {line}"))?;

        let amount = Decimal::from_str(amount_field)
            .with_context(|| format!("Invalid amount '{amount_field}' on line {line}"))?;

        if amount.is_sign_negative() {
            bail!("Negative amount {amount} on line {line}");
        }

        if customer_field.is_empty() {
            bail!("Empty customer id on line {line}");
        }

        transactions.push(Transaction::new(date, customer_field, amount));
    }

    debug!(path = %path.display(), count = transactions.len(), "loaded transactions");
    Ok(transactions)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn amount(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn test_with_amount_leaves_original_unchanged() {
        let original = Transaction::new(date(2024, 8, 2), "Acme", amount("2400.00"));
        let corrected = original.with_amount(amount("2450.00"));

        assert_eq!(original.amount, amount("2400.00"));
        assert_eq!(corrected.amount, amount("2450.00"));
        assert_eq!(corrected.customer_id, "Acme");
        assert_eq!(corrected.date, original.date);
    }

    #[test]
    fn test_with_customer_id_and_date() {
        let original = Transaction::new(date(2024, 8, 2), "Acme", amount("2400.00"));

        let moved = original.with_date(date(2024, 8, 5));
        assert_eq!(moved.date, date(2024, 8, 5));
        assert_eq!(original.date, date(2024, 8, 2));

        let reassigned = original.with_customer_id("LoonyTunes");
        assert_eq!(reassigned.customer_id, "LoonyTunes");
        assert_eq!(original.customer_id, "Acme");
    }

    #[test]
    fn test_load_csv_keeps_file_order() {
        let file = write_csv(
            "date,customer_id,amount\n\
             2024-08-02,Acme,2400.00\n\
             2024-08-03,LoonyTunes,1500.00\n\
             2024-08-03,Acme,1800.00\n",
        );

        let transactions = load_csv(file.path()).unwrap();

        assert_eq!(transactions.len(), 3);
        assert_eq!(transactions[0].customer_id, "Acme");
        assert_eq!(transactions[0].amount, amount("2400.00"));
        assert_eq!(transactions[1].customer_id, "LoonyTunes");
        assert_eq!(transactions[2].date, date(2024, 8, 3));
    }

    #[test]
    fn test_load_csv_rejects_negative_amount() {
        let file = write_csv(
            "date,customer_id,amount\n\
             2024-08-02,Acme,-5.00\n",
        );

        let err = load_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_load_csv_reports_bad_date_line() {
        let file = write_csv(
            "date,customer_id,amount\n\
             2024-08-02,Acme,2400.00\n\
             08/03/2024,LoonyTunes,1500.00\n",
        );

        let err = load_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_load_csv_missing_file() {
        let result = load_csv(Path::new("no-such-ledger.csv"));
        assert!(result.is_err());
    }
}
