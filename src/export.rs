// 📥 CSV Export - Download of the raw income and expense tables
// Column headers match the entry fields; filenames embed the export date

use crate::store::BudgetStore;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Filename for an income export on the given date: `income_YYYYMMDD.csv`
pub fn income_filename(date: NaiveDate) -> String {
    format!("income_{}.csv", date.format("%Y%m%d"))
}

/// Filename for an expense export on the given date: `expenses_YYYYMMDD.csv`
pub fn expenses_filename(date: NaiveDate) -> String {
    format!("expenses_{}.csv", date.format("%Y%m%d"))
}

/// Render the income table as CSV (`name,amount`), rows in insertion order
pub fn income_csv(store: &BudgetStore) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    for entry in store.income_sources() {
        writer
            .serialize(entry)
            .context("Failed to serialize income entry")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Render the expense table as CSV (`category,name,amount,priority`)
pub fn expenses_csv(store: &BudgetStore) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    for entry in store.expenses() {
        writer
            .serialize(entry)
            .context("Failed to serialize expense entry")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Write the income table into `dir` under the date-stamped name
pub fn export_income(store: &BudgetStore, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let path = dir.join(income_filename(date));
    let csv = income_csv(store)?;
    std::fs::write(&path, csv).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Write the expense table into `dir` under the date-stamped name
pub fn export_expenses(store: &BudgetStore, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let path = dir.join(expenses_filename(date));
    let csv = expenses_csv(store)?;
    std::fs::write(&path, csv).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Priority};

    #[test]
    fn test_filenames_embed_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        assert_eq!(income_filename(date), "income_20240307.csv");
        assert_eq!(expenses_filename(date), "expenses_20240307.csv");
    }

    #[test]
    fn test_income_csv_headers_and_rows() {
        let mut store = BudgetStore::new();
        store.add_income("Salary", 5000.0).unwrap();
        store.add_income("Freelance", 800.5).unwrap();

        let csv = income_csv(&store).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("name,amount"));
        assert_eq!(lines.next(), Some("Salary,5000.0"));
        assert_eq!(lines.next(), Some("Freelance,800.5"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_expenses_csv_headers_and_rows() {
        let mut store = BudgetStore::new();
        store
            .add_expense(Category::Housing, "Rent", 1500.0, Priority::Critical)
            .unwrap();
        store
            .add_expense(Category::Food, "Groceries", 400.0, Priority::High)
            .unwrap();

        let csv = expenses_csv(&store).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("category,name,amount,priority"));
        assert_eq!(
            lines.next(),
            Some("Housing (Rent/Mortgage),Rent,1500.0,Critical")
        );
        assert_eq!(lines.next(), Some("Food & Groceries,Groceries,400.0,High"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_store_exports_header_only() {
        let store = BudgetStore::new();

        // Nothing serialized, so no header row is ever written
        assert_eq!(income_csv(&store).unwrap(), "");
        assert_eq!(expenses_csv(&store).unwrap(), "");
    }

    #[test]
    fn test_export_writes_files() {
        let mut store = BudgetStore::new();
        store.add_income("Salary", 5000.0).unwrap();

        let dir = std::env::temp_dir();
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        let path = export_income(&store, &dir, date).unwrap();
        assert!(path.ends_with("income_20240307.csv"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("name,amount"));

        std::fs::remove_file(path).unwrap();
    }
}
