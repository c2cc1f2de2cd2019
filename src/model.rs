// 💰 Budget Entries - Income and expense record types
// Fixed category/priority enumerations plus the two immutable entry values

use serde::{Deserialize, Serialize};

// ============================================================================
// EXPENSE CATEGORY
// ============================================================================

/// Fixed set of expense categories offered by the input form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Housing (Rent/Mortgage)")]
    Housing,
    Utilities,
    Transportation,
    #[serde(rename = "Food & Groceries")]
    Food,
    Insurance,
    #[serde(rename = "Debt Payments")]
    DebtPayments,
    Entertainment,
    Subscriptions,
    Healthcare,
    Savings,
    Other,
}

impl Category {
    /// All categories, in the order the form presents them
    pub const ALL: [Category; 11] = [
        Category::Housing,
        Category::Utilities,
        Category::Transportation,
        Category::Food,
        Category::Insurance,
        Category::DebtPayments,
        Category::Entertainment,
        Category::Subscriptions,
        Category::Healthcare,
        Category::Savings,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Housing => "Housing (Rent/Mortgage)",
            Category::Utilities => "Utilities",
            Category::Transportation => "Transportation",
            Category::Food => "Food & Groceries",
            Category::Insurance => "Insurance",
            Category::DebtPayments => "Debt Payments",
            Category::Entertainment => "Entertainment",
            Category::Subscriptions => "Subscriptions",
            Category::Healthcare => "Healthcare",
            Category::Savings => "Savings",
            Category::Other => "Other",
        }
    }

    /// Next category in form order (wraps around)
    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Previous category in form order (wraps around)
    pub fn previous(&self) -> Self {
        let i = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ============================================================================
// EXPENSE PRIORITY
// ============================================================================

/// Expense priority, ordered Low < Medium < High < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// All priorities, in the order the form slider presents them
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    /// Fixed ordering for summary rows and charts: most urgent first
    pub const DISPLAY_ORDER: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }

    /// Next priority in form order (wraps around)
    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Previous priority in form order (wraps around)
    pub fn previous(&self) -> Self {
        let i = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ============================================================================
// ENTRIES
// ============================================================================

/// A single income source added by the user
///
/// Immutable once stored; the add boundary guarantees a non-empty name and a
/// positive amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub name: String,
    pub amount: f64,
}

/// A single monthly expense added by the user
///
/// Same boundary guarantees as [`IncomeEntry`]; category and priority are
/// always members of their fixed enumerations by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub category: Category,
    pub name: String,
    pub amount: f64,
    pub priority: Priority,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::ALL.len(), 11);
        assert_eq!(Category::Housing.as_str(), "Housing (Rent/Mortgage)");
        assert_eq!(Category::Food.as_str(), "Food & Groceries");
        assert_eq!(Category::Other.as_str(), "Other");
    }

    #[test]
    fn test_category_cycling_wraps() {
        assert_eq!(Category::Housing.previous(), Category::Other);
        assert_eq!(Category::Other.next(), Category::Housing);

        let mut c = Category::Housing;
        for _ in 0..Category::ALL.len() {
            c = c.next();
        }
        assert_eq!(c, Category::Housing);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Critical);
    }

    #[test]
    fn test_priority_display_order_is_most_urgent_first() {
        assert_eq!(
            Priority::DISPLAY_ORDER,
            [
                Priority::Critical,
                Priority::High,
                Priority::Medium,
                Priority::Low
            ]
        );
    }

    #[test]
    fn test_priority_cycling_wraps() {
        assert_eq!(Priority::Low.previous(), Priority::Critical);
        assert_eq!(Priority::Critical.next(), Priority::Low);
    }
}
