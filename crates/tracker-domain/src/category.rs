//! Fixed income and expense vocabularies plus the category normalizer.
//!
//! Stored category strings carry a decorative glyph in front of the name
//! (`"🏦 Salary"`). Existing sheets depend on those exact labels, so
//! [`Category::label`] reproduces them byte for byte.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::transaction::TransactionType;

/// Trailing run of word and space characters. Marks are excluded so that
/// emoji variation selectors never leak into the key.
static TRAILING_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{Alphabetic}\p{Nd}\p{Pc}\s]+$").expect("static category pattern is valid")
});

/// Reduces a raw category label to its lowercase descriptive phrase.
///
/// `"🔧 Car Repairs/Maintenance"` becomes `"maintenance"`. Returns `None`
/// when the label has no trailing phrase.
pub fn normalize_category(raw: &str) -> Option<String> {
    let found = TRAILING_PHRASE.find(raw)?;
    let key = found.as_str().to_lowercase().trim().to_string();
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeCategory {
    Bonus,
    DailyEarnings,
    Freelance,
    OtherIncome,
    Salary,
    Savings,
}

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 6] = [
        IncomeCategory::Bonus,
        IncomeCategory::DailyEarnings,
        IncomeCategory::Freelance,
        IncomeCategory::OtherIncome,
        IncomeCategory::Salary,
        IncomeCategory::Savings,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IncomeCategory::Bonus => "Bonus",
            IncomeCategory::DailyEarnings => "Daily Earnings",
            IncomeCategory::Freelance => "Freelance",
            IncomeCategory::OtherIncome => "Other Income",
            IncomeCategory::Salary => "Salary",
            IncomeCategory::Savings => "Savings",
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            IncomeCategory::Bonus => "💼",
            IncomeCategory::DailyEarnings | IncomeCategory::Freelance => "💰",
            IncomeCategory::OtherIncome => "💵",
            IncomeCategory::Salary => "🏦",
            IncomeCategory::Savings => "💎",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    CarRepairsMaintenance,
    Entertainment,
    Food,
    Gas,
    Shopping,
    Subscriptions,
    Travel,
    Utilities,
    OtherExpense,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 9] = [
        ExpenseCategory::CarRepairsMaintenance,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Food,
        ExpenseCategory::Gas,
        ExpenseCategory::Shopping,
        ExpenseCategory::Subscriptions,
        ExpenseCategory::Travel,
        ExpenseCategory::Utilities,
        ExpenseCategory::OtherExpense,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExpenseCategory::CarRepairsMaintenance => "Car Repairs/Maintenance",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Gas => "Gas",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Subscriptions => "Subscriptions",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::OtherExpense => "Other Expense",
        }
    }

    // Entertainment, Food and Shopping keep their U+FE0F variation selector.
    fn glyph(self) -> &'static str {
        match self {
            ExpenseCategory::CarRepairsMaintenance => "🔧",
            ExpenseCategory::Entertainment => "\u{2615}\u{fe0f}",
            ExpenseCategory::Food => "\u{1f37d}\u{fe0f}",
            ExpenseCategory::Gas => "⛽",
            ExpenseCategory::Shopping => "\u{1f6cd}\u{fe0f}",
            ExpenseCategory::Subscriptions => "📺",
            ExpenseCategory::Travel => "🚗",
            ExpenseCategory::Utilities => "💡",
            ExpenseCategory::OtherExpense => "📦",
        }
    }
}

/// A category drawn from one of the two fixed vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Income(IncomeCategory),
    Expense(ExpenseCategory),
}

impl Category {
    /// Returns every category that may be paired with `kind`, in menu order.
    pub fn vocabulary(kind: TransactionType) -> Vec<Category> {
        match kind {
            TransactionType::Income => IncomeCategory::ALL
                .iter()
                .copied()
                .map(Category::Income)
                .collect(),
            TransactionType::Expense => ExpenseCategory::ALL
                .iter()
                .copied()
                .map(Category::Expense)
                .collect(),
        }
    }

    pub fn kind(self) -> TransactionType {
        match self {
            Category::Income(_) => TransactionType::Income,
            Category::Expense(_) => TransactionType::Expense,
        }
    }

    /// Plain descriptive name without the glyph.
    pub fn name(self) -> &'static str {
        match self {
            Category::Income(category) => category.name(),
            Category::Expense(category) => category.name(),
        }
    }

    /// The label as stored in the ledger, glyph included.
    pub fn label(self) -> String {
        let glyph = match self {
            Category::Income(category) => category.glyph(),
            Category::Expense(category) => category.glyph(),
        };
        format!("{} {}", glyph, self.name())
    }

    /// Resolves a category within `kind`'s vocabulary.
    ///
    /// Accepts the stored label, or the plain name in any case with `-` or `_`
    /// standing in for spaces (`daily-earnings`).
    pub fn parse_for(kind: TransactionType, raw: &str) -> Option<Category> {
        let wanted = plain_name(raw);
        Category::vocabulary(kind).into_iter().find(|category| {
            category.label() == raw.trim() || category.name().to_lowercase() == wanted
        })
    }

    /// Resolves a category from either vocabulary.
    pub fn parse(raw: &str) -> Option<Category> {
        Category::parse_for(TransactionType::Income, raw)
            .or_else(|| Category::parse_for(TransactionType::Expense, raw))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn plain_name(raw: &str) -> String {
    raw.trim_start_matches(|ch: char| !ch.is_alphanumeric())
        .trim()
        .chars()
        .map(|ch| if matches!(ch, '-' | '_') { ' ' } else { ch })
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizer_strips_glyph_and_lowercases() {
        assert_eq!(normalize_category("🏦 Salary").as_deref(), Some("salary"));
        assert_eq!(
            normalize_category("💰 Daily Earnings").as_deref(),
            Some("daily earnings")
        );
        assert_eq!(normalize_category("  Food  ").as_deref(), Some("food"));
    }

    #[test]
    fn normalizer_keeps_only_the_trailing_phrase() {
        assert_eq!(
            normalize_category("🔧 Car Repairs/Maintenance").as_deref(),
            Some("maintenance")
        );
    }

    #[test]
    fn normalizer_ignores_variation_selectors() {
        let label = Category::Expense(ExpenseCategory::Entertainment).label();
        assert_eq!(normalize_category(&label).as_deref(), Some("entertainment"));
    }

    #[test]
    fn normalizer_returns_none_without_phrase() {
        assert_eq!(normalize_category(""), None);
        assert_eq!(normalize_category("💼"), None);
        assert_eq!(normalize_category("💼   "), None);
        assert_eq!(normalize_category("Food/"), None);
    }

    #[test]
    fn labels_match_stored_vocabulary() {
        assert_eq!(Category::Income(IncomeCategory::Salary).label(), "🏦 Salary");
        assert_eq!(
            Category::Expense(ExpenseCategory::Food).label(),
            "\u{1f37d}\u{fe0f} Food"
        );
        assert_eq!(
            Category::Expense(ExpenseCategory::CarRepairsMaintenance).label(),
            "🔧 Car Repairs/Maintenance"
        );
    }

    #[test]
    fn vocabularies_are_disjoint_and_sized() {
        let income = Category::vocabulary(TransactionType::Income);
        let expense = Category::vocabulary(TransactionType::Expense);
        assert_eq!(income.len(), 6);
        assert_eq!(expense.len(), 9);
        assert!(income.iter().all(|c| !expense.contains(c)));
        assert!(income.iter().all(|c| c.kind() == TransactionType::Income));
    }

    #[test]
    fn parse_accepts_label_and_plain_names() {
        let salary = Category::Income(IncomeCategory::Salary);
        assert_eq!(Category::parse("🏦 Salary"), Some(salary));
        assert_eq!(Category::parse("salary"), Some(salary));
        assert_eq!(
            Category::parse("daily-earnings"),
            Some(Category::Income(IncomeCategory::DailyEarnings))
        );
        assert_eq!(
            Category::parse("car repairs/maintenance"),
            Some(Category::Expense(ExpenseCategory::CarRepairsMaintenance))
        );
    }

    #[test]
    fn parse_for_rejects_categories_of_the_other_type() {
        assert_eq!(Category::parse_for(TransactionType::Expense, "Salary"), None);
        assert_eq!(Category::parse_for(TransactionType::Income, "Food"), None);
        assert_eq!(Category::parse("Groceries"), None);
    }
}
