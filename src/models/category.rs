//! Expense categories
//!
//! The category set is closed. Expenses, budgets, filters and reports all use
//! this one enum, so a category name is spelled in exactly one place.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Housing,
    Healthcare,
    Education,
    Shopping,
    Utilities,
    /// Also the bucket for records whose category is missing or unknown
    #[default]
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Housing,
        Category::Healthcare,
        Category::Education,
        Category::Shopping,
        Category::Utilities,
        Category::Other,
    ];

    /// Category pre-selected for a new expense
    pub const NEW_EXPENSE_DEFAULT: Category = Category::Food;

    /// The display and wire name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Housing => "Housing",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Shopping => "Shopping",
            Self::Utilities => "Utilities",
            Self::Other => "Other",
        }
    }

    /// Resolve a stored or user-supplied name, falling back to `Other`
    pub fn from_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    /// Case-insensitive; accepts the backend's "Transportation" spelling
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        if needle.eq_ignore_ascii_case("transportation") {
            return Ok(Self::Transport);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CategoryParseError(needle.to_string()))
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::from_lenient).unwrap_or_default())
    }
}

/// Error returned when a name is not one of the known categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
        write!(
            f,
            "Unknown category '{}'; expected one of: {}",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for CategoryParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!("FOOD".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(" Utilities ".parse::<Category>().unwrap(), Category::Utilities);
        assert_eq!("Transportation".parse::<Category>().unwrap(), Category::Transport);
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_tolerant_deserialization() {
        let c: Category = serde_json::from_str("\"Food\"").unwrap();
        assert_eq!(c, Category::Food);
        let c: Category = serde_json::from_str("\"Gadgets\"").unwrap();
        assert_eq!(c, Category::Other);
        let c: Category = serde_json::from_str("null").unwrap();
        assert_eq!(c, Category::Other);
    }

    #[test]
    fn test_serialize_name() {
        assert_eq!(serde_json::to_string(&Category::Healthcare).unwrap(), "\"Healthcare\"");
    }

    #[test]
    fn test_parse_error_lists_choices() {
        let err = "Toys".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("Food, Transport"));
    }
}
