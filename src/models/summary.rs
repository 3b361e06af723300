//! Wire shape of the record store's dashboard summary endpoint

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::expense::Expense;
use super::money::Money;

/// One point of the store-computed monthly trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTrendPoint {
    #[serde(alias = "label", alias = "week", alias = "day")]
    pub month: String,
    #[serde(default, alias = "amount")]
    pub total: Money,
}

/// Category name to amount, in the order the store listed them
///
/// The order decides ties between equally large categories. Keys are kept
/// as the store spelled them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedAmounts(Vec<(String, Money)>);

impl NamedAmounts {
    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.0.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    /// The first amount listed under `name`
    pub fn get(&self, name: &str) -> Option<Money> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, amount)| *amount)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Money)> for NamedAmounts {
    fn from_iter<I: IntoIterator<Item = (String, Money)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for NamedAmounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, amount) in &self.0 {
            map.serialize_entry(name, amount)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NamedAmounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = NamedAmounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of category amounts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, amount)) = access.next_entry::<String, Money>()? {
                    entries.push((name, amount));
                }
                Ok(NamedAmounts(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Dashboard summary as returned by `GET /api/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_spent: Money,

    #[serde(default)]
    pub category_breakdown: NamedAmounts,

    #[serde(default)]
    pub monthly_trend: Vec<SummaryTrendPoint>,

    #[serde(default, alias = "top_expenses")]
    pub recent_expenses: Vec<Expense>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_budget: Option<NamedAmounts>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_store_summary() {
        let json = r#"{
            "total_spent": 4200,
            "category_breakdown": {"Food": 2200, "Transport": 2000},
            "monthly_trend": [{"month": "Oct", "total": 12000}, {"month": "Nov", "total": 15000.5}],
            "recent_expenses": [
                {"id": "a", "description": "Groceries", "category": "Food", "amount": 850, "date": "2024-12-01"}
            ]
        }"#;
        let summary: DashboardSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_spent, Money::from_units(4200));
        assert_eq!(summary.category_breakdown.get("Food"), Some(Money::from_units(2200)));
        assert_eq!(summary.monthly_trend[1].total.cents(), 1500050);
        assert_eq!(summary.recent_expenses.len(), 1);
        assert!(summary.remaining_budget.is_none());
    }

    #[test]
    fn test_accepts_top_expenses_alias() {
        let json = r#"{"total_spent": 0, "top_expenses": [], "remaining_budget": {"Food": -50}}"#;
        let summary: DashboardSummary = serde_json::from_str(json).unwrap();
        assert!(summary.recent_expenses.is_empty());
        assert_eq!(
            summary.remaining_budget.unwrap().get("Food"),
            Some(Money::from_units(-50))
        );
    }

    #[test]
    fn test_category_order_is_kept() {
        let json = r#"{"category_breakdown": {"Transport": 100, "Food": 100, "Education": 5}}"#;
        let summary: DashboardSummary = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = summary.category_breakdown.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Transport", "Food", "Education"]);

        let round_trip = serde_json::to_string(&summary.category_breakdown).unwrap();
        assert_eq!(round_trip, r#"{"Transport":100,"Food":100,"Education":5}"#);
    }
}
