//! Per-category amount mapping
//!
//! `Breakdown` keeps categories in the order they were first added, which is
//! what breaks ties when picking the largest category.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::{Category, Money};

/// Ordered mapping from category to summed amount
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breakdown {
    entries: Vec<(Category, Money)>,
}

impl Breakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `category`, appending the category if it is new
    pub fn add(&mut self, category: Category, amount: Money) {
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((category, amount)),
        }
    }

    pub fn get(&self, category: Category) -> Option<Money> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, amount)| *amount)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (Category, Money)> + '_ {
        self.entries.iter().copied()
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.iter().map(|(c, _)| *c)
    }

    /// Sum of all amounts
    pub fn total(&self) -> Money {
        self.entries.iter().map(|(_, amount)| *amount).sum()
    }

    /// Entries sorted by amount, largest first; ties keep insertion order
    pub fn sorted_desc(&self) -> Vec<(Category, Money)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

impl FromIterator<(Category, Money)> for Breakdown {
    fn from_iter<I: IntoIterator<Item = (Category, Money)>>(iter: I) -> Self {
        let mut breakdown = Breakdown::new();
        for (category, amount) in iter {
            breakdown.add(category, amount);
        }
        breakdown
    }
}

impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, amount) in &self.entries {
            map.serialize_entry(category.name(), amount)?;
        }
        map.end()
    }
}
