use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session cart: product id to quantity, in the order lines were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: IndexMap<Uuid, i32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `qty` to the line. Non-positive quantities are ignored.
    pub fn add(&mut self, product_id: Uuid, qty: i32) {
        if qty <= 0 {
            return;
        }
        let line = self.lines.entry(product_id).or_insert(0);
        *line = line.saturating_add(qty);
    }

    /// Replaces every line with the given quantities, dropping any that are zero or negative.
    pub fn set_lines<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = (Uuid, i32)>,
    {
        self.lines = lines.into_iter().filter(|(_, qty)| *qty > 0).collect();
    }

    pub fn remove(&mut self, product_id: Uuid) {
        self.lines.shift_remove(&product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn quantity(&self, product_id: Uuid) -> Option<i32> {
        self.lines.get(&product_id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> i64 {
        self.lines.values().map(|qty| i64::from(*qty)).sum()
    }

    pub fn product_ids(&self) -> Vec<Uuid> {
        self.lines.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Uuid, i32)> + '_ {
        self.lines.iter().map(|(id, qty)| (*id, *qty))
    }
}
