//! # Rows
//!
//! A row is an ordered group of keys and nested rows together with the
//! policy that turns declared widths into positions.

use serde::{Deserialize, Serialize};

use super::key_spec::{KeySpec, WidthPolicy};

/// Rule for converting declared key widths into on-screen positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DistributionPolicy {
    /// Items keep their width and are packed from the left with a fixed
    /// spacing. The row is only as wide as its content.
    SelfSizing { spacing: f64 },
    /// The row takes the whole container width. Items keep their width and
    /// the gaps between them are equalized to consume the remaining space.
    FillEqualSpacing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowItem {
    Key(KeySpec),
    Row(Row),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    items: Vec<RowItem>,
    distribution: DistributionPolicy,
}

impl Row {
    pub fn new(distribution: DistributionPolicy, items: Vec<RowItem>) -> Self {
        Self {
            items,
            distribution,
        }
    }

    pub fn self_sizing(spacing: f64, items: Vec<RowItem>) -> Self {
        Self::new(DistributionPolicy::SelfSizing { spacing }, items)
    }

    pub fn fill_equal_spacing(items: Vec<RowItem>) -> Self {
        Self::new(DistributionPolicy::FillEqualSpacing, items)
    }

    /// Self-sizing row of keys only
    pub fn of_keys(spacing: f64, keys: impl IntoIterator<Item = KeySpec>) -> Self {
        Self::self_sizing(spacing, keys.into_iter().map(RowItem::Key).collect())
    }

    pub fn items(&self) -> &[RowItem] {
        &self.items
    }

    pub fn distribution(&self) -> DistributionPolicy {
        self.distribution
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keys in depth-first order, nested rows included
    pub fn keys(&self) -> Vec<&KeySpec> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys<'a>(&'a self, keys: &mut Vec<&'a KeySpec>) {
        for item in &self.items {
            match item {
                RowItem::Key(key) => keys.push(key),
                RowItem::Row(row) => row.collect_keys(keys),
            }
        }
    }

    pub fn key_count(&self) -> usize {
        self.keys().len()
    }

    /// Number of keys sized with the default letter width
    pub fn letter_count(&self) -> usize {
        self.keys()
            .into_iter()
            .filter(|key| key.width_policy() == WidthPolicy::Letter)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        Row::fill_equal_spacing(vec![
            RowItem::Key(KeySpec::CaseToggle),
            RowItem::Row(Row::of_keys(6.0, "zxc".chars().map(KeySpec::letter))),
            RowItem::Key(KeySpec::Backspace),
        ])
    }

    #[test]
    fn keys_should_flatten_nested_rows_in_order() {
        let row = sample_row();
        let keys = row.keys();

        assert_eq!(keys.len(), 5);
        assert_eq!(keys[0], &KeySpec::CaseToggle);
        assert_eq!(keys[1], &KeySpec::letter('z'));
        assert_eq!(keys[3], &KeySpec::letter('c'));
        assert_eq!(keys[4], &KeySpec::Backspace);
    }

    #[test]
    fn letter_count_should_ignore_special_keys() {
        assert_eq!(sample_row().letter_count(), 3);
        assert_eq!(sample_row().key_count(), 5);
    }

    #[test]
    fn of_keys_should_build_self_sizing_row() {
        let row = Row::of_keys(4.0, vec![KeySpec::letter('a')]);
        assert_eq!(row.distribution(), DistributionPolicy::SelfSizing { spacing: 4.0 });
        assert!(!row.is_empty());
    }
}
