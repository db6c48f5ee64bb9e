//! Grouping iterators into maps

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use crate::{Result, SatchelError};

/// Map-building adapters for any iterator
pub trait IteratorExt: Iterator + Sized {
    /// Group items under the key produced by `key`
    fn to_dictionary_many<K, F>(self, key: F) -> HashMap<K, Vec<Self::Item>>
    where
        K: Eq + Hash,
        F: FnMut(&Self::Item) -> K,
    {
        self.to_dictionary_many_by(key, |item| item)
    }

    /// Group the projected values under the key produced by `key`
    fn to_dictionary_many_by<K, V, FK, FV>(self, mut key: FK, mut value: FV) -> HashMap<K, Vec<V>>
    where
        K: Eq + Hash,
        FK: FnMut(&Self::Item) -> K,
        FV: FnMut(Self::Item) -> V,
    {
        let mut map: HashMap<K, Vec<V>> = HashMap::new();
        for item in self {
            map.add_to_dictionary(key(&item), value(item));
        }
        map
    }

    /// Like [`to_dictionary_many`](IteratorExt::to_dictionary_many) with ordered keys
    fn to_sorted_dictionary_many<K, F>(self, key: F) -> BTreeMap<K, Vec<Self::Item>>
    where
        K: Ord,
        F: FnMut(&Self::Item) -> K,
    {
        self.to_sorted_dictionary_many_by(key, |item| item)
    }

    fn to_sorted_dictionary_many_by<K, V, FK, FV>(self, mut key: FK, mut value: FV) -> BTreeMap<K, Vec<V>>
    where
        K: Ord,
        FK: FnMut(&Self::Item) -> K,
        FV: FnMut(Self::Item) -> V,
    {
        let mut map: BTreeMap<K, Vec<V>> = BTreeMap::new();
        for item in self {
            map.add_to_dictionary(key(&item), value(item));
        }
        map
    }

    /// Group items under two levels of keys
    fn to_two_level_dictionary_many<K1, K2, F1, F2>(
        self,
        mut first: F1,
        mut second: F2,
    ) -> HashMap<K1, HashMap<K2, Vec<Self::Item>>>
    where
        K1: Eq + Hash,
        K2: Eq + Hash,
        F1: FnMut(&Self::Item) -> K1,
        F2: FnMut(&Self::Item) -> K2,
    {
        let mut map: HashMap<K1, HashMap<K2, Vec<Self::Item>>> = HashMap::new();
        for item in self {
            let k1 = first(&item);
            let k2 = second(&item);
            map.add_nested(k1, k2, item);
        }
        map
    }

    /// One entry per key; items sharing a key are folded with `combine`
    fn to_dictionary_aggregate<K, FK, FC>(self, mut key: FK, mut combine: FC) -> HashMap<K, Self::Item>
    where
        K: Eq + Hash,
        FK: FnMut(&Self::Item) -> K,
        FC: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        let mut map: HashMap<K, Self::Item> = HashMap::new();
        for item in self {
            let k = key(&item);
            let merged = match map.remove(&k) {
                Some(existing) => combine(existing, item),
                None => item,
            };
            map.insert(k, merged);
        }
        map
    }

    /// One entry per key, failing with the offending key on a duplicate
    fn to_dictionary_explain<K, F>(self, mut key: F) -> Result<HashMap<K, Self::Item>>
    where
        K: Eq + Hash + Debug,
        F: FnMut(&Self::Item) -> K,
    {
        let mut map: HashMap<K, Self::Item> = HashMap::new();
        for item in self {
            let k = key(&item);
            if map.contains_key(&k) {
                return Err(SatchelError::DuplicateKey {
                    key: format!("{k:?}"),
                });
            }
            map.insert(k, item);
        }
        Ok(map)
    }

    /// One entry per key; the first item seen for a key wins
    fn to_dictionary_ignore_duplicates<K, F>(self, mut key: F) -> HashMap<K, Self::Item>
    where
        K: Eq + Hash,
        F: FnMut(&Self::Item) -> K,
    {
        let mut map: HashMap<K, Self::Item> = HashMap::new();
        for item in self {
            map.entry(key(&item)).or_insert(item);
        }
        map
    }
}

impl<I: Iterator> IteratorExt for I {}

/// Maps whose values are lists of items
pub trait MultiMapExt<K, V> {
    /// Append `value` to the list under `key`, creating the list when absent
    fn add_to_dictionary(&mut self, key: K, value: V);

    fn add_range<I, F>(&mut self, values: I, mut key: F)
    where
        I: IntoIterator<Item = V>,
        F: FnMut(&V) -> K,
    {
        for value in values {
            self.add_to_dictionary(key(&value), value);
        }
    }

    fn add_range_by<T, I, FK, FV>(&mut self, items: I, mut key: FK, mut value: FV)
    where
        I: IntoIterator<Item = T>,
        FK: FnMut(&T) -> K,
        FV: FnMut(T) -> V,
    {
        for item in items {
            let k = key(&item);
            self.add_to_dictionary(k, value(item));
        }
    }
}

impl<K: Eq + Hash, V> MultiMapExt<K, V> for HashMap<K, Vec<V>> {
    fn add_to_dictionary(&mut self, key: K, value: V) {
        self.entry(key).or_default().push(value);
    }
}

impl<K: Ord, V> MultiMapExt<K, V> for BTreeMap<K, Vec<V>> {
    fn add_to_dictionary(&mut self, key: K, value: V) {
        self.entry(key).or_default().push(value);
    }
}

/// Two-level grouped maps
pub trait TwoLevelExt<K1, K2, T> {
    fn add_nested(&mut self, first: K1, second: K2, item: T);

    /// Items stored under both keys
    fn get_nested(&self, first: &K1, second: &K2) -> Option<&[T]>;
}

impl<K1, K2, T> TwoLevelExt<K1, K2, T> for HashMap<K1, HashMap<K2, Vec<T>>>
where
    K1: Eq + Hash,
    K2: Eq + Hash,
{
    fn add_nested(&mut self, first: K1, second: K2, item: T) {
        self.entry(first)
            .or_default()
            .entry(second)
            .or_default()
            .push(item);
    }

    fn get_nested(&self, first: &K1, second: &K2) -> Option<&[T]> {
        self.get(first)
            .and_then(|inner| inner.get(second))
            .map(Vec::as_slice)
    }
}

/// Lookup helpers for plain maps
pub trait MapExt<K, V> {
    /// Clone of the value under `key`, or `fallback`
    fn get_value_or(&self, key: &K, fallback: V) -> V
    where
        V: Clone;

    /// Run `action` with the value under `key` when present. Returns whether it ran.
    fn match_some<F>(&self, key: &K, action: F) -> bool
    where
        F: FnOnce(&V);
}

impl<K: Eq + Hash, V> MapExt<K, V> for HashMap<K, V> {
    fn get_value_or(&self, key: &K, fallback: V) -> V
    where
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(fallback)
    }

    fn match_some<F>(&self, key: &K, action: F) -> bool
    where
        F: FnOnce(&V),
    {
        match self.get(key) {
            Some(value) => {
                action(value);
                true
            }
            None => false,
        }
    }
}

impl<K: Ord, V> MapExt<K, V> for BTreeMap<K, V> {
    fn get_value_or(&self, key: &K, fallback: V) -> V
    where
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(fallback)
    }

    fn match_some<F>(&self, key: &K, action: F) -> bool
    where
        F: FnOnce(&V),
    {
        match self.get(key) {
            Some(value) => {
                action(value);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Sale {
        region: &'static str,
        product: &'static str,
        amount: u32,
    }

    fn sales() -> Vec<Sale> {
        vec![
            Sale { region: "north", product: "tea", amount: 3 },
            Sale { region: "south", product: "tea", amount: 5 },
            Sale { region: "north", product: "coffee", amount: 7 },
            Sale { region: "north", product: "tea", amount: 11 },
        ]
    }

    #[test]
    fn test_to_dictionary_many() {
        let grouped = sales().into_iter().to_dictionary_many(|s| s.region);
        assert_eq!(grouped["north"].len(), 3);
        assert_eq!(grouped["south"].len(), 1);

        let amounts = sales()
            .into_iter()
            .to_dictionary_many_by(|s| s.product, |s| s.amount);
        assert_eq!(amounts["tea"], vec![3, 5, 11]);
    }

    #[test]
    fn test_sorted_dictionary_many() {
        let grouped = sales().into_iter().to_sorted_dictionary_many(|s| s.product);
        let keys: Vec<_> = grouped.keys().copied().collect();
        assert_eq!(keys, vec!["coffee", "tea"]);

        let amounts = sales()
            .into_iter()
            .to_sorted_dictionary_many_by(|s| s.amount % 2, |s| s.amount);
        assert_eq!(amounts[&1], vec![3, 5, 7, 11]);
    }

    #[test]
    fn test_two_level_dictionary() {
        let mut grouped = sales()
            .into_iter()
            .to_two_level_dictionary_many(|s| s.region, |s| s.product);

        assert_eq!(grouped.get_nested(&"north", &"tea").map(<[Sale]>::len), Some(2));
        assert_eq!(grouped.get_nested(&"south", &"coffee"), None);

        grouped.add_nested("south", "coffee", Sale { region: "south", product: "coffee", amount: 1 });
        assert_eq!(grouped.get_nested(&"south", &"coffee").map(<[Sale]>::len), Some(1));
    }

    #[test]
    fn test_dictionary_aggregate() {
        let totals = sales().into_iter().to_dictionary_aggregate(
            |s| s.region,
            |a, b| Sale { amount: a.amount + b.amount, ..a },
        );
        assert_eq!(totals["north"].amount, 21);
        assert_eq!(totals["south"].amount, 5);
    }

    #[test]
    fn test_dictionary_explain_reports_duplicate() {
        let err = sales()
            .into_iter()
            .to_dictionary_explain(|s| s.region)
            .unwrap_err();
        match err {
            SatchelError::DuplicateKey { key } => assert_eq!(key, "\"north\""),
            other => panic!("unexpected error: {other}"),
        }

        let unique = sales()
            .into_iter()
            .to_dictionary_explain(|s| s.amount)
            .unwrap();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_ignore_duplicates_keeps_first() {
        let firsts = sales().into_iter().to_dictionary_ignore_duplicates(|s| s.region);
        assert_eq!(firsts["north"].amount, 3);
        assert_eq!(firsts.len(), 2);
    }

    #[test]
    fn test_multi_map_add_range() {
        let mut map: HashMap<bool, Vec<u32>> = HashMap::new();
        map.add_range(vec![1, 2, 3, 4], |n| n % 2 == 0);
        map.add_range_by(sales(), |s| s.amount > 6, |s| s.amount);

        assert_eq!(map[&true], vec![2, 4, 7, 11]);
        assert_eq!(map[&false], vec![1, 3, 3, 5]);
    }

    #[test]
    fn test_map_lookups() {
        let mut map = HashMap::new();
        map.insert("a", 1);

        assert_eq!(map.get_value_or(&"a", 0), 1);
        assert_eq!(map.get_value_or(&"b", 0), 0);

        let mut seen = None;
        assert!(map.match_some(&"a", |v| seen = Some(*v)));
        assert!(!map.match_some(&"b", |_| panic!("absent key")));
        assert_eq!(seen, Some(1));
    }
}
