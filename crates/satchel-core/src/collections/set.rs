use std::collections::HashSet;
use std::hash::Hash;

/// Set algebra that leaves the receiver untouched
pub trait SetExt<T> {
    /// Insert every item
    fn add_range<I: IntoIterator<Item = T>>(&mut self, items: I);

    /// New set without any of `items`
    fn subtract<'a, I>(&self, items: I) -> HashSet<T>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a;

    /// New set with the members of `self` that are not in `other`
    fn exclude_set(&self, other: &HashSet<T>) -> HashSet<T>;

    /// New set with the members present in both sets
    fn intersect_set(&self, other: &HashSet<T>) -> HashSet<T>;
}

impl<T: Eq + Hash + Clone> SetExt<T> for HashSet<T> {
    fn add_range<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.extend(items);
    }

    fn subtract<'a, I>(&self, items: I) -> HashSet<T>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut result = self.clone();
        for item in items {
            result.remove(item);
        }
        result
    }

    fn exclude_set(&self, other: &HashSet<T>) -> HashSet<T> {
        self.iter()
            .filter(|item| !other.contains(*item))
            .cloned()
            .collect()
    }

    fn intersect_set(&self, other: &HashSet<T>) -> HashSet<T> {
        self.iter()
            .filter(|item| other.contains(*item))
            .cloned()
            .collect()
    }
}
