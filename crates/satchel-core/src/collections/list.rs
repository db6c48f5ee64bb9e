//! Slice helpers: wraparound navigation and shuffling

use rand::seq::SliceRandom;
use rand::Rng;

/// Index before `current`, wrapping to the last index from the front
pub fn previous_index(len: usize, current: usize) -> usize {
    if current == 0 {
        len.saturating_sub(1)
    } else {
        current - 1
    }
}

/// Index after `current`, wrapping to the front from the last index
pub fn next_index(len: usize, current: usize) -> usize {
    if current + 1 >= len {
        0
    } else {
        current + 1
    }
}

/// Extension methods for slices
pub trait ListExt<T> {
    fn previous_index(&self, current: usize) -> usize;

    fn next_index(&self, current: usize) -> usize;

    /// Item before `index`, wrapping around. `None` for an empty slice.
    fn previous_item(&self, index: usize) -> Option<&T>;

    /// Item after `index`, wrapping around. `None` for an empty slice.
    fn next_item(&self, index: usize) -> Option<&T>;

    /// Item before the first occurrence of `item`
    fn previous_of(&self, item: &T) -> Option<&T>
    where
        T: PartialEq;

    /// Item after the first occurrence of `item`
    fn next_of(&self, item: &T) -> Option<&T>
    where
        T: PartialEq;

    /// Items in random order, leaving `self` untouched
    fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<T>
    where
        T: Clone;
}

impl<T> ListExt<T> for [T] {
    fn previous_index(&self, current: usize) -> usize {
        previous_index(self.len(), current)
    }

    fn next_index(&self, current: usize) -> usize {
        next_index(self.len(), current)
    }

    fn previous_item(&self, index: usize) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.get(self.previous_index(index))
    }

    fn next_item(&self, index: usize) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.get(self.next_index(index))
    }

    fn previous_of(&self, item: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        let position = self.iter().position(|candidate| candidate == item)?;
        self.previous_item(position)
    }

    fn next_of(&self, item: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        let position = self.iter().position(|candidate| candidate == item)?;
        self.next_item(position)
    }

    fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<T>
    where
        T: Clone,
    {
        let mut buffer = self.to_vec();
        buffer.shuffle(rng);
        buffer
    }
}

/// First candidate that is present
pub fn first_not_null<T, I>(candidates: I) -> Option<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    candidates.into_iter().flatten().next()
}

/// `value`, or `other` when `value` equals its type's default
pub fn if_default_then<T: Default + PartialEq>(value: T, other: T) -> T {
    if value == T::default() {
        other
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_wraparound_indices() {
        assert_eq!(previous_index(3, 0), 2);
        assert_eq!(previous_index(3, 2), 1);
        assert_eq!(next_index(3, 2), 0);
        assert_eq!(next_index(3, 0), 1);
        assert_eq!(next_index(3, 7), 0);
    }

    #[test]
    fn test_wraparound_items() {
        let items = ["a", "b", "c"];
        assert_eq!(items.previous_item(0), Some(&"c"));
        assert_eq!(items.next_item(2), Some(&"a"));
        assert_eq!(items.next_of(&"b"), Some(&"c"));
        assert_eq!(items.previous_of(&"a"), Some(&"c"));
        assert_eq!(items.next_of(&"z"), None);

        let empty: [&str; 0] = [];
        assert_eq!(empty.next_item(0), None);
        assert_eq!(empty.previous_item(0), None);
    }

    #[test]
    fn test_shuffled_is_a_permutation() {
        let items: Vec<u32> = (0..20).collect();
        let mut rng = StdRng::seed_from_u64(7);

        let mut shuffled = items.shuffled(&mut rng);
        assert_eq!(shuffled.len(), items.len());
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn test_first_not_null() {
        assert_eq!(first_not_null([None, Some(2), Some(3)]), Some(2));
        assert_eq!(first_not_null::<u8, _>([None, None]), None);
    }

    #[test]
    fn test_if_default_then() {
        assert_eq!(if_default_then(0, 5), 5);
        assert_eq!(if_default_then(3, 5), 3);
        assert_eq!(if_default_then(String::new(), "x".to_string()), "x");
    }
}
