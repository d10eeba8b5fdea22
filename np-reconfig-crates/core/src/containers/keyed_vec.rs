use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// Dense node table which can only be indexed by keys of type `Key`.
///
/// Both the rating graph and the sub-graphs of a cut address their nodes through a [`KeyedVec`],
/// which keeps node identifiers of different graphs from being mixed up.
#[derive(Debug, Hash, PartialEq, Eq)]
pub struct KeyedVec<Key, Value> {
    key: PhantomData<Key>,
    elements: Vec<Value>,
}

impl<Key, Value: Clone> Clone for KeyedVec<Key, Value> {
    fn clone(&self) -> Self {
        Self {
            key: PhantomData,
            elements: self.elements.clone(),
        }
    }
}

impl<Key, Value> Default for KeyedVec<Key, Value> {
    fn default() -> Self {
        Self {
            key: PhantomData,
            elements: Vec::default(),
        }
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            key: PhantomData,
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether `key` addresses an element of this vector.
    pub fn contains_key(&self, key: Key) -> bool {
        key.index() < self.elements.len()
    }

    /// Add a new value to the vector.
    ///
    /// Returns the key for the inserted value.
    pub fn push(&mut self, value: Value) -> Key {
        self.elements.push(value);

        Key::create_from_index(self.elements.len() - 1)
    }

    /// The key of the most recently pushed value.
    pub fn last_key(&self) -> Option<Key> {
        self.elements
            .len()
            .checked_sub(1)
            .map(Key::create_from_index)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'_ Value> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &'_ mut Value> {
        self.elements.iter_mut()
    }

    /// Iterate over all keys in ascending order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = Key> {
        (0..self.elements.len()).map(Key::create_from_index)
    }
}

impl<Key: StorageKey, Value> Index<Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> IndexMut<Key> for KeyedVec<Key, Value> {
    fn index_mut(&mut self, index: Key) -> &mut Self::Output {
        &mut self.elements[index.index()]
    }
}

impl StorageKey for usize {
    fn index(&self) -> usize {
        *self
    }

    fn create_from_index(index: usize) -> Self {
        index
    }
}

/// A simple trait which requires that the structures implementing this trait can generate an index.
pub trait StorageKey: Clone + Copy {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushed_values_are_addressed_by_their_returned_key() {
        let mut nodes: KeyedVec<usize, &str> = KeyedVec::default();

        let first = nodes.push("root");
        let second = nodes.push("child");

        assert_eq!(nodes[first], "root");
        assert_eq!(nodes[second], "child");
        assert_eq!(nodes.last_key(), Some(second));
    }

    #[test]
    fn keys_are_reported_in_ascending_order() {
        let mut nodes: KeyedVec<usize, u8> = KeyedVec::with_capacity(3);
        for value in 0..3 {
            let _ = nodes.push(value);
        }

        assert_eq!(nodes.keys().rev().collect::<Vec<_>>(), vec![2, 1, 0]);
        assert!(nodes.contains_key(2));
        assert!(!nodes.contains_key(3));
    }
}
