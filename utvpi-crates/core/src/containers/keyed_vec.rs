use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// A vector that can only be indexed by `Key`, so that vertex indices of one graph cannot be used
/// to address the arrays of another.
///
/// Almost all features of this structure require that `Key` implements the [`StorageKey`] trait.
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

impl<Key: StorageKey, Value: Clone> KeyedVec<Key, Value> {
    /// Create a vector with `len` slots, each holding `value`.
    pub(crate) fn filled(len: usize, value: Value) -> Self {
        Self {
            key: PhantomData,
            elements: vec![value; len],
        }
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    /// Add a new value to the vector.
    ///
    /// Returns the key for the inserted value.
    pub fn push(&mut self, value: Value) -> Key {
        self.elements.push(value);

        Key::create_from_index(self.elements.len() - 1)
    }

    /// Iterate over the values in key order.
    pub fn iter(&self) -> impl Iterator<Item = &'_ Value> {
        self.elements.iter()
    }

    /// Iterate over all keys that address a value, in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = Key> {
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

impl StorageKey for u32 {
    fn index(&self) -> usize {
        *self as usize
    }

    fn create_from_index(index: usize) -> Self {
        index as u32
    }
}

/// A simple trait which requires that the structures implementing this trait can generate an index.
pub trait StorageKey: Clone {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_the_key_of_the_new_value() {
        let mut vec: KeyedVec<u32, &str> = KeyedVec::default();

        let first = vec.push("a");
        let second = vec.push("b");

        assert_eq!(0, first);
        assert_eq!(1, second);
        assert_eq!("b", vec[second]);
    }

    #[test]
    fn keys_and_values_are_in_the_same_order() {
        let mut vec: KeyedVec<usize, i32> = KeyedVec::filled(2, 7);
        vec[1] = 3;

        assert_eq!(vec![0, 1], vec.keys().collect::<Vec<_>>());
        assert_eq!(vec![&7, &3], vec.iter().collect::<Vec<_>>());
    }
}
