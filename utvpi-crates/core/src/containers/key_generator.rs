use std::marker::PhantomData;

use super::StorageKey;

/// Hands out consecutive [`StorageKey`]s, starting from index 0.
#[derive(Clone, Copy, Debug)]
pub struct KeyGenerator<Key> {
    key: PhantomData<Key>,
    counter: usize,
}

impl<Key> Default for KeyGenerator<Key> {
    fn default() -> Self {
        Self {
            key: PhantomData,
            counter: 0,
        }
    }
}

impl<Key: StorageKey> KeyGenerator<Key> {
    /// Generate a new `Key`.
    pub fn next_key(&mut self) -> Key {
        let key = Key::create_from_index(self.counter);
        self.counter += 1;
        key
    }

    /// Make sure that keys handed out from now on do not collide with `key`.
    pub(crate) fn skip_past(&mut self, key: &Key) {
        self.counter = self.counter.max(key.index() + 1);
    }

    /// The number of keys handed out (or skipped) so far.
    pub(crate) fn num_keys(&self) -> usize {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_consecutive() {
        let mut generator = KeyGenerator::<usize>::default();

        assert_eq!(0, generator.next_key());
        assert_eq!(1, generator.next_key());
        assert_eq!(2, generator.num_keys());
    }

    #[test]
    fn skipping_never_moves_backwards() {
        let mut generator = KeyGenerator::<u32>::default();
        generator.skip_past(&4);
        generator.skip_past(&1);

        assert_eq!(5, generator.next_key());
    }
}
