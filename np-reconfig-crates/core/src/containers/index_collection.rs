use std::mem::size_of;

use itertools::Either;

/// The dense representation may use at most this many times the memory of the sparse one.
const DENSE_OVERHEAD_FACTOR: usize = 10;
const BITS_PER_WORD: usize = u64::BITS as usize;

/// A set of job indices which switches between a sparse list and a dense bitset, depending on
/// which of the two is cheaper given the largest index in the collection.
///
/// Iteration yields the indices in ascending order when the dense form is in use, and in
/// insertion order otherwise.
#[derive(Clone, Debug, Default)]
pub struct IndexCollection {
    representation: Representation,
    largest_index: usize,
    size: usize,
}

#[derive(Clone, Debug)]
enum Representation {
    Sparse(Vec<usize>),
    Dense(Vec<u64>),
}

impl Default for Representation {
    fn default() -> Self {
        Representation::Sparse(Vec::new())
    }
}

impl IndexCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of distinct indices in the collection.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn uses_dense_representation(&self) -> bool {
        matches!(self.representation, Representation::Dense(_))
    }

    pub fn largest(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.largest_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        match &self.representation {
            Representation::Sparse(indices) => indices.contains(&index),
            Representation::Dense(words) => words
                .get(index / BITS_PER_WORD)
                .is_some_and(|word| word & (1_u64 << (index % BITS_PER_WORD)) != 0),
        }
    }

    /// Inserts `index`; inserting an index which is already present has no effect.
    pub fn insert(&mut self, index: usize) {
        let new_largest_index = self.largest_index.max(index);
        let should_use_dense = prefers_dense(new_largest_index, self.size + 1);

        match (&self.representation, should_use_dense) {
            (Representation::Sparse(_), true) => self.promote(new_largest_index),
            (Representation::Dense(_), false) => self.demote(),
            _ => {}
        }

        let is_new = match &mut self.representation {
            Representation::Sparse(indices) => {
                if indices.contains(&index) {
                    false
                } else {
                    indices.push(index);
                    true
                }
            }
            Representation::Dense(words) => set_bit(words, index),
        };

        if is_new {
            self.size += 1;
        }
        self.largest_index = new_largest_index;
    }

    /// Inserts all indices of `other`.
    ///
    /// The largest index of `other` is inserted first, so the representation is chosen with the
    /// final range in mind rather than flipping back and forth during the merge.
    pub fn merge(&mut self, other: &IndexCollection) {
        let Some(largest) = other.largest() else {
            return;
        };

        self.insert(largest);
        for index in other.iter() {
            self.insert(index);
        }
    }

    pub fn is_subset_of(&self, other: &IndexCollection) -> bool {
        self.iter().all(|index| other.contains(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        match &self.representation {
            Representation::Sparse(indices) => Either::Left(indices.iter().copied()),
            Representation::Dense(words) => {
                Either::Right(words.iter().enumerate().flat_map(|(word_index, &word)| {
                    (0..BITS_PER_WORD)
                        .filter(move |bit| word & (1_u64 << bit) != 0)
                        .map(move |bit| word_index * BITS_PER_WORD + bit)
                }))
            }
        }
    }

    fn promote(&mut self, largest_index: usize) {
        let mut words = vec![0; largest_index / BITS_PER_WORD + 1];
        for index in self.iter() {
            let _ = set_bit(&mut words, index);
        }

        self.representation = Representation::Dense(words);
    }

    fn demote(&mut self) {
        let indices = self.iter().collect::<Vec<_>>();
        self.size = indices.len();
        self.representation = Representation::Sparse(indices);
    }
}

impl FromIterator<usize> for IndexCollection {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut collection = IndexCollection::new();
        for index in iter {
            collection.insert(index);
        }
        collection
    }
}

fn prefers_dense(largest_index: usize, size: usize) -> bool {
    let dense_bytes = (largest_index / BITS_PER_WORD) * size_of::<u64>();
    let sparse_bytes = size * size_of::<usize>();

    dense_bytes <= DENSE_OVERHEAD_FACTOR * sparse_bytes
}

/// Sets the bit for `index` and returns whether it was previously unset.
fn set_bit(words: &mut Vec<u64>, index: usize) -> bool {
    let word_index = index / BITS_PER_WORD;
    if word_index >= words.len() {
        words.resize(word_index + 1, 0);
    }

    let mask = 1_u64 << (index % BITS_PER_WORD);
    let was_unset = words[word_index] & mask == 0;
    words[word_index] |= mask;
    was_unset
}
