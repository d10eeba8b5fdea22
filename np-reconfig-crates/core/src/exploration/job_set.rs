use std::fmt::Display;
use std::fmt::Formatter;

use crate::problem::JobIndex;

const BITS_PER_WORD: usize = u64::BITS as usize;

/// The set of jobs which have been dispatched along the path to a schedule node.
///
/// Two nodes can only be merged when their job sets are equal, so the set is hashable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct JobSet {
    words: Vec<u64>,
    size: usize,
}

impl JobSet {
    pub fn empty(num_jobs: usize) -> JobSet {
        JobSet {
            words: vec![0; num_jobs.div_ceil(BITS_PER_WORD)],
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn contains(&self, job: JobIndex) -> bool {
        self.words
            .get(job / BITS_PER_WORD)
            .is_some_and(|word| word & (1_u64 << (job % BITS_PER_WORD)) != 0)
    }

    /// The set containing the jobs of `self` and `job`.
    pub fn with(&self, job: JobIndex) -> JobSet {
        let mut extended = self.clone();
        let word_index = job / BITS_PER_WORD;
        if word_index >= extended.words.len() {
            extended.words.resize(word_index + 1, 0);
        }

        let mask = 1_u64 << (job % BITS_PER_WORD);
        if extended.words[word_index] & mask == 0 {
            extended.words[word_index] |= mask;
            extended.size += 1;
        }
        extended
    }

    /// Iterates over the jobs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = JobIndex> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_index, &word)| {
                (0..BITS_PER_WORD)
                    .filter(move |bit| word & (1_u64 << bit) != 0)
                    .map(move |bit| word_index * BITS_PER_WORD + bit)
            })
    }
}

impl Display for JobSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (position, job) in self.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{job}")?;
        }
        write!(f, "}}")
    }
}
