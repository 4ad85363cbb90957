use crate::error::GridError;

const WORD_BITS: usize = u64::BITS as usize;

/// A fixed-length vector of bits packed into 64-bit words.
///
/// Bits past `len` in the last word are always zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitRow {
    len: usize,
    words: Vec<u64>,
}

impl BitRow {
    /// Create a new row of `len` bits, all cleared.
    ///
    /// # Errors
    ///
    /// If the word storage cannot be allocated, an error is returned.
    pub fn new(len: usize) -> Result<Self, GridError> {
        let num_words = len.div_ceil(WORD_BITS);

        let mut words = Vec::new();
        words.try_reserve_exact(num_words)?;
        words.resize(num_words, 0);

        Ok(Self { len, words })
    }

    /// Get the number of bits in the row.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the row holds no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the bit at `index`, or `None` if the index is past the end of the row.
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bit(index))
    }

    /// Write the bit at `index` and return the bit that was there before.
    ///
    /// Returns `None` and leaves the row untouched if the index is past the end of the row.
    #[inline]
    pub fn replace(&mut self, index: usize, value: bool) -> Option<bool> {
        if index >= self.len {
            return None;
        }

        let (word, mask) = locate(index);
        let previous = self.words[word] & mask != 0;
        if value {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }

        Some(previous)
    }

    /// Set every bit of the row to `value`.
    pub fn fill(&mut self, value: bool) {
        let fill_word = if value { u64::MAX } else { 0 };
        self.words.iter_mut().for_each(|w| *w = fill_word);

        // keep the padding bits cleared
        let tail = self.len % WORD_BITS;
        if value && tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last = (1u64 << tail) - 1;
            }
        }
    }

    /// Count the number of set bits in the row.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterate over the bits of the row from index 0 to `len - 1`.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bit(i))
    }

    // the caller guarantees index < len
    #[inline]
    pub(crate) fn bit(&self, index: usize) -> bool {
        let (word, mask) = locate(index);
        self.words[word] & mask != 0
    }
}

#[inline]
fn locate(index: usize) -> (usize, u64) {
    (index / WORD_BITS, 1u64 << (index % WORD_BITS))
}
