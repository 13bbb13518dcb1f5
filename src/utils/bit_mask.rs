use std::ops::Index;

const BITS: usize = usize::BITS as usize;

macro_rules! panic_if_out_of_bounds {
    ($index: expr, $len: expr) => {
        if $index >= $len {
            panic!("Bit index out of bounds: {} >= {}", $index, $len)
        }
    };
}

/// A fixed-length set of requirements, packed into words.
///
/// Masks are the states of the dynamic programming in
/// [`ConstrainedSetCover`](crate::algo::set_cover::ConstrainedSetCover), so
/// they are hashable and cheap to union.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequirementMask {
    data: Box<[usize]>,
    len: usize,
}

impl RequirementMask {
    /// Creates an empty mask on `len` requirements.
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![0; len.div_ceil(BITS)].into_boxed_slice(),
            len,
        }
    }

    /// Creates a mask on `len` requirements containing all of them.
    pub fn full(len: usize) -> Self {
        let mut mask = Self {
            data: vec![usize::MAX; len.div_ceil(BITS)].into_boxed_slice(),
            len,
        };
        // Unused high bits of the last word must stay zero for equality
        if len % BITS != 0 {
            if let Some(last) = mask.data.last_mut() {
                *last = (1 << (len % BITS)) - 1;
            }
        }
        mask
    }

    /// Returns the number of requirements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> bool {
        panic_if_out_of_bounds!(index, self.len);
        (self.data[index / BITS] >> (index % BITS)) & 1 != 0
    }

    pub fn set(&mut self, index: usize, value: bool) {
        panic_if_out_of_bounds!(index, self.len);
        let bit = 1 << (index % BITS);
        if value {
            self.data[index / BITS] |= bit;
        } else {
            self.data[index / BITS] &= !bit;
        }
    }

    /// Adds to `self` all the requirements in `other`.
    pub fn union_with(&mut self, other: &Self) {
        assert_eq!(self.len, other.len);
        for (word, other) in self.data.iter_mut().zip(other.data.iter()) {
            *word |= other;
        }
    }

    /// Returns the union of `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.union_with(other);
        result
    }

    /// Returns the number of requirements in the mask.
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Returns true if the mask contains every requirement.
    pub fn is_full(&self) -> bool {
        self.count_ones() == self.len
    }
}

impl Index<usize> for RequirementMask {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            false => &false,
            true => &true,
        }
    }
}
