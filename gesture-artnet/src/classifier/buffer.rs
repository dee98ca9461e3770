//! Fixed-capacity history ring
//!
//! Backs the pointer trajectory and the gesture-id vote windows.
//! Storage is allocated once; pushing past capacity overwrites the
//! oldest entry.

/// Number of frames kept for trajectory and vote windows
pub const HISTORY_LENGTH: usize = 16;

/// Rolling buffer that keeps the last `N` values in chronological order
#[derive(Clone, Debug)]
pub struct HistoryBuffer<T, const N: usize> {
    /// Circular storage
    data: [T; N],

    /// Current write position (points to next slot to write)
    write_index: usize,

    /// Whether buffer has been filled at least once
    filled: bool,
}

impl<T: Copy + Default, const N: usize> HistoryBuffer<T, N> {
    pub fn new() -> Self {
        Self {
            data: [T::default(); N],
            write_index: 0,
            filled: false,
        }
    }

    /// Push a value, evicting the oldest once full
    pub fn push(&mut self, value: T) {
        self.data[self.write_index] = value;
        self.write_index = (self.write_index + 1) % N;

        if self.write_index == 0 {
            self.filled = true;
        }
    }

    /// True once `N` values have been pushed
    pub fn is_ready(&self) -> bool {
        self.filled
    }

    pub fn len(&self) -> usize {
        if self.filled {
            N
        } else {
            self.write_index
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Oldest-to-newest iteration over the stored values
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let (start, len) = if self.filled {
            (self.write_index, N)
        } else {
            (0, self.write_index)
        };
        (0..len).map(move |i| &self.data[(start + i) % N])
    }

    /// Most recently pushed value
    pub fn newest(&self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        Some(self.data[(self.write_index + N - 1) % N])
    }

    /// Full window in chronological order, or `None` while still filling
    pub fn snapshot(&self) -> Option<[T; N]> {
        if !self.filled {
            return None;
        }
        let mut out = [T::default(); N];
        for (slot, value) in out.iter_mut().zip(self.iter()) {
            *slot = *value;
        }
        Some(out)
    }

    pub fn clear(&mut self) {
        self.data = [T::default(); N];
        self.write_index = 0;
        self.filled = false;
    }
}

impl<T: Copy + Default, const N: usize> Default for HistoryBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
