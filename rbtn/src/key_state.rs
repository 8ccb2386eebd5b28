use core::cmp::Ordering;
use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;

use crate::MAX_KEY_NUM;
use crate::bit_array::{self, Word, bitmap_size};

const KEY_STATE_WORDS: usize = bitmap_size(MAX_KEY_NUM);

/// One bit per indexed button, [`MAX_KEY_NUM`] bits wide.
///
/// Used both for the per-tick input snapshot and for combo masks. Bit `i`
/// belongs to the button at slot `i`: static buttons first, then dynamic
/// buttons in registration order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyState {
    words: [Word; KEY_STATE_WORDS],
}

impl KeyState {
    pub const fn new() -> Self {
        Self {
            words: [0; KEY_STATE_WORDS],
        }
    }

    /// Builds a state with the given slots set. Out of range slots are ignored.
    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        let mut state = Self::new();
        for i in indices.into_iter().filter(|i| *i < MAX_KEY_NUM) {
            state.set(i);
        }
        state
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn get(&self, index: usize) -> bool {
        bit_array::get(&self.words, index)
    }

    pub fn set(&mut self, index: usize) {
        bit_array::set(&mut self.words, index);
    }

    pub fn clear(&mut self, index: usize) {
        bit_array::clear(&mut self.words, index);
    }

    pub fn toggle(&mut self, index: usize) {
        bit_array::toggle(&mut self.words, index);
    }

    pub fn assign(&mut self, index: usize, value: bool) {
        bit_array::assign(&mut self.words, index, value);
    }

    pub fn set_all(&mut self) {
        bit_array::set_all(&mut self.words, MAX_KEY_NUM);
    }

    pub fn clear_all(&mut self) {
        bit_array::clear_all(&mut self.words, MAX_KEY_NUM);
    }

    pub fn toggle_all(&mut self) {
        bit_array::toggle_all(&mut self.words, MAX_KEY_NUM);
    }

    pub fn count_set(&self) -> usize {
        bit_array::count_set(&self.words, MAX_KEY_NUM)
    }

    pub fn count_clear(&self) -> usize {
        bit_array::count_clear(&self.words, MAX_KEY_NUM)
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Bitwise AND of two states.
    pub fn and(&self, other: &KeyState) -> KeyState {
        let mut result = KeyState::new();
        bit_array::and(&mut result.words, &self.words, &other.words, MAX_KEY_NUM);
        result
    }

    /// Bitwise OR of two states.
    pub fn or(&self, other: &KeyState) -> KeyState {
        let mut result = KeyState::new();
        bit_array::or(&mut result.words, &self.words, &other.words, MAX_KEY_NUM);
        result
    }

    /// Bitwise XOR of two states, the slots that differ.
    pub fn xor(&self, other: &KeyState) -> KeyState {
        let mut result = KeyState::new();
        bit_array::xor(&mut result.words, &self.words, &other.words, MAX_KEY_NUM);
        result
    }

    pub fn not(&self) -> KeyState {
        let mut result = KeyState::new();
        bit_array::not(&mut result.words, &self.words, MAX_KEY_NUM);
        result
    }

    /// Whether every slot set in `mask` is also set here.
    ///
    /// An empty mask is never contained.
    pub fn contains_all(&self, mask: &KeyState) -> bool {
        if mask.count_set() == 0 {
            return false;
        }
        bit_array::compare(&self.and(mask).words, &mask.words, MAX_KEY_NUM) == Ordering::Equal
    }

    /// Moves every slot `distance` places towards slot 0.
    pub fn shift_down(&mut self, distance: usize, fill: bool) {
        bit_array::shift_right(&mut self.words, MAX_KEY_NUM, distance, fill);
    }

    /// Moves every slot `distance` places away from slot 0.
    pub fn shift_up(&mut self, distance: usize, fill: bool) {
        bit_array::shift_left(&mut self.words, MAX_KEY_NUM, distance, fill);
    }

    /// Copies `length` slots of `src` starting at `src_index` to `dst_index`.
    pub fn copy_from(&mut self, dst_index: usize, src: &KeyState, src_index: usize, length: usize) {
        bit_array::copy(
            &mut self.words,
            dst_index,
            &src.words,
            src_index,
            length,
            MAX_KEY_NUM,
            MAX_KEY_NUM,
        );
    }
}

impl fmt::Debug for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyState(")?;
        bit_array::write_bits(&self.words, MAX_KEY_NUM, f)?;
        write!(f, ")")
    }
}

impl fmt::Display for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bit_array::write_bits(&self.words, MAX_KEY_NUM, f)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for KeyState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "KeyState({})", self.words);
    }
}

/// Parses a string of `0`/`1`, slot 0 first. Other characters are skipped.
impl FromStr for KeyState {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut state = KeyState::new();
        bit_array::from_str(&mut state.words, MAX_KEY_NUM, s);
        Ok(state)
    }
}

impl PartialOrd for KeyState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyState {
    fn cmp(&self, other: &Self) -> Ordering {
        bit_array::compare(&self.words, &other.words, MAX_KEY_NUM)
    }
}
