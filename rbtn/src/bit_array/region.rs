//! Unaligned word access, region fill, bit copy and shifts.

use super::{WORD_BITS, WORD_MAX, Word, bit_offset, bitmap_size, mask_top_word, set_all, clear_all, sub_mask, word_index};

/// What to do with every bit of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FillAction {
    Zero,
    Fill,
    Toggle,
}

impl FillAction {
    #[inline]
    fn apply(self, word: &mut Word, mask: Word) {
        match self {
            FillAction::Zero => *word &= !mask,
            FillAction::Fill => *word |= mask,
            FillAction::Toggle => *word ^= mask,
        }
    }
}

/// Takes bits from `a` where `abits` is set, from `b` elsewhere.
#[inline]
const fn merge(a: Word, b: Word, abits: Word) -> Word {
    b ^ ((a ^ b) & abits)
}

/// Reads one word worth of bits starting at an arbitrary bit position.
///
/// Bits at or above `num_bits` read as 0.
fn get_word(words: &[Word], num_bits: usize, start: usize) -> Word {
    let index = word_index(start);
    let offset = bit_offset(start);

    let mut result = words[index] >> offset;

    // Pull the missing high bits from the next word, if it holds any real bits
    let bits_taken = WORD_BITS - offset;
    if offset > 0 && start + bits_taken < num_bits {
        result |= words[index + 1] << bits_taken;
    }

    result
}

/// Writes one word worth of bits starting at an arbitrary bit position.
fn set_word(words: &mut [Word], num_bits: usize, start: usize, word: Word) {
    let index = word_index(start);
    let offset = bit_offset(start);

    if offset == 0 {
        words[index] = word;
    } else {
        words[index] = (word << offset) | (words[index] & sub_mask(offset));

        if index + 1 < bitmap_size(num_bits) {
            words[index + 1] = (word >> (WORD_BITS - offset)) | (words[index + 1] & (WORD_MAX << offset));
        }
    }

    mask_top_word(words, num_bits);
}

/// Applies `action` to `length` bits starting at `start`.
pub fn fill_region(words: &mut [Word], start: usize, length: usize, action: FillAction) {
    if length == 0 {
        return;
    }

    let first_word = word_index(start);
    let last_word = word_index(start + length - 1);
    let first_offset = bit_offset(start);
    let last_offset = bit_offset(start + length - 1);

    if first_word == last_word {
        action.apply(&mut words[first_word], sub_mask(length) << first_offset);
        return;
    }

    action.apply(&mut words[first_word], !sub_mask(first_offset));
    for word in words[first_word + 1..last_word].iter_mut() {
        action.apply(word, WORD_MAX);
    }
    action.apply(&mut words[last_word], sub_mask(last_offset + 1));
}

/// Where the bits of a copy come from.
enum Source<'s> {
    /// Another array, with its own logical size
    Other(&'s [Word], usize),
    /// The destination array itself
    Destination,
}

impl Source<'_> {
    fn read(&self, dst: &[Word], dst_bits: usize, start: usize) -> Word {
        match self {
            Source::Other(words, num_bits) => get_word(words, *num_bits, start),
            Source::Destination => get_word(dst, dst_bits, start),
        }
    }
}

fn copy_bits(
    dst: &mut [Word],
    dst_index: usize,
    dst_bits: usize,
    src: Source<'_>,
    src_index: usize,
    length: usize,
    ascending: bool,
) {
    if length == 0 {
        return;
    }

    let full_words = length / WORD_BITS;
    let tail_bits = length % WORD_BITS;
    let tail_mask = sub_mask(tail_bits);

    if ascending {
        // Low to high, the partial word is the last one
        for i in 0..full_words {
            let word = src.read(dst, dst_bits, src_index + i * WORD_BITS);
            set_word(dst, dst_bits, dst_index + i * WORD_BITS, word);
        }

        if tail_bits > 0 {
            let offset = full_words * WORD_BITS;
            let src_word = src.read(dst, dst_bits, src_index + offset);
            let dst_word = get_word(dst, dst_bits, dst_index + offset);
            set_word(dst, dst_bits, dst_index + offset, merge(src_word, dst_word, tail_mask));
        }
    } else {
        // High to low, the partial word sits at the start of the region
        for i in 0..full_words {
            let offset = length - (i + 1) * WORD_BITS;
            let word = src.read(dst, dst_bits, src_index + offset);
            set_word(dst, dst_bits, dst_index + offset, word);
        }

        if tail_bits > 0 {
            let src_word = src.read(dst, dst_bits, src_index);
            let dst_word = get_word(dst, dst_bits, dst_index);
            set_word(dst, dst_bits, dst_index, merge(src_word, dst_word, tail_mask));
        }
    }

    mask_top_word(dst, dst_bits);
}

/// Copies `length` bits from `src[src_index..]` to `dst[dst_index..]`.
///
/// Both offsets may be unaligned. `src_bits`/`dst_bits` are the logical sizes of
/// the two arrays, and both regions must fit inside them.
pub fn copy(
    dst: &mut [Word],
    dst_index: usize,
    src: &[Word],
    src_index: usize,
    length: usize,
    src_bits: usize,
    dst_bits: usize,
) {
    copy_bits(dst, dst_index, dst_bits, Source::Other(src, src_bits), src_index, length, true);
}

/// Copies `length` bits inside one array, the regions may overlap.
///
/// Like `memmove`, the walk direction is picked so that no source bit is
/// overwritten before it has been read: ascending when the destination is below
/// the source, descending otherwise.
pub fn copy_within(words: &mut [Word], dst_index: usize, src_index: usize, length: usize, num_bits: usize) {
    copy_bits(
        words,
        dst_index,
        num_bits,
        Source::Destination,
        src_index,
        length,
        src_index > dst_index,
    );
}

/// Shifts towards the LSB (lower indices), filling vacated high bits with `fill`.
pub fn shift_right(words: &mut [Word], num_bits: usize, distance: usize, fill: bool) {
    if distance >= num_bits {
        if fill {
            set_all(words, num_bits);
        } else {
            clear_all(words, num_bits);
        }
        return;
    } else if distance == 0 {
        return;
    }

    let action = if fill { FillAction::Fill } else { FillAction::Zero };
    let length = num_bits - distance;
    copy_within(words, 0, distance, length, num_bits);
    fill_region(words, length, distance, action);
}

/// Shifts towards the MSB (higher indices), filling vacated low bits with `fill`.
pub fn shift_left(words: &mut [Word], num_bits: usize, distance: usize, fill: bool) {
    if distance >= num_bits {
        if fill {
            set_all(words, num_bits);
        } else {
            clear_all(words, num_bits);
        }
        return;
    } else if distance == 0 {
        return;
    }

    let action = if fill { FillAction::Fill } else { FillAction::Zero };
    let length = num_bits - distance;
    copy_within(words, distance, 0, length, num_bits);
    fill_region(words, 0, distance, action);
}
