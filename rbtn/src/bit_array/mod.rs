//! Fixed-capacity bit arrays over machine words.
//!
//! The storage is a plain `[Word]` slice owned by the caller, the logical size in
//! bits (`num_bits`) is passed to every whole-array operation. Bits at or above
//! `num_bits` that live in the last word are kept at zero by every whole-array
//! operation. Single bit operations do no bounds checking beyond slice indexing,
//! callers only ever index below `num_bits`.
//!
//! Bit `i` lives in word `i / WORD_BITS` at position `i % WORD_BITS`, so index 0 is
//! the least significant bit of the first word.

use core::cmp::Ordering;
use core::fmt::Write;

mod region;

pub use region::{FillAction, copy, copy_within, fill_region, shift_left, shift_right};

/// Storage word of a bit array.
#[cfg(not(feature = "word64"))]
pub type Word = u32;
/// Storage word of a bit array.
#[cfg(feature = "word64")]
pub type Word = u64;

/// Number of bits in one [`Word`].
pub const WORD_BITS: usize = Word::BITS as usize;

/// A word with all bits set.
pub(crate) const WORD_MAX: Word = Word::MAX;

/// Number of words needed to hold `num_bits` bits.
#[inline]
pub const fn bitmap_size(num_bits: usize) -> usize {
    num_bits.div_ceil(WORD_BITS)
}

#[inline]
pub(crate) const fn word_index(bit: usize) -> usize {
    bit / WORD_BITS
}

#[inline]
pub(crate) const fn bit_offset(bit: usize) -> usize {
    bit % WORD_BITS
}

#[inline]
const fn bit_mask(bit: usize) -> Word {
    1 << bit_offset(bit)
}

/// Word with the lowest `nbits` bits set.
///
/// Shifting a word by its full width is an overflow in Rust, so `0` is handled
/// separately instead of computing `WORD_MAX >> WORD_BITS`.
#[inline]
pub(crate) const fn sub_mask(nbits: usize) -> Word {
    if nbits == 0 {
        0
    } else {
        WORD_MAX >> (WORD_BITS - nbits)
    }
}

/// Number of meaningful bits in the last word of a `num_bits` array.
#[inline]
const fn bits_in_top_word(num_bits: usize) -> usize {
    if num_bits == 0 {
        0
    } else {
        bit_offset(num_bits - 1) + 1
    }
}

/// Clear every bit at or above `num_bits` in the last word.
#[inline]
pub(crate) fn mask_top_word(words: &mut [Word], num_bits: usize) {
    let num_words = bitmap_size(num_bits);
    if num_words == 0 {
        return;
    }
    words[num_words - 1] &= sub_mask(bits_in_top_word(num_bits));
}

/// Portable population count, see
/// <http://graphics.stanford.edu/~seander/bithacks.html#CountBitsSetParallel>
#[inline]
pub(crate) const fn popcount(word: Word) -> u32 {
    const M1: Word = WORD_MAX / 3;
    const M2: Word = WORD_MAX / 15 * 3;
    const M4: Word = WORD_MAX / 255 * 15;
    const H01: Word = WORD_MAX / 255;

    let w = word - ((word >> 1) & M1);
    let w = (w & M2) + ((w >> 2) & M2);
    let w = (w + (w >> 4)) & M4;
    (w.wrapping_mul(H01) >> (WORD_BITS - 8)) as u32
}

/// Returns whether bit `bit` is set.
#[inline]
pub fn get(words: &[Word], bit: usize) -> bool {
    (words[word_index(bit)] >> bit_offset(bit)) & 1 != 0
}

/// Sets bit `bit` to 1.
#[inline]
pub fn set(words: &mut [Word], bit: usize) {
    words[word_index(bit)] |= bit_mask(bit);
}

/// Clears bit `bit` to 0.
#[inline]
pub fn clear(words: &mut [Word], bit: usize) {
    words[word_index(bit)] &= !bit_mask(bit);
}

/// Inverts bit `bit`.
#[inline]
pub fn toggle(words: &mut [Word], bit: usize) {
    words[word_index(bit)] ^= bit_mask(bit);
}

/// Sets bit `bit` to `value`.
#[inline]
pub fn assign(words: &mut [Word], bit: usize, value: bool) {
    if value {
        set(words, bit);
    } else {
        clear(words, bit);
    }
}

pub fn clear_all(words: &mut [Word], num_bits: usize) {
    words[..bitmap_size(num_bits)].fill(0);
}

pub fn set_all(words: &mut [Word], num_bits: usize) {
    words[..bitmap_size(num_bits)].fill(WORD_MAX);
    mask_top_word(words, num_bits);
}

pub fn toggle_all(words: &mut [Word], num_bits: usize) {
    for word in words[..bitmap_size(num_bits)].iter_mut() {
        *word ^= WORD_MAX;
    }
    mask_top_word(words, num_bits);
}

/// Copies the whole array, word by word.
pub fn copy_all(dst: &mut [Word], src: &[Word], num_bits: usize) {
    let n = bitmap_size(num_bits);
    dst[..n].copy_from_slice(&src[..n]);
}

//
// Logic operators
//
// `dest` can't alias a source in Rust, the `*_assign` variants cover the in-place case.
//

fn combine(dest: &mut [Word], src1: &[Word], src2: &[Word], num_bits: usize, op: impl Fn(Word, Word) -> Word) {
    let n = bitmap_size(num_bits);
    for ((d, a), b) in dest[..n].iter_mut().zip(&src1[..n]).zip(&src2[..n]) {
        *d = op(*a, *b);
    }
    mask_top_word(dest, num_bits);
}

fn combine_assign(dest: &mut [Word], src: &[Word], num_bits: usize, op: impl Fn(Word, Word) -> Word) {
    let n = bitmap_size(num_bits);
    for (d, s) in dest[..n].iter_mut().zip(&src[..n]) {
        *d = op(*d, *s);
    }
    mask_top_word(dest, num_bits);
}

pub fn and(dest: &mut [Word], src1: &[Word], src2: &[Word], num_bits: usize) {
    combine(dest, src1, src2, num_bits, |a, b| a & b);
}

pub fn or(dest: &mut [Word], src1: &[Word], src2: &[Word], num_bits: usize) {
    combine(dest, src1, src2, num_bits, |a, b| a | b);
}

pub fn xor(dest: &mut [Word], src1: &[Word], src2: &[Word], num_bits: usize) {
    combine(dest, src1, src2, num_bits, |a, b| a ^ b);
}

pub fn and_assign(dest: &mut [Word], src: &[Word], num_bits: usize) {
    combine_assign(dest, src, num_bits, |a, b| a & b);
}

pub fn or_assign(dest: &mut [Word], src: &[Word], num_bits: usize) {
    combine_assign(dest, src, num_bits, |a, b| a | b);
}

pub fn xor_assign(dest: &mut [Word], src: &[Word], num_bits: usize) {
    combine_assign(dest, src, num_bits, |a, b| a ^ b);
}

/// `dest = !src`, the bits at or above `num_bits` stay cleared.
pub fn not(dest: &mut [Word], src: &[Word], num_bits: usize) {
    let n = bitmap_size(num_bits);
    for (d, s) in dest[..n].iter_mut().zip(&src[..n]) {
        *d = !*s;
    }
    mask_top_word(dest, num_bits);
}

/// Number of set bits (hamming weight).
pub fn count_set(words: &[Word], num_bits: usize) -> usize {
    words[..bitmap_size(num_bits)]
        .iter()
        .filter(|w| **w != 0)
        .map(|w| popcount(*w) as usize)
        .sum()
}

/// Number of cleared bits below `num_bits`.
pub fn count_clear(words: &[Word], num_bits: usize) -> usize {
    num_bits - count_set(words, num_bits)
}

/// Compares the raw memory of two arrays, byte by byte.
///
/// This is an ordering of the in-memory representation, not of the numeric value,
/// equality is the only property callers should rely on.
pub fn compare(a: &[Word], b: &[Word], num_bits: usize) -> Ordering {
    let n = bitmap_size(num_bits);
    a[..n]
        .iter()
        .map(|w| w.to_ne_bytes())
        .cmp(b[..n].iter().map(|w| w.to_ne_bytes()))
}

//
// Strings
//

/// Writes `num_bits` characters of `'0'`/`'1'`, bit 0 first.
pub fn write_bits<W: Write>(words: &[Word], num_bits: usize, out: &mut W) -> core::fmt::Result {
    for i in 0..num_bits {
        out.write_char(if get(words, i) { '1' } else { '0' })?;
    }
    Ok(())
}

/// Renders the array into `buf` as `'0'`/`'1'` characters, bit 0 first.
///
/// `buf` must hold at least `num_bits` bytes.
pub fn to_str<'b>(words: &[Word], num_bits: usize, buf: &'b mut [u8]) -> &'b str {
    for (i, c) in buf[..num_bits].iter_mut().enumerate() {
        *c = if get(words, i) { b'1' } else { b'0' };
    }
    core::str::from_utf8(&buf[..num_bits]).unwrap_or_default()
}

/// Same as [`to_str`], with a space after every 8 bits.
///
/// `buf` must hold at least `num_bits + num_bits / 8` bytes.
pub fn to_str_grouped<'b>(words: &[Word], num_bits: usize, buf: &'b mut [u8]) -> &'b str {
    let mut pos = 0;
    for i in 0..num_bits {
        buf[pos] = if get(words, i) { b'1' } else { b'0' };
        pos += 1;
        if (i + 1) % 8 == 0 {
            buf[pos] = b' ';
            pos += 1;
        }
    }
    core::str::from_utf8(&buf[..pos]).unwrap_or_default()
}

/// Parses `'0'`/`'1'` characters into the array, bit 0 first.
///
/// Any other character is treated as a separator: it is skipped and does not
/// take a bit position. Bits that aren't mentioned in `s` are left untouched,
/// characters past `num_bits` are ignored. Returns the number of bits written.
pub fn from_str(words: &mut [Word], num_bits: usize, s: &str) -> usize {
    let mut index = 0;
    for c in s.chars() {
        if index >= num_bits {
            break;
        }
        match c {
            '1' => set(words, index),
            '0' => clear(words, index),
            _ => continue,
        }
        index += 1;
    }
    index
}
