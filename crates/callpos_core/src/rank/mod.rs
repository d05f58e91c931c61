//! Fractional rank keys for user-ordered collections.
//!
//! # Responsibility
//! - Generate a key strictly between two existing keys (`rank_between`) so a
//!   drag-and-drop move costs one row update regardless of collection size.
//! - Generate an evenly spaced initial key sequence (`even_ranks`) for
//!   seeding a brand-new ordered collection.
//!
//! # Invariants
//! - Keys are strings over `'a'..='z'`; byte-wise lexicographic comparison is
//!   the semantic order. A shorter key compares as if right-padded with `'a'`.
//! - Digit arithmetic is exact base-26 (`a=0 .. z=25`); borrows and carries
//!   never escape the most significant digit for valid inputs.
//! - Both operations are pure and stateless; serialization of concurrent
//!   read-modify-write sequences is the caller's transaction's job.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Sortable order key attached to a ranked row.
///
/// Kept as a type alias: the key is persisted as a plain text column and
/// compared with ordinary string comparison everywhere.
pub type RankKey = String;

/// Result type used by rank key operations.
pub type RankResult<T> = Result<T, RankError>;

/// Number of symbols in the rank alphabet (`'a'..='z'`).
pub const ALPHABET_SIZE: u8 = 26;

/// Key length used for freshly seeded collections.
pub const DEFAULT_KEY_LEN: usize = 8;

const MIN_SYMBOL: u8 = b'a';
// Alphabet midpoint, appended when two keys are adjacent at their width.
const MID_SYMBOL: u8 = b'n';

/// Errors from rank key generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// A bound key is the empty string.
    EmptyKey,
    /// A bound key contains a symbol outside `'a'..='z'`.
    InvalidSymbol { key: String, symbol: char },
    /// `lo` does not sort strictly before `hi`.
    NotAscending { lo: String, hi: String },
    /// No representable key exists between the bounds (`hi` is `lo` plus
    /// trailing minimum symbols, e.g. `"ab"` / `"aba"`).
    Exhausted { lo: String, hi: String },
    /// A carry escaped the most significant digit; indicates corrupted keys.
    Overflow,
    /// `even_ranks` was asked for zero keys.
    ZeroCount,
    /// `even_ranks` was asked for zero-length keys.
    ZeroLength,
    /// The requested count cannot produce distinct keys at this length.
    CountExceedsKeySpace { count: usize, length: usize },
}

impl Display for RankError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "rank key must not be empty"),
            Self::InvalidSymbol { key, symbol } => {
                write!(f, "rank key `{key}` contains symbol `{symbol}` outside a..z")
            }
            Self::NotAscending { lo, hi } => {
                write!(f, "rank bounds must be strictly ascending: `{lo}` >= `{hi}`")
            }
            Self::Exhausted { lo, hi } => {
                write!(f, "no key exists between `{lo}` and `{hi}`")
            }
            Self::Overflow => write!(f, "rank arithmetic carried past the most significant digit"),
            Self::ZeroCount => write!(f, "seed count must be at least 1"),
            Self::ZeroLength => write!(f, "seed key length must be at least 1"),
            Self::CountExceedsKeySpace { count, length } => write!(
                f,
                "cannot seed {count} distinct keys of length {length}"
            ),
        }
    }
}

impl Error for RankError {}

/// Returns the reserved minimum key of the given length (`"a"` repeated).
pub fn min_key(length: usize) -> RankKey {
    "a".repeat(length)
}

/// Returns the reserved maximum key of the given length (`"z"` repeated).
pub fn max_key(length: usize) -> RankKey {
    "z".repeat(length)
}

/// Checks that a key is non-empty and stays inside the rank alphabet.
///
/// Used on every input bound and on keys read back from storage, so a
/// corrupted sort column fails loudly instead of reordering rows silently.
pub fn validate_key(key: &str) -> RankResult<()> {
    if key.is_empty() {
        return Err(RankError::EmptyKey);
    }
    for symbol in key.chars() {
        if !symbol.is_ascii_lowercase() {
            return Err(RankError::InvalidSymbol {
                key: key.to_string(),
                symbol,
            });
        }
    }
    Ok(())
}

/// Returns a key sorting strictly between `lo` and `hi`.
///
/// The bounds are interpreted as base-26 numerals (shorter bound right-padded
/// with the minimum symbol). When more than one value fits between them the
/// result is `lo` plus half the difference, at the padded width. When the
/// bounds are adjacent at that width the result is the padded `lo` with one
/// midpoint symbol (`'n'`) appended, extending precision by one character.
///
/// # Errors
/// - `EmptyKey` / `InvalidSymbol` when a bound is not a valid key.
/// - `NotAscending` when `lo >= hi`.
/// - `Exhausted` when `lo < hi` but no in-between key is representable.
pub fn rank_between(lo: &str, hi: &str) -> RankResult<RankKey> {
    validate_key(lo)?;
    validate_key(hi)?;
    if lo >= hi {
        return Err(RankError::NotAscending {
            lo: lo.to_string(),
            hi: hi.to_string(),
        });
    }

    let width = lo.len().max(hi.len());
    let mut lo_digits = padded_digits(lo, width);
    let hi_digits = padded_digits(hi, width);

    let mut diff = subtract(&hi_digits, &lo_digits);
    if numeral_fits_in_one(&diff) {
        if numeral_is_zero(&diff) {
            // lo < hi as raw strings, but equal once padded: hi is lo plus
            // trailing minimum symbols, and nothing sorts between them.
            return Err(RankError::Exhausted {
                lo: lo.to_string(),
                hi: hi.to_string(),
            });
        }
        let mut key = digits_to_key(&lo_digits);
        key.push(char::from(MID_SYMBOL));
        return Ok(key);
    }

    halve(&mut diff);
    if add_in_place(&mut lo_digits, &diff) != 0 {
        return Err(RankError::Overflow);
    }
    Ok(digits_to_key(&lo_digits))
}

/// Returns `count` strictly increasing keys of fixed `length`, evenly spaced
/// across the whole key space.
///
/// Keys are emitted at `step, 2*step, .. count*step` above the minimum key,
/// where `step` is the total span divided by `count` (floored). The minimum
/// key itself is never emitted, so a seeded list always leaves room to
/// prepend. The result is sorted ascending before returning.
///
/// # Errors
/// - `ZeroCount` / `ZeroLength` for degenerate arguments.
/// - `CountExceedsKeySpace` when the per-item step rounds to zero.
pub fn even_ranks(count: usize, length: usize) -> RankResult<Vec<RankKey>> {
    if count == 0 {
        return Err(RankError::ZeroCount);
    }
    if length == 0 {
        return Err(RankError::ZeroLength);
    }

    // Span between "a"*length and "z"*length: every digit position holds 25.
    let mut step = vec![ALPHABET_SIZE - 1; length];
    divide_in_place(&mut step, count);
    if numeral_is_zero(&step) {
        return Err(RankError::CountExceedsKeySpace { count, length });
    }

    let mut cursor = vec![0u8; length];
    let mut keys = Vec::with_capacity(count);
    for _ in 0..count {
        // count * step <= span, so the cursor never leaves the key space.
        if add_in_place(&mut cursor, &step) != 0 {
            return Err(RankError::Overflow);
        }
        keys.push(digits_to_key(&cursor));
    }

    // Construction is already ascending; sorting guards rounding artifacts.
    keys.sort();
    Ok(keys)
}

/// Converts a key to base-26 digits, right-padded with zeros to `width`.
fn padded_digits(key: &str, width: usize) -> Vec<u8> {
    let mut digits = vec![0u8; width];
    for (index, byte) in key.bytes().enumerate() {
        digits[index] = byte - MIN_SYMBOL;
    }
    digits
}

fn digits_to_key(digits: &[u8]) -> RankKey {
    digits
        .iter()
        .map(|digit| char::from(MIN_SYMBOL + digit))
        .collect()
}

/// Computes `hi - lo` digit by digit, borrowing into the next more
/// significant digit. Requires `hi >= lo` at equal width.
fn subtract(hi: &[u8], lo: &[u8]) -> Vec<u8> {
    let mut diff = vec![0u8; hi.len()];
    let mut borrow = 0u8;
    for index in (0..hi.len()).rev() {
        let mut top = i16::from(hi[index]) - i16::from(borrow);
        borrow = 0;
        if top < i16::from(lo[index]) {
            top += i16::from(ALPHABET_SIZE);
            borrow = 1;
        }
        diff[index] = (top - i16::from(lo[index])) as u8;
    }
    diff
}

/// Floor-halves a numeral in place, most significant digit first.
fn halve(digits: &mut [u8]) {
    let mut remainder = 0u16;
    for digit in digits.iter_mut() {
        let current = remainder * u16::from(ALPHABET_SIZE) + u16::from(*digit);
        *digit = (current / 2) as u8;
        remainder = current % 2;
    }
}

/// Floor-divides a numeral in place by `divisor`, most significant digit
/// first.
fn divide_in_place(digits: &mut [u8], divisor: usize) {
    let divisor = divisor as u128;
    let mut remainder = 0u128;
    for digit in digits.iter_mut() {
        let current = remainder * u128::from(ALPHABET_SIZE) + u128::from(*digit);
        *digit = (current / divisor) as u8;
        remainder = current % divisor;
    }
}

/// Adds `offset` into `base` least significant digit first, returning the
/// final carry (0 for every in-range result).
fn add_in_place(base: &mut [u8], offset: &[u8]) -> u8 {
    let mut carry = 0u8;
    for index in (0..base.len()).rev() {
        let sum = base[index] + offset[index] + carry;
        if sum >= ALPHABET_SIZE {
            base[index] = sum - ALPHABET_SIZE;
            carry = 1;
        } else {
            base[index] = sum;
            carry = 0;
        }
    }
    carry
}

fn numeral_is_zero(digits: &[u8]) -> bool {
    digits.iter().all(|digit| *digit == 0)
}

fn numeral_fits_in_one(digits: &[u8]) -> bool {
    let (last, rest) = match digits.split_last() {
        Some(parts) => parts,
        None => return true,
    };
    *last <= 1 && rest.iter().all(|digit| *digit == 0)
}
