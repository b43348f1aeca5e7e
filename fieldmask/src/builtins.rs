//! Built-in transformations.
//!
//! [`Engine::with_builtins`] registers the default set:
//!
//! | Name | Category | Directive |
//! |------|----------|-----------|
//! | `zero` | any | `zero` |
//! | `char` | string | `char,[length],[fill]` |
//! | `rand` | string | `rand,[length]` |
//! | `hash` | string | `hash,[md5\|sha1\|sha256]` |
//!
//! A length of `-1` means "as long as the input"; an omitted or empty length
//! or bound takes the default, while a fill character or algorithm is only
//! defaulted when omitted. [`rand_int`], [`rand_uint`] and [`rand_float`]
//! are provided for registration under a name of your choosing:
//!
//! ```
//! use fieldmask::{builtins, Engine};
//!
//! let engine = Engine::with_builtins()
//!     .register_int(builtins::names::RAND, builtins::rand_int)
//!     .register_float(builtins::names::RAND, builtins::rand_float);
//! let age = engine.mask_int(36, "rand,100,18").unwrap();
//! assert!((18..100).contains(&age));
//! ```

use std::{cmp::Ordering, fmt::Display, iter, str::FromStr};

use md5::Md5;
use rand::{thread_rng, Rng};
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::{engine::Engine, error::MaskError, value::Value};

/// Names the default transformations are registered under.
pub mod names {
    pub const ZERO: &str = "zero";
    pub const CHAR: &str = "char";
    pub const RAND: &str = "rand";
    pub const HASH: &str = "hash";
}

/// Output length when a directive gives none.
pub const DEFAULT_LENGTH: usize = 8;
/// Fill character of the registered `char` transformation.
pub const DEFAULT_FILL_CHAR: char = '*';

const LETTERS: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LETTER_INDEX_BITS: u32 = 6;
const LETTER_INDEX_MASK: u64 = (1 << LETTER_INDEX_BITS) - 1;
const LETTERS_PER_WORD: u32 = u64::BITS / LETTER_INDEX_BITS;

impl Engine {
    /// An engine with `zero`, `char`, `rand` and `hash` registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::new()
            .register_any(names::ZERO, zero)
            .register_string(names::CHAR, char_fill(DEFAULT_FILL_CHAR))
            .register_string(names::RAND, rand_string)
            .register_string(names::HASH, hash)
    }
}

/// Replaces any value with the zero value of its shape.
pub fn zero(value: &Value, _args: &[&str]) -> Result<Value, MaskError> {
    Ok(value.zeroed())
}

/// Builds a fixed-character fill transformation.
///
/// Arguments: `[length, fill]`. `default_fill` is used when `fill` is omitted;
/// a supplied `fill`, even an empty one, must be exactly one character.
pub fn char_fill(
    default_fill: char,
) -> impl Fn(&str, &[&str]) -> Result<String, MaskError> + Clone + Send + Sync + 'static {
    move |value, args| {
        let token = args.first().copied();
        let length = parse_length(token, value)?;
        let fill = match args.get(1).copied() {
            None => default_fill,
            Some(fill) => single_char(fill)?,
        };
        let mut filled = reserve_output(token, length, fill.len_utf8())?;
        filled.extend(iter::repeat(fill).take(length));
        Ok(filled)
    }
}

/// Replaces a string with random ASCII letters. Arguments: `[length]`.
pub fn rand_string(value: &str, args: &[&str]) -> Result<String, MaskError> {
    rand_string_with(&mut thread_rng(), value, args)
}

/// [`rand_string`] drawing from `rng`.
pub fn rand_string_with<R>(rng: &mut R, value: &str, args: &[&str]) -> Result<String, MaskError>
where
    R: Rng + ?Sized,
{
    let token = args.first().copied();
    let length = parse_length(token, value)?;
    let mut letters = reserve_output(token, length, 1)?;
    push_random_letters(rng, &mut letters, length);
    Ok(letters)
}

/// Replaces a string with the lowercase hex digest of its bytes.
/// Arguments: `[algorithm]`, one of `md5`, `sha1`, `sha256`. Only an omitted
/// argument defaults to `sha256`.
pub fn hash(value: &str, args: &[&str]) -> Result<String, MaskError> {
    match args.first().copied() {
        None | Some("sha256") => Ok(hex_digest::<Sha256>(value)),
        Some("sha1") => Ok(hex_digest::<Sha1>(value)),
        Some("md5") => Ok(hex_digest::<Md5>(value)),
        Some(other) => Err(MaskError::UnsupportedAlgorithm(other.to_string())),
    }
}

/// Draws a random integer in `[min, max)`. Arguments: `[max, min]`,
/// defaulting to `i64::MAX` and `0`.
pub fn rand_int(value: i64, args: &[&str]) -> Result<i64, MaskError> {
    rand_int_with(&mut thread_rng(), value, args)
}

/// [`rand_int`] drawing from `rng`.
pub fn rand_int_with<R>(rng: &mut R, _value: i64, args: &[&str]) -> Result<i64, MaskError>
where
    R: Rng + ?Sized,
{
    let max = parse_bound(args.first().copied(), i64::MAX)?;
    let min = parse_bound(args.get(1).copied(), 0)?;
    if max <= min {
        return Err(empty_range(min, max));
    }
    Ok(rng.gen_range(min..max))
}

/// Draws a random unsigned integer in `[min, max)`. Arguments: `[max, min]`,
/// defaulting to `u64::MAX` and `0`.
pub fn rand_uint(value: u64, args: &[&str]) -> Result<u64, MaskError> {
    rand_uint_with(&mut thread_rng(), value, args)
}

/// [`rand_uint`] drawing from `rng`.
pub fn rand_uint_with<R>(rng: &mut R, _value: u64, args: &[&str]) -> Result<u64, MaskError>
where
    R: Rng + ?Sized,
{
    let max = parse_bound(args.first().copied(), u64::MAX)?;
    let min = parse_bound(args.get(1).copied(), 0)?;
    if max <= min {
        return Err(empty_range(min, max));
    }
    Ok(rng.gen_range(min..max))
}

/// Draws a random float in `[min, max)` truncated to `digit` decimal places.
/// Arguments: `[max, min, digit]`, defaulting to `1`, `0` and `0`.
pub fn rand_float(value: f64, args: &[&str]) -> Result<f64, MaskError> {
    rand_float_with(&mut thread_rng(), value, args)
}

/// [`rand_float`] drawing from `rng`.
pub fn rand_float_with<R>(rng: &mut R, _value: f64, args: &[&str]) -> Result<f64, MaskError>
where
    R: Rng + ?Sized,
{
    let max: f64 = parse_bound(args.first().copied(), 1.0)?;
    let min: f64 = parse_bound(args.get(1).copied(), 0.0)?;
    let digit_token = args.get(2).copied();
    let digit: i32 = parse_bound(digit_token, 0)?;
    if max.partial_cmp(&min) != Some(Ordering::Greater) {
        return Err(empty_range(min, max));
    }
    let scale = 10_f64.powi(digit);
    if !scale.is_normal() {
        return Err(MaskError::invalid_argument(
            digit_token.unwrap_or_default(),
            "decimal places out of range",
        ));
    }
    let sample: f64 = rng.gen();
    Ok((sample * (max - min)).mul_add(scale, min * scale).trunc() / scale)
}

fn parse_length(token: Option<&str>, value: &str) -> Result<usize, MaskError> {
    match token {
        None | Some("") => Ok(DEFAULT_LENGTH),
        Some("-1") => Ok(value.chars().count()),
        Some(token) => token
            .parse()
            .map_err(|err| MaskError::invalid_argument(token, err)),
    }
}

/// Reserves room for `length` characters of `width` bytes, or fails with
/// `InvalidArgument` naming the length token.
fn reserve_output(token: Option<&str>, length: usize, width: usize) -> Result<String, MaskError> {
    let argument = token.unwrap_or_default();
    let bytes = length
        .checked_mul(width)
        .ok_or_else(|| MaskError::invalid_argument(argument, "length overflows"))?;
    let mut output = String::new();
    output
        .try_reserve_exact(bytes)
        .map_err(|err| MaskError::invalid_argument(argument, err))?;
    Ok(output)
}

fn parse_bound<T>(token: Option<&str>, default: T) -> Result<T, MaskError>
where
    T: FromStr,
    T::Err: Display,
{
    match token {
        None | Some("") => Ok(default),
        Some(token) => token
            .parse()
            .map_err(|err| MaskError::invalid_argument(token, err)),
    }
}

fn single_char(token: &str) -> Result<char, MaskError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(fill), None) => Ok(fill),
        _ => Err(MaskError::InvalidFillChar(token.to_string())),
    }
}

fn empty_range(min: impl Display, max: impl Display) -> MaskError {
    MaskError::EmptyRange {
        min: min.to_string(),
        max: max.to_string(),
    }
}

fn hex_digest<D: Digest>(value: &str) -> String {
    hex::encode(D::digest(value.as_bytes()))
}

/// Letters are taken six bits at a time from 64-bit words; indices past the
/// alphabet are discarded so every letter is equally likely.
fn push_random_letters<R>(rng: &mut R, letters: &mut String, length: usize)
where
    R: Rng + ?Sized,
{
    while letters.len() < length {
        let mut word: u64 = rng.gen();
        for _ in 0..LETTERS_PER_WORD {
            if letters.len() == length {
                break;
            }
            let index = usize::try_from(word & LETTER_INDEX_MASK).unwrap_or(usize::MAX);
            if let Some(&letter) = LETTERS.get(index) {
                letters.push(char::from(letter));
            }
            word >>= LETTER_INDEX_BITS;
        }
    }
}
