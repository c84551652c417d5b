//! JSON parsing entry points used when reading untrusted token segments.
//!
//! Three flavours exist: [`parse`] for probing (never fails, returns
//! `None`), [`parse_strict`] for when a value is required, and
//! [`parse_preserving_big_integers`] which keeps integers beyond the
//! `±(2^53 - 1)` range intact by turning them into strings before parsing.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

/// The largest integer that survives a round trip through an IEEE 754 double.
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

static BIG_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":(\s*)(-?[0-9]{16,})").expect("valid regex pattern"));

/// Parses `text`, returning `None` if it is not valid JSON.
pub fn parse(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

/// Parses `text` and reports why it is not valid JSON.
///
/// # Errors
///
/// Returns the underlying [`serde_json::Error`] if `text` is not valid JSON.
pub fn parse_strict(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}

/// Parses `text`, turning object members whose integer literal lies outside
/// of the safe integer range into strings holding the exact digits.
///
/// Only literals of at least 16 digits directly following a `:` are
/// considered. If the rewritten text does not parse (the match was inside a
/// string, for example), the original text is parsed instead.
///
/// # Errors
///
/// Returns the error of parsing the original text if neither form is valid
/// JSON.
pub fn parse_preserving_big_integers(text: &str) -> Result<Value, serde_json::Error> {
    let rewritten = BIG_INTEGER.replace_all(text, |caps: &Captures<'_>| {
        let (space, number) = (&caps[1], &caps[2]);
        if exceeds_safe_range(number) {
            format!(":{space}\"{number}\"")
        } else {
            caps[0].to_owned()
        }
    });

    match rewritten {
        Cow::Borrowed(_) => serde_json::from_str(text),
        Cow::Owned(rewritten) => {
            serde_json::from_str(&rewritten).or_else(|_| serde_json::from_str(text))
        }
    }
}

fn exceeds_safe_range(literal: &str) -> bool {
    let digits = literal.trim_start_matches('-').trim_start_matches('0');

    // 2^53 - 1 has 16 digits
    if digits.len() > 16 {
        return true;
    }

    digits
        .parse::<u64>()
        .is_ok_and(|value| value > MAX_SAFE_INTEGER)
}
