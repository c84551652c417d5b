//! Common test helpers.
#![allow(dead_code)]

use jws::Key;

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Reads a PEM file from the `tests/vectors/keys` directory.
pub fn read_key(name: &str) -> TestResult<Key> {
    let pem = std::fs::read_to_string(format!(
        "{}/tests/vectors/keys/{name}.pem",
        env!("CARGO_MANIFEST_DIR"),
    ))?;

    Ok(Key::from(pem))
}

/// Reads a file from the `tests/vectors` directory.
pub fn read_vector(name: &str) -> TestResult<String> {
    Ok(std::fs::read_to_string(format!(
        "{}/tests/vectors/{name}",
        env!("CARGO_MANIFEST_DIR"),
    ))?)
}

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Swaps a base64url symbol for its neighbour in the alphabet, which differs
/// only in the lowest bit.
fn neighbour(symbol: char) -> char {
    let index = ALPHABET
        .iter()
        .position(|c| char::from(*c) == symbol)
        .expect("signature is base64url");
    char::from(ALPHABET[index ^ 1])
}

/// Alterations of the signature segment that must all fail verification:
/// the first symbol replaced, the last symbol swapped for its neighbour and
/// an extra symbol appended.
pub fn tamper(token: &str) -> Vec<String> {
    let (input, signature) = token.rsplit_once('.').expect("token has a signature segment");
    let mut symbols: Vec<char> = signature.chars().collect();
    let first = symbols.first().copied().expect("signature is not empty");
    let last = symbols.last().copied().expect("signature is not empty");

    let mut variants = Vec::new();

    symbols[0] = if first == 'A' { 'B' } else { 'A' };
    variants.push(format!("{input}.{}", symbols.iter().collect::<String>()));
    symbols[0] = first;

    let end = symbols.len() - 1;
    symbols[end] = neighbour(last);
    variants.push(format!("{input}.{}", symbols.iter().collect::<String>()));

    variants.push(format!("{input}.{signature}A"));
    variants
}
