//! Identifier case conversions between Android resource ids (`snake_case`)
//! and Kotlin names (`lowerCamelCase` / `UpperCamelCase`).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SNAKE_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"_[a-zA-Z0-9]").expect("valid regex"));

/// `code_01_written_below` -> `code01WrittenBelow`.
///
/// Every underscore followed by an alphanumeric character is dropped and the
/// character upper-cased; digits have no case and pass through unchanged.
pub fn snake_to_lower_camel(input: &str) -> String {
    SNAKE_SEGMENT
        .replace_all(input, |caps: &Captures<'_>| caps[0][1..].to_uppercase())
        .into_owned()
}

/// `main_activity` -> `MainActivity`.
pub fn snake_to_upper_camel(input: &str) -> String {
    capitalize(&snake_to_lower_camel(input))
}

/// `MainActivityBinding` -> `main_activity_binding`.
///
/// An underscore goes before every upper-case letter that follows a
/// lower-case letter or digit, then the whole name is lower-cased.
pub fn camel_to_snake(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;
    for ch in input.chars() {
        if ch.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit()) {
            out.push('_');
        }
        out.push(ch.to_ascii_lowercase());
        prev = Some(ch);
    }
    out
}

pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "../tests/src/case_tests.rs"]
mod tests;
