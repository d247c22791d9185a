//! Line-pattern attribute parsing within a section.
//!
//! Patterns are applied to one line at a time and the first capture group is
//! the value. A missing attribute is the empty string (scalars) or an empty
//! list, never an error. Negation lines such as `no name` simply don't match
//! a positive pattern.

use regex::Regex;

/// First capture of the first line in `section` matching `pattern`, or an
/// empty string.
pub fn parse_scalar(section: &str, pattern: &Regex) -> String {
    section
        .lines()
        .find_map(|line| pattern.captures(line)?.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First capture of every line in `section` matching `pattern`, in file
/// order. Duplicates are kept.
pub fn parse_list(section: &str, pattern: &Regex) -> Vec<String> {
    section
        .lines()
        .filter_map(|line| pattern.captures(line)?.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
