//! List reconciliation for multi-valued attributes.

use std::collections::HashSet;

/// Elements of `a` that are not in `b`, in `a`'s order.
///
/// Not symmetric: `find_diff(current, desired)` is what to remove and
/// `find_diff(desired, current)` is what to add.
pub fn find_diff<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<String> {
    let exclude: HashSet<&str> = b.iter().map(AsRef::as_ref).collect();
    a.iter()
        .map(AsRef::as_ref)
        .filter(|item| !exclude.contains(item))
        .map(str::to_string)
        .collect()
}

/// Commands-to-be for moving a list attribute from `current` to `desired`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListChanges {
    /// Present now, absent from the desired list
    pub remove: Vec<String>,
    /// Desired, absent now
    pub add: Vec<String>,
}

impl ListChanges {
    /// Diff `current` against `desired`.
    pub fn between<S: AsRef<str>>(current: &[S], desired: &[S]) -> Self {
        Self {
            remove: find_diff(current, desired),
            add: find_diff(desired, current),
        }
    }

    /// True when the lists already agree as sets.
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.add.is_empty()
    }
}
