//! The clinician's current order selection.

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};

/// Read access to a set of selected order names.
///
/// The engine only ever asks whether a name is selected, so any set-like
/// collection can be checked directly.
pub trait OrderSelection {
    /// Returns true if `name` is selected.
    fn is_selected(&self, name: &str) -> bool;
}

/// Insertion-ordered set of selected order names.
///
/// Membership is unique; evaluation ignores order, display keeps it.
///
/// # Example
///
/// ```rust
/// use order_check::Selection;
///
/// let mut selection = Selection::new();
/// selection.insert("血常规");
/// selection.insert("APTT");
/// selection.insert("血常规");
///
/// assert_eq!(selection.len(), 2);
/// assert_eq!(selection.iter().collect::<Vec<_>>(), vec!["血常规", "APTT"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Selection {
    items: Vec<String>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name`. Returns false if it was already selected.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.items.push(name);
        true
    }

    /// Removes `name`. Returns false if it was not selected.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.items.iter().position(|item| item == name) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Sets the checked state of `name`, as a checkbox would.
    pub fn set(&mut self, name: &str, checked: bool) {
        if checked {
            self.insert(name);
        } else {
            self.remove(name);
        }
    }

    /// Flips `name` and returns its new state.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.remove(name) {
            false
        } else {
            self.insert(name);
            true
        }
    }

    /// Returns true if `name` is selected.
    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item == name)
    }

    /// Removes every order.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of selected orders.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Selected names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Selected names as a slice, in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for name in iter {
            selection.insert(name);
        }
        selection
    }
}

impl<S: Into<String>> Extend<S> for Selection {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

/// Duplicates after the first are dropped.
impl From<Vec<String>> for Selection {
    fn from(items: Vec<String>) -> Self {
        items.into_iter().collect()
    }
}

impl From<Selection> for Vec<String> {
    fn from(selection: Selection) -> Self {
        selection.items
    }
}

impl IntoIterator for Selection {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl OrderSelection for Selection {
    fn is_selected(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<H: BuildHasher> OrderSelection for HashSet<String, H> {
    fn is_selected(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl OrderSelection for BTreeSet<String> {
    fn is_selected(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<T: AsRef<str>> OrderSelection for [T] {
    fn is_selected(&self, name: &str) -> bool {
        self.iter().any(|item| item.as_ref() == name)
    }
}

impl<T: AsRef<str>> OrderSelection for Vec<T> {
    fn is_selected(&self, name: &str) -> bool {
        self.as_slice().is_selected(name)
    }
}
