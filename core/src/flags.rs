//! Short-flag allocation.
//!
//! Every option gets exactly one single-letter switch, derived from its name:
//! the first letter of the name that is still free, or failing that the first
//! free letter of `a..=z`. Allocation is order dependent and letters are
//! never released.
//!
//! # Examples
//!
//! ```
//! use easy_options_core::FlagAllocator;
//!
//! let mut flags = FlagAllocator::new();
//! assert_eq!(flags.allocate("my_option").unwrap(), 'm');
//! assert_eq!(flags.allocate("my_second_option").unwrap(), 'y');
//! assert_eq!(flags.allocate("my_special_option").unwrap(), 's');
//! ```

use std::collections::BTreeMap;

use thiserror::Error;

/// Short-flag allocation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    /// All 26 letters are taken.
    #[error("no short flag left for option {0:?}: every letter a-z is already allocated")]
    Exhausted(String),
}

/// Allocated letters and the option owning each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortFlagTable {
    owners: BTreeMap<char, String>,
}

impl ShortFlagTable {
    /// Option owning a letter.
    pub fn owner(&self, flag: char) -> Option<&str> {
        self.owners.get(&flag).map(String::as_str)
    }

    pub fn contains(&self, flag: char) -> bool {
        self.owners.contains_key(&flag)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Letters in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.owners.iter().map(|(c, owner)| (*c, owner.as_str()))
    }

    fn insert(&mut self, flag: char, owner: &str) {
        self.owners.insert(flag, owner.to_string());
    }
}

/// Deterministic short-flag allocator.
#[derive(Debug, Clone, Default)]
pub struct FlagAllocator {
    table: ShortFlagTable,
}

impl FlagAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a letter as taken without going through name-based allocation,
    /// e.g. `h` for the help switch.
    ///
    /// Reserving a letter that is already allocated keeps the first owner.
    pub fn reserve(&mut self, flag: char, owner: &str) {
        let flag = flag.to_ascii_lowercase();
        if !self.table.contains(flag) {
            self.table.insert(flag, owner);
        }
    }

    /// Assigns the next short flag for `option_name`.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Exhausted`] when every letter is already taken.
    pub fn allocate(&mut self, option_name: &str) -> Result<char, FlagError> {
        let flag = option_name
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
            .find(|c| !self.table.contains(*c))
            .or_else(|| ('a'..='z').find(|c| !self.table.contains(*c)))
            .ok_or_else(|| FlagError::Exhausted(option_name.to_string()))?;

        self.table.insert(flag, option_name);
        Ok(flag)
    }

    pub fn is_allocated(&self, flag: char) -> bool {
        self.table.contains(flag)
    }

    pub fn table(&self) -> &ShortFlagTable {
        &self.table
    }
}
