//! Multi-column sort specification and its update state machine.

use serde::{Deserialize, Serialize};

use crate::column::Column;

/// Sort direction for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Ascending,
    /// Descending order (Z-A, 9-0).
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Sign used by coded-rank arithmetic: `+1` ascending, `-1` descending.
    pub fn sign(self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }

    /// Canonical direction for a signed code; `0` means "no direction".
    pub fn from_sign(sign: i32) -> Option<Self> {
        match sign {
            s if s > 0 => Some(SortDirection::Ascending),
            s if s < 0 => Some(SortDirection::Descending),
            _ => None,
        }
    }

    pub fn is_descending(self) -> bool {
        self == SortDirection::Descending
    }
}

/// One entry of the sort specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Ascending)
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Descending)
    }
}

/// How a user interaction updates the sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortUpdate {
    /// Plain click: replace/cycle the primary sort.
    Simple,
    /// Shift-click: append as lowest priority, or cycle the tail key.
    Tail,
    /// Ctrl+shift-click: insert/cycle at the remembered priority slot.
    Amend,
    /// Drop the column from the specification.
    Remove,
}

/// Preference flags governing the update state machine. Constructor-time
/// configuration of the indexer; replaced only via an explicit preferences
/// update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortPreferences {
    /// When set, cycling a descending column removes it from the sort
    /// (asc -> desc -> none) instead of toggling back to ascending.
    pub three_state: bool,
    /// When set, a plain click clears every other column before sorting the
    /// clicked one.
    pub single_column_by_default: bool,
}

impl Default for SortPreferences {
    fn default() -> Self {
        Self {
            three_state: false,
            single_column_by_default: true,
        }
    }
}

/// Ordered multi-column sort specification.
///
/// The key list order encodes priority: the first entry is the primary sort.
/// An empty list means "unsorted". Column keys are unique within the list.
///
/// # Example
///
/// ```
/// use rowdex::{SortPreferences, SortState, SortUpdate};
///
/// let mut sort = SortState::new(SortPreferences::default());
/// sort.update("name", SortUpdate::Simple);
/// sort.update("mass", SortUpdate::Tail);
/// assert_eq!(sort.signed_rank("name"), 1);
/// assert_eq!(sort.signed_rank("mass"), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SortState {
    keys: Vec<SortKey>,
    /// 1-based priority slot remembered for AMEND insertions.
    last_used_rank: usize,
    preferences: SortPreferences,
}

impl SortState {
    pub fn new(preferences: SortPreferences) -> Self {
        Self {
            keys: Vec::new(),
            last_used_rank: 1,
            preferences,
        }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_sorted(&self) -> bool {
        !self.keys.is_empty()
    }

    /// The primary sort key, if any.
    pub fn primary(&self) -> Option<&SortKey> {
        self.keys.first()
    }

    pub fn preferences(&self) -> SortPreferences {
        self.preferences
    }

    /// Replace the preference flags. Returns true if they changed.
    pub fn set_preferences(&mut self, preferences: SortPreferences) -> bool {
        if self.preferences == preferences {
            return false;
        }
        self.preferences = preferences;
        true
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.keys.iter().position(|k| k.column == column)
    }

    /// Apply one user interaction. Returns true iff the specification
    /// actually changed; callers use this to decide whether to bump a
    /// render-triggering version counter.
    pub fn update(&mut self, column: &str, mode: SortUpdate) -> bool {
        if mode == SortUpdate::Remove {
            let Some(pos) = self.position(column) else {
                return false;
            };
            self.keys.remove(pos);
            return true;
        }

        // First activation on an empty specification.
        if self.keys.is_empty() {
            self.keys.push(SortKey::asc(column));
            self.last_used_rank = 1;
            return true;
        }

        match mode {
            SortUpdate::Simple => self.update_simple(column),
            SortUpdate::Tail => self.update_tail(column),
            SortUpdate::Amend => self.update_amend(column),
            SortUpdate::Remove => unreachable!("handled above"),
        }
    }

    fn update_simple(&mut self, column: &str) -> bool {
        let existing = self.position(column);

        // Third state of the tri-state cycle: asc -> desc -> none.
        if let Some(pos) = existing {
            if self.keys[pos].direction.is_descending() && self.preferences.three_state {
                self.keys.remove(pos);
                return true;
            }
        }

        let next = existing
            .map(|pos| self.keys[pos].direction.flipped())
            .unwrap_or(SortDirection::Ascending);

        if self.preferences.single_column_by_default || existing.is_none() {
            self.keys.clear();
        } else if let Some(pos) = existing {
            self.keys.remove(pos);
        }
        self.keys.insert(0, SortKey::new(column, next));
        true
    }

    fn update_tail(&mut self, column: &str) -> bool {
        let last = self.keys.len() - 1;
        match self.position(column) {
            None => {
                self.keys.push(SortKey::asc(column));
                true
            }
            // Only the tail key may be cycled through TAIL.
            Some(pos) if pos != last => false,
            Some(pos) => {
                if self.keys[pos].direction.is_descending() && self.preferences.three_state {
                    self.keys.pop();
                } else {
                    self.keys[pos].direction = self.keys[pos].direction.flipped();
                }
                true
            }
        }
    }

    fn update_amend(&mut self, column: &str) -> bool {
        match self.position(column) {
            None => {
                let slot = self.last_used_rank - 1;
                if slot > self.keys.len() {
                    return false;
                }
                self.keys.insert(slot, SortKey::asc(column));
                true
            }
            Some(pos) => {
                if self.keys[pos].direction.is_descending() && self.preferences.three_state {
                    self.keys.remove(pos);
                    self.last_used_rank = pos + 1;
                } else {
                    self.keys[pos].direction = self.keys[pos].direction.flipped();
                }
                true
            }
        }
    }

    /// Signed priority rank of a column: `0` when unsorted, otherwise
    /// `sign * (1-based position in the specification)`.
    pub fn signed_rank(&self, column: &str) -> i32 {
        match self.position(column) {
            Some(pos) => self.keys[pos].direction.sign() * (pos as i32 + 1),
            None => 0,
        }
    }

    /// Coded rank of the primary sort column against the schema:
    /// `sign * (1-based schema index)`, or `0` when there is no active sort
    /// or the primary key is not in the schema. This is the hand-off value
    /// for external sort functions that do not know the key-list structure.
    pub fn highest_coded_column(&self, columns: &[Column]) -> i32 {
        let Some(primary) = self.primary() else {
            return 0;
        };
        match columns.iter().position(|c| c.key == primary.column) {
            Some(index) => primary.direction.sign() * (index as i32 + 1),
            None => 0,
        }
    }
}

/// Decode a coded column rank back into its schema column and direction.
pub fn decode_coded_column(coded: i32, columns: &[Column]) -> Option<(&Column, SortDirection)> {
    let direction = SortDirection::from_sign(coded)?;
    let index = coded.unsigned_abs() as usize - 1;
    columns.get(index).map(|column| (column, direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_round_trip() {
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            assert_eq!(SortDirection::from_sign(direction.sign()), Some(direction));
        }
        assert_eq!(SortDirection::from_sign(0), None);
    }

    #[test]
    fn first_activation_is_ascending() {
        let mut sort = SortState::new(SortPreferences::default());
        assert!(sort.update("a", SortUpdate::Tail));
        assert_eq!(sort.keys(), &[SortKey::asc("a")]);
    }
}
