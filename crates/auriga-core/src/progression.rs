//! Progression state: the event level and one-shot milestone flags.

use serde::{Deserialize, Serialize};

/// A monotonically increasing level plus one flag per milestone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    level: u32,
    flags: Vec<bool>,
}

impl Progression {
    /// Create a progression at level zero with `milestones` unset flags.
    pub fn new(milestones: usize) -> Self {
        Self {
            level: 0,
            flags: vec![false; milestones],
        }
    }

    /// Restore a progression from saved parts.
    pub fn restore(level: u32, flags: Vec<bool>) -> Self {
        Self { level, flags }
    }

    /// The current level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// All milestone flags, in milestone order.
    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    /// Whether milestone `index` has fired.
    pub fn has_fired(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Fire milestone `index`.
    ///
    /// Returns `true` only the first time; later calls leave the level and
    /// flag untouched.
    pub fn fire(&mut self, index: usize) -> bool {
        if index >= self.flags.len() {
            self.flags.resize(index + 1, false);
        }
        if self.flags[index] {
            return false;
        }
        self.flags[index] = true;
        self.level += 1;
        true
    }

    /// Number of milestones fired so far.
    pub fn fired_count(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let p = Progression::new(3);
        assert_eq!(p.level(), 0);
        assert_eq!(p.flags(), &[false, false, false]);
    }

    #[test]
    fn fire_is_idempotent() {
        let mut p = Progression::new(2);
        assert!(p.fire(1));
        assert_eq!(p.level(), 1);
        assert!(!p.fire(1));
        assert_eq!(p.level(), 1);
        assert!(p.has_fired(1));
        assert!(!p.has_fired(0));
    }

    #[test]
    fn fire_grows_flags_when_needed() {
        let mut p = Progression::new(0);
        assert!(p.fire(2));
        assert_eq!(p.flags(), &[false, false, true]);
        assert_eq!(p.fired_count(), 1);
    }
}
