//! Registrar lock actions.

use std::fmt;
use std::str::FromStr;

/// The `lock_action` sent to `save-registrar-lock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockAction {
    Lock,
    Unlock,
}

impl LockAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockAction::Lock => "lock",
            LockAction::Unlock => "unlock",
        }
    }
}

impl fmt::Display for LockAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for LockAction {
    /// `true` locks, `false` unlocks.
    fn from(locked: bool) -> Self {
        if locked {
            LockAction::Lock
        } else {
            LockAction::Unlock
        }
    }
}

impl FromStr for LockAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lock" => Ok(LockAction::Lock),
            "unlock" => Ok(LockAction::Unlock),
            other => Err(format!("unknown lock action '{other}', expected 'lock' or 'unlock'")),
        }
    }
}
