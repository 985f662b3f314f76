//! rwx permission triples

use crate::error::FsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const READ: u8 = 4;
const WRITE: u8 = 2;
const EXECUTE: u8 = 1;

/// Owner, group and others bits, each in `0..=7`.
///
/// Access checks consult the owner triple only; there is no user model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub owner: u8,
    pub group: u8,
    pub others: u8,
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            owner: 7,
            group: 5,
            others: 5,
        }
    }
}

impl Permissions {
    pub fn can_read(&self) -> bool {
        self.owner & READ != 0
    }

    pub fn can_write(&self) -> bool {
        self.owner & WRITE != 0
    }

    pub fn can_execute(&self) -> bool {
        self.owner & EXECUTE != 0
    }

    /// Octal mode string, e.g. `755`.
    pub fn mode(&self) -> String {
        format!("{}{}{}", self.owner, self.group, self.others)
    }
}

fn rwx(bits: u8) -> [char; 3] {
    [
        if bits & READ != 0 { 'r' } else { '-' },
        if bits & WRITE != 0 { 'w' } else { '-' },
        if bits & EXECUTE != 0 { 'x' } else { '-' },
    ]
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bits in [self.owner, self.group, self.others] {
            for c in rwx(bits) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Permissions {
    type Err = FsError;

    /// Parse a three-digit octal mode such as `644`.
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        let digits: Vec<u8> = mode
            .chars()
            .map(|c| c.to_digit(8).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(|| FsError::InvalidMode(mode.to_string()))?;

        match digits.as_slice() {
            [owner, group, others] => Ok(Self {
                owner: *owner,
                group: *group,
                others: *others,
            }),
            _ => Err(FsError::InvalidMode(mode.to_string())),
        }
    }
}
