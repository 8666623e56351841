//! Tri-state check status

use serde::Serialize;

use crate::error::Error;

/// Check status of a node in a selection tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Unchecked,
    /// Nodes start out checked.
    #[default]
    Checked,
    /// Only ever produced by aggregating mixed children.
    Indeterminate,
}

impl CheckState {
    /// Whether a node in this state shows up in rendered output.
    pub fn is_visible(self) -> bool {
        !matches!(self, CheckState::Unchecked)
    }

    /// Aggregate the states of a node's immediate children.
    ///
    /// Returns `None` for an empty iterator: a childless node keeps whatever
    /// state was set on it explicitly.
    pub fn aggregate<I>(children: I) -> Option<CheckState>
    where
        I: IntoIterator<Item = CheckState>,
    {
        let mut any_on = false;
        let mut any_off = false;
        let mut seen = false;

        for state in children {
            seen = true;
            match state {
                CheckState::Checked => any_on = true,
                CheckState::Unchecked => any_off = true,
                CheckState::Indeterminate => {
                    any_on = true;
                    any_off = true;
                }
            }
            if any_on && any_off {
                return Some(CheckState::Indeterminate);
            }
        }

        if !seen {
            None
        } else if any_on {
            Some(CheckState::Checked)
        } else {
            Some(CheckState::Unchecked)
        }
    }
}

impl TryFrom<u8> for CheckState {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CheckState::Unchecked),
            1 => Ok(CheckState::Checked),
            2 => Ok(CheckState::Indeterminate),
            other => Err(Error::InvalidState(other)),
        }
    }
}

impl From<CheckState> for u8 {
    fn from(state: CheckState) -> Self {
        match state {
            CheckState::Unchecked => 0,
            CheckState::Checked => 1,
            CheckState::Indeterminate => 2,
        }
    }
}
