//! Role-gated mutation rules for a single entry.
//!
//! Failures come in two distinguishable kinds: [`PermissionError::Forbidden`]
//! when the role has no standing over the requested change at all, and a
//! state-shaped error when the role is right but the entry's current status
//! does not admit the change.

use crate::domain::timesheet::data::{EntryStatus, Role};
use crate::domain::timesheet::transitions::{self, TransitionError};
use thiserror::Error;
use time::Date;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    #[error("role {role} may not apply this change")]
    Forbidden { role: Role },

    #[error("entry is {current}; {role} may not edit it in that state")]
    InvalidState { role: Role, current: EntryStatus },

    #[error("cannot log hours for a future date")]
    FutureDate,

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Whether `role` may edit the time fields of an entry currently in
/// `status`, dated `entry_date`, on the day `today`.
pub fn can_edit_times(
    role: Role,
    status: EntryStatus,
    entry_date: Date,
    today: Date,
) -> Result<(), PermissionError> {
    match role {
        Role::Student => {
            if !matches!(status, EntryStatus::Pending | EntryStatus::CompanyDeclined) {
                return Err(PermissionError::InvalidState { role, current: status });
            }
            if entry_date > today {
                return Err(PermissionError::FutureDate);
            }
            Ok(())
        }
        Role::Company => {
            if status != EntryStatus::SubmittedToCompany {
                return Err(PermissionError::InvalidState { role, current: status });
            }
            Ok(())
        }
        // The administrator reviews statuses and notes, never the hours.
        Role::Administrator => Err(PermissionError::Forbidden { role }),
    }
}

/// Whether `role` may move an entry from `from` to `to`.
pub fn can_transition(role: Role, from: EntryStatus, to: EntryStatus) -> Result<(), PermissionError> {
    if !transitions::role_can_reach(role, to) {
        return Err(PermissionError::Forbidden { role });
    }

    transitions::validate_transition(role, from, to)?;

    Ok(())
}
