//! The review-status state machine.
//!
//! Every mutation path consults [`TRANSITIONS`] through
//! [`validate_transition`]; no other component decides on its own whether a
//! status change is allowed.

use crate::domain::timesheet::data::{EntryStatus, Role};
use thiserror::Error;

/// The canonical table of allowed transitions, as (actor role, from, to).
pub const TRANSITIONS: &[(Role, EntryStatus, EntryStatus)] = &[
    (Role::Student, EntryStatus::Pending, EntryStatus::SubmittedToCompany),
    (Role::Student, EntryStatus::CompanyDeclined, EntryStatus::Pending),
    (Role::Company, EntryStatus::SubmittedToCompany, EntryStatus::CompanyApproved),
    (Role::Company, EntryStatus::SubmittedToCompany, EntryStatus::CompanyDeclined),
    (Role::Company, EntryStatus::SubmittedToCompany, EntryStatus::EditedByCompany),
    (Role::Student, EntryStatus::CompanyApproved, EntryStatus::SubmittedToDean),
    (Role::Administrator, EntryStatus::SubmittedToDean, EntryStatus::DeanApproved),
    (Role::Administrator, EntryStatus::SubmittedToDean, EntryStatus::DeanDeclined),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no transition from {from} to {to} for role {role}")]
pub struct TransitionError {
    pub role: Role,
    pub from: EntryStatus,
    pub to: EntryStatus,
}

pub fn is_allowed(role: Role, from: EntryStatus, to: EntryStatus) -> bool {
    TRANSITIONS
        .iter()
        .any(|&(r, f, t)| r == role && f == from && t == to)
}

pub fn validate_transition(
    role: Role,
    from: EntryStatus,
    to: EntryStatus,
) -> Result<(), TransitionError> {
    if is_allowed(role, from, to) {
        Ok(())
    } else {
        Err(TransitionError { role, from, to })
    }
}

/// Whether the given role ever produces `to` as a target status, in any
/// state. Used to tell "wrong role" apart from "right role, wrong state".
pub fn role_can_reach(role: Role, to: EntryStatus) -> bool {
    TRANSITIONS.iter().any(|&(r, _, t)| r == role && t == to)
}

/// Terminal states admit no further transition.
pub fn is_terminal(status: EntryStatus) -> bool {
    matches!(status, EntryStatus::DeanApproved | EntryStatus::DeanDeclined)
}
