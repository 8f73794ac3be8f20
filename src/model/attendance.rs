use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::datetime::format_timestamp;

/// Which side of the attendance record an operation writes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AttendanceKind {
    CheckIn,
    CheckOut,
}

impl AttendanceKind {
    pub fn column(&self) -> &'static str {
        match self {
            AttendanceKind::CheckIn => "check_in",
            AttendanceKind::CheckOut => "check_out",
        }
    }

    /// Operation name used in error details.
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceKind::CheckIn => "check-in",
            AttendanceKind::CheckOut => "check-out",
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            AttendanceKind::CheckIn => "checked in",
            AttendanceKind::CheckOut => "checked out",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceOutcome {
    Recorded {
        kind: AttendanceKind,
        full_name: String,
        at: NaiveDateTime,
    },
    /// The field was already set; nothing was written.
    AlreadyRecorded {
        kind: AttendanceKind,
        full_name: String,
    },
}

impl AttendanceOutcome {
    pub fn message(&self) -> String {
        match self {
            AttendanceOutcome::Recorded { kind, full_name, at } => format!(
                "The member {} has {} at {}.",
                full_name,
                kind.verb(),
                format_timestamp(*at)
            ),
            AttendanceOutcome::AlreadyRecorded { kind, full_name } => {
                format!("The member {} is already {}.", full_name, kind.verb())
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceMessage {
    #[schema(example = "The member Ada Lovelace has checked in at 05-03-2024 02:07 PM.")]
    pub message: String,
}

impl From<AttendanceOutcome> for AttendanceMessage {
    fn from(outcome: AttendanceOutcome) -> Self {
        Self {
            message: outcome.message(),
        }
    }
}
