use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::datetime::format_timestamp;

/// A member row left-joined with its attendance record. Timestamps are raw;
/// they are only formatted when turned into a [`Member`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberRecord {
    pub id: i64,
    pub full_name: String,
    pub team_name: String,
    pub check_in: Option<NaiveDateTime>,
    pub check_out: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "full_name": "Ada Lovelace",
        "team_name": "Engines",
        "check_in": "05-03-2024 02:07 PM",
        "check_out": null
    })
)]
pub struct Member {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Ada Lovelace")]
    pub full_name: String,

    #[schema(example = "Engines")]
    pub team_name: String,

    #[schema(example = "05-03-2024 02:07 PM", nullable = true)]
    pub check_in: Option<String>,

    #[schema(example = "05-03-2024 06:30 PM", nullable = true)]
    pub check_out: Option<String>,
}

impl From<MemberRecord> for Member {
    fn from(record: MemberRecord) -> Self {
        Self {
            id: record.id,
            full_name: record.full_name,
            team_name: record.team_name,
            check_in: record.check_in.map(format_timestamp),
            check_out: record.check_out.map(format_timestamp),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateMember {
    // Missing fields deserialize as empty so they are rejected by validation
    // with the same 400 as an explicit empty string.
    #[serde(default)]
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
    #[serde(default)]
    #[schema(example = "Engines")]
    pub team_name: String,
}

/// Partial update. `None` means "leave unchanged".
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateMember {
    #[schema(example = "Ada King", nullable = true)]
    pub full_name: Option<String>,
    #[schema(example = "Analytical Engines", nullable = true)]
    pub team_name: Option<String>,
}

impl UpdateMember {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.team_name.is_none()
    }
}
