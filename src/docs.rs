use crate::model::attendance::AttendanceMessage;
use crate::model::member::{CreateMember, Member, UpdateMember};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Member Attendance API",
        version = "0.1.0",
        description = r#"
## Member Attendance

Keeps a roster of organization members and a single attendance record per
member.

### Features
- **Members**: create, list, view and partially update member records
- **Attendance**: one check-in and one check-out timestamp per member

### Timestamps
Attendance times are returned as `DD-MM-YYYY HH:MM AM|PM`, or `null` when
not recorded.

### Errors
Errors are returned as `{"detail": "..."}`.
"#,
    ),
    paths(
        crate::api::member::create_member,
        crate::api::member::list_members,
        crate::api::member::get_member,
        crate::api::member::update_member,

        crate::api::attendance::check_in,
        crate::api::attendance::check_out
    ),
    components(
        schemas(
            Member,
            CreateMember,
            UpdateMember,
            AttendanceMessage
        )
    ),
    tags(
        (name = "Member", description = "Member management APIs"),
        (name = "Attendance", description = "Check-in and check-out APIs"),
    )
)]
pub struct ApiDoc;
