//! Data access for members and their attendance record.
//!
//! Every operation takes the pool and checks out its own connection (or
//! transaction) for the duration of the call, so nothing is shared between
//! concurrent requests.

pub mod attendance;
pub mod member;
