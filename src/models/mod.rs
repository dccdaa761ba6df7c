//! Record and payload types.
//!
//! - [`student`]: student records and the create/update payloads
//! - [`user`]: user records and the create payload
//! - [`cohort`]: cohort information
//! - [`seed`]: records every collection starts with

pub mod cohort;
pub mod seed;
pub mod student;
pub mod user;

pub use cohort::CohortInfo;
pub use student::{NewStudent, Student, StudentAck, StudentList, StudentUpdate};
pub use user::{CreatedUser, NewUser, User, UserEcho};
