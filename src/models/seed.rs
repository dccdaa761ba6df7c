//! Seed data loaded into the collections at startup.

use super::{Student, User};

/// Initial student roster.
pub fn students() -> Vec<Student> {
    vec![
        Student::new(1, "Jose Carlos"),
        Student::new(2, "Manuel"),
        Student::new(3, "Juan"),
        Student::new(4, "Luis"),
    ]
}

/// Initial users. Ids are not contiguous.
pub fn users() -> Vec<User> {
    vec![
        User::new(3, "John", 30, "john@example.com"),
        User::new(150, "Jane", 25, "jane@example.com"),
        User::new(10, "Bob", 40, "bob@example.com"),
    ]
}
