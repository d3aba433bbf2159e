pub mod current;
pub mod detail;
pub mod dispatch;
pub mod enroll;
pub mod grade;
pub mod import;
pub mod login;
pub mod offerings;
pub mod profile;
pub mod schema;
pub mod shared;
pub mod term;
pub mod transcript;
