pub mod session;
pub mod term;
