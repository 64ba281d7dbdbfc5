//! Web module
//!
//! The local login page that authenticates the console operator.

pub mod login;

pub use login::{await_login, router, Credentials};
