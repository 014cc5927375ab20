pub mod authentication;
pub mod users;
