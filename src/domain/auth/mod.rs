pub mod credentials;
pub mod sessions;
pub mod users;
