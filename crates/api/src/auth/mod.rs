pub mod events;
pub mod jwt;
pub mod password;
