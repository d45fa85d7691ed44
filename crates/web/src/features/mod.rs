pub mod athletes;
pub mod auth;
pub mod checkins;
pub mod events;
