pub mod athlete;
pub mod checkin;
pub mod event;
pub mod user;
