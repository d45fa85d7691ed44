mod athlete;
mod event;
mod user;

pub use athlete::Athlete;
pub use event::Event;
pub use user::User;
