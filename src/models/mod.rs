pub mod event;
pub mod invitation;
pub mod membership;
pub mod password_reset;
pub mod project;
pub mod session;
pub mod user;
