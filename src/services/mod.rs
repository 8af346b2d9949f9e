pub mod api;
pub mod health;
pub mod notifier;
pub mod restore;
