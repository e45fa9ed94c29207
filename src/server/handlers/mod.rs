pub mod health;
pub mod query;
pub mod settings;
