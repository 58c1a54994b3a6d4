pub mod auth;
pub mod dashboard;
pub mod financial;
pub mod health;
pub mod mood;
pub mod session;
