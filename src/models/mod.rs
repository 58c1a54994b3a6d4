pub mod financial;
pub mod mood;
pub mod user;
