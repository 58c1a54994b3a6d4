pub mod aggregation;
pub mod calendar;
pub mod checkin;
pub mod transactions;
