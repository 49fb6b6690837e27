pub mod common;
pub mod connection;
pub mod funding;
pub mod journey;
pub mod notification;
pub mod saved;
