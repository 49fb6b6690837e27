pub mod connections;
pub mod funding;
pub mod investors;
pub mod journey;
pub mod notifications;
pub mod saved;
