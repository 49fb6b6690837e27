pub mod achievements;
pub mod classification;
pub mod connections;
pub mod degrade;
pub mod feedback;
pub mod matching;
pub mod progress;
pub mod scoring;
pub mod tracker;
