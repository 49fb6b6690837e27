use std::fmt;

use serde_json::Value;

use crate::Result;

/// Which reference table a set of records belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SeedKind {
    Opportunities,
    Investors,
}

impl fmt::Display for SeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opportunities => write!(f, "opportunities"),
            Self::Investors => write!(f, "investors"),
        }
    }
}

/// Somewhere raw seed records can be fetched from.
#[async_trait::async_trait]
pub trait SeedSource: Send + Sync {
    fn describe(&self) -> String;

    async fn fetch(&self, kind: SeedKind) -> Result<Vec<Value>>;
}
