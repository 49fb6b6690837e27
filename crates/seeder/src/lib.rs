pub mod error;
pub mod loader;
pub mod sources;
pub mod traits;
pub mod validator;

pub use error::{Result, SeederError};
pub use loader::{Dataset, SeedLoader};
pub use traits::{SeedKind, SeedSource};
