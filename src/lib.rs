pub mod agency;
pub mod breeds;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod schema;
pub mod store;

pub use agency::Agency;
pub use breeds::{BreedCatalog, CatApiClient, StaticBreeds};
pub use cli::{Cli, Commands};
pub use error::{AgencyError, ErrorKind, Result};
pub use store::Store;
