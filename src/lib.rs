pub mod catalog;
pub mod cli;
pub mod config;
pub mod lookup;
pub mod models;
pub mod proxy;
pub mod remote;
pub mod store;
pub mod tui;
pub mod utils;

pub use catalog::Catalog;
pub use config::Config;
pub use models::{Difficulty, Problem};
pub use remote::RemoteClient;
pub use store::{JsonFileStore, MemoryStore, ProblemStore};
pub use utils::Profile;
