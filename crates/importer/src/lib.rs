pub mod error;
pub mod folders;
pub mod loader;

pub use error::{ImporterError, Result};
pub use folders::{EventFolder, read_event_folder};
pub use loader::{ImportCounts, load_event_folder};
