pub mod error;
pub mod log;
pub mod repository;
pub mod tags;

pub use error::{GitError, Result};
pub use repository::GitRepository;
pub use tags::TagPersister;
