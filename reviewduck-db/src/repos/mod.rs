//! Repository modules for database operations

pub mod review_forms;
pub mod reviews;

pub use review_forms::ReviewFormRepository;
pub use reviews::ReviewRepository;
