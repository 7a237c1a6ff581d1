//! Message posting and the per-caller visibility filter.

pub mod repository;
pub mod service;

pub use repository::MessageRepository;
pub use service::MessageService;
