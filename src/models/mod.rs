//! Data models for Biblion

pub mod audit;
pub mod author;
pub mod book;
pub mod penalty;
pub mod publisher;
pub mod record;
pub mod role;
pub mod taxonomy;
pub mod translator;
pub mod user;

// Re-export commonly used types
pub use audit::AuditEntry;
pub use author::Author;
pub use book::Book;
pub use penalty::PenaltyRule;
pub use publisher::Publisher;
pub use record::BiblioRecord;
pub use role::Role;
pub use taxonomy::Lookup;
pub use translator::Translator;
pub use user::{User, UserRole};
