pub mod error;
pub mod config;

// Bulk data domain
pub mod audio;
pub mod bulk;
pub mod court;
pub mod docket;
pub mod judge;
pub mod opinion;

pub use error::*;
pub use config::*;

pub use audio::*;
pub use bulk::*;
pub use court::*;
pub use docket::*;
pub use judge::*;
pub use opinion::*;
