//! Wire types shared by the catalog server and its clients.

pub mod airdrops;
pub mod auth;
pub mod error;

pub use airdrops::*;
pub use auth::*;
pub use error::*;
