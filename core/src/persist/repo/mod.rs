pub mod airdrops;
pub mod challenges;
pub mod common;
pub mod watchlist;

pub use airdrops::*;
pub use challenges::*;
pub use watchlist::*;
