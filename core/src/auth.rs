pub mod access;
pub mod address;
pub mod constants;
pub mod nonce;
pub mod session;
pub mod signature;

pub use access::AccessContext;
pub use address::WalletAddress;
pub use nonce::NonceStore;
pub use session::{Credential, SessionClaims, SessionIssuer};
