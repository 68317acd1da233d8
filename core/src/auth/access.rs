use crate::auth::address::WalletAddress;

/// Identity attached to a request once its bearer credential is accepted.
#[derive(Clone, Debug)]
pub struct AccessContext {
    pub wallet_address: WalletAddress,
}

impl AccessContext {
    pub fn new(wallet_address: WalletAddress) -> Self {
        Self { wallet_address }
    }
}
