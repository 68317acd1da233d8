use crate::auth::{
    AccessContext, Credential, WalletAddress,
    signature::{decode_signature, recover_address, sign_in_message},
};
use crate::error::{AuthError, ServiceResult};
use crate::service::CatalogService;
use log::{info, warn};
use rpc::{AuthNonceRequest, AuthNonceResponse, AuthVerifyRequest, AuthVerifyResponse};

impl CatalogService {
    pub async fn create_auth_nonce(&self, req: AuthNonceRequest) -> ServiceResult<AuthNonceResponse> {
        let address = WalletAddress::parse(&req.address)?;
        let nonce = self.inner.nonce_store.issue(&address).await?;
        let message = sign_in_message(&nonce);
        Ok(AuthNonceResponse { nonce, message })
    }

    pub async fn verify_auth(&self, req: AuthVerifyRequest) -> ServiceResult<AuthVerifyResponse> {
        let address = WalletAddress::parse(&req.address)?;
        let challenge = self.require_challenge(&address).await?;
        let signature = decode_signature(&req.signature)?;
        let credential = self.complete_login(address, challenge, &signature).await?;

        Ok(AuthVerifyResponse {
            expires_in: credential.expires_in_secs(),
            credential: credential.token,
            address: credential.address.into_inner(),
            expires_at: credential.expires_at,
        })
    }

    /// Exchange a signature over the active challenge for a session credential.
    ///
    /// The challenge is consumed only after the signature checks out, and
    /// consumption is the step that decides between concurrent attempts.
    pub async fn authenticate(
        &self,
        claimed_address: &str,
        signature: &[u8],
    ) -> ServiceResult<Credential> {
        let address = WalletAddress::parse(claimed_address)?;
        let challenge = self.require_challenge(&address).await?;
        self.complete_login(address, challenge, signature).await
    }

    async fn require_challenge(&self, address: &WalletAddress) -> ServiceResult<String> {
        let challenge = self
            .inner
            .nonce_store
            .active_challenge(address)
            .await?
            .ok_or(AuthError::NoActiveChallenge)?;
        Ok(challenge)
    }

    async fn complete_login(
        &self,
        address: WalletAddress,
        challenge: String,
        signature: &[u8],
    ) -> ServiceResult<Credential> {
        let message = sign_in_message(&challenge);
        let recovered = recover_address(message.as_bytes(), signature)?;
        if recovered != address {
            warn!("signature for {address} was produced by {recovered}");
            return Err(AuthError::SignatureMismatch.into());
        }

        self.inner.nonce_store.consume(&address, &challenge).await?;

        let credential = self.inner.session_issuer.mint(&address)?;
        info!("wallet {address} authenticated");
        Ok(credential)
    }

    pub fn authorize(&self, token: &str) -> ServiceResult<AccessContext> {
        let wallet_address = self.inner.session_issuer.authorize(token)?;
        Ok(AccessContext::new(wallet_address))
    }
}
