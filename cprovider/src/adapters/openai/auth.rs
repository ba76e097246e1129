//! OpenAI-specific credential helpers and auth resolution policy.

use crate::{ProviderError, ProviderId, SecretString, SecureCredentialManager};

use super::types::OpenAiAuth;

impl SecureCredentialManager {
    /// Stores an OpenAI API key for provider-authenticated requests.
    pub fn set_openai_api_key(&self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        self.set_api_key(ProviderId::OpenAi, api_key)
    }
}

/// Resolves OpenAI authentication from API key credentials only.
pub(crate) fn resolve_openai_auth(
    credentials: &SecureCredentialManager,
) -> Result<OpenAiAuth, ProviderError> {
    if let Some(auth) =
        credentials.with_api_key(ProviderId::OpenAi, |key| OpenAiAuth::ApiKey(SecretString::new(key)))?
    {
        return Ok(auth);
    }

    Err(ProviderError::authentication(
        "no OpenAI API key configured",
    ))
}
