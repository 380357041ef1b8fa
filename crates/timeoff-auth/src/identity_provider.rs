use thiserror::Error;
use tokio::sync::watch;

/// The authenticated user's provider-assigned unique id and email, valid for the
/// duration of a session. The SDK passes it through and never persists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Opaque unique id assigned by the identity provider.
    pub uid: String,
    /// Email address the session was established for.
    pub email: String,
}

/// Settings attached to a sign-in link request, controlling where the emailed
/// link points back to and how it is completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCodeSettings {
    /// Callback URL encoded into the emailed link.
    pub url: String,
    /// The link must be completed inside this application rather than on a
    /// provider-hosted page.
    pub handle_code_in_app: bool,
}

/// Human-readable error text reported by the identity provider. The provider's
/// message is surfaced to the user verbatim; no structured error codes are exposed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ProviderError(pub String);

/// This trait defines the interface to the backing identity provider. It is up to
/// the platform to implement this trait over the provider's own SDK.
pub trait IdentityProvider {
    /// Email a one-time sign-in link to the given address.
    fn send_sign_in_link(
        &self,
        email: &str,
        settings: &ActionCodeSettings,
    ) -> impl std::future::Future<Output = Result<(), ProviderError>> + Send;

    /// Whether the given URL is a sign-in-link callback for this provider.
    fn is_sign_in_link(&self, url: &str) -> bool;

    /// Submit the email and the link URL for verification, establishing a session
    /// on success.
    fn complete_sign_in_with_link(
        &self,
        email: &str,
        url: &str,
    ) -> impl std::future::Future<Output = Result<(), ProviderError>> + Send;

    /// Tear down the current session, if any.
    fn sign_out(&self) -> impl std::future::Future<Output = ()> + Send;

    /// Subscribe to authentication state. The receiver holds the current state and
    /// observes a change after any successful sign-in or sign-out resolves; callers
    /// must not assume the change is visible synchronously with the resolving call.
    fn subscribe(&self) -> watch::Receiver<Option<SessionIdentity>>;
}
