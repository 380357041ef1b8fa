use std::sync::{Arc, Mutex};

use timeoff_auth::{ActionCodeSettings, IdentityProvider, ProviderError, SessionIdentity};
use tokio::sync::watch;

/// A scripted [IdentityProvider] for tests. Sign-in links are recognized by an
/// `oobCode` query parameter, mirroring the email-link format of the real
/// provider. Completing a link establishes an identity whose uid is derived
/// deterministically from the email. Cloning yields a handle to the same
/// provider state.
#[derive(Clone)]
pub struct FakeIdentityProvider {
    state: Arc<watch::Sender<Option<SessionIdentity>>>,
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    send_link_calls: Vec<(String, ActionCodeSettings)>,
    complete_calls: Vec<(String, String)>,
    sign_out_count: usize,
    send_link_error: Option<ProviderError>,
    complete_error: Option<ProviderError>,
}

impl Default for FakeIdentityProvider {
    fn default() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            state: Arc::new(state),
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }
}

impl FakeIdentityProvider {
    /// The uid the provider will assign to a session for the given email.
    pub fn uid_for(email: &str) -> String {
        format!("uid-{email}")
    }

    /// Make every subsequent send-link call fail with the given error text.
    pub fn fail_send_link(&self, message: &str) {
        self.lock_inner().send_link_error = Some(ProviderError(message.to_string()));
    }

    /// Make every subsequent link verification fail with the given error text.
    pub fn fail_complete(&self, message: &str) {
        self.lock_inner().complete_error = Some(ProviderError(message.to_string()));
    }

    /// Establish a session directly, as if a sign-in had completed elsewhere.
    pub fn sign_in_as(&self, identity: SessionIdentity) {
        self.state.send_replace(Some(identity));
    }

    /// The currently established identity, if any.
    pub fn current_identity(&self) -> Option<SessionIdentity> {
        self.state.borrow().clone()
    }

    /// Every (email, settings) pair passed to send-link so far.
    pub fn send_link_calls(&self) -> Vec<(String, ActionCodeSettings)> {
        self.lock_inner().send_link_calls.clone()
    }

    /// Every (email, url) pair passed to link verification so far.
    pub fn complete_calls(&self) -> Vec<(String, String)> {
        self.lock_inner().complete_calls.clone()
    }

    /// How many times sign-out has been called.
    pub fn sign_out_count(&self) -> usize {
        self.lock_inner().sign_out_count
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("Lock should not be poisoned")
    }
}

impl IdentityProvider for FakeIdentityProvider {
    async fn send_sign_in_link(
        &self,
        email: &str,
        settings: &ActionCodeSettings,
    ) -> Result<(), ProviderError> {
        let mut inner = self.lock_inner();
        inner
            .send_link_calls
            .push((email.to_string(), settings.clone()));
        match &inner.send_link_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn is_sign_in_link(&self, url: &str) -> bool {
        url.contains("oobCode=")
    }

    async fn complete_sign_in_with_link(
        &self,
        email: &str,
        url: &str,
    ) -> Result<(), ProviderError> {
        let error = {
            let mut inner = self.lock_inner();
            inner
                .complete_calls
                .push((email.to_string(), url.to_string()));
            inner.complete_error.clone()
        };
        if let Some(error) = error {
            return Err(error);
        }

        self.state.send_replace(Some(SessionIdentity {
            uid: Self::uid_for(email),
            email: email.to_string(),
        }));
        Ok(())
    }

    async fn sign_out(&self) {
        self.lock_inner().sign_out_count += 1;
        self.state.send_replace(None);
    }

    fn subscribe(&self) -> watch::Receiver<Option<SessionIdentity>> {
        self.state.subscribe()
    }
}
