use std::sync::Arc;

use timeoff_state::Repository;
use tokio::{
    select,
    sync::{watch, RwLock},
};
use tracing::{debug, error, info, warn};

use crate::{
    identity_provider::{ActionCodeSettings, IdentityProvider, SessionIdentity},
    local_store::{LocalStore, EMAIL_FOR_SIGN_IN},
    messages,
    page::SignInPage,
    user_record::UserRecord,
};

/// Coordinates the passwordless sign-in flow between the identity provider, the
/// page, browser-local storage and the users collection of the document store.
///
/// Construct it with [SignInClient::new] and call [SignInClient::start] once when
/// the page loads: this completes a pending sign-in link if the page was opened
/// from one, then attaches the single auth-state listener that keeps the page in
/// sync and provisions the user record on login.
pub struct SignInClient<Idp, Page, Local, Users>
where
    Idp: IdentityProvider,
    Page: SignInPage,
    Local: LocalStore,
    Users: Repository<UserRecord>,
{
    provider: Idp,
    page: Page,
    local: Local,
    users: Users,

    cancellation_handle: RwLock<Option<watch::Sender<bool>>>,
}

impl<Idp, Page, Local, Users> SignInClient<Idp, Page, Local, Users>
where
    Idp: IdentityProvider + Send + Sync + 'static,
    Page: SignInPage + Send + Sync + 'static,
    Local: LocalStore + Send + Sync + 'static,
    Users: Repository<UserRecord> + 'static,
{
    /// Constructs a new `SignInClient` over the given capability implementations.
    pub fn new(provider: Idp, page: Page, local: Local, users: Users) -> Arc<Self> {
        Arc::new(Self {
            provider,
            page,
            local,
            users,
            cancellation_handle: RwLock::new(None),
        })
    }

    /// Page-load entry point. Runs [SignInClient::complete_sign_in] once, before
    /// any listener attaches, then spawns the auth-state listener. The listener
    /// handles the current state immediately and every transition afterwards, and
    /// is the sole trigger of the user-record lookup.
    pub async fn start(self: &Arc<Self>) {
        self.complete_sign_in().await;

        let client = self.clone();
        let (cancellation_handle_tx, mut cancellation_handle_rx) = watch::channel(false);
        let mut states = self.provider.subscribe();

        let mut cancellation_handle = self.cancellation_handle.write().await;
        *cancellation_handle = Some(cancellation_handle_tx);

        tokio::spawn(async move {
            loop {
                let current = states.borrow_and_update().clone();
                client.handle_auth_state(current.as_ref()).await;

                select! {
                    // Checked first so a stop() racing a state change wins.
                    biased;
                    _ = cancellation_handle_rx.changed() => {
                        if *cancellation_handle_rx.borrow() {
                            debug!("Cancellation signal received, stopping auth-state listener");
                            break;
                        }
                    }
                    changed = states.changed() => {
                        if changed.is_err() {
                            debug!("Auth-state channel closed, stopping listener");
                            break;
                        }
                    }
                }
            }
            // No-op when the loop exited through stop(), which already took the
            // handle; keeps is_running() truthful when the channel closed.
            client.stop().await;
        });
    }

    /// Whether the auth-state listener is attached.
    pub async fn is_running(self: &Arc<Self>) -> bool {
        self.cancellation_handle.read().await.is_some()
    }

    /// Detach the auth-state listener. Call when the page unloads.
    pub async fn stop(self: &Arc<Self>) {
        let mut cancellation_handle = self.cancellation_handle.write().await;
        if let Some(cancellation_handle) = cancellation_handle.take() {
            let _ = cancellation_handle.send(true);
        }
    }

    /// The state-change handler. Signed in: swap the login form for the
    /// authenticated view, display the email, ensure the user record exists and
    /// strip any stale link parameters from the URL. Signed out: restore the login
    /// form and clear everything it displayed.
    pub async fn handle_auth_state(&self, identity: Option<&SessionIdentity>) {
        match identity {
            Some(identity) => {
                self.page.set_login_form_visible(false);
                self.page.set_signed_in_view_visible(true);
                self.page.set_user_email(&identity.email);
                self.ensure_user_record(identity).await;
                self.page.strip_query_params();
            }
            None => {
                self.page.set_login_form_visible(true);
                self.page.set_signed_in_view_visible(false);
                self.page.set_user_email("");
                self.page.set_message("");
                self.page.set_send_link_enabled(true);
            }
        }
    }

    /// Request a sign-in link for the email typed into the page. An empty or
    /// whitespace-only input is rejected locally without a provider call. On
    /// success the email is persisted under [EMAIL_FOR_SIGN_IN] and the send
    /// control is disabled to prevent duplicate sends.
    pub async fn request_link(&self) {
        let email = self.page.email_input().trim().to_string();
        if email.is_empty() {
            self.page.set_message(messages::ENTER_EMAIL);
            return;
        }

        let settings = ActionCodeSettings {
            url: self.page.current_url(),
            handle_code_in_app: true,
        };

        match self.provider.send_sign_in_link(&email, &settings).await {
            Ok(()) => {
                self.local
                    .set(EMAIL_FOR_SIGN_IN, email.clone())
                    .await;
                self.page.set_message(&messages::link_sent(&email));
                self.page.set_send_link_enabled(false);
            }
            Err(error) => {
                error!(%error, "Failed to send the sign-in link");
                self.page.set_message(&messages::send_link_failed(&error));
            }
        }
    }

    /// Complete a pending sign-in link, if the current URL is one. Reads the
    /// pending email from local storage; if it is missing the link is treated as
    /// expired and its parameters are stripped from the URL without a provider
    /// call. On successful verification the pending entry is removed and the UI
    /// update arrives through the auth-state listener. On failure the provider is
    /// signed out to clear any partially-established session.
    pub async fn complete_sign_in(&self) {
        let url = self.page.current_url();
        if !self.provider.is_sign_in_link(&url) {
            return;
        }

        let Some(email) = self.local.get(EMAIL_FOR_SIGN_IN).await else {
            warn!("Sign-in link callback without a pending email in local storage");
            self.page.set_message(messages::LINK_EXPIRED);
            self.page.strip_query_params();
            return;
        };

        match self.provider.complete_sign_in_with_link(&email, &url).await {
            Ok(()) => {
                self.local.remove(EMAIL_FOR_SIGN_IN).await;
            }
            Err(error) => {
                error!(%error, "Sign-in failed");
                self.page.set_message(&messages::sign_in_failed(&error));
                self.provider.sign_out().await;
            }
        }
    }

    /// Sign out of the identity provider. No confirmation step; the UI resets
    /// through the auth-state listener.
    pub async fn logout(&self) {
        self.provider.sign_out().await;
    }

    /// Read the user record keyed by the identity's id, creating the default
    /// record on first login. Any read or write failure forces a sign-out so the
    /// client is never left authenticated without a backing record.
    async fn ensure_user_record(&self, identity: &SessionIdentity) {
        match self.users.get(identity.uid.clone()).await {
            Ok(Some(record)) => {
                info!(roles = ?record.roles, "Known user signed in");
                self.page.set_message(messages::SIGNED_IN);
            }
            Ok(None) => {
                info!(uid = %identity.uid, "First login, provisioning a user record");
                self.page.set_message(messages::REGISTERING);

                let record = UserRecord::for_identity(identity);
                match self.users.set(identity.uid.clone(), record.clone()).await {
                    Ok(()) => {
                        info!(?record, "User record created");
                        self.page.set_message(messages::REGISTERED);
                    }
                    Err(error) => {
                        error!(%error, "Failed to create the user record");
                        self.page
                            .set_message(&messages::registration_failed(&error));
                        self.logout().await;
                    }
                }
            }
            Err(error) => {
                error!(%error, "Failed to load the user record");
                self.page.set_message(&messages::lookup_failed(&error));
                self.logout().await;
            }
        }
    }
}
