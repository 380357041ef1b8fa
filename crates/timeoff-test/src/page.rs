use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use timeoff_auth::{LocalStore, SignInPage};
use tokio::sync::RwLock;

/// Observable state of a [FakePage].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    /// Whether the login form container is shown.
    pub login_form_visible: bool,
    /// Whether the authenticated-view container is shown.
    pub signed_in_view_visible: bool,
    /// Contents of the email input.
    pub email_input: String,
    /// The displayed signed-in email.
    pub user_email: String,
    /// The shared message area.
    pub message: String,
    /// Whether the send-link control is enabled.
    pub send_link_enabled: bool,
    /// The page's current URL.
    pub url: String,
}

/// A recording [SignInPage]. Starts out the way the markup ships: login form
/// shown, authenticated view hidden, send control enabled. Cloning yields a
/// handle to the same page state.
#[derive(Clone)]
pub struct FakePage {
    state: Arc<Mutex<PageState>>,
}

impl FakePage {
    /// Create a page displayed at the given URL.
    pub fn new(url: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new(PageState {
                login_form_visible: true,
                signed_in_view_visible: false,
                email_input: String::new(),
                user_email: String::new(),
                message: String::new(),
                send_link_enabled: true,
                url: url.to_string(),
            })),
        }
    }

    /// Type an email address into the email input.
    pub fn type_email(&self, email: &str) {
        self.lock_state().email_input = email.to_string();
    }

    /// A copy of the current page state.
    pub fn snapshot(&self) -> PageState {
        self.lock_state().clone()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, PageState> {
        self.state.lock().expect("Lock should not be poisoned")
    }
}

impl SignInPage for FakePage {
    fn set_login_form_visible(&self, visible: bool) {
        self.lock_state().login_form_visible = visible;
    }

    fn set_signed_in_view_visible(&self, visible: bool) {
        self.lock_state().signed_in_view_visible = visible;
    }

    fn email_input(&self) -> String {
        self.lock_state().email_input.clone()
    }

    fn set_user_email(&self, email: &str) {
        self.lock_state().user_email = email.to_string();
    }

    fn set_message(&self, message: &str) {
        self.lock_state().message = message.to_string();
    }

    fn set_send_link_enabled(&self, enabled: bool) {
        self.lock_state().send_link_enabled = enabled;
    }

    fn current_url(&self) -> String {
        self.lock_state().url.clone()
    }

    fn strip_query_params(&self) {
        let mut state = self.lock_state();
        if let Some(split) = state.url.find('?') {
            state.url.truncate(split);
        }
    }
}

/// An in-memory [LocalStore] standing in for browser local storage. Cloning
/// yields a handle to the same entries.
#[derive(Clone, Default)]
pub struct FakeLocalStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl FakeLocalStorage {
    /// Read an entry without going through the [LocalStore] trait.
    pub async fn entry(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }
}

impl LocalStore for FakeLocalStorage {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) {
        self.entries.write().await.insert(key.to_string(), value);
    }

    async fn remove(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}
