/// Fixed key under which the pending sign-in email is kept between "link
/// requested" and "link confirmed". The entry is written when a link is
/// requested and removed once the link has been verified.
pub const EMAIL_FOR_SIGN_IN: &str = "emailForSignIn";

/// This trait defines the interface to browser-local string storage. Operations
/// are assumed not to fail; a missing key reads as `None`.
pub trait LocalStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> impl std::future::Future<Output = Option<String>>;
    /// Store `value` under `key`, overwriting any existing entry.
    fn set(&self, key: &str, value: String) -> impl std::future::Future<Output = ()>;
    /// Delete the entry under `key`, if present.
    fn remove(&self, key: &str) -> impl std::future::Future<Output = ()>;
}
