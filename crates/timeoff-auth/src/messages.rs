//! User-visible copy for the sign-in flow. All failures share a single message
//! area; the builders interpolate the raw provider or store error text.

use std::fmt::Display;

/// Shown when the send-link control is used with an empty email input.
pub const ENTER_EMAIL: &str = "Please enter your email address.";

/// Shown when a sign-in link callback arrives but no pending email is stored.
pub const LINK_EXPIRED: &str =
    "This sign-in link has expired or is invalid. Please enter your email address and request a new link.";

/// Shown when a known user signs in.
pub const SIGNED_IN: &str = "You are signed in.";

/// Shown while a first-time user's record is being created.
pub const REGISTERING: &str = "Welcome! Registering you as a new user...";

/// Shown once a first-time user's record has been created.
pub const REGISTERED: &str = "Registration complete. Welcome to the leave request system!";

/// Confirmation that a sign-in link was emailed to `email`.
pub fn link_sent(email: &str) -> String {
    format!("A sign-in link has been sent to {email}. Please check your inbox.")
}

/// Failure to send a sign-in link.
pub fn send_link_failed(error: &impl Display) -> String {
    format!("An error occurred: {error}")
}

/// Failure to verify a sign-in link.
pub fn sign_in_failed(error: &impl Display) -> String {
    format!("Sign-in error: {error} (please reload the page and try again)")
}

/// Failure to create the user record for a first-time login.
pub fn registration_failed(error: &impl Display) -> String {
    format!("An error occurred while registering your account: {error}")
}

/// Failure to read the user record after login.
pub fn lookup_failed(error: &impl Display) -> String {
    format!("An error occurred while loading your account: {error}")
}
