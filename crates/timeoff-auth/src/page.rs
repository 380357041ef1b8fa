/// View ports over the sign-in page: a small capability surface of typed setters
/// that decouples the sign-in flow from concrete UI elements. The platform binds
/// these to its login form container, authenticated-view container, email input,
/// send-link control, user-email display and shared message area.
pub trait SignInPage {
    /// Show or hide the login form container.
    fn set_login_form_visible(&self, visible: bool);
    /// Show or hide the authenticated-view container.
    fn set_signed_in_view_visible(&self, visible: bool);
    /// Read the email address currently typed into the email input.
    fn email_input(&self) -> String;
    /// Display the signed-in user's email, or clear it with an empty string.
    fn set_user_email(&self, email: &str);
    /// Display a status or error message in the shared message area, or clear it
    /// with an empty string.
    fn set_message(&self, message: &str);
    /// Enable or disable the send-link control.
    fn set_send_link_enabled(&self, enabled: bool);
    /// The full URL the page is currently displayed at.
    fn current_url(&self) -> String;
    /// Replace the current history entry with origin + path only, dropping the
    /// query string without reloading the page.
    fn strip_query_params(&self);
}
