#![doc = include_str!("../README.md")]

mod sign_in_client;

pub mod identity_provider;
pub mod local_store;
pub mod messages;
pub mod page;
pub mod user_record;

pub use identity_provider::{ActionCodeSettings, IdentityProvider, ProviderError, SessionIdentity};
pub use local_store::{LocalStore, EMAIL_FOR_SIGN_IN};
pub use page::SignInPage;
pub use sign_in_client::SignInClient;
pub use user_record::UserRecord;
