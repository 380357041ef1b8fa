#![doc = include_str!("../README.md")]

mod identity;
mod memory_repository;
mod page;

pub use identity::FakeIdentityProvider;
pub use memory_repository::MemoryRepository;
pub use page::{FakeLocalStorage, FakePage, PageState};
