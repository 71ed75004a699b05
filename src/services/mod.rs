pub mod compare;
pub mod providers;

pub use providers::{LetterboxdProvider, ProfileProvider};
