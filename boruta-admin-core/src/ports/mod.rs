//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for the collaborators the admin client relies
//! on but does not own: where the access token lives, and how the hosting
//! application navigates when the API answers with 404 or 400.

mod navigator;
mod token_store;

pub use navigator::Navigator;
pub use token_store::{TokenStore, ACCESS_TOKEN_KEY};
