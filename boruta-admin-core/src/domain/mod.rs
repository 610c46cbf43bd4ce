//! Core domain entities
//!
//! Users, the scope references they carry, and the error/outcome types shared
//! by every layer. Pure data and validation logic - no I/O.

mod outcome;
mod resource_id;
mod scope;
mod user;
pub mod result;

pub use outcome::{Outcome, Route};
pub use resource_id::ResourceId;
pub use result::FieldErrors;
pub use scope::ScopeRef;
pub use user::{AuthorizedScope, UserEntity, UserField};
