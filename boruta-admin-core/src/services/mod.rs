//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and the admin API client. Each service
//! focuses on a specific resource.

mod users;

pub use users::UserRepository;
