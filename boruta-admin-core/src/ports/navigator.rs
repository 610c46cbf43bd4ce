//! Navigator port - routing side channel of the API client

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::Route;

/// Navigation subsystem of the hosting application
///
/// The API client calls this when a response is intercepted (404, 400). The
/// caller of the original request then receives `Outcome::Redirected`.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Navigate to a named route
    async fn navigate(&self, route: Route) -> Result<()>;
}
