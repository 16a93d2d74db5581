pub mod api;
pub mod diagnostics;
pub mod health;
pub mod metrics;
pub mod middleware;

pub use api::*;
pub use diagnostics::*;
pub use health::*;
pub use metrics::*;
pub use middleware::*;
