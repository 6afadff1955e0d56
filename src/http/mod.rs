//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, peer address capture)
//!     → request.rs (add request ID)
//!     → security::access_control (allow or deny)
//!     → target.rs (derive outbound URL from the path)
//!     → forward.rs (outbound call, body buffering)
//!     → body relayed to client
//! ```

pub mod forward;
pub mod request;
pub mod server;
pub mod target;

pub use forward::{ForwardError, Outcome};
pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
pub use target::derive_target;
