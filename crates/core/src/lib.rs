//! Core types for the task node projection.
//!
//! - [`Projection`]: the trait both root projections implement
//! - [`UpdateOutcome`]: what happened to one message at the root
//! - [`Diagnostic`]: typed record for duplicate or out-of-order delivery
//! - [`ProjectionConfig`]: starting watermark and audit trail settings
//!
//! # Architecture
//!
//! ```text
//! Message → Projection::update() → AccountState → TaskState | LogState
//!                 │
//!                 └── UpdateOutcome (Accepted | Dropped(Diagnostic))
//! ```

mod config;
mod outcome;
mod traits;

pub use config::ProjectionConfig;
pub use outcome::{Diagnostic, UpdateOutcome};
pub use traits::Projection;
