//! Production-friendly observability hooks for the dialogue engine.
//!
//! ```rust
//! use robserve::{MetricsDialogueHooks, SafeDialogueHooks, TracingDialogueHooks};
//!
//! let _tracing = SafeDialogueHooks::new(TracingDialogueHooks);
//! let _metrics = MetricsDialogueHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsDialogueHooks;
pub use safe_hooks::SafeDialogueHooks;
pub use tracing_hooks::TracingDialogueHooks;

pub mod prelude {
    pub use crate::{MetricsDialogueHooks, SafeDialogueHooks, TracingDialogueHooks};
}

#[cfg(test)]
mod tests;
