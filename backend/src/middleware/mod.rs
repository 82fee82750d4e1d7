//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns such
//! as tracing and request logging.

pub mod trace;

pub use trace::Trace;
