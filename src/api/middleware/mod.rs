//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. CORS
//! 2. Access logger — method, path, status, latency

pub mod access;
