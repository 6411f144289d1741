//! Per-caller sliding-window admission control.
//!
//! Every inbound operation on the compliance core passes through a
//! [`RateLimiter`] first. The limiter keeps, per caller identifier, the
//! ordered sequence of admitted-request timestamps inside the trailing
//! window. A true sliding window avoids the boundary burst artifact of
//! fixed-window counters: a caller can never fit `2N` requests into a
//! window-sized interval straddling a bucket edge.
//!
//! Two standard configurations exist in practice: a generous public-facing
//! window and a stricter administrative-route window (see
//! [`LimiterConfig::public_default`] and [`LimiterConfig::admin_default`]).

pub mod config;
pub mod decision;
pub mod limiter;

pub use config::LimiterConfig;
pub use decision::Decision;
pub use limiter::RateLimiter;
