//! Import status polling with exponential backoff

pub mod backoff;
pub mod poller;

pub use backoff::Backoff;
pub use poller::StatusPoller;
