pub mod client;
pub mod paginator;
pub mod rate_limiter;

pub use client::GitHubClient;
pub use paginator::Paginator;
pub use rate_limiter::RateLimiter;
