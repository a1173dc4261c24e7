//! Application-wide constants

pub const CODE_MAX_LENGTH: u64 = 50;
pub const NAME_MAX_LENGTH: u64 = 100;
pub const LANDING_PAGE: &str = "/index.html";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_MIN_CONNECTIONS: u32 = 2;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;
