/// Maximum number of records a single list request may return; larger
/// explicit limits are clamped, never rejected.
pub const MAX_LIMIT: i64 = 100;

/// Maximum pagination offset accepted from callers.
pub const MAX_OFFSET: i64 = 100_000;

/// Turkey has had exactly 81 provinces since 1999; the loader treats any
/// other count as a corrupt dataset.
pub const PROVINCE_COUNT: usize = 81;
