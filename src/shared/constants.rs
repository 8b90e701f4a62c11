/// Default page size for offset pagination when the caller omits `limit`
pub const DEFAULT_PAGE_SIZE: i64 = 10;
