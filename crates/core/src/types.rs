/// Server-assigned record identifiers are integer primary keys.
pub type JobId = i64;

/// Page numbers as used by the collection resource (1-based).
pub type PageNumber = u32;
