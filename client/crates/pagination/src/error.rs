//! Error types for page sizing and planning.

use thiserror::Error;

/// Errors raised while building page requests or page plans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// A page size of zero was requested.
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    /// A page number of zero was requested; pages are numbered from one.
    #[error("page number must be greater than zero")]
    ZeroPageNumber,

    /// The reported total needs more pages than a `u32` page number holds.
    #[error("{total} items at {size} per page exceed the page number range")]
    TooManyPages {
        /// Total item count reported by the remote collection.
        total: u64,
        /// Page size used for planning.
        size: u32,
    },

    /// The plan needs more pages than the caller allows.
    #[error("{pages} pages planned, more than the limit of {limit}")]
    PageLimitExceeded {
        /// Pages the plan would fetch, including the first.
        pages: u32,
        /// Largest page count allowed.
        limit: u32,
    },

    /// A page-count policy name was not recognised.
    #[error("unknown page count policy '{value}': expected 'round-up' or 'legacy'")]
    UnknownPolicy {
        /// The rejected policy name.
        value: String,
    },
}
