//! Page size and page request value types.

use std::fmt;
use std::num::NonZeroU32;

use crate::PaginationError;

/// Number of items requested per page. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageSize(NonZeroU32);

impl PageSize {
    /// Validate a raw page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] when `size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::{PageSize, PaginationError};
    ///
    /// assert_eq!(PageSize::new(50).map(PageSize::get), Ok(50));
    /// assert_eq!(PageSize::new(0), Err(PaginationError::ZeroPageSize));
    /// ```
    pub fn new(size: u32) -> Result<Self, PaginationError> {
        NonZeroU32::new(size)
            .map(Self)
            .ok_or(PaginationError::ZeroPageSize)
    }

    /// Wrap an already non-zero size.
    #[must_use]
    pub const fn from_non_zero(size: NonZeroU32) -> Self {
        Self(size)
    }

    /// Return the size as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page of a listing: a one-based page number and the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    number: u32,
    size: PageSize,
}

impl PageRequest {
    /// Request the first page.
    #[must_use]
    pub const fn first(size: PageSize) -> Self {
        Self { number: 1, size }
    }

    /// Request an explicit page number.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageNumber`] when `number` is zero.
    pub const fn numbered(number: u32, size: PageSize) -> Result<Self, PaginationError> {
        if number == 0 {
            return Err(PaginationError::ZeroPageNumber);
        }
        Ok(Self { number, size })
    }

    /// Request a page the planner has already bounded below by two.
    pub(crate) const fn follow_up(number: u32, size: PageSize) -> Self {
        Self { number, size }
    }

    /// One-based page number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.number
    }

    /// Items requested for this page.
    #[must_use]
    pub const fn size(self) -> PageSize {
        self.size
    }

    /// Whether this is the first page.
    ///
    /// Remote APIs commonly omit the page parameter for the first page.
    #[must_use]
    pub const fn is_first(self) -> bool {
        self.number == 1
    }
}
