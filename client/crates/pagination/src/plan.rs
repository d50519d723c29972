//! Page-count planning from a reported total.

use std::fmt;
use std::str::FromStr;

use crate::{PageRequest, PageSize, PaginationError};

/// How the number of pages is derived from a reported item total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageCountPolicy {
    /// `ceil(total / size)` pages; follow-ups are `2..=pages`.
    ///
    /// Every item is fetched exactly once.
    #[default]
    RoundUp,
    /// Follow-ups are `2..=floor(total / size) + 1`.
    ///
    /// Matches clients that iterate `i in 1..=total/size` and request page
    /// `i + 1`. An exact multiple of the page size requests one trailing
    /// empty page.
    Legacy,
}

impl PageCountPolicy {
    /// Stable configuration name for this policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RoundUp => "round-up",
            Self::Legacy => "legacy",
        }
    }
}

impl fmt::Display for PageCountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageCountPolicy {
    type Err = PaginationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "round-up" | "round_up" | "roundup" => Ok(Self::RoundUp),
            "legacy" => Ok(Self::Legacy),
            _ => Err(PaginationError::UnknownPolicy {
                value: value.to_owned(),
            }),
        }
    }
}

/// The pages still to fetch once the first page has reported its total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    size: PageSize,
    last: u32,
}

impl PagePlan {
    /// Plan the remaining pages for `total` items at `size` per page.
    ///
    /// The plan always covers at least the first page, so an empty
    /// collection yields no follow-ups.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::TooManyPages`] when the last page number
    /// does not fit in a `u32`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::{PageCountPolicy, PagePlan, PageSize};
    ///
    /// let size = PageSize::new(200).expect("non-zero page size");
    /// let plan = PagePlan::from_total(400, size, PageCountPolicy::Legacy)
    ///     .expect("plan fits");
    /// let numbers: Vec<u32> = plan.follow_ups().map(|page| page.number()).collect();
    /// assert_eq!(numbers, vec![2, 3]);
    /// ```
    pub fn from_total(
        total: u64,
        size: PageSize,
        policy: PageCountPolicy,
    ) -> Result<Self, PaginationError> {
        let per_page = u64::from(size.get());
        let last = match policy {
            PageCountPolicy::RoundUp => total.div_ceil(per_page).max(1),
            PageCountPolicy::Legacy => total
                .checked_div(per_page)
                .and_then(|whole_pages| whole_pages.checked_add(1))
                .ok_or(PaginationError::TooManyPages {
                    total,
                    size: size.get(),
                })?,
        };
        let last = u32::try_from(last).map_err(|_| PaginationError::TooManyPages {
            total,
            size: size.get(),
        })?;
        Ok(Self { size, last })
    }

    /// Total number of pages, including the first.
    #[must_use]
    pub const fn page_count(&self) -> u32 {
        self.last
    }

    /// Whether the first page is the only one.
    #[must_use]
    pub const fn is_single_page(&self) -> bool {
        self.last <= 1
    }

    /// Reject plans needing more than `limit` pages in total.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::PageLimitExceeded`] when the plan is larger
    /// than `limit`.
    pub const fn within_limit(self, limit: u32) -> Result<Self, PaginationError> {
        if self.last > limit {
            return Err(PaginationError::PageLimitExceeded {
                pages: self.last,
                limit,
            });
        }
        Ok(self)
    }

    /// Requests for every page after the first, in ascending order.
    pub fn follow_ups(&self) -> impl Iterator<Item = PageRequest> + use<> {
        let size = self.size;
        (2..=self.last).map(move |number| PageRequest::follow_up(number, size))
    }
}
