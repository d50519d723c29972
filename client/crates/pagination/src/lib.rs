//! Page sizes, page requests, and page-count planning for offset-paged
//! remote listings.
//!
//! Remote collections that report a total item count alongside their first
//! page are drained in two steps: fetch page one, then plan the remaining
//! page numbers from the reported total and fetch them together.
//!
//! # Example
//!
//! ```
//! use pagination::{PageCountPolicy, PagePlan, PageRequest, PageSize};
//!
//! let size = PageSize::new(200).expect("non-zero page size");
//! let first = PageRequest::first(size);
//! assert!(first.is_first());
//!
//! let plan = PagePlan::from_total(401, size, PageCountPolicy::RoundUp)
//!     .expect("plan fits in the page range");
//! let numbers: Vec<u32> = plan.follow_ups().map(|page| page.number()).collect();
//! assert_eq!(numbers, vec![2, 3]);
//! ```

mod error;
mod plan;
mod request;

pub use error::PaginationError;
pub use plan::{PageCountPolicy, PagePlan};
pub use request::{PageRequest, PageSize};
