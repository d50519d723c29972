//! Journal entries and the signed-amount posting convention.

use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One line of a journal.
///
/// A positive amount credits the account, a negative amount debits it, and
/// zero posts nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalLine {
    /// Ledger account the line posts to.
    pub account_code: String,
    /// Signed amount.
    pub amount: Decimal,
    /// Free-text line details.
    pub description: String,
}

/// The debit/credit pair a journal line posts.
///
/// At most one side is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    /// Debit side.
    pub debit: Decimal,
    /// Credit side.
    pub credit: Decimal,
}

impl JournalLine {
    /// Build a line.
    pub fn new(
        account_code: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            account_code: account_code.into(),
            amount,
            description: description.into(),
        }
    }

    /// Split the signed amount into its debit/credit pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use accounting_client::JournalLine;
    /// use rust_decimal::Decimal;
    ///
    /// let posting = JournalLine::new("1200", Decimal::from(-50), "stationery").posting();
    /// assert_eq!(posting.debit, Decimal::from(50));
    /// assert_eq!(posting.credit, Decimal::ZERO);
    /// ```
    #[must_use]
    pub fn posting(&self) -> Posting {
        match self.amount.cmp(&Decimal::ZERO) {
            Ordering::Greater => Posting {
                debit: Decimal::ZERO,
                credit: self.amount,
            },
            Ordering::Less => Posting {
                debit: self.amount.abs(),
                credit: Decimal::ZERO,
            },
            Ordering::Equal => Posting {
                debit: Decimal::ZERO,
                credit: Decimal::ZERO,
            },
        }
    }
}

/// A dated set of journal lines, sent once and not stored locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalData {
    /// Posting date.
    pub date: NaiveDate,
    /// Narration, sent as the journal reference.
    pub narration: String,
    /// Lines in posting order.
    pub lines: Vec<JournalLine>,
}

impl JournalData {
    /// Build a journal.
    pub fn new(date: NaiveDate, narration: impl Into<String>, lines: Vec<JournalLine>) -> Self {
        Self {
            date,
            narration: narration.into(),
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Sign convention for journal postings.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::debit(Decimal::from(-50), Decimal::from(50), Decimal::ZERO)]
    #[case::credit(Decimal::from(75), Decimal::ZERO, Decimal::from(75))]
    #[case::zero(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)]
    #[case::fractional_debit(Decimal::new(-1999, 2), Decimal::new(1999, 2), Decimal::ZERO)]
    fn sign_selects_exactly_one_side(
        #[case] amount: Decimal,
        #[case] debit: Decimal,
        #[case] credit: Decimal,
    ) {
        let posting = JournalLine::new("4000", amount, "line").posting();
        assert_eq!(posting, Posting { debit, credit });
    }

    #[rstest]
    fn negative_zero_posts_nothing() {
        let mut amount = Decimal::ZERO;
        amount.set_sign_negative(true);
        let posting = JournalLine::new("4000", amount, "line").posting();
        assert!(posting.debit.is_zero());
        assert!(posting.credit.is_zero());
    }
}
