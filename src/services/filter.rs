//! Date-range filtering
//!
//! An optional inclusive range of calendar dates, supplied on the command
//! line, that decides which transactions take part in a conversion run.
//! Bounds are validated up front, before any input is read.

use chrono::NaiveDate;

use crate::error::{ConvertError, ConvertResult};

/// Bound format accepted on the command line
const BOUND_FORMAT: &str = "%Y-%m-%d";

/// An optional inclusive range of calendar dates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    /// Unbounded range containing every date
    pub const fn unbounded() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    /// Parse optional bounds, validating format and ordering
    pub fn parse(from: Option<&str>, to: Option<&str>) -> ConvertResult<Self> {
        let from = from.map(parse_bound).transpose()?;
        let to = to.map(parse_bound).transpose()?;
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ConvertError::Config(format!(
                    "range start {from} is after range end {to}"
                )));
            }
        }
        Ok(Self { from, to })
    }

    /// Check if no bound is set on either side
    pub const fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Inclusive containment; an absent bound is unconstrained on that side
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

fn parse_bound(s: &str) -> ConvertResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), BOUND_FORMAT).map_err(|_| {
        ConvertError::Config(format!("invalid date '{s}', expected YYYY-MM-DD"))
    })
}
