//! A multi-representation calendar date library.
//!
//! Civil dates come in four co-equal representations — year/month/day
//! (YMD), year/month/count/weekday (YMCW, "the 3rd Thursday of March"),
//! a linear day count from an internal epoch (DAISY), and business day
//! numbers relative to month end (BIZDA) — and this crate treats them
//! as equals: any of them can be parsed, formatted, converted into any
//! other, compared, and shifted by durations carried in the same
//! representations (plus BIZSI, a bare business day count).
//!
//! The pieces:
//!
//! - [`calendar`] — leap years, month lengths, weekday tables, weekend
//!   and business day counting;
//! - [`value`] — the date and duration value types and their accessors;
//! - [`convert`] — representation-to-representation conversion;
//! - [`arith`] — `add` and `diff` for every representation;
//! - [`fmtspec`] — the `%`-directive grammar shared by both ends;
//! - [`parse`] / [`format`] — format-directed text in and out;
//! - [`strops`] — the numeric and name readers/writers underneath;
//! - [`names`] — the weekday and month name tables;
//! - [`clock`] — "today", with the wall clock injected at one point.
//!
//! Errors stay in-band: a failed parse returns an unknown date, unknown
//! values flow through every operation unchanged, and comparing across
//! representations reports the −2 sentinel rather than inventing an
//! order.
//!
//! # Examples
//!
//! ```
//! use dateverse::{add, diff, parse_date, parse_duration, date_to_string, DtKind};
//!
//! let (d, _) = parse_date("2011-03-17", None);
//! assert_eq!(d.wday(), dateverse::Weekday::Thursday);
//!
//! let (one_month, _) = parse_duration("1m");
//! let shifted = add(d, &one_month);
//! assert_eq!(date_to_string(None, &shifted), "2011-04-17");
//!
//! let span = diff(DtKind::Daisy, d, shifted);
//! assert_eq!(dateverse::duration_to_string(None, &span), "31");
//! ```

pub mod arith;
pub mod calendar;
pub mod clock;
pub mod convert;
pub mod fmtspec;
pub mod format;
pub mod names;
pub mod parse;
pub mod strops;
pub mod value;

pub use arith::{add, diff, is_negative, negate};
pub use clock::{now_as, now_as_of};
pub use convert::convert;
pub use format::{date_to_string, duration_to_string, format_date, format_duration};
pub use parse::{parse_date, parse_duration};
pub use value::{
    compare, in_range, BizDirection, BizReference, Bizda, BizdaParam, DtDate, DtDur, DtKind,
    DtValue, Weekday, Ymcw, Ymd,
};
