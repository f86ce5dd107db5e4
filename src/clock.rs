//! Wall-clock sourcing for "today".
//!
//! The only impure function in the crate is [`now_as`], which reads the
//! current Unix timestamp through chrono and hands it to
//! [`now_as_of`]. Everything from the timestamp on is the crate's own
//! daisy arithmetic, so tests can pin any instant they like.

use chrono::Utc;

use crate::convert;
use crate::value::{DtDate, DtKind};

/// Daisy value of 1970-01-01.
pub const DAISY_UNIX_EPOCH: u32 = 19359;

/// The date at `secs` seconds since 1970-01-01 UTC, in the requested
/// representation. BIZDA and BIZSI are not date sources; asking for
/// them (or a pre-epoch instant) yields unknown.
///
/// ```
/// use dateverse::{now_as_of, DtDate, DtKind};
///
/// // 2011-03-17 00:00:00 UTC
/// assert_eq!(now_as_of(DtKind::Ymd, 1300320000), DtDate::ymd(2011, 3, 17));
/// assert_eq!(now_as_of(DtKind::Ymcw, 1300320000), DtDate::ymcw(2011, 3, 3, 4));
/// ```
pub fn now_as_of(kind: DtKind, secs: i64) -> DtDate {
    let days = secs.div_euclid(86400);
    let daisy = days + DAISY_UNIX_EPOCH as i64;
    if daisy <= 0 || daisy > u32::MAX as i64 {
        return DtDate::UNKNOWN;
    }
    let daisy = daisy as u32;

    match kind {
        DtKind::Daisy => DtDate::daisy(daisy),
        DtKind::Ymd => DtDate {
            value: crate::value::DtValue::Ymd(convert::daisy_to_ymd(daisy)),
        },
        DtKind::Ymcw => DtDate {
            value: crate::value::DtValue::Ymcw(convert::daisy_to_ymcw(daisy)),
        },
        _ => DtDate::UNKNOWN,
    }
}

/// Today's date in the requested representation.
pub fn now_as(kind: DtKind) -> DtDate {
    now_as_of(kind, Utc::now().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_instant() {
        assert_eq!(now_as_of(DtKind::Ymd, 0), DtDate::ymd(1970, 1, 1));
        assert_eq!(now_as_of(DtKind::Daisy, 0), DtDate::daisy(DAISY_UNIX_EPOCH));
        // late in the epoch day it is still the same date
        assert_eq!(now_as_of(DtKind::Ymd, 86399), DtDate::ymd(1970, 1, 1));
        assert_eq!(now_as_of(DtKind::Ymd, 86400), DtDate::ymd(1970, 1, 2));
    }

    #[test]
    fn test_pre_epoch_instants() {
        // instants before 1970 still resolve within the supported years
        assert_eq!(now_as_of(DtKind::Ymd, -86400), DtDate::ymd(1969, 12, 31));
    }

    #[test]
    fn test_unsourceable_kinds() {
        assert!(now_as_of(DtKind::Bizda, 0).is_unknown());
        assert!(now_as_of(DtKind::Bizsi, 0).is_unknown());
        assert!(now_as_of(DtKind::Unknown, 0).is_unknown());
    }

    #[test]
    fn test_now_does_not_panic() {
        // whatever today is, it has a plausible shape
        let d = now_as(DtKind::Ymd);
        assert!(d.mon() >= 1 && d.mon() <= 12);
    }
}
