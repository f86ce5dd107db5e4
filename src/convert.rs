//! Conversions between the date representations.
//!
//! Three pivot conversions do the real work — YMD↔DAISY, YMD↔YMCW and
//! the YMD view of a BIZDA — and everything else composes through them.
//! All conversions are pure; an unknown input converts to an unknown
//! output.
//!
//! The daisy epoch is day 0 = 1916-12-31, a Sunday. The base year 1917
//! is 1 mod 4, so within the supported years a weekday is `d % 7` and
//! the day before January 1st of year y sits at
//! `(y − 1917)·365 + (y − 1917)/4`.

use crate::calendar::{self, MON_YDAY};
use crate::value::{Bizda, BizdaParam, DtDate, DtKind, DtValue, Ymcw, Ymd};

/// The year daisy counting is anchored to.
pub const DAISY_BASE_YEAR: u32 = 1917;

/// Daisy value of the day before January 1st of `year` ("January 0th").
pub fn jan00_daisy(year: u32) -> i64 {
    let by = year as i64 - DAISY_BASE_YEAR as i64;
    by * 365 + by / 4
}

/// Weekday of a daisy (0 = Sunday); day 0 of the epoch is a Sunday.
pub fn daisy_wday(d: u32) -> u32 {
    d % 7
}

/// The year a daisy falls in, 0 for the unset daisy.
pub fn daisy_year(d: u32) -> u32 {
    if d == 0 {
        return 0;
    }
    let mut by = (d / 365) as i64;
    while jan00_daisy((by + DAISY_BASE_YEAR as i64) as u32) >= d as i64 {
        by -= 1;
    }
    (by + DAISY_BASE_YEAR as i64) as u32
}

/// Day of the year of a daisy, 1-based.
pub fn daisy_yday(d: u32) -> u32 {
    if d == 0 {
        return 0;
    }
    let y = daisy_year(d);
    (d as i64 - jan00_daisy(y)) as u32
}

/// Breaks a daisy down to year, month, day.
pub fn daisy_to_ymd(that: u32) -> Ymd {
    if that == 0 {
        return Ymd::default();
    }
    let y = daisy_year(that);
    let doy = (that as i64 - jan00_daisy(y)) as u32;

    let mut m = 1usize;
    while m < 12 && doy > MON_YDAY[m + 1] as u32 {
        m += 1;
    }
    let mut d = doy - MON_YDAY[m] as u32;

    // in leap years the common-year table is one off from March on
    if calendar::leapp(y) && ((MON_YDAY[0] >> m) & 1) == 1 {
        if doy == 60 {
            m = 2;
            d = 29;
        } else if doy == MON_YDAY[m] as u32 + 1 {
            m -= 1;
            d = doy - MON_YDAY[m] as u32 - 1;
        } else {
            d -= 1;
        }
    }
    Ymd { y, m: m as u32, d }
}

/// Breaks a daisy down to year, month, count, weekday.
pub fn daisy_to_ymcw(that: u32) -> Ymcw {
    if that == 0 {
        return Ymcw::default();
    }
    let tmp = daisy_to_ymd(that);
    Ymcw { y: tmp.y, m: tmp.m, c: tmp.count(), w: daisy_wday(that) }
}

/// Re-expresses a YMD as "the c-th weekday of its month".
pub fn ymd_to_ymcw(d: Ymd) -> Ymcw {
    Ymcw { y: d.y, m: d.m, c: d.count(), w: d.wday() }
}

/// Resolves a YMCW to its day of month.
pub fn ymcw_to_ymd(d: Ymcw) -> Ymd {
    Ymd { y: d.y, m: d.m, d: d.mday() }
}

/// Converts any date to its daisy, 0 when it has none (unknown input or
/// a year before the epoch).
pub fn to_daisy(that: &DtDate) -> u32 {
    if let DtValue::Daisy(d) = that.value {
        return d;
    }
    if that.is_unknown() {
        return 0;
    }

    let y = that.year();
    let m = that.mon();
    #[allow(unused_mut)]
    let mut d = that.mday();
    #[cfg(feature = "fast-arith")]
    {
        // lazy day-of-month values are legal under fast arithmetic;
        // reduce them here
        let md = calendar::mdays(y, m);
        if d > md {
            d = md;
        }
    }

    if y < DAISY_BASE_YEAR || !(1..=12).contains(&m) {
        return 0;
    }
    let mut res = jan00_daisy(y) as u32;
    res += MON_YDAY[m as usize] as u32;
    res += d;
    if calendar::leapp(y) {
        res += ((MON_YDAY[0] >> m) & 1) as u32;
    }
    res
}

/// YMD view of any date; the zero YMD when there is none.
pub fn to_ymd(that: &DtDate) -> Ymd {
    match that.value {
        DtValue::Ymd(v) => v,
        DtValue::Ymcw(v) => ymcw_to_ymd(v),
        DtValue::Daisy(d) => daisy_to_ymd(d),
        DtValue::Bizda(v) => Ymd { y: v.y, m: v.m, d: v.mday() },
        _ => Ymd::default(),
    }
}

/// YMCW view of any date; the zero YMCW when there is none.
pub fn to_ymcw(that: &DtDate) -> Ymcw {
    match that.value {
        DtValue::Ymd(v) => ymd_to_ymcw(v),
        DtValue::Ymcw(v) => v,
        DtValue::Daisy(d) => daisy_to_ymcw(d),
        DtValue::Bizda(v) => ymd_to_ymcw(Ymd { y: v.y, m: v.m, d: v.mday() }),
        _ => Ymcw::default(),
    }
}

/// BIZDA view of any date under (AFTER, ULTIMO). Weekend dates have no
/// business day number and yield the zero BIZDA.
pub fn to_bizda(that: &DtDate) -> Bizda {
    match that.value {
        DtValue::Bizda(v) => v,
        DtValue::Ymd(_) | DtValue::Ymcw(_) | DtValue::Daisy(_) => {
            let bd = that.bday_q(BizdaParam::default());
            if bd < 1 {
                return Bizda::default();
            }
            Bizda {
                y: that.year(),
                m: that.mon(),
                bd: bd as u32,
                param: BizdaParam::default(),
            }
        }
        _ => Bizda::default(),
    }
}

/// Converts `d` into the target representation. Unknown in, unknown
/// out; a date that has no valid image in the target (a weekend date
/// into BIZDA, a pre-epoch date into DAISY) also comes out unknown.
/// BIZSI is a duration-only representation and is never a valid target.
pub fn convert(tgt: DtKind, d: DtDate) -> DtDate {
    if d.is_unknown() {
        return DtDate::UNKNOWN;
    }
    match tgt {
        DtKind::Ymd => {
            let r = to_ymd(&d);
            if r.y == 0 || r.m == 0 || r.d == 0 {
                return DtDate::UNKNOWN;
            }
            DtDate { value: DtValue::Ymd(r) }
        }
        DtKind::Ymcw => {
            let r = to_ymcw(&d);
            if r.y == 0 || r.m == 0 || r.c == 0 {
                return DtDate::UNKNOWN;
            }
            DtDate { value: DtValue::Ymcw(r) }
        }
        DtKind::Daisy => {
            let r = to_daisy(&d);
            if r == 0 {
                return DtDate::UNKNOWN;
            }
            DtDate { value: DtValue::Daisy(r) }
        }
        DtKind::Bizda => {
            let r = to_bizda(&d);
            if r.y == 0 || r.m == 0 || r.bd == 0 {
                return DtDate::UNKNOWN;
            }
            DtDate { value: DtValue::Bizda(r) }
        }
        _ => DtDate::UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{MAX_YEAR, MIN_YEAR};

    #[test]
    fn test_unix_epoch_daisy() {
        assert_eq!(to_daisy(&DtDate::ymd(1970, 1, 1)), 19359);
        assert_eq!(daisy_to_ymd(19359), Ymd { y: 1970, m: 1, d: 1 });
        // 1970-01-01 was a Thursday
        assert_eq!(daisy_wday(19359), 4);
    }

    #[test]
    fn test_ymd_daisy_roundtrip() {
        let samples = [
            Ymd { y: 1917, m: 1, d: 1 },
            Ymd { y: 1999, m: 12, d: 31 },
            Ymd { y: 2000, m: 2, d: 29 },
            Ymd { y: 2000, m: 3, d: 1 },
            Ymd { y: 2011, m: 3, d: 17 },
            Ymd { y: 2012, m: 2, d: 29 },
            Ymd { y: 2012, m: 3, d: 31 },
            Ymd { y: 2012, m: 12, d: 31 },
            Ymd { y: 2099, m: 12, d: 31 },
        ];
        for v in samples {
            let d = to_daisy(&DtDate { value: DtValue::Ymd(v) });
            assert_eq!(daisy_to_ymd(d), v, "roundtrip of {:?}", v);
        }
    }

    #[test]
    fn test_daisy_ymd_roundtrip_exhaustive_years() {
        // every day of a leap and a non-leap year
        for y in [2011u32, 2012] {
            let start = to_daisy(&DtDate::ymd(y, 1, 1));
            let len = if crate::calendar::leapp(y) { 366 } else { 365 };
            for i in 0..len {
                let d = start + i;
                let v = daisy_to_ymd(d);
                assert_eq!(to_daisy(&DtDate { value: DtValue::Ymd(v) }), d);
            }
        }
    }

    #[test]
    fn test_daisy_wday_matches_ymd_wday() {
        for y in [MIN_YEAR, 1970, 2011, 2012, MAX_YEAR] {
            for (m, d) in [(1, 1), (2, 28), (6, 15), (12, 31)] {
                let v = Ymd { y, m, d };
                let daisy = to_daisy(&DtDate { value: DtValue::Ymd(v) });
                assert_eq!(v.wday(), daisy_wday(daisy), "{:?}", v);
            }
        }
    }

    #[test]
    fn test_ymcw_pivot() {
        let ymd = Ymd { y: 2011, m: 3, d: 17 };
        let ymcw = ymd_to_ymcw(ymd);
        assert_eq!(ymcw, Ymcw { y: 2011, m: 3, c: 3, w: 4 });
        assert_eq!(ymcw_to_ymd(ymcw), ymd);
    }

    #[test]
    fn test_convert_accessors_commute() {
        let d = DtDate::ymd(2011, 3, 17);
        for tgt in [DtKind::Ymd, DtKind::Ymcw, DtKind::Daisy, DtKind::Bizda] {
            let c = convert(tgt, d);
            assert_eq!(c.year(), d.year(), "year via {:?}", tgt);
            assert_eq!(c.mon(), d.mon(), "mon via {:?}", tgt);
            assert_eq!(c.mday(), d.mday(), "mday via {:?}", tgt);
            assert_eq!(c.wday(), d.wday(), "wday via {:?}", tgt);
            assert_eq!(c.quarter(), d.quarter(), "quarter via {:?}", tgt);
            assert_eq!(c.count(), d.count(), "count via {:?}", tgt);
        }
    }

    #[test]
    fn test_convert_weekend_to_bizda_is_unknown() {
        // 2011-03-05 is a Saturday
        let d = DtDate::ymd(2011, 3, 5);
        assert!(convert(DtKind::Bizda, d).is_unknown());
    }

    #[test]
    fn test_convert_unknown_propagates() {
        for tgt in [DtKind::Ymd, DtKind::Ymcw, DtKind::Daisy, DtKind::Bizda, DtKind::Bizsi] {
            assert!(convert(tgt, DtDate::UNKNOWN).is_unknown());
        }
    }

    #[test]
    fn test_bizda_to_ymd() {
        let b = DtDate::bizda(2011, 3, 3, BizdaParam::default());
        assert_eq!(to_ymd(&b), Ymd { y: 2011, m: 3, d: 3 });
        let back = convert(DtKind::Bizda, convert(DtKind::Ymd, b));
        assert_eq!(back, b);
    }
}
