//! The polymorphic date value model.
//!
//! A civil date can be carried in any of four co-equal representations:
//!
//! - **YMD** — year, month, day of month;
//! - **YMCW** — year, month, and "the C-th weekday W" of that month;
//! - **DAISY** — a linear day count from an internal epoch;
//! - **BIZDA** — year, month, and a business day number counted relative
//!   to a reference point (currently the ultimo, i.e. month end).
//!
//! A duration reuses the same payloads plus a sign flag, and adds a
//! fifth, duration-only representation, **BIZSI** (a bare business day
//! count). [`DtDate`] and [`DtDur`] wrap the shared payload [`DtValue`].
//!
//! Failure is in-band everywhere: unknown dates carry
//! [`DtValue::Unknown`], accessors on them return 0 or
//! [`Weekday::Miracleday`], and cross-representation comparison reports
//! the sentinel −2 instead of an ordering.

use crate::calendar::{self, MON_YDAY};
use crate::convert;

/// Days of the week, Sunday first, with an in-band unknown sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    /// "No such weekday": what you get out of a date with no defined
    /// weekday, e.g. one with a zero month.
    Miracleday = 7,
}

impl Weekday {
    /// Numeric weekday, Sunday = 0 through Saturday = 6, 7 for the
    /// sentinel.
    pub fn index(self) -> u32 {
        self as u32
    }

    /// The weekday with the given number; anything outside 0..=6 is the
    /// sentinel.
    pub fn from_index(i: u32) -> Weekday {
        match i {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            6 => Weekday::Saturday,
            _ => Weekday::Miracleday,
        }
    }
}

/// The representation a date or duration is carried in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DtKind {
    Ymd,
    Ymcw,
    Daisy,
    Bizda,
    /// Business day count; only meaningful for durations.
    Bizsi,
    Unknown,
}

/// Whether a business day number counts away from the reference point
/// forwards or backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum BizDirection {
    #[default]
    After,
    Before,
}

/// The reference point business day numbers are anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum BizReference {
    /// The last calendar day of the month.
    #[default]
    Ultimo,
}

/// The (direction, reference) pair qualifying a BIZDA value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct BizdaParam {
    pub ab: BizDirection,
    pub reference: BizReference,
}

/// Year, month, day of month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Ymd {
    pub y: u32,
    pub m: u32,
    pub d: u32,
}

/// Year, month, count, weekday: "the c-th w of month m in year y".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Ymcw {
    pub y: u32,
    pub m: u32,
    pub c: u32,
    pub w: u32,
}

/// Year, month, business day number, with its qualifying parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bizda {
    pub y: u32,
    pub m: u32,
    pub bd: u32,
    pub param: BizdaParam,
}

/// The payload shared by dates and durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DtValue {
    Ymd(Ymd),
    Ymcw(Ymcw),
    /// Days since the epoch; 0 is the "unset" sentinel.
    Daisy(u32),
    Bizda(Bizda),
    /// Unsigned business day count; the sign lives on the duration.
    Bizsi(u32),
    Unknown,
}

impl DtValue {
    pub fn kind(&self) -> DtKind {
        match self {
            DtValue::Ymd(_) => DtKind::Ymd,
            DtValue::Ymcw(_) => DtKind::Ymcw,
            DtValue::Daisy(_) => DtKind::Daisy,
            DtValue::Bizda(_) => DtKind::Bizda,
            DtValue::Bizsi(_) => DtKind::Bizsi,
            DtValue::Unknown => DtKind::Unknown,
        }
    }
}

/// A calendar date in one of the four date representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DtDate {
    pub value: DtValue,
}

/// A displacement between dates: a date payload plus a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DtDur {
    pub value: DtValue,
    pub neg: bool,
}

impl Ymd {
    /// Day of the year, 1-based; 0 when year or month is unset.
    pub fn yday(&self) -> u32 {
        if self.y == 0 || self.m == 0 || self.m > 12 {
            return 0;
        }
        let mut res = self.d + MON_YDAY[self.m as usize] as u32;
        if calendar::leapp(self.y) {
            res += ((MON_YDAY[0] >> self.m) & 1) as u32;
        }
        res
    }

    /// Numeric weekday (0 = Sunday), 7 when undefined.
    pub fn wday(&self) -> u32 {
        let yd = self.yday();
        if yd == 0 {
            return 7;
        }
        (yd - 1 + calendar::jan01_wday(self.y)) % 7
    }

    /// Which occurrence of its weekday this day is within the month.
    pub fn count(&self) -> u32 {
        if self.d == 0 {
            return 0;
        }
        (self.d - 1) / 7 + 1
    }

    /// Business day number of this date under `bp`, or −1 when the date
    /// falls on a weekend or the parameters are unsupported.
    pub fn bday(&self, bp: BizdaParam) -> i32 {
        if bp.ab != BizDirection::After || bp.reference != BizReference::Ultimo {
            return -1;
        }
        let wdd = self.wday();
        if wdd == 0 || wdd == 6 {
            return -1;
        }
        calendar::nbdays(self.d, wdd) as i32
    }
}

// Excess weeks of any fixed weekday before each month, over the four-per-
// month baseline, for a year that starts on that weekday. September gains
// a week in leap years, visible from October on (November and December
// absorb it again).
static WS_EXCESS: [u32; 13] = [0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4];

impl Ymcw {
    /// The weekday component.
    pub fn wday(&self) -> u32 {
        self.w
    }

    /// Which occurrence of `w` in the whole year this date is; the
    /// year-count analogue of the month count `c`.
    pub fn yday(&self) -> u32 {
        if self.m < 1 || self.m > 12 {
            return 0;
        }
        let mut ws = 4 * (self.m - 1) + WS_EXCESS[self.m as usize];
        if self.m == 10 && calendar::leapp(self.y) {
            ws += 1;
        }
        let j01 = calendar::jan01_wday(self.y);
        let m01 = calendar::m01_wday(self.y, self.m);
        // the guess assumes the year starts on w; correct by the week
        // positions of w and the month start relative to January 1st
        let mstart = (m01 + 7 - j01) % 7;
        let wpos = (self.w + 7 - j01) % 7;
        if mstart != 0 && wpos >= mstart && ws > 0 {
            ws -= 1;
        }
        ws + self.c
    }

    /// Day of month this YMCW resolves to; the fifth occurrence clamps
    /// back a week when the month has no fifth.
    pub fn mday(&self) -> u32 {
        let wd_jan01 = calendar::jan01_wday(self.y);
        let yd01 = Ymd { y: self.y, m: self.m, d: 1 }.yday();
        if yd01 == 0 || self.c == 0 {
            return 0;
        }
        let wd01 = (wd_jan01 + yd01 - 1) % 7;

        // the first w on/after the 1st sits at (w - wd01 mod 7) + 1
        let mut res = (self.w + 7 - wd01) % 7 + 1 + 7 * (self.c - 1);
        if res > calendar::mdays(self.y, self.m) {
            res -= 7;
        }
        res
    }

    /// Business day number of this date under `bp`, or −1 for weekend
    /// weekdays and unsupported parameters.
    pub fn bday(&self, bp: BizdaParam) -> i32 {
        if self.w == 0 || self.w == 6 {
            return -1;
        }
        if bp.ab != BizDirection::After || bp.reference != BizReference::Ultimo {
            return -1;
        }
        let wd01 = Ymd { y: self.y, m: self.m, d: 1 }.wday();
        self.w as i32 - wd01 as i32 + 5 * self.c as i32 + 1
    }
}

// Business days beyond twenty per month, by the weekday January 1st
// falls on. The two trailing columns replace February and March in leap
// years; from April on a leap year reads the row of the following
// weekday.
struct BdaysRow {
    excess: [u32; 12],
    feb_leap: u32,
    mar_leap: u32,
}

static BDAYS_BY_J01: [BdaysRow; 7] = [
    /* Sun */ BdaysRow { excess: [2, 0, 3, 0, 3, 2, 1, 3, 1, 2, 2, 1], feb_leap: 1, mar_leap: 2 },
    /* Mon */ BdaysRow { excess: [3, 0, 2, 1, 3, 1, 2, 3, 0, 3, 2, 1], feb_leap: 1, mar_leap: 1 },
    /* Tue */ BdaysRow { excess: [3, 0, 1, 2, 3, 0, 3, 2, 1, 3, 1, 2], feb_leap: 1, mar_leap: 1 },
    /* Wed */ BdaysRow { excess: [3, 0, 1, 2, 2, 1, 3, 1, 2, 3, 0, 3], feb_leap: 0, mar_leap: 2 },
    /* Thu */ BdaysRow { excess: [2, 0, 2, 2, 1, 2, 3, 1, 2, 2, 1, 3], feb_leap: 0, mar_leap: 3 },
    /* Fri */ BdaysRow { excess: [1, 0, 3, 2, 1, 2, 2, 2, 2, 1, 2, 3], feb_leap: 1, mar_leap: 3 },
    /* Sat */ BdaysRow { excess: [1, 0, 3, 1, 2, 2, 1, 3, 2, 1, 2, 2], feb_leap: 1, mar_leap: 3 },
];

impl Bizda {
    /// Day of month the business day number resolves to, clamped to the
    /// month's length when the number runs past the month's business
    /// days; 0 when unset.
    pub fn mday(&self) -> u32 {
        let wd01 = Ymd { y: self.y, m: self.m, d: 1 }.wday();
        let (wd01, res) = match wd01 {
            1..=5 => (wd01, 1u32),
            // weekend starts push the first business day into the month
            6 => (1, 3),
            0 => (1, 2),
            _ => return 0,
        };
        if self.bd == 0 {
            return 0;
        }
        let magic = self.bd - 1 + wd01 - 1;
        let wk = magic / 5;
        let nd = magic % 5;
        let out = res as i32 + (wk * 7 + nd) as i32 - wd01 as i32 + 1;
        if out < 1 {
            return 0;
        }
        let out = out as u32;
        let md = calendar::mdays(self.y, self.m);
        if out > md {
            md
        } else {
            out
        }
    }

    /// Numeric weekday of the business day; always lands on Monday
    /// through Friday.
    pub fn wday(&self) -> u32 {
        let wd01 = Ymd { y: self.y, m: self.m, d: 1 }.wday();
        if wd01 > 6 || self.bd == 0 {
            return 7;
        }
        let wd01 = if wd01 == 0 { 6 } else { wd01 };
        let magic = self.bd - 1 + wd01 - 1;
        magic % 5 + 1
    }

    /// Which occurrence of its weekday within the month; the tail of the
    /// month reads as the fifth.
    pub fn count(&self) -> u32 {
        if self.bd == 0 {
            return 0;
        }
        if self.bd + 5 > calendar::bdays(self.y, self.m) {
            return 5;
        }
        (self.bd - 1) / 5 + 1
    }

    /// Business day of the year: twenty per elapsed month plus the
    /// tabulated excess, plus this month's number.
    pub fn yday(&self) -> u32 {
        if self.param.reference != BizReference::Ultimo {
            return 0;
        }
        if self.m < 1 || self.m > 12 {
            return 0;
        }
        let j01 = calendar::jan01_wday(self.y) as usize;
        let m = self.m as usize;
        let mut accum = 0u32;

        if !calendar::leapp(self.y) {
            let row = &BDAYS_BY_J01[j01];
            for i in 0..m - 1 {
                accum += row.excess[i];
            }
        } else if m > 1 {
            let row = &BDAYS_BY_J01[j01];
            accum += row.excess[0];
            if m > 2 {
                accum += row.feb_leap;
            }
            if m > 3 {
                accum += row.mar_leap;
            }
            // past the leap day the year reads like one starting a
            // weekday later
            let row = &BDAYS_BY_J01[(j01 + 1) % 7];
            for i in 3..m - 1 {
                accum += row.excess[i];
            }
        }
        20 * (self.m - 1) + accum + self.bd
    }
}

impl DtDate {
    pub const UNKNOWN: DtDate = DtDate { value: DtValue::Unknown };

    pub fn ymd(y: u32, m: u32, d: u32) -> DtDate {
        DtDate { value: DtValue::Ymd(Ymd { y, m, d }) }
    }

    pub fn ymcw(y: u32, m: u32, c: u32, w: u32) -> DtDate {
        DtDate { value: DtValue::Ymcw(Ymcw { y, m, c, w }) }
    }

    pub fn daisy(d: u32) -> DtDate {
        DtDate { value: DtValue::Daisy(d) }
    }

    pub fn bizda(y: u32, m: u32, bd: u32, param: BizdaParam) -> DtDate {
        DtDate { value: DtValue::Bizda(Bizda { y, m, bd, param }) }
    }

    pub fn kind(&self) -> DtKind {
        self.value.kind()
    }

    pub fn is_unknown(&self) -> bool {
        self.value == DtValue::Unknown
    }

    /// The year, 0 when unknown.
    pub fn year(&self) -> u32 {
        match self.value {
            DtValue::Ymd(v) => v.y,
            DtValue::Ymcw(v) => v.y,
            DtValue::Daisy(d) => convert::daisy_to_ymd(d).y,
            DtValue::Bizda(v) => v.y,
            _ => 0,
        }
    }

    /// The month, 0 when unknown.
    pub fn mon(&self) -> u32 {
        match self.value {
            DtValue::Ymd(v) => v.m,
            DtValue::Ymcw(v) => v.m,
            DtValue::Daisy(d) => convert::daisy_to_ymd(d).m,
            DtValue::Bizda(v) => v.m,
            _ => 0,
        }
    }

    /// The day of the month, 0 when unknown.
    pub fn mday(&self) -> u32 {
        match self.value {
            DtValue::Ymd(v) => v.d,
            DtValue::Ymcw(v) => v.mday(),
            DtValue::Daisy(d) => convert::daisy_to_ymd(d).d,
            DtValue::Bizda(v) => v.mday(),
            _ => 0,
        }
    }

    /// Which occurrence of its weekday this date is within its month.
    pub fn count(&self) -> u32 {
        match self.value {
            DtValue::Ymd(v) => v.count(),
            DtValue::Ymcw(v) => v.c,
            DtValue::Daisy(d) => convert::daisy_to_ymd(d).count(),
            DtValue::Bizda(v) => v.count(),
            _ => 0,
        }
    }

    /// The weekday, [`Weekday::Miracleday`] when unknown.
    pub fn wday(&self) -> Weekday {
        let w = match self.value {
            DtValue::Ymd(v) => v.wday(),
            DtValue::Ymcw(v) => v.wday(),
            DtValue::Daisy(d) => convert::daisy_wday(d),
            DtValue::Bizda(v) => v.wday(),
            _ => 7,
        };
        Weekday::from_index(w)
    }

    /// Day of the year under the representation's own counting: calendar
    /// days for YMD and DAISY, weekday occurrences for YMCW, business
    /// days for BIZDA.
    pub fn yday(&self) -> u32 {
        match self.value {
            DtValue::Ymd(v) => v.yday(),
            DtValue::Ymcw(v) => v.yday(),
            DtValue::Daisy(d) => convert::daisy_yday(d),
            DtValue::Bizda(v) => v.yday(),
            _ => 0,
        }
    }

    /// Business day number in the month under (AFTER, ULTIMO), −1 when
    /// the date has none, 0 when unknown.
    pub fn bday(&self) -> i32 {
        self.bday_q(BizdaParam::default())
    }

    /// Business day number in the month under explicit parameters. A
    /// stored BIZDA re-reads directly or through the complement against
    /// the month's business day count when only the direction differs.
    pub fn bday_q(&self, bp: BizdaParam) -> i32 {
        match self.value {
            DtValue::Bizda(v) => {
                if v.param.reference != bp.reference {
                    0
                } else if v.param.ab == bp.ab {
                    v.bd as i32
                } else {
                    calendar::bdays(v.y, v.m) as i32 - v.bd as i32
                }
            }
            DtValue::Ymd(v) => v.bday(bp),
            DtValue::Daisy(d) => convert::daisy_to_ymd(d).bday(bp),
            DtValue::Ymcw(v) => v.bday(bp),
            _ => 0,
        }
    }

    /// The quarter, 1 through 4, 0 when unknown.
    pub fn quarter(&self) -> u32 {
        let m = match self.value {
            DtValue::Ymd(v) => v.m,
            DtValue::Ymcw(v) => v.m,
            DtValue::Bizda(v) => v.m,
            DtValue::Daisy(d) => convert::daisy_to_ymd(d).m,
            _ => return 0,
        };
        if m == 0 {
            return 0;
        }
        (m - 1) / 3 + 1
    }
}

impl DtDur {
    pub const UNKNOWN: DtDur = DtDur { value: DtValue::Unknown, neg: false };

    pub fn kind(&self) -> DtKind {
        self.value.kind()
    }

    pub fn is_unknown(&self) -> bool {
        self.value == DtValue::Unknown
    }
}

/// Orders two YMCW dates. Years, months and counts order numerically;
/// weekdays order by their offset from the month's first weekday, since
/// the calendar order of "c-th w" within a month does not follow the
/// numeric weekday.
pub fn ymcw_cmp(d1: &Ymcw, d2: &Ymcw) -> i32 {
    if d1.y != d2.y {
        return if d1.y < d2.y { -1 } else { 1 };
    }
    if d1.m != d2.m {
        return if d1.m < d2.m { -1 } else { 1 };
    }
    if d1.c != d2.c {
        return if d1.c < d2.c { -1 } else { 1 };
    }
    let wd01 = Ymd { y: d1.y, m: d1.m, d: 1 }.wday();
    let off1 = (d1.w as i32 - wd01 as i32).rem_euclid(7);
    let off2 = (d2.w as i32 - wd01 as i32).rem_euclid(7);
    match off1.cmp(&off2) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// Compares two dates of the same representation: −1, 0 or 1; −2 when
/// the representations differ (convert first for cross-kind ordering).
///
/// YMD, DAISY and BIZDA order by their components lexicographically —
/// year, then month, then day — which coincides with calendar order.
/// YMCW needs the dedicated weekday-offset comparison.
pub fn compare(d1: &DtDate, d2: &DtDate) -> i32 {
    let ord = |o: std::cmp::Ordering| match o {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    };
    match (&d1.value, &d2.value) {
        (DtValue::Ymd(a), DtValue::Ymd(b)) => ord((a.y, a.m, a.d).cmp(&(b.y, b.m, b.d))),
        (DtValue::Daisy(a), DtValue::Daisy(b)) => ord(a.cmp(b)),
        (DtValue::Bizda(a), DtValue::Bizda(b)) => ord((a.y, a.m, a.bd).cmp(&(b.y, b.m, b.bd))),
        (DtValue::Ymcw(a), DtValue::Ymcw(b)) => ymcw_cmp(a, b),
        _ => -2,
    }
}

impl PartialOrd for DtDate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match compare(self, other) {
            -1 => Some(std::cmp::Ordering::Less),
            // BIZDA values differing only in parameters compare equal
            // but are not interchangeable
            0 if self == other => Some(std::cmp::Ordering::Equal),
            1 => Some(std::cmp::Ordering::Greater),
            _ => None,
        }
    }
}

/// Whether `d` lies in the closed range `[lo, hi]`. False whenever a
/// comparison is not defined.
pub fn in_range(d: &DtDate, lo: &DtDate, hi: &DtDate) -> bool {
    compare(d, lo) >= 0 && compare(d, hi) <= 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ymd_accessors() {
        let d = Ymd { y: 2011, m: 3, d: 17 };
        assert_eq!(d.yday(), 76);
        assert_eq!(d.wday(), 4); // Thursday
        assert_eq!(d.count(), 3); // third Thursday
        let d = Ymd { y: 2012, m: 3, d: 1 };
        assert_eq!(d.yday(), 61); // leap shift
        assert_eq!(d.wday(), 4);
    }

    #[test]
    fn test_ymd_count_of_firsts_and_lasts() {
        assert_eq!(Ymd { y: 2011, m: 6, d: 1 }.count(), 1);
        assert_eq!(Ymd { y: 2011, m: 6, d: 7 }.count(), 1);
        assert_eq!(Ymd { y: 2011, m: 6, d: 8 }.count(), 2);
        assert_eq!(Ymd { y: 2011, m: 6, d: 30 }.count(), 5);
    }

    #[test]
    fn test_ymcw_mday() {
        // third Thursday of March 2011 is the 17th
        let d = Ymcw { y: 2011, m: 3, c: 3, w: 4 };
        assert_eq!(d.mday(), 17);
        // fifth Monday of June 2011 does not exist, clamps to the fourth
        let d = Ymcw { y: 2011, m: 6, c: 5, w: 1 };
        assert_eq!(d.mday(), 27);
        // second Tuesday of June 2011
        let d = Ymcw { y: 2011, m: 6, c: 2, w: 2 };
        assert_eq!(d.mday(), 14);
    }

    #[test]
    fn test_ymcw_yday() {
        // March 17th 2011 is the 11th Thursday of the year
        assert_eq!(Ymcw { y: 2011, m: 3, c: 3, w: 4 }.yday(), 11);
        // January counts plainly
        assert_eq!(Ymcw { y: 2011, m: 1, c: 1, w: 6 }.yday(), 1);
        // December 3rd 2011, the 49th Saturday
        assert_eq!(Ymcw { y: 2011, m: 12, c: 1, w: 6 }.yday(), 49);
    }

    #[test]
    fn test_ymd_bday() {
        let bp = BizdaParam::default();
        // 2011-03-03 is the third business day of March
        assert_eq!(Ymd { y: 2011, m: 3, d: 3 }.bday(bp), 3);
        // weekends have no business day number
        assert_eq!(Ymd { y: 2011, m: 3, d: 5 }.bday(bp), -1);
        assert_eq!(Ymd { y: 2011, m: 3, d: 6 }.bday(bp), -1);
        assert_eq!(Ymd { y: 2011, m: 3, d: 31 }.bday(bp), 23);
    }

    #[test]
    fn test_bizda_mday_wday() {
        let b = Bizda { y: 2011, m: 3, bd: 3, param: BizdaParam::default() };
        assert_eq!(b.mday(), 3);
        assert_eq!(b.wday(), 4); // Thursday
        // month starting on a Saturday: first business day is the 3rd
        let b = Bizda { y: 2011, m: 10, bd: 1, param: BizdaParam::default() };
        assert_eq!(b.mday(), 3);
        assert_eq!(b.wday(), 1);
        // month starting on a Sunday
        let b = Bizda { y: 2011, m: 5, bd: 1, param: BizdaParam::default() };
        assert_eq!(b.mday(), 2);
        // overlong business day numbers clamp to the month's end
        let b = Bizda { y: 2011, m: 2, bd: 23, param: BizdaParam::default() };
        assert_eq!(b.mday(), 28);
    }

    #[test]
    fn test_bizda_yday_matches_running_count() {
        for y in [2011u32, 2012, 2016] {
            let mut total = 0;
            for m in 1..=12 {
                let b = Bizda { y, m, bd: 1, param: BizdaParam::default() };
                assert_eq!(b.yday(), total + 1, "first bday of {}-{:02}", y, m);
                total += crate::calendar::bdays(y, m);
            }
        }
    }

    #[test]
    fn test_compare_same_kind() {
        let a = DtDate::ymd(2011, 3, 17);
        let b = DtDate::ymd(2011, 4, 1);
        assert_eq!(compare(&a, &b), -1);
        assert_eq!(compare(&b, &a), 1);
        assert_eq!(compare(&a, &a), 0);
        assert!(a < b);
    }

    #[test]
    fn test_compare_cross_kind_is_sentinel() {
        let a = DtDate::ymd(2011, 3, 17);
        let b = DtDate::daisy(1);
        assert_eq!(compare(&a, &b), -2);
        assert_eq!(a.partial_cmp(&b), None);
    }

    #[test]
    fn test_compare_ymcw_calendar_order() {
        // 2nd Tuesday of June 2011 (the 14th) is after the 1st Friday
        // (the 3rd)
        let a = DtDate::ymcw(2011, 6, 2, 2);
        let b = DtDate::ymcw(2011, 6, 1, 5);
        assert!(compare(&a, &b) > 0);
        // same count: Friday the 3rd is before Saturday the 4th but
        // after Wednesday the 1st
        let fri = DtDate::ymcw(2011, 6, 1, 5);
        let sat = DtDate::ymcw(2011, 6, 1, 6);
        let wed = DtDate::ymcw(2011, 6, 1, 3);
        assert!(compare(&fri, &sat) < 0);
        assert!(compare(&fri, &wed) > 0);
    }

    #[test]
    fn test_in_range() {
        let lo = DtDate::ymd(2011, 1, 1);
        let hi = DtDate::ymd(2011, 12, 31);
        assert!(in_range(&DtDate::ymd(2011, 6, 15), &lo, &hi));
        assert!(!in_range(&DtDate::ymd(2012, 1, 1), &lo, &hi));
        // cross-kind never ranges
        assert!(!in_range(&DtDate::daisy(100), &lo, &hi));
    }

    #[test]
    fn test_unknown_propagation() {
        let u = DtDate::UNKNOWN;
        assert_eq!(u.year(), 0);
        assert_eq!(u.mday(), 0);
        assert_eq!(u.wday(), Weekday::Miracleday);
        assert_eq!(compare(&u, &DtDate::ymd(2011, 1, 1)), -2);
    }
}
