//! Date arithmetic: `add(date, duration)` and `diff(kind, d1, d2)`.
//!
//! Both operations are representation-directed. `add` keeps the
//! representation of its left operand and interprets the duration's
//! components according to the duration's own representation: months
//! apply first (with the day clamped into the new month), then calendar
//! days, then business days converted to a calendar displacement from
//! the anchor's weekday. `diff` produces a duration in whatever
//! representation the caller asks for.
//!
//! Adding to a YMCW date is component-wise with no carry out of the
//! count/weekday pair; diffing two YMCWs borrows a month the same way
//! the YMD diff does.

use crate::calendar;
use crate::convert;
use crate::value::{DtDate, DtDur, DtKind, DtValue, Ymcw, Ymd};

/// A duration reduced to its additive components.
#[derive(Default)]
struct DurComponents {
    m: i32,
    d: i32,
    b: i32,
}

// headroom for the week and month multiplications downstream
const COMP_MAX: i64 = i32::MAX as i64 / 8;

fn comp(v: i64) -> i32 {
    v.min(COMP_MAX) as i32
}

fn decompose(dur: &DtDur) -> DurComponents {
    let mut dc = DurComponents::default();
    match dur.value {
        DtValue::Ymd(v) => {
            dc.m = comp(v.y as i64 * 12 + v.m as i64);
            dc.d = comp(v.d as i64);
        }
        DtValue::Daisy(d) => {
            dc.d = comp(d as i64);
        }
        DtValue::Bizsi(b) => {
            dc.b = comp(b as i64);
        }
        DtValue::Bizda(v) => {
            dc.m = comp(v.y as i64 * 12 + v.m as i64);
            dc.b = comp(v.bd as i64);
        }
        _ => {}
    }
    if dur.neg {
        dc.m = -dc.m;
        dc.d = -dc.d;
        dc.b = -dc.b;
    }
    dc
}

/// Calendar-day displacement equivalent to `b` business days, starting
/// from weekday `dow`.
///
/// Reduces `b` to full weeks plus a residue in `[0, 5)`, steps the
/// residue over the weekend, and treats weekend anchors as the Monday
/// after (advancing to it first). Negative residues borrow a week and
/// count back from there.
fn d_equiv(dow: u32, b: i32) -> i32 {
    let mut res = 0i32;
    let mut b = b;
    let mut dow = dow;

    match dow {
        1..=5 => {
            res += 7 * (b / 5);
            b %= 5;
        }
        0 | 6 => {
            if dow == 6 {
                res += 1;
            }
            res += 1;
            b -= 1;
            res += 7 * (b / 5);
            b %= 5;
            if b < 0 {
                res += 1;
            }
            dow = 1;
        }
        _ => {}
    }

    if b < 0 {
        res -= 7;
        b += 5;
    }
    // b in [0, 5)
    match dow {
        0..=5 => {
            if dow as i32 + b <= 5 {
                res += b;
            } else {
                res += b + 2;
            }
        }
        6 => {
            res += b + 1;
        }
        _ => {
            res = 0;
        }
    }
    res
}

/// Adds a duration to a daisy. Only day-count durations apply; a daisy
/// has no notion of years or months.
pub fn daisy_add(d: u32, dur: &DtDur) -> u32 {
    match dur.value {
        DtValue::Daisy(n) => {
            let out = if dur.neg { d as i64 - n as i64 } else { d as i64 + n as i64 };
            out.max(0) as u32
        }
        DtValue::Bizsi(n) => {
            let b = if dur.neg { -(n as i32) } else { n as i32 };
            let dequiv = d_equiv(convert::daisy_wday(d), b);
            (d as i64 + dequiv as i64).max(0) as u32
        }
        _ => d,
    }
}

/// Adds a duration to a YMD date: months first, clamping the day into
/// the target month, then days (or the business-day equivalent), with
/// overflow carried across month boundaries.
pub fn ymd_add(d: Ymd, dur: &DtDur) -> Ymd {
    let dc = decompose(dur);
    let mut tgty: i32;
    let mut tgtm: i32;
    let mut tgtd: i32;
    let mut md: i32;

    match dur.value {
        DtValue::Ymd(_) | DtValue::Ymcw(_) | DtValue::Bizda(_) => {
            let months = dc.m + d.m as i32 - 1;
            tgty = months.div_euclid(12) + d.y as i32;
            tgtm = months.rem_euclid(12) + 1;

            md = calendar::mdays(tgty as u32, tgtm as u32) as i32;
            tgtd = d.d as i32;
            if tgtd > md {
                tgtd = md;
            }
            match dur.value {
                DtValue::Ymd(_) => {
                    tgtd += dc.d;
                }
                DtValue::Bizda(_) => {
                    // displace from the anchor's weekday
                    let tent = d.wday();
                    tgtd += d_equiv(tent, dc.b);
                }
                _ => {
                    // no day component to apply
                    tgtd = 0;
                }
            }
        }
        DtValue::Daisy(_) => {
            tgtd = d.d as i32 + dc.d;
            tgty = d.y as i32;
            tgtm = d.m as i32;
            md = calendar::mdays(d.y, d.m) as i32;
        }
        DtValue::Bizsi(_) => {
            let tent = d.wday();
            tgtd = d.d as i32 + d_equiv(tent, dc.b);
            tgty = d.y as i32;
            tgtm = d.m as i32;
            md = calendar::mdays(d.y, d.m) as i32;
        }
        _ => {
            return Ymd::default();
        }
    }

    // carry the day across months in either direction
    while tgtd > md {
        tgtd -= md;
        tgtm += 1;
        if tgtm > 12 {
            tgty += 1;
            tgtm = 1;
        }
        md = calendar::mdays(tgty as u32, tgtm as u32) as i32;
    }
    while tgtd < 1 {
        tgtm -= 1;
        if tgtm < 1 {
            tgty -= 1;
            tgtm = 12;
        }
        md = calendar::mdays(tgty as u32, tgtm as u32) as i32;
        tgtd += md;
    }

    Ymd { y: tgty as u32, m: tgtm as u32, d: tgtd as u32 }
}

/// Adds a duration to a YMCW date, component by component. The count
/// and weekday do not carry into each other.
pub fn ymcw_add(mut d: Ymcw, dur: &DtDur) -> Ymcw {
    match dur.value {
        DtValue::Ymd(v) => {
            d.y = d.y.saturating_add(v.y);
            d.m = d.m.saturating_add(v.m);
            d.c = d.c.saturating_add(v.d / 7);
            d.w = d.w.saturating_add(v.d % 7);
        }
        DtValue::Ymcw(v) => {
            d.y = d.y.saturating_add(v.y);
            d.m = d.m.saturating_add(v.m);
            d.c = d.c.saturating_add(v.c);
            d.w = d.w.saturating_add(v.w);
        }
        _ => {}
    }
    d
}

/// Adds a duration to a date. The result keeps the date's
/// representation; unknown dates, unknown durations and BIZDA anchors
/// yield unknown.
pub fn add(d: DtDate, dur: &DtDur) -> DtDate {
    if dur.is_unknown() {
        return DtDate::UNKNOWN;
    }
    match d.value {
        DtValue::Daisy(v) => DtDate::daisy(daisy_add(v, dur)),
        DtValue::Ymd(v) => DtDate { value: DtValue::Ymd(ymd_add(v, dur)) },
        DtValue::Ymcw(v) => DtDate { value: DtValue::Ymcw(ymcw_add(v, dur)) },
        _ => DtDate::UNKNOWN,
    }
}

/// `d2 − d1` as a day-count duration.
pub fn daisy_diff(d1: u32, d2: u32) -> DtDur {
    let diff = d2 as i64 - d1 as i64;
    DtDur {
        value: DtValue::Daisy(diff.unsigned_abs() as u32),
        neg: diff < 0,
    }
}

/// `d2 − d1` entirely in year/month/day terms.
///
/// The smaller date is subtracted from the larger one and the sign
/// recorded. When the day difference is negative a month is borrowed
/// from before `d2`; if the anchor day cannot survive into that month
/// (a 31st against a 30-day month), the clamp absorbs the remainder and
/// the day difference is `d2`'s own day.
pub fn ymd_diff(d1: Ymd, d2: Ymd) -> DtDur {
    let mut neg = false;
    let (d1, d2) = if (d1.y, d1.m, d1.d) > (d2.y, d2.m, d2.d) {
        neg = true;
        (d2, d1)
    } else {
        (d1, d2)
    };

    let mut tgtm = 12 * (d2.y as i32 - d1.y as i32) + (d2.m as i32 - d1.m as i32);
    let mut tgtd = d2.d as i32 - d1.d as i32;
    if tgtd < 0 && tgtm != 0 {
        let mut d2m = d2.m;
        let mut d2y = d2.y;
        d2m -= 1;
        if d2m < 1 {
            d2m = 12;
            d2y -= 1;
        }
        tgtd += calendar::mdays(d2y, d2m) as i32;
        tgtm -= 1;
        if tgtd < 1 {
            // d1's day exceeds the borrowed month, the clamp eats it
            tgtd = d2.d as i32;
        }
    }
    let tgtd = tgtd.max(0);

    DtDur {
        value: DtValue::Ymd(Ymd {
            y: (tgtm / 12) as u32,
            m: (tgtm % 12) as u32,
            d: tgtd as u32,
        }),
        neg,
    }
}

/// `d2 − d1` in year/month/count/weekday terms. Each side is expressed
/// as an offset from the first weekday of its month; the difference
/// borrows a month like the YMD diff when it comes out under a week.
pub fn ymcw_diff(d1: Ymcw, d2: Ymcw) -> DtDur {
    let mut neg = false;
    let (d1, d2) = if crate::value::ymcw_cmp(&d1, &d2) > 0 {
        neg = true;
        (d2, d1)
    } else {
        (d1, d2)
    };

    let wd01 = Ymd { y: d1.y, m: d1.m, d: 1 }.wday();
    let wd02 = if d2.y != d1.y || d2.m != d1.m {
        Ymd { y: d2.y, m: d2.m, d: 1 }.wday()
    } else {
        wd01
    };

    let mut tgtm = 12 * (d2.y as i32 - d1.y as i32) + (d2.m as i32 - d1.m as i32);
    let off1 = (d1.w as i32 - wd01 as i32).rem_euclid(7);
    let off2 = (d2.w as i32 - wd02 as i32).rem_euclid(7);
    let mut tgtd = off2 - off1 + 7 * (d2.c as i32 - d1.c as i32);

    if tgtd < 7 && tgtm > 0 {
        let mut d2m = d2.m;
        let mut d2y = d2.y;
        d2m -= 1;
        if d2m < 1 {
            d2m = 12;
            d2y -= 1;
        }
        tgtd += calendar::mdays(d2y, d2m) as i32;
        tgtm -= 1;
    }
    let tgtd = tgtd.max(0);

    DtDur {
        value: DtValue::Ymcw(Ymcw {
            y: (tgtm / 12) as u32,
            m: (tgtm % 12) as u32,
            c: (tgtd / 7) as u32,
            w: (tgtd % 7) as u32,
        }),
        neg,
    }
}

/// `d2 − d1` in the representation the caller asks for. A BIZSI target
/// measures the daisy difference and kicks the weekends out; BIZDA is
/// not a valid difference target.
pub fn diff(tgt: DtKind, d1: DtDate, d2: DtDate) -> DtDur {
    if d1.is_unknown() || d2.is_unknown() {
        return DtDur::UNKNOWN;
    }
    match tgt {
        DtKind::Daisy | DtKind::Bizsi => {
            let tmp1 = convert::to_daisy(&d1);
            let tmp2 = convert::to_daisy(&d2);
            let res = daisy_diff(tmp1, tmp2);
            if tgt == DtKind::Bizsi {
                let days = match res.value {
                    DtValue::Daisy(n) => n,
                    _ => 0,
                };
                let wdb = convert::daisy_wday(tmp2);
                return DtDur {
                    value: DtValue::Bizsi(calendar::nbdays(days, wdb)),
                    neg: res.neg,
                };
            }
            res
        }
        DtKind::Ymd => ymd_diff(convert::to_ymd(&d1), convert::to_ymd(&d2)),
        DtKind::Ymcw => ymcw_diff(convert::to_ymcw(&d1), convert::to_ymcw(&d2)),
        _ => DtDur::UNKNOWN,
    }
}

/// Flips a duration's sign.
pub fn negate(mut dur: DtDur) -> DtDur {
    dur.neg = !dur.neg;
    dur
}

/// Whether a duration points backwards.
pub fn is_negative(dur: &DtDur) -> bool {
    dur.neg
}
