//! Format-directed date parsing and the duration parser.
//!
//! [`parse_date`] walks the input and a directive string in lockstep,
//! each directive consuming digits, names or fixed text. The fields
//! collected on the way are then handed to a kind guesser: a year with
//! no count makes a YMD, a year with a count makes a YMCW, the business
//! day flag makes a BIZDA, anything else is unknown. With no format
//! given, a hand-coded reader accepts the standard
//! `YYYY-MM-DD[-C-W|bN|BN]` shapes directly.
//!
//! Failure is reported in-band: the returned date is unknown and the
//! consumed length is 0.

use lazy_static::lazy_static;
use regex::Regex;

use crate::calendar::{MAX_YEAR, MIN_YEAR};
use crate::fmtspec::{tok_spec, trans_dfmt, Spec, SpecField, WidthMod};
use crate::names;
use crate::strops;
use crate::value::{BizDirection, BizdaParam, DtDate, DtDur, DtValue, Ymd};

/// The fields a parse run collects before the date kind is decided.
/// Zero doubles as "unset" throughout.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FieldBag {
    pub y: u32,
    pub m: u32,
    pub d: u32,
    pub c: u32,
    pub w: u32,
    pub b: u32,
    pub q: u32,
    pub bizda: bool,
    pub ab: BizDirection,
}

/// Decides what kind of date a bag of fields makes.
fn guess_dtyp(d: FieldBag) -> DtDate {
    if d.y != 0 && (d.m == 0 || d.c == 0) && !d.bizda {
        // nearly everything is a YMD; reduce lazy days like Apr 31st
        #[allow(unused_mut)]
        let mut day = d.d;
        #[cfg(not(feature = "fast-arith"))]
        {
            let md = crate::calendar::mdays(d.y, d.m);
            if day > md {
                day = md;
            }
        }
        DtDate::ymd(d.y, d.m, day)
    } else if d.y != 0 && d.c != 0 && !d.bizda {
        // a naught weekday is legitimate here
        DtDate::ymcw(d.y, d.m, d.c, d.w)
    } else if d.y != 0 && d.bizda {
        DtDate::bizda(d.y, d.m, d.b, BizdaParam { ab: d.ab, ..Default::default() })
    } else {
        DtDate::UNKNOWN
    }
}

/// The no-format reader: `YYYY-MM-DD`, optionally continued `-C-W` into
/// a YMCW or `bN`/`BN` into a BIZDA.
fn parse_std(s: &[u8]) -> (DtDate, usize) {
    let mut d = FieldBag::default();
    let mut sp = 0usize;

    macro_rules! read {
        ($lo:expr, $hi:expr) => {{
            let (v, n) = strops::strtoui_lim(&s[sp..], $lo, $hi);
            match v {
                Some(v) => {
                    sp += n;
                    v
                }
                None => return (DtDate::UNKNOWN, 0),
            }
        }};
    }

    d.y = read!(MIN_YEAR, MAX_YEAR);
    if s.get(sp) != Some(&b'-') {
        return (DtDate::UNKNOWN, 0);
    }
    sp += 1;
    d.m = read!(0, 12);
    if s.get(sp) != Some(&b'-') {
        return (DtDate::UNKNOWN, 0);
    }
    sp += 1;
    d.d = read!(0, 31);

    match s.get(sp) {
        Some(b'-') => {
            // the YMCW continuation only makes sense for counts
            if d.d <= 5 {
                d.c = d.d;
                d.d = 0;
                sp += 1;
                d.w = read!(0, 7);
            }
        }
        Some(b'B') => {
            d.ab = BizDirection::Before;
            d.bizda = true;
            d.b = d.d;
            d.d = 0;
            sp += 1;
        }
        Some(b'b') => {
            d.bizda = true;
            d.b = d.d;
            d.d = 0;
            sp += 1;
        }
        _ => {}
    }
    (guess_dtyp(d), sp)
}

/// Consumes one cardinal (decimal or name) directive from `s` into the
/// bag. Returns the bytes consumed, or `None` on a mismatch.
fn parse_card(d: &mut FieldBag, s: &[u8], spec: Spec) -> Option<usize> {
    let mut sp = 0usize;

    macro_rules! read {
        ($lo:expr, $hi:expr) => {{
            let (v, n) = strops::strtoui_lim(&s[sp..], $lo, $hi);
            sp += n;
            v?
        }};
    }

    match spec.spfl {
        SpecField::NStd => {
            d.y = read!(MIN_YEAR, MAX_YEAR);
            sp += 1;
            if sp > s.len() {
                return None;
            }
            d.m = read!(0, 12);
            sp += 1;
            if sp > s.len() {
                return None;
            }
            d.d = read!(0, 31);
        }
        SpecField::NYear => match spec.abbr {
            WidthMod::Normal => d.y = read!(MIN_YEAR, MAX_YEAR),
            WidthMod::Abbrev => {
                // two-digit years pivot at 68: 69 is 1969, 68 is 2068
                let y = read!(0, 99) + 2000;
                d.y = if y > 2068 { y - 100 } else { y };
            }
            WidthMod::Long => {}
        },
        SpecField::NMon => d.m = read!(0, 12),
        SpecField::NMday => {
            if !spec.bizda {
                d.d = read!(0, 31);
            } else {
                d.b = read!(0, 23);
            }
        }
        SpecField::NCntWeek => d.w = read!(0, 7),
        SpecField::NCntMon => d.c = read!(0, 5),
        SpecField::SWday => match spec.abbr {
            WidthMod::Normal => {
                let (v, n) = strops::strtoarri(&s[sp..], &names::ABBR_WDAY);
                sp += n;
                d.w = v?;
            }
            WidthMod::Long => {
                let (v, n) = strops::strtoarri(&s[sp..], &names::LONG_WDAY);
                sp += n;
                d.w = v?;
            }
            WidthMod::Abbrev => {
                let c = *s.get(sp)?;
                let pos = names::ABAB_WDAY.iter().position(|&x| x == c)?;
                d.w = pos as u32;
                sp += 1;
            }
        },
        SpecField::SMon => match spec.abbr {
            WidthMod::Normal => {
                let (v, n) = strops::strtoarri(&s[sp..], &names::ABBR_MON);
                sp += n;
                d.m = v?;
            }
            WidthMod::Long => {
                let (v, n) = strops::strtoarri(&s[sp..], &names::LONG_MON);
                sp += n;
                d.m = v?;
            }
            WidthMod::Abbrev => {
                let c = *s.get(sp)?;
                let pos = names::ABAB_MON.iter().position(|&x| x == c)?;
                d.m = pos as u32;
                sp += 1;
            }
        },
        SpecField::SQtr | SpecField::NQtr => {
            if spec.spfl == SpecField::SQtr {
                if s.get(sp) != Some(&b'Q') {
                    return None;
                }
                sp += 1;
            }
            if d.m == 0 {
                let q = read!(1, 4);
                d.m = q * 3 - 2;
            }
        }
        SpecField::LitPercent => {
            if s.get(sp) != Some(&b'%') {
                return None;
            }
            sp += 1;
        }
        SpecField::LitTab => {
            if s.get(sp) != Some(&b'\t') {
                return None;
            }
            sp += 1;
        }
        SpecField::LitNl => {
            if s.get(sp) != Some(&b'\n') {
                return None;
            }
            sp += 1;
        }
        SpecField::NCntYear => {
            // the day of the year cannot seed a date; consume and drop
            let (_, n) = strops::strtoui_lim(&s[sp..], 1, 366);
            sp += n;
        }
        SpecField::Unknown => return None,
    }
    Some(sp)
}

/// Consumes one Roman numeral directive.
fn parse_rom(d: &mut FieldBag, s: &[u8], spec: Spec) -> Option<usize> {
    let mut sp = 0usize;

    macro_rules! read {
        ($lo:expr, $hi:expr) => {{
            let (v, n) = strops::romstrtoui_lim(&s[sp..], $lo, $hi);
            sp += n;
            v?
        }};
    }

    match spec.spfl {
        SpecField::NYear => match spec.abbr {
            WidthMod::Normal => d.y = read!(MIN_YEAR, MAX_YEAR),
            WidthMod::Abbrev => {
                let y = read!(0, 99) + 2000;
                d.y = if y > 2068 { y - 100 } else { y };
            }
            WidthMod::Long => {}
        },
        SpecField::NMon => d.m = read!(0, 12),
        SpecField::NMday => d.d = read!(0, 31),
        SpecField::NCntMon => d.c = read!(0, 5),
        _ => return None,
    }
    Some(sp)
}

/// Parses `text` against `fmt` (or the standard shapes when `fmt` is
/// `None`) and returns the date along with the bytes consumed. A failed
/// parse returns an unknown date and 0.
///
/// ```
/// use dateverse::{parse_date, DtDate};
///
/// let (d, used) = parse_date("2011-03-17", None);
/// assert_eq!(d, DtDate::ymd(2011, 3, 17));
/// assert_eq!(used, 10);
///
/// let (d, _) = parse_date("2011-03-3-Thu", Some("%Y-%m-%c-%a"));
/// assert_eq!(d, DtDate::ymcw(2011, 3, 3, 4));
/// ```
pub fn parse_date(text: &str, fmt: Option<&str>) -> (DtDate, usize) {
    let s = text.as_bytes();
    let fmt = match fmt {
        None => return parse_std(s),
        Some(f) => trans_dfmt(f),
    };
    let f = fmt.as_bytes();

    let mut d = FieldBag::default();
    let mut sp = 0usize;
    let mut fp = 0usize;

    while fp < f.len() && sp < s.len() {
        let (spec, n) = tok_spec(&f[fp..]);
        let fp_sav = fp;
        fp += n;

        if spec.spfl == SpecField::Unknown {
            // literal text must match byte for byte
            if f[fp_sav] != s[sp] {
                return (DtDate::UNKNOWN, 0);
            }
            sp += 1;
        } else if !spec.rom {
            match parse_card(&mut d, &s[sp..], spec) {
                Some(n) => sp += n,
                None => return (DtDate::UNKNOWN, 0),
            }
            if spec.ord {
                // a missing suffix is forgiven
                let (_, n) = strops::ordinalp(&s[sp..]);
                sp += n;
            }
            if spec.bizda {
                match s.get(sp) {
                    Some(b'B') => {
                        d.ab = BizDirection::Before;
                        d.bizda = true;
                        sp += 1;
                    }
                    Some(b'b') => {
                        d.bizda = true;
                        sp += 1;
                    }
                    _ => {
                        // it is a business day count either way
                        d.bizda = true;
                    }
                }
            }
        } else {
            match parse_rom(&mut d, &s[sp..], spec) {
                Some(n) => sp += n,
                None => return (DtDate::UNKNOWN, 0),
            }
        }
    }
    (guess_dtyp(d), sp)
}

lazy_static! {
    /// A duration literal: one signed component and its unit letter.
    static ref DUR_RE: Regex = Regex::new(r"^([+-]?[0-9]+)([dDyYmMwWbBqQ])?").unwrap();
}

/// Parses a duration literal: a signed integer followed by a unit
/// letter out of `d y m w b q` (either case; a bare trailing number
/// counts days). The kind of the result follows the unit: business
/// days with months or years make a BIZDA, months or years alone a
/// YMD, days a DAISY, business days alone a BIZSI.
///
/// ```
/// use dateverse::{parse_duration, DtKind};
///
/// let (dur, used) = parse_duration("1m");
/// assert_eq!(dur.kind(), DtKind::Ymd);
/// assert_eq!(used, 2);
///
/// let (dur, _) = parse_duration("-12d");
/// assert_eq!(dur.kind(), DtKind::Daisy);
/// assert!(dur.neg);
/// ```
pub fn parse_duration(text: &str) -> (DtDur, usize) {
    let caps = match DUR_RE.captures(text) {
        Some(c) => c,
        None => return (DtDur::UNKNOWN, 0),
    };
    let num = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    let unit = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    let consumed = num.len() + unit.len();

    let tmp: i64 = match num.parse() {
        Ok(v) => v,
        Err(_) => return (DtDur::UNKNOWN, 0),
    };
    let neg = tmp < 0;
    // keep the component small enough for the unit multiplications
    let mag = tmp.unsigned_abs().min(i32::MAX as u64 / 8) as u32;

    let mut d = FieldBag::default();
    match unit {
        "" => {
            // a bare number is days, but only at the end of the input
            if consumed != text.len() {
                return (DtDur::UNKNOWN, 0);
            }
            d.d = mag;
        }
        "d" | "D" => d.d = mag,
        "y" | "Y" => d.y = mag,
        "m" | "M" => d.m = mag,
        "w" | "W" => d.w = mag,
        "b" | "B" => d.b = mag,
        "q" | "Q" => d.q = mag,
        _ => return (DtDur::UNKNOWN, 0),
    }

    let value = if d.b != 0 && (d.m != 0 || d.y != 0) {
        DtValue::Bizda(crate::value::Bizda {
            y: d.y,
            m: d.q * 3 + d.m,
            bd: d.b + d.w * 5,
            param: BizdaParam::default(),
        })
    } else if d.m != 0 || d.y != 0 || d.q != 0 || (d.d == 0 && d.b == 0) {
        // year/month/quarter durations, and the fallback for bare
        // weeks, all live in YMD terms
        DtValue::Ymd(Ymd { y: d.y, m: d.q * 3 + d.m, d: d.d + d.w * 7 })
    } else if d.d != 0 {
        DtValue::Daisy(d.w * 7 + d.d)
    } else {
        DtValue::Bizsi(d.w * 5 + d.b)
    };
    (DtDur { value, neg }, consumed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DtKind;

    #[test]
    fn test_parse_std_ymd() {
        let (d, used) = parse_date("2011-03-17", None);
        assert_eq!(d, DtDate::ymd(2011, 3, 17));
        assert_eq!(used, 10);
        // trailing text is left alone
        let (d, used) = parse_date("2011-03-17T12:00", None);
        assert_eq!(d, DtDate::ymd(2011, 3, 17));
        assert_eq!(used, 10);
    }

    #[test]
    fn test_parse_std_rejects() {
        for bad in ["2011", "2011-", "2011-xx-01", "hello", "1916-01-01"] {
            let (d, used) = parse_date(bad, None);
            assert!(d.is_unknown(), "{:?}", bad);
            assert_eq!(used, 0);
        }
    }

    #[test]
    fn test_parse_std_ymcw() {
        let (d, _) = parse_date("2011-03-3-4", None);
        assert_eq!(d, DtDate::ymcw(2011, 3, 3, 4));
        // a second component over 5 cannot be a count
        let (d, used) = parse_date("2011-03-17-4", None);
        assert_eq!(d, DtDate::ymd(2011, 3, 17));
        assert_eq!(used, 10);
    }

    #[test]
    fn test_parse_std_bizda() {
        let (d, used) = parse_date("2011-03-03b", None);
        assert_eq!(d.kind(), DtKind::Bizda);
        assert_eq!(d.bday(), 3);
        assert_eq!(used, 11);
        let (d, _) = parse_date("2011-03-03B", None);
        assert_eq!(
            d.bday_q(BizdaParam { ab: BizDirection::Before, ..Default::default() }),
            3
        );
    }

    #[test]
    fn test_parse_with_format() {
        let (d, _) = parse_date("2011-03-3-Thu", Some("%Y-%m-%c-%a"));
        assert_eq!(d, DtDate::ymcw(2011, 3, 3, 4));
        let (d, _) = parse_date("March 17, 2011", Some("%B %d, %Y"));
        assert_eq!(d, DtDate::ymd(2011, 3, 17));
        let (d, _) = parse_date("17th of March 2011", Some("%dth of %B %Y"));
        assert_eq!(d, DtDate::ymd(2011, 3, 17));
    }

    #[test]
    fn test_parse_high_level_alias() {
        let (d, _) = parse_date("2011-03-17", Some("ymd"));
        assert_eq!(d, DtDate::ymd(2011, 3, 17));
        let (d, _) = parse_date("2011-03-3-04", Some("ymcw"));
        assert_eq!(d, DtDate::ymcw(2011, 3, 3, 4));
    }

    #[test]
    fn test_parse_single_letter_names() {
        // R is Thursday in the one-letter alphabet
        let (d, _) = parse_date("2011-03-3-R", Some("%Y-%m-%c-%_a"));
        assert_eq!(d, DtDate::ymcw(2011, 3, 3, 4));
    }

    #[test]
    fn test_parse_two_digit_year_pivot() {
        let (d, _) = parse_date("11-03-17", Some("%y-%m-%d"));
        assert_eq!(d.year(), 2011);
        let (d, _) = parse_date("69-03-17", Some("%y-%m-%d"));
        assert_eq!(d.year(), 1969);
        let (d, _) = parse_date("68-03-17", Some("%y-%m-%d"));
        assert_eq!(d.year(), 2068);
    }

    #[test]
    fn test_parse_roman() {
        let (d, _) = parse_date("MMXI-III-XVII", Some("%OY-%Om-%Od"));
        assert_eq!(d, DtDate::ymd(2011, 3, 17));
    }

    #[test]
    fn test_parse_quarter_seeds_month() {
        let (d, _) = parse_date("2011-Q3", Some("%Y-%Q"));
        assert_eq!(d, DtDate::ymd(2011, 7, 0));
        assert_eq!(d.quarter(), 3);
    }

    #[test]
    fn test_parse_mismatch_resets() {
        let (d, used) = parse_date("2011/03/17", Some("%Y-%m-%d"));
        assert!(d.is_unknown());
        assert_eq!(used, 0);
    }

    #[test]
    fn test_parse_duration_units() {
        let cases: [(&str, DtKind, bool); 6] = [
            ("1m", DtKind::Ymd, false),
            ("2y", DtKind::Ymd, false),
            ("3w", DtKind::Ymd, false),
            ("4d", DtKind::Daisy, false),
            ("5b", DtKind::Bizsi, false),
            ("-6d", DtKind::Daisy, true),
        ];
        for (text, kind, neg) in cases {
            let (dur, used) = parse_duration(text);
            assert_eq!(dur.kind(), kind, "{:?}", text);
            assert_eq!(dur.neg, neg, "{:?}", text);
            assert_eq!(used, text.len(), "{:?}", text);
        }
    }

    #[test]
    fn test_parse_duration_values() {
        let (dur, _) = parse_duration("3w");
        assert_eq!(dur.value, DtValue::Ymd(Ymd { y: 0, m: 0, d: 21 }));
        let (dur, _) = parse_duration("2q");
        assert_eq!(dur.value, DtValue::Ymd(Ymd { y: 0, m: 6, d: 0 }));
        let (dur, _) = parse_duration("365");
        assert_eq!(dur.value, DtValue::Daisy(365));
    }

    #[test]
    fn test_parse_duration_rejects() {
        for bad in ["", "m", "5 days", "5x"] {
            let (dur, used) = parse_duration(bad);
            assert!(dur.is_unknown(), "{:?}", bad);
            assert_eq!(used, 0, "{:?}", bad);
        }
    }
}
