//! Format-directed rendering of dates and durations.
//!
//! The formatters mirror the parser: the same directive grammar, driven
//! through the accessors of the date being printed. Output goes into a
//! caller-provided byte buffer; whatever does not fit is dropped, and
//! the returned length is always the length the full rendition would
//! have had, so callers can detect truncation by comparing it against
//! the buffer size. [`date_to_string`] and [`duration_to_string`] are
//! the allocating conveniences on top.
//!
//! With no format given, each representation renders its default shape:
//! `%F` for YMD and DAISY dates, `%Y-%m-%c-%w` for YMCW, `%Y-%m-%db`
//! for BIZDA; day-count durations print as a bare (possibly signed)
//! decimal.

use std::fmt;

use crate::fmtspec::{
    tok_spec, trans_dfmt, Spec, SpecField, WidthMod, BIZDA_DFLT, BIZSI_DFLT, DAISY_DFLT,
    YMCW_DFLT, YMD_DFLT,
};
use crate::names;
use crate::parse::FieldBag;
use crate::strops;
use crate::value::{BizDirection, Bizda, BizdaParam, DtDate, DtDur, DtKind, DtValue, Ymd};
use crate::convert;

/// Truncating writer that keeps counting past the end of the buffer.
struct OutBuf<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> OutBuf<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        OutBuf { buf, len: 0 }
    }

    fn push(&mut self, b: u8) {
        if self.len < self.buf.len() {
            self.buf[self.len] = b;
        }
        self.len += 1;
    }

    /// Runs a strops writer on the remaining space and accounts for its
    /// would-be length.
    fn put<F: FnOnce(&mut [u8]) -> usize>(&mut self, f: F) {
        let start = self.len.min(self.buf.len());
        let n = f(&mut self.buf[start..]);
        self.len += n;
    }

    fn written(&self) -> usize {
        self.len
    }
}

/// Emits one cardinal directive. Returns the numeric value written, for
/// a following ordinal suffix, or `None` for name and literal output.
fn strfd_card(out: &mut OutBuf, spec: Spec, d: &FieldBag, that: &DtDate) -> Option<u32> {
    match spec.spfl {
        SpecField::NStd => {
            let day = if d.d != 0 { d.d } else { that.mday() };
            out.put(|b| strops::ui32tostr(b, d.y, 4));
            out.push(b'-');
            out.put(|b| strops::ui32tostr(b, d.m, 2));
            out.push(b'-');
            out.put(|b| strops::ui32tostr(b, day, 2));
            Some(day)
        }
        SpecField::NYear => match spec.abbr {
            WidthMod::Normal => {
                out.put(|b| strops::ui32tostr(b, d.y, 4));
                Some(d.y)
            }
            WidthMod::Abbrev => {
                out.put(|b| strops::ui32tostr(b, d.y, 2));
                Some(d.y)
            }
            WidthMod::Long => None,
        },
        SpecField::NMon => {
            out.put(|b| strops::ui32tostr(b, d.m, 2));
            Some(d.m)
        }
        SpecField::NMday => {
            if !spec.bizda {
                let day = if d.d != 0 { d.d } else { that.mday() };
                out.put(|b| strops::ui32tostr(b, day, 2));
                Some(day)
            } else {
                let bp = BizdaParam { ab: spec.ab, ..Default::default() };
                let bd = that.bday_q(bp).max(0) as u32;
                out.put(|b| strops::ui32tostr(b, bd, 2));
                Some(bd)
            }
        }
        SpecField::NCntWeek => {
            let w = if d.w != 0 { d.w } else { that.wday().index() };
            out.put(|b| strops::ui32tostr(b, w, 2));
            Some(w)
        }
        SpecField::NCntMon => {
            let c = if d.c != 0 { d.c } else { that.count() };
            out.put(|b| strops::ui32tostr(b, c, 2));
            Some(c)
        }
        SpecField::SWday => {
            let w = if d.w != 0 { d.w } else { that.wday().index() };
            let w = w as usize;
            match spec.abbr {
                WidthMod::Normal => out.put(|b| strops::arritostr(b, w, &names::ABBR_WDAY)),
                WidthMod::Long => out.put(|b| strops::arritostr(b, w, &names::LONG_WDAY)),
                WidthMod::Abbrev => {
                    if w < names::ABAB_WDAY.len() {
                        out.push(names::ABAB_WDAY[w]);
                    }
                }
            }
            None
        }
        SpecField::SMon => {
            let m = d.m as usize;
            match spec.abbr {
                WidthMod::Normal => out.put(|b| strops::arritostr(b, m, &names::ABBR_MON)),
                WidthMod::Long => out.put(|b| strops::arritostr(b, m, &names::LONG_MON)),
                WidthMod::Abbrev => {
                    if m < names::ABAB_MON.len() {
                        out.push(names::ABAB_MON[m]);
                    }
                }
            }
            None
        }
        SpecField::SQtr => {
            out.push(b'Q');
            out.push(b'0' + that.quarter() as u8);
            None
        }
        SpecField::NQtr => {
            out.push(b'0');
            out.push(b'0' + that.quarter() as u8);
            Some(that.quarter())
        }
        SpecField::LitPercent => {
            out.push(b'%');
            None
        }
        SpecField::LitTab => {
            out.push(b'\t');
            None
        }
        SpecField::LitNl => {
            out.push(b'\n');
            None
        }
        SpecField::NCntYear => match that.value {
            DtValue::Ymd(v) => {
                let yd = if !spec.bizda {
                    v.yday()
                } else {
                    Bizda { y: v.y, m: v.m, bd: v.d, param: BizdaParam::default() }.yday()
                };
                out.put(|b| strops::ui32tostr(b, yd, 3));
                Some(yd)
            }
            DtValue::Bizda(v) => {
                let yd = if !spec.bizda {
                    Ymd { y: v.y, m: v.m, d: v.bd }.yday()
                } else {
                    v.yday()
                };
                out.put(|b| strops::ui32tostr(b, yd, 3));
                Some(yd)
            }
            DtValue::Ymcw(v) => {
                let yd = v.yday();
                out.put(|b| strops::ui32tostr(b, yd, 2));
                Some(yd)
            }
            _ => None,
        },
        SpecField::Unknown => None,
    }
}

/// Emits one Roman numeral directive; defined for YMD dates only.
fn strfd_rom(out: &mut OutBuf, spec: Spec, d: &FieldBag, that: &DtDate) {
    if that.kind() != DtKind::Ymd {
        return;
    }
    match spec.spfl {
        SpecField::NYear => match spec.abbr {
            WidthMod::Normal => out.put(|b| strops::ui32tostrrom(b, d.y)),
            WidthMod::Abbrev => out.put(|b| strops::ui32tostrrom(b, d.y % 100)),
            WidthMod::Long => {}
        },
        SpecField::NMon => out.put(|b| strops::ui32tostrrom(b, d.m)),
        SpecField::NMday => out.put(|b| strops::ui32tostrrom(b, d.d)),
        SpecField::NCntMon => {
            let c = if d.c != 0 { d.c } else { that.count() };
            out.put(|b| strops::ui32tostrrom(b, c));
        }
        _ => {}
    }
}

/// Renders `that` into `buf` under `fmt` (or the representation's
/// default). Returns the length of the full rendition; only as much as
/// fits is written.
///
/// ```
/// use dateverse::{format_date, DtDate};
///
/// let mut buf = [0u8; 32];
/// let n = format_date(&mut buf, None, &DtDate::ymd(2011, 3, 17));
/// assert_eq!(&buf[..n], b"2011-03-17");
/// ```
pub fn format_date(buf: &mut [u8], fmt: Option<&str>, that: &DtDate) -> usize {
    let mut d = FieldBag::default();
    let dflt;
    match that.value {
        DtValue::Ymd(v) => {
            d.y = v.y;
            d.m = v.m;
            d.d = v.d;
            dflt = YMD_DFLT;
        }
        DtValue::Ymcw(v) => {
            d.y = v.y;
            d.m = v.m;
            d.c = v.c;
            d.w = v.w;
            dflt = YMCW_DFLT;
        }
        DtValue::Daisy(dd) => {
            let tmp = convert::daisy_to_ymd(dd);
            d.y = tmp.y;
            d.m = tmp.m;
            d.d = tmp.d;
            dflt = YMD_DFLT;
        }
        DtValue::Bizda(v) => {
            d.y = v.y;
            d.m = v.m;
            d.b = v.bd;
            d.bizda = true;
            d.ab = v.param.ab;
            dflt = BIZDA_DFLT;
        }
        _ => return 0,
    }

    let fmt = trans_dfmt(fmt.unwrap_or(dflt));
    let f = fmt.as_bytes();
    let mut out = OutBuf::new(buf);
    let mut fp = 0usize;

    while fp < f.len() {
        let (spec, n) = tok_spec(&f[fp..]);
        let fp_sav = fp;
        fp += n;

        if spec.spfl == SpecField::Unknown {
            out.push(f[fp_sav]);
        } else if !spec.rom {
            let value = strfd_card(&mut out, spec, &d, that);
            if spec.ord {
                if let Some(v) = value {
                    out.put(|b| strops::ordtostr(b, v));
                }
            } else if spec.bizda {
                out.push(match spec.ab {
                    BizDirection::After => b'b',
                    BizDirection::Before => b'B',
                });
            }
        } else {
            strfd_rom(&mut out, spec, &d, that);
        }
    }
    out.written()
}

/// Emits one directive of a duration: numeric components render as raw
/// decimal, names and day-of-year counts have no duration meaning.
fn strfd_dur(out: &mut OutBuf, spec: Spec, d: &FieldBag) {
    match spec.spfl {
        SpecField::NStd | SpecField::NMday => {
            let v = if spec.bizda && d.b != 0 { d.b } else { d.d };
            out.put(|b| strops::ui32tostr(b, v, 0));
        }
        SpecField::NYear => out.put(|b| strops::ui32tostr(b, d.y, 0)),
        SpecField::NMon => out.put(|b| strops::ui32tostr(b, d.m, 0)),
        SpecField::NCntWeek => out.put(|b| strops::ui32tostr(b, d.w, 0)),
        SpecField::NCntMon => out.put(|b| strops::ui32tostr(b, d.c, 0)),
        SpecField::LitPercent => out.push(b'%'),
        SpecField::LitTab => out.push(b'\t'),
        SpecField::LitNl => out.push(b'\n'),
        _ => {}
    }
}

/// Renders a duration into `buf`, `-`-prefixed when negative. Same
/// truncation contract as [`format_date`].
pub fn format_duration(buf: &mut [u8], fmt: Option<&str>, dur: &DtDur) -> usize {
    let mut d = FieldBag::default();
    let dflt;
    match dur.value {
        DtValue::Ymd(v) => {
            d.y = v.y;
            d.m = v.m;
            d.d = v.d;
            dflt = YMD_DFLT;
        }
        DtValue::Ymcw(v) => {
            d.y = v.y;
            d.m = v.m;
            d.c = v.c;
            d.w = v.w;
            dflt = YMCW_DFLT;
        }
        DtValue::Daisy(n) => {
            d.d = n;
            dflt = DAISY_DFLT;
        }
        DtValue::Bizsi(n) => {
            d.d = n;
            dflt = BIZSI_DFLT;
        }
        DtValue::Bizda(v) => {
            d.y = v.y;
            d.m = v.m;
            d.b = v.bd;
            d.bizda = true;
            d.ab = v.param.ab;
            dflt = BIZDA_DFLT;
        }
        _ => return 0,
    }

    let fmt = trans_dfmt(fmt.unwrap_or(dflt));
    let f = fmt.as_bytes();
    let mut out = OutBuf::new(buf);
    let mut fp = 0usize;

    if dur.neg {
        out.push(b'-');
    }
    while fp < f.len() {
        let (spec, n) = tok_spec(&f[fp..]);
        let fp_sav = fp;
        fp += n;

        if spec.spfl == SpecField::Unknown {
            out.push(f[fp_sav]);
        } else if !spec.rom {
            strfd_dur(&mut out, spec, &d);
            if spec.bizda {
                out.push(match d.ab {
                    BizDirection::After => b'b',
                    BizDirection::Before => b'B',
                });
            }
        }
    }
    out.written()
}

/// Allocating wrapper around [`format_date`].
pub fn date_to_string(fmt: Option<&str>, that: &DtDate) -> String {
    let n = format_date(&mut [], fmt, that);
    let mut buf = vec![0u8; n];
    format_date(&mut buf, fmt, that);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Allocating wrapper around [`format_duration`].
pub fn duration_to_string(fmt: Option<&str>, dur: &DtDur) -> String {
    let n = format_duration(&mut [], fmt, dur);
    let mut buf = vec![0u8; n];
    format_duration(&mut buf, fmt, dur);
    String::from_utf8_lossy(&buf).into_owned()
}

impl fmt::Display for DtDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&date_to_string(None, self))
    }
}

impl fmt::Display for DtDur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&duration_to_string(None, self))
    }
}
