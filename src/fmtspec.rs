//! The format specifier grammar shared by the parser and the formatter.
//!
//! A directive is a `%`, zero or more modifiers and one conversion
//! letter. The modifier `_` selects the abbreviated width, `O` selects
//! Roman numerals. A numeric conversion literally followed by `th` in
//! the format picks up an ordinal suffix; `%d` and `%j` followed by `b`
//! or `B` switch to business day counting (after resp. before the
//! reference).
//!
//! Conversions: `%F` ISO date, `%Y`/`%y` year, `%m` month number, `%d`
//! day of month, `%w` weekday number, `%c` count of weekday in month,
//! `%A`/`%a` weekday name, `%B`/`%b`/`%h` month name, `%C`/`%j` day of
//! year, `%Q`/`%q` quarter, `%%`/`%t`/`%n` literals.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::value::BizDirection;

/// What a directive refers to. The `N` fields are numeric, the `S`
/// fields parse and print names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecField {
    #[default]
    Unknown,
    /// The whole ISO date `YYYY-MM-DD`.
    NStd,
    NYear,
    NMon,
    NMday,
    NCntWeek,
    NCntMon,
    NCntYear,
    NQtr,
    SWday,
    SMon,
    SQtr,
    LitPercent,
    LitTab,
    LitNl,
}

impl SpecField {
    /// Numeric fields can take an ordinal suffix.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            SpecField::NStd
                | SpecField::NYear
                | SpecField::NMon
                | SpecField::NMday
                | SpecField::NCntWeek
                | SpecField::NCntMon
                | SpecField::NCntYear
                | SpecField::NQtr
        )
    }
}

/// Width selector for names and years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthMod {
    #[default]
    Normal,
    Abbrev,
    Long,
}

/// One tokenised directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spec {
    pub spfl: SpecField,
    pub abbr: WidthMod,
    pub rom: bool,
    pub ord: bool,
    pub bizda: bool,
    pub ab: BizDirection,
}

/// Reads one directive off the head of `fmt`. Returns the directive and
/// the number of bytes it spans; a plain literal byte (or an unknown
/// conversion) comes back as `SpecField::Unknown`.
pub fn tok_spec(fmt: &[u8]) -> (Spec, usize) {
    let mut res = Spec::default();
    if fmt.is_empty() {
        return (res, 0);
    }
    if fmt[0] != b'%' {
        return (res, 1);
    }

    let mut i = 0usize;
    loop {
        i += 1;
        let c = match fmt.get(i) {
            Some(c) => *c,
            None => return (res, fmt.len()),
        };
        match c {
            b'F' => res.spfl = SpecField::NStd,
            b'y' => {
                res.abbr = WidthMod::Abbrev;
                res.spfl = SpecField::NYear;
            }
            b'Y' => res.spfl = SpecField::NYear,
            b'm' => res.spfl = SpecField::NMon,
            b'd' => res.spfl = SpecField::NMday,
            b'w' => res.spfl = SpecField::NCntWeek,
            b'c' => res.spfl = SpecField::NCntMon,
            b'A' => {
                res.abbr = WidthMod::Long;
                res.spfl = SpecField::SWday;
            }
            b'a' => res.spfl = SpecField::SWday,
            b'B' => {
                res.abbr = WidthMod::Long;
                res.spfl = SpecField::SMon;
            }
            b'b' | b'h' => res.spfl = SpecField::SMon,
            b'C' | b'j' => res.spfl = SpecField::NCntYear,
            b'Q' => res.spfl = SpecField::SQtr,
            b'q' => res.spfl = SpecField::NQtr,
            b'%' => res.spfl = SpecField::LitPercent,
            b't' => res.spfl = SpecField::LitTab,
            b'n' => res.spfl = SpecField::LitNl,
            b'_' => {
                res.abbr = WidthMod::Abbrev;
                continue;
            }
            b'O' => {
                res.rom = true;
                continue;
            }
            _ => return (res, i + 1),
        }
        break;
    }

    // a literal `th` in the format after a numeric conversion
    if res.spfl.is_numeric()
        && !res.rom
        && fmt.get(i + 1) == Some(&b't')
        && fmt.get(i + 2) == Some(&b'h')
    {
        res.ord = true;
        i += 2;
    }
    // business day suffix on %d and %j
    if res.spfl == SpecField::NMday || res.spfl == SpecField::NCntYear {
        match fmt.get(i + 1) {
            Some(b'B') => {
                res.ab = BizDirection::Before;
                res.bizda = true;
                i += 1;
            }
            Some(b'b') => {
                res.bizda = true;
                i += 1;
            }
            _ => {}
        }
    }
    (res, i + 1)
}

/// Default format of each representation, keyed by its high-level name.
static DFLT_FMT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("ymd", YMD_DFLT);
    m.insert("ymcw", YMCW_DFLT);
    m.insert("daisy", DAISY_DFLT);
    m.insert("bizsi", BIZSI_DFLT);
    m.insert("bizda", BIZDA_DFLT);
    m
});

pub const YMD_DFLT: &str = "%F";
pub const YMCW_DFLT: &str = "%Y-%m-%c-%w";
pub const DAISY_DFLT: &str = "%d";
pub const BIZSI_DFLT: &str = "%db";
pub const BIZDA_DFLT: &str = "%Y-%m-%db";

/// Translates a high-level format name (`ymd`, `ymcw`, `daisy`,
/// `bizsi`, `bizda`, case-insensitively) into its directive string;
/// anything else passes through untouched.
pub fn trans_dfmt(fmt: &str) -> &str {
    if fmt.starts_with('%') {
        return fmt;
    }
    let lower = fmt.to_ascii_lowercase();
    DFLT_FMT.get(lower.as_str()).copied().unwrap_or(fmt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_conversions() {
        let (s, n) = tok_spec(b"%Y-");
        assert_eq!((s.spfl, n), (SpecField::NYear, 2));
        assert_eq!(s.abbr, WidthMod::Normal);

        let (s, n) = tok_spec(b"%y");
        assert_eq!((s.spfl, s.abbr, n), (SpecField::NYear, WidthMod::Abbrev, 2));

        let (s, n) = tok_spec(b"%F");
        assert_eq!((s.spfl, n), (SpecField::NStd, 2));

        let (s, _) = tok_spec(b"%A");
        assert_eq!((s.spfl, s.abbr), (SpecField::SWday, WidthMod::Long));
        let (s, _) = tok_spec(b"%a");
        assert_eq!((s.spfl, s.abbr), (SpecField::SWday, WidthMod::Normal));
    }

    #[test]
    fn test_modifiers() {
        let (s, n) = tok_spec(b"%_a");
        assert_eq!((s.spfl, s.abbr, n), (SpecField::SWday, WidthMod::Abbrev, 3));

        let (s, n) = tok_spec(b"%OY");
        assert!(s.rom);
        assert_eq!((s.spfl, n), (SpecField::NYear, 3));
    }

    #[test]
    fn test_ordinal_suffix() {
        let (s, n) = tok_spec(b"%dth");
        assert!(s.ord);
        assert_eq!((s.spfl, n), (SpecField::NMday, 4));
        // not on Roman numerals
        let (s, n) = tok_spec(b"%Odth");
        assert!(!s.ord);
        assert_eq!(n, 3);
        // not on name fields
        let (s, _) = tok_spec(b"%ath");
        assert!(!s.ord);
        assert_eq!(s.spfl, SpecField::SWday);
    }

    #[test]
    fn test_bizda_suffix() {
        let (s, n) = tok_spec(b"%db");
        assert!(s.bizda);
        assert_eq!((s.ab, n), (BizDirection::After, 3));
        let (s, n) = tok_spec(b"%dB");
        assert!(s.bizda);
        assert_eq!((s.ab, n), (BizDirection::Before, 3));
        let (s, n) = tok_spec(b"%jb");
        assert!(s.bizda);
        assert_eq!((s.spfl, n), (SpecField::NCntYear, 3));
        // %w takes no bizda suffix
        let (s, n) = tok_spec(b"%wb");
        assert!(!s.bizda);
        assert_eq!(n, 2);
    }

    #[test]
    fn test_literals_and_unknown() {
        let (s, n) = tok_spec(b"%%");
        assert_eq!((s.spfl, n), (SpecField::LitPercent, 2));
        let (s, n) = tok_spec(b"-");
        assert_eq!((s.spfl, n), (SpecField::Unknown, 1));
        let (s, n) = tok_spec(b"%x");
        assert_eq!((s.spfl, n), (SpecField::Unknown, 2));
    }

    #[test]
    fn test_trans_dfmt() {
        assert_eq!(trans_dfmt("ymd"), "%F");
        assert_eq!(trans_dfmt("YMCW"), "%Y-%m-%c-%w");
        assert_eq!(trans_dfmt("bizda"), "%Y-%m-%db");
        assert_eq!(trans_dfmt("%Y-%m"), "%Y-%m");
        assert_eq!(trans_dfmt("nonsense"), "nonsense");
    }
}
