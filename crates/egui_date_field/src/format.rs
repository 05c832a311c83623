//! Date patterns using [moment.js](https://momentjs.com/docs/#/displaying/format/) tokens
//! in the English locale.
//!
//! The field's default patterns (`"LL"` for the label, `"YYYY/MM/DD"` for the payload)
//! are moment patterns, so the same token set is understood here:
//!
//! | Token | Output for 2024-01-10 |
//! |---|---|
//! | `YYYY` / `YY` / `Y` | `2024` / `24` / `2024` |
//! | `Q` / `Qo` | `1` / `1st` |
//! | `MMMM` / `MMM` / `MM` / `M` / `Mo` | `January` / `Jan` / `01` / `1` / `1st` |
//! | `DD` / `D` / `Do` | `10` / `10` / `10th` |
//! | `DDDD` / `DDD` / `DDDo` | `010` / `10` / `10th` |
//! | `dddd` / `ddd` / `dd` / `d` / `do` / `E` | `Wednesday` / `Wed` / `We` / `3` / `3rd` / `3` |
//! | `WW` / `W` / `Wo` | `02` / `2` / `2nd` |
//! | `GGGG` / `GG` | `2024` / `24` |
//! | `L` / `LL` / `l` / `ll` | `01/10/2024` / `January 10, 2024` / `1/10/2024` / `Jan 10, 2024` |
//! | `LLL` / `LLLL` / `lll` / `llll` | `January 10, 2024` / `Wednesday, January 10, 2024` / `Jan 10, 2024` / `Wed, Jan 10, 2024` |
//!
//! The long localized forms drop their time part; `LT` and `LTS` are kept as written.
//!
//! Text inside `[...]` and a character after `\` are copied verbatim,
//! as is every character that is not part of a token.

use std::fmt::{self, Write as _};

use chrono::{Datelike as _, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Sunday first, like moment's `d` token.
const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token {
    Year4,
    Year2,
    Year,
    Quarter,
    QuarterOrdinal,
    MonthName,
    MonthShort,
    Month2,
    Month,
    MonthOrdinal,
    DayOfYear3,
    DayOfYear,
    DayOfYearOrdinal,
    Day2,
    Day,
    DayOrdinal,
    WeekdayName,
    WeekdayShort,
    WeekdayMin,
    Weekday,
    WeekdayOrdinal,
    IsoWeekday,
    IsoWeek2,
    IsoWeek,
    IsoWeekOrdinal,
    IsoYear4,
    IsoYear2,
}

/// Longest tokens first, so that `MMMM` wins over `MM`.
const TOKENS: &[(&str, Token)] = &[
    ("YYYY", Token::Year4),
    ("GGGG", Token::IsoYear4),
    ("MMMM", Token::MonthName),
    ("DDDD", Token::DayOfYear3),
    ("DDDo", Token::DayOfYearOrdinal),
    ("dddd", Token::WeekdayName),
    ("MMM", Token::MonthShort),
    ("DDD", Token::DayOfYear),
    ("ddd", Token::WeekdayShort),
    ("YY", Token::Year2),
    ("GG", Token::IsoYear2),
    ("Qo", Token::QuarterOrdinal),
    ("MM", Token::Month2),
    ("Mo", Token::MonthOrdinal),
    ("DD", Token::Day2),
    ("Do", Token::DayOrdinal),
    ("dd", Token::WeekdayMin),
    ("do", Token::WeekdayOrdinal),
    ("WW", Token::IsoWeek2),
    ("Wo", Token::IsoWeekOrdinal),
    ("Y", Token::Year),
    ("Q", Token::Quarter),
    ("M", Token::Month),
    ("D", Token::Day),
    ("d", Token::Weekday),
    ("E", Token::IsoWeekday),
    ("W", Token::IsoWeek),
];

/// Localized shorthands, expanded before tokenizing. Longest first.
///
/// The long forms keep only their date part.
const LOCALIZED: &[(&str, &str)] = &[
    ("LLLL", "dddd, MMMM D, YYYY"),
    ("llll", "ddd, MMM D, YYYY"),
    ("LLL", "MMMM D, YYYY"),
    ("lll", "MMM D, YYYY"),
    ("LL", "MMMM D, YYYY"),
    ("ll", "MMM D, YYYY"),
    ("L", "MM/DD/YYYY"),
    ("l", "M/D/YYYY"),
];

/// Localized time shorthands. There is no time to show, so they stay as written.
const LOCALIZED_TIME: &[&str] = &["LTS", "LT"];

#[derive(Clone, Debug, PartialEq, Eq)]
enum Item {
    Literal(String),
    Token(Token),
}

/// A parsed date pattern.
///
/// Parse once with [`DateFormat::parse`], then [`DateFormat::format`] as often as needed.
///
/// ```
/// use egui_date_field::DateFormat;
/// let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// assert_eq!(DateFormat::parse("LL").format(date), "January 10, 2024");
/// assert_eq!(DateFormat::parse("YYYY/MM/DD").format(date), "2024/01/10");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    items: Vec<Item>,
}

impl DateFormat {
    /// Parse a moment-style pattern. Never fails: anything that is not a token is kept as text.
    pub fn parse(pattern: &str) -> Self {
        let mut items = Vec::new();
        push_items(pattern, &mut items, true);
        Self {
            pattern: pattern.to_owned(),
            items,
        }
    }

    /// The pattern this was parsed from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, date: NaiveDate) -> String {
        let mut out = String::with_capacity(self.pattern.len() + 8);
        for item in &self.items {
            match item {
                Item::Literal(text) => out.push_str(text),
                Item::Token(token) => {
                    write_token(&mut out, *token, date).ok();
                }
            }
        }
        out
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl From<&str> for DateFormat {
    fn from(pattern: &str) -> Self {
        Self::parse(pattern)
    }
}

fn push_items(pattern: &str, items: &mut Vec<Item>, expand_localized: bool) {
    let mut rest = pattern;
    while let Some(c) = rest.chars().next() {
        let after = &rest[c.len_utf8()..];

        if c == '[' {
            if let Some(end) = after.find(']') {
                let escaped = &after[..end];
                if !escaped.contains('[') {
                    push_literal(items, escaped);
                    rest = &after[end + 1..];
                    continue;
                }
            }
        }

        if c == '\\' {
            if let Some(escaped) = after.chars().next() {
                push_literal(items, &after[..escaped.len_utf8()]);
                rest = &after[escaped.len_utf8()..];
                continue;
            }
        }

        if expand_localized {
            if let Some(name) = LOCALIZED_TIME.iter().find(|name| rest.starts_with(*name)) {
                push_literal(items, name);
                rest = &rest[name.len()..];
                continue;
            }
            if let Some((name, expansion)) = LOCALIZED.iter().find(|(name, _)| rest.starts_with(name))
            {
                push_items(expansion, items, false);
                rest = &rest[name.len()..];
                continue;
            }
        }

        if let Some((name, token)) = TOKENS.iter().find(|(name, _)| rest.starts_with(name)) {
            items.push(Item::Token(*token));
            rest = &rest[name.len()..];
            continue;
        }

        push_literal(items, &rest[..c.len_utf8()]);
        rest = after;
    }
}

fn push_literal(items: &mut Vec<Item>, text: &str) {
    if let Some(Item::Literal(last)) = items.last_mut() {
        last.push_str(text);
    } else if !text.is_empty() {
        items.push(Item::Literal(text.to_owned()));
    }
}

fn write_token(out: &mut String, token: Token, date: NaiveDate) -> fmt::Result {
    let month_index = date.month0() as usize;
    let weekday = date.weekday().num_days_from_sunday();
    let iso = date.iso_week();
    match token {
        Token::Year4 => write_zero_filled(out, date.year(), 4),
        Token::Year2 => write!(out, "{:02}", date.year().rem_euclid(100)),
        Token::Year => {
            if date.year() <= 9999 {
                write_zero_filled(out, date.year(), 4)
            } else {
                write!(out, "+{}", date.year())
            }
        }
        Token::Quarter => write!(out, "{}", date.month0() / 3 + 1),
        Token::QuarterOrdinal => write_ordinal(out, date.month0() / 3 + 1),
        Token::MonthName => out.write_str(MONTH_NAMES[month_index]),
        Token::MonthShort => out.write_str(&MONTH_NAMES[month_index][..3]),
        Token::Month2 => write!(out, "{:02}", date.month()),
        Token::Month => write!(out, "{}", date.month()),
        Token::MonthOrdinal => write_ordinal(out, date.month()),
        Token::DayOfYear3 => write!(out, "{:03}", date.ordinal()),
        Token::DayOfYear => write!(out, "{}", date.ordinal()),
        Token::DayOfYearOrdinal => write_ordinal(out, date.ordinal()),
        Token::Day2 => write!(out, "{:02}", date.day()),
        Token::Day => write!(out, "{}", date.day()),
        Token::DayOrdinal => write_ordinal(out, date.day()),
        Token::WeekdayName => out.write_str(WEEKDAY_NAMES[weekday as usize]),
        Token::WeekdayShort => out.write_str(&WEEKDAY_NAMES[weekday as usize][..3]),
        Token::WeekdayMin => out.write_str(&WEEKDAY_NAMES[weekday as usize][..2]),
        Token::Weekday => write!(out, "{weekday}"),
        Token::WeekdayOrdinal => write_ordinal(out, weekday),
        Token::IsoWeekday => write!(out, "{}", date.weekday().number_from_monday()),
        Token::IsoWeek2 => write!(out, "{:02}", iso.week()),
        Token::IsoWeek => write!(out, "{}", iso.week()),
        Token::IsoWeekOrdinal => write_ordinal(out, iso.week()),
        Token::IsoYear4 => write_zero_filled(out, iso.year(), 4),
        Token::IsoYear2 => write!(out, "{:02}", iso.year().rem_euclid(100)),
    }
}

fn write_zero_filled(out: &mut String, value: i32, width: usize) -> fmt::Result {
    if value < 0 {
        write!(out, "-{:0width$}", value.unsigned_abs())
    } else {
        write!(out, "{value:0width$}")
    }
}

fn write_ordinal(out: &mut String, n: u32) -> fmt::Result {
    let suffix = if n % 100 / 10 == 1 {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    write!(out, "{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::DateFormat;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn fmt(pattern: &str, d: NaiveDate) -> String {
        DateFormat::parse(pattern).format(d)
    }

    #[test]
    fn default_patterns() {
        let d = date(2024, 1, 10);
        assert_eq!(fmt("LL", d), "January 10, 2024");
        assert_eq!(fmt("YYYY/MM/DD", d), "2024/01/10");
    }

    #[test]
    fn localized_shorthands() {
        let d = date(2023, 9, 5);
        assert_eq!(fmt("L", d), "09/05/2023");
        assert_eq!(fmt("l", d), "9/5/2023");
        assert_eq!(fmt("ll", d), "Sep 5, 2023");
        assert_eq!(fmt("dddd, LL", d), "Tuesday, September 5, 2023");
    }

    #[test]
    fn long_localized_forms_keep_the_date() {
        let d = date(2024, 1, 10);
        assert_eq!(fmt("LLL", d), "January 10, 2024");
        assert_eq!(fmt("LLLL", d), "Wednesday, January 10, 2024");
        assert_eq!(fmt("lll", d), "Jan 10, 2024");
        assert_eq!(fmt("llll", d), "Wed, Jan 10, 2024");
        assert_eq!(fmt("LLLL [/] L", d), "Wednesday, January 10, 2024 / 01/10/2024");
    }

    #[test]
    fn time_shorthands_are_kept_as_written() {
        let d = date(2024, 1, 10);
        assert_eq!(fmt("LT", d), "LT");
        assert_eq!(fmt("LTS", d), "LTS");
        assert_eq!(fmt("L LT", d), "01/10/2024 LT");
    }

    #[test]
    fn ordinals() {
        assert_eq!(fmt("Do", date(2024, 3, 1)), "1st");
        assert_eq!(fmt("Do", date(2024, 3, 2)), "2nd");
        assert_eq!(fmt("Do", date(2024, 3, 3)), "3rd");
        assert_eq!(fmt("Do", date(2024, 3, 11)), "11th");
        assert_eq!(fmt("Do", date(2024, 3, 12)), "12th");
        assert_eq!(fmt("Do", date(2024, 3, 22)), "22nd");
        assert_eq!(fmt("DDDo", date(2024, 4, 22)), "113th");
        assert_eq!(fmt("Mo [quarter] Qo", date(2024, 11, 5)), "11th quarter 4th");
    }

    #[test]
    fn weekdays() {
        let d = date(2024, 1, 14); // a Sunday
        assert_eq!(fmt("dddd ddd dd d E", d), "Sunday Sun Su 0 7");
        assert_eq!(fmt("do", date(2024, 1, 10)), "3rd");
    }

    #[test]
    fn iso_weeks_use_the_iso_year() {
        assert_eq!(fmt("GGGG-[W]WW", date(2021, 1, 1)), "2020-W53");
        assert_eq!(fmt("GG W Wo", date(2024, 1, 10)), "24 2 2nd");
    }

    #[test]
    fn short_and_padded_years() {
        assert_eq!(fmt("YYYY YY Y", date(5, 6, 7)), "0005 05 0005");
        assert_eq!(fmt("Y", date(12345, 1, 1)), "+12345");
        assert_eq!(fmt("DDDD DDD", date(2024, 2, 1)), "032 32");
    }

    #[test]
    fn escaping() {
        let d = date(2024, 1, 10);
        assert_eq!(fmt("[Today is] dddd", d), "Today is Wednesday");
        assert_eq!(fmt("[LL]", d), "LL");
        assert_eq!(fmt("\\D D", d), "D 10");
        assert_eq!(fmt("D [of] MMMM", d), "10 of January");
    }

    #[test]
    fn unknown_characters_are_kept() {
        let d = date(2024, 1, 10);
        assert_eq!(fmt("YYYY.MM.DD!", d), "2024.01.10!");
        assert_eq!(fmt("->", d), "->");
        assert_eq!(fmt("[open", d), "[open");
        assert_eq!(fmt("", d), "");
    }

    #[test]
    fn pattern_is_kept() {
        let format = DateFormat::parse("YYYY/MM/DD");
        assert_eq!(format.pattern(), "YYYY/MM/DD");
        assert_eq!(format.to_string(), "YYYY/MM/DD");
    }
}
