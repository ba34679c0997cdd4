//! Date format patterns
//!
//! A pattern such as `yyyy-MM-dd HH:mm:ss` is compiled once into a token list
//! and then used both to format timestamps and to strictly parse user text.
//! Parsing is strict: every field must match its token, every value must be
//! a real calendar value, and the result must format back to exactly the text
//! that was parsed. Formatting and parsing with the same [`DateFormat`]
//! therefore round-trip at the precision of the pattern.
//!
//! Supported tokens:
//!
//! | Token  | Meaning                    | Example  |
//! |--------|----------------------------|----------|
//! | `yyyy` | year, at least 4 digits    | `2024`   |
//! | `yy`   | two-digit year (1970-2069) | `24`     |
//! | `M`    | month                      | `3`      |
//! | `MM`   | month, 2 digits            | `03`     |
//! | `MMM`  | short month name           | `Mar`    |
//! | `MMMM` | long month name            | `March`  |
//! | `d`/`dd` | day of month             | `7`/`07` |
//! | `H`/`HH` | hour 0-23                | `9`/`09` |
//! | `h`/`hh` | hour 1-12                | `9`/`09` |
//! | `m`/`mm` | minute                   | `5`/`05` |
//! | `s`/`ss` | second                   | `5`/`05` |
//! | `a`    | AM/PM marker               | `PM`     |
//!
//! Text in single quotes is literal (`''` is a quote). Any other non-letter
//! character is literal too.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_while, take_while1, take_while_m_n},
    character::complete::{char, satisfy},
    combinator::{all_consuming, map, map_opt, opt, value},
    error::{ErrorKind, ParseError as NomParseError},
    multi::many0,
    sequence::{delimited, pair},
    Finish, IResult,
};

use crate::calendar::DateTimeParts;
use crate::error::FormatError;
use crate::locale::DateLocale;

/// One compiled element of a pattern
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Year,
    YearTwoDigit,
    Month,
    MonthPadded,
    MonthShort,
    MonthLong,
    Day,
    DayPadded,
    Hour,
    HourPadded,
    Hour12,
    Hour12Padded,
    Minute,
    MinutePadded,
    Second,
    SecondPadded,
    Meridiem,
    Literal(String),
}

impl Token {
    fn has_date(&self) -> bool {
        matches!(
            self,
            Token::Year
                | Token::YearTwoDigit
                | Token::Month
                | Token::MonthPadded
                | Token::MonthShort
                | Token::MonthLong
                | Token::Day
                | Token::DayPadded
        )
    }

    fn has_time(&self) -> bool {
        matches!(
            self,
            Token::Hour
                | Token::HourPadded
                | Token::Hour12
                | Token::Hour12Padded
                | Token::Minute
                | Token::MinutePadded
                | Token::Second
                | Token::SecondPadded
        )
    }
}

/// Raw pattern pieces before letter runs are mapped to tokens
#[derive(Clone, Debug, PartialEq, Eq)]
enum Piece {
    Run(char, usize),
    Text(String),
}

/// `''` outside quotes: a literal quote
fn escaped_quote<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Piece, E> {
    value(Piece::Text("'".to_string()), tag("''"))(input)
}

/// `'...'` with `''` standing for a quote inside
fn quoted<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Piece, E> {
    map(
        delimited(tag("'"), many0(alt((value("'", tag("''")), is_not("'")))), tag("'")),
        |parts: Vec<&str>| Piece::Text(parts.concat()),
    )(input)
}

/// A run of the same ASCII letter, e.g. `yyyy`
fn letter_run<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Piece, E> {
    let (rest, letter) = satisfy(|c: char| c.is_ascii_alphabetic())(input)?;
    let (rest, more) = take_while(move |c: char| c == letter)(rest)?;
    Ok((rest, Piece::Run(letter, 1 + more.len())))
}

fn plain_text<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Piece, E> {
    map(
        take_while1(|c: char| c != '\'' && !c.is_ascii_alphabetic()),
        |s: &str| Piece::Text(s.to_string()),
    )(input)
}

fn pattern_pieces<'a, E: NomParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Vec<Piece>, E> {
    all_consuming(many0(alt((escaped_quote, quoted, letter_run, plain_text))))(input)
}

fn token_for_run(letter: char, len: usize) -> Option<Token> {
    let token = match (letter, len) {
        ('y', 4) => Token::Year,
        ('y', 2) => Token::YearTwoDigit,
        ('M', 1) => Token::Month,
        ('M', 2) => Token::MonthPadded,
        ('M', 3) => Token::MonthShort,
        ('M', 4) => Token::MonthLong,
        ('d', 1) => Token::Day,
        ('d', 2) => Token::DayPadded,
        ('H', 1) => Token::Hour,
        ('H', 2) => Token::HourPadded,
        ('h', 1) => Token::Hour12,
        ('h', 2) => Token::Hour12Padded,
        ('m', 1) => Token::Minute,
        ('m', 2) => Token::MinutePadded,
        ('s', 1) => Token::Second,
        ('s', 2) => Token::SecondPadded,
        ('a', 1) => Token::Meridiem,
        _ => return None,
    };
    Some(token)
}

/// A compiled date format pattern
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    tokens: Vec<Token>,
}

impl DateFormat {
    /// Compile a pattern
    pub fn compile(pattern: &str) -> Result<Self, FormatError> {
        if pattern.is_empty() {
            return Err(FormatError::Empty);
        }

        let pieces = match pattern_pieces::<nom::error::Error<&str>>(pattern).finish() {
            Ok((_, pieces)) => pieces,
            Err(e) => {
                return Err(FormatError::UnterminatedQuote {
                    pattern: pattern.to_string(),
                    offset: pattern.len() - e.input.len(),
                })
            }
        };

        let mut tokens: Vec<Token> = Vec::with_capacity(pieces.len());
        for piece in pieces {
            match piece {
                Piece::Run(letter, len) => {
                    let token = token_for_run(letter, len).ok_or_else(|| {
                        FormatError::UnsupportedToken {
                            pattern: pattern.to_string(),
                            token: std::iter::repeat(letter).take(len).collect(),
                        }
                    })?;
                    tokens.push(token);
                }
                Piece::Text(text) if text.is_empty() => {}
                Piece::Text(text) => match tokens.last_mut() {
                    // Merge adjacent literals so parsing compares them in one go
                    Some(Token::Literal(prev)) => prev.push_str(&text),
                    _ => tokens.push(Token::Literal(text)),
                },
            }
        }

        Ok(Self {
            pattern: pattern.to_string(),
            tokens,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Whether the pattern carries any calendar date field
    pub fn has_date(&self) -> bool {
        self.tokens.iter().any(Token::has_date)
    }

    /// Whether the pattern carries any time-of-day field
    pub fn has_time(&self) -> bool {
        self.tokens.iter().any(Token::has_time)
    }

    /// Format a timestamp
    pub fn format(&self, timestamp: i64, locale: &DateLocale) -> String {
        let parts = DateTimeParts::from_timestamp(timestamp);
        let mut out = String::with_capacity(self.pattern.len() + 4);
        for token in &self.tokens {
            match token {
                Token::Year => {
                    if parts.year < 0 {
                        out.push_str(&format!("-{:04}", -parts.year));
                    } else {
                        out.push_str(&format!("{:04}", parts.year));
                    }
                }
                Token::YearTwoDigit => out.push_str(&format!("{:02}", parts.year.rem_euclid(100))),
                Token::Month => out.push_str(&parts.month.to_string()),
                Token::MonthPadded => out.push_str(&format!("{:02}", parts.month)),
                Token::MonthShort => out.push_str(locale.month_short(parts.month)),
                Token::MonthLong => out.push_str(locale.month_long(parts.month)),
                Token::Day => out.push_str(&parts.day.to_string()),
                Token::DayPadded => out.push_str(&format!("{:02}", parts.day)),
                Token::Hour => out.push_str(&parts.hour.to_string()),
                Token::HourPadded => out.push_str(&format!("{:02}", parts.hour)),
                Token::Hour12 => out.push_str(&hour12(parts.hour).to_string()),
                Token::Hour12Padded => out.push_str(&format!("{:02}", hour12(parts.hour))),
                Token::Minute => out.push_str(&parts.minute.to_string()),
                Token::MinutePadded => out.push_str(&format!("{:02}", parts.minute)),
                Token::Second => out.push_str(&parts.second.to_string()),
                Token::SecondPadded => out.push_str(&format!("{:02}", parts.second)),
                Token::Meridiem => {
                    out.push_str(if parts.hour < 12 { &locale.am } else { &locale.pm })
                }
                Token::Literal(text) => out.push_str(text),
            }
        }
        out
    }

    /// Strictly parse `text`
    ///
    /// Fields missing from the pattern are filled from `reference` (see
    /// below); time fields missing from the pattern are zero. Returns `None` unless the
    /// text is an exact rendering of a real date under this pattern.
    pub fn parse_strict(&self, text: &str, reference: i64, locale: &DateLocale) -> Option<i64> {
        let fields = self.scan(text, locale)?;

        // A time-only pattern lands on the reference day. Otherwise missing
        // month and day start at 1 and a missing year is the reference year.
        let base = DateTimeParts::from_timestamp(reference);
        let mut parts = if self.has_date() {
            DateTimeParts::date(base.year, 1, 1)
        } else {
            DateTimeParts::date(base.year, base.month, base.day)
        };
        if let Some(year) = fields.year {
            parts.year = year;
        }
        if let Some(month) = fields.month {
            parts.month = month;
        }
        if let Some(day) = fields.day {
            parts.day = day;
        }
        parts.hour = match (fields.hour, fields.hour12) {
            (Some(hour), _) => hour,
            (None, Some(h)) => {
                if !(1..=12).contains(&h) {
                    return None;
                }
                let pm = fields.pm.unwrap_or(false);
                h % 12 + if pm { 12 } else { 0 }
            }
            (None, None) => 0,
        };
        parts.minute = fields.minute.unwrap_or(0);
        parts.second = fields.second.unwrap_or(0);

        let timestamp = parts.to_timestamp()?;
        // Rejects non-canonical spellings ("2024-1-01" for `yyyy-MM-dd`) and
        // fields that disagree with each other (hour 13 with `PM` marker).
        if self.format(timestamp, locale) != text {
            return None;
        }
        Some(timestamp)
    }

    /// Run each token's parser over the text, collecting raw field values
    fn scan(&self, text: &str, locale: &DateLocale) -> Option<Fields> {
        let mut rest = text;
        let mut fields = Fields::default();
        for token in &self.tokens {
            let (r, field) = token_field::<nom::error::Error<&str>>(token, locale, rest)
                .finish()
                .ok()?;
            fields.set(field);
            rest = r;
        }
        rest.is_empty().then_some(fields)
    }
}

/// One value read from date text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Year(i64),
    Month(u32),
    Day(u32),
    Hour(u32),
    Hour12(u32),
    Minute(u32),
    Second(u32),
    Pm(bool),
    Literal,
}

/// Between `min` and `max` ASCII digits
fn digits<'a, E: NomParseError<&'a str>>(
    min: usize,
    max: usize,
) -> impl FnMut(&'a str) -> IResult<&'a str, u32, E> {
    map_opt(take_while_m_n(min, max, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse().ok()
    })
}

/// Longest month name in `names` at the start of the input, as a 1-based month
fn month_name<'a, E: NomParseError<&'a str>>(
    names: &[String],
    input: &'a str,
) -> IResult<&'a str, u32, E> {
    names
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty() && input.starts_with(name.as_str()))
        .max_by_key(|(_, name)| name.len())
        .map(|(i, name)| (&input[name.len()..], i as u32 + 1))
        .ok_or_else(|| nom::Err::Error(E::from_error_kind(input, ErrorKind::Tag)))
}

/// `yy` reads 00-69 as 2000-2069 and 70-99 as 1970-1999
fn expand_two_digit_year(yy: u32) -> i64 {
    let yy = yy as i64;
    if yy < 70 {
        2000 + yy
    } else {
        1900 + yy
    }
}

fn token_field<'a, E: NomParseError<&'a str>>(
    token: &Token,
    locale: &DateLocale,
    input: &'a str,
) -> IResult<&'a str, Field, E> {
    let min = token_min_width(token);
    match token {
        Token::Year => map(pair(opt(char('-')), digits(4, 6)), |(sign, year)| {
            let year = year as i64;
            Field::Year(if sign.is_some() { -year } else { year })
        })(input),
        Token::YearTwoDigit => {
            map(digits(2, 2), |yy| Field::Year(expand_two_digit_year(yy)))(input)
        }
        Token::Month | Token::MonthPadded => map(digits(min, 2), Field::Month)(input),
        Token::MonthShort => map(
            |i: &'a str| month_name::<E>(&locale.months_short, i),
            Field::Month,
        )(input),
        Token::MonthLong => map(
            |i: &'a str| month_name::<E>(&locale.months_long, i),
            Field::Month,
        )(input),
        Token::Day | Token::DayPadded => map(digits(min, 2), Field::Day)(input),
        Token::Hour | Token::HourPadded => map(digits(min, 2), Field::Hour)(input),
        Token::Hour12 | Token::Hour12Padded => map(digits(min, 2), Field::Hour12)(input),
        Token::Minute | Token::MinutePadded => map(digits(min, 2), Field::Minute)(input),
        Token::Second | Token::SecondPadded => map(digits(min, 2), Field::Second)(input),
        Token::Meridiem => alt((
            value(Field::Pm(false), tag(locale.am.as_str())),
            value(Field::Pm(true), tag(locale.pm.as_str())),
        ))(input),
        Token::Literal(text) => value(Field::Literal, tag(text.as_str()))(input),
    }
}

#[derive(Debug, Default)]
struct Fields {
    year: Option<i64>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    hour12: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    pm: Option<bool>,
}

impl Fields {
    fn set(&mut self, field: Field) {
        match field {
            Field::Year(year) => self.year = Some(year),
            Field::Month(month) => self.month = Some(month),
            Field::Day(day) => self.day = Some(day),
            Field::Hour(hour) => self.hour = Some(hour),
            Field::Hour12(hour) => self.hour12 = Some(hour),
            Field::Minute(minute) => self.minute = Some(minute),
            Field::Second(second) => self.second = Some(second),
            Field::Pm(pm) => self.pm = Some(pm),
            Field::Literal => {}
        }
    }
}

fn hour12(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

fn token_min_width(token: &Token) -> usize {
    match token {
        Token::MonthPadded
        | Token::DayPadded
        | Token::HourPadded
        | Token::Hour12Padded
        | Token::MinutePadded
        | Token::SecondPadded => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DateTimeParts;
    use crate::locale::Locale;

    fn ts(y: i64, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
        DateTimeParts::date(y, mo, d)
            .with_time(h, mi, s)
            .to_timestamp()
            .unwrap()
    }

    fn en() -> DateLocale {
        Locale::en_us().date
    }

    #[test]
    fn test_compile_default_patterns() {
        let f = DateFormat::compile("yyyy-MM-dd HH:mm:ss").unwrap();
        assert_eq!(
            f.tokens(),
            &[
                Token::Year,
                Token::Literal("-".into()),
                Token::MonthPadded,
                Token::Literal("-".into()),
                Token::DayPadded,
                Token::Literal(" ".into()),
                Token::HourPadded,
                Token::Literal(":".into()),
                Token::MinutePadded,
                Token::Literal(":".into()),
                Token::SecondPadded,
            ]
        );
        assert!(f.has_time());
        assert!(!DateFormat::compile("yyyy-MM-dd").unwrap().has_time());
        assert!(!DateFormat::compile("HH:mm").unwrap().has_date());
    }

    #[test]
    fn test_compile_quotes() {
        let f = DateFormat::compile("'Day' d 'of' MMMM, ''yy").unwrap();
        assert_eq!(f.format(ts(2024, 3, 7, 0, 0, 0), &en()), "Day 7 of March, '24");

        let f = DateFormat::compile("'it''s' yyyy").unwrap();
        assert_eq!(f.format(ts(2024, 1, 1, 0, 0, 0), &en()), "it's 2024");
    }

    #[test]
    fn test_compile_errors() {
        assert_eq!(DateFormat::compile(""), Err(FormatError::Empty));
        assert!(matches!(
            DateFormat::compile("yyyy 'open"),
            Err(FormatError::UnterminatedQuote { offset: 5, .. })
        ));
        assert!(matches!(
            DateFormat::compile("yyyy-QQ"),
            Err(FormatError::UnsupportedToken { ref token, .. }) if token == "QQ"
        ));
        assert!(matches!(
            DateFormat::compile("yyy"),
            Err(FormatError::UnsupportedToken { .. })
        ));
    }

    #[test]
    fn test_format_twelve_hour() {
        let f = DateFormat::compile("h:mm a").unwrap();
        assert_eq!(f.format(ts(2024, 1, 1, 0, 5, 0), &en()), "12:05 AM");
        assert_eq!(f.format(ts(2024, 1, 1, 12, 0, 0), &en()), "12:00 PM");
        assert_eq!(f.format(ts(2024, 1, 1, 23, 59, 0), &en()), "11:59 PM");
    }

    #[test]
    fn test_parse_strict_accepts_exact() {
        let f = DateFormat::compile("yyyy-MM-dd").unwrap();
        assert_eq!(
            f.parse_strict("2024-01-01", 0, &en()),
            Some(ts(2024, 1, 1, 0, 0, 0))
        );

        let f = DateFormat::compile("yyyy-MM-dd HH:mm:ss").unwrap();
        assert_eq!(
            f.parse_strict("2024-02-29 13:45:10", 0, &en()),
            Some(ts(2024, 2, 29, 13, 45, 10))
        );
    }

    #[test]
    fn test_parse_strict_rejects() {
        let f = DateFormat::compile("yyyy-MM-dd").unwrap();
        let l = en();
        for bad in [
            "",
            "2024-1-01",
            "2024-01-1",
            "2024-13-01",
            "2023-02-29",
            "2024-01-01 ",
            " 2024-01-01",
            "2024/01/01",
            "24-01-01",
            "2024-01",
            "abcd-ef-gh",
        ] {
            assert_eq!(f.parse_strict(bad, 0, &l), None, "accepted {bad:?}");
        }
    }

    #[test]
    fn test_parse_unpadded_tokens() {
        let f = DateFormat::compile("d/M/yyyy").unwrap();
        let l = en();
        assert_eq!(f.parse_strict("7/3/2024", 0, &l), Some(ts(2024, 3, 7, 0, 0, 0)));
        assert_eq!(f.parse_strict("17/11/2024", 0, &l), Some(ts(2024, 11, 17, 0, 0, 0)));
        // Leading zero is not the canonical spelling of `d`
        assert_eq!(f.parse_strict("07/3/2024", 0, &l), None);
    }

    #[test]
    fn test_parse_month_names_and_meridiem() {
        let f = DateFormat::compile("MMMM d, yyyy h:mm a").unwrap();
        let l = en();
        assert_eq!(
            f.parse_strict("June 1, 2024 3:30 PM", 0, &l),
            Some(ts(2024, 6, 1, 15, 30, 0))
        );
        assert_eq!(
            f.parse_strict("June 1, 2024 12:00 AM", 0, &l),
            Some(ts(2024, 6, 1, 0, 0, 0))
        );
        assert_eq!(f.parse_strict("Jun 1, 2024 3:30 PM", 0, &l), None);
        assert_eq!(f.parse_strict("June 1, 2024 13:30 PM", 0, &l), None);
    }

    #[test]
    fn test_time_only_pattern_uses_reference_day() {
        let f = DateFormat::compile("HH:mm").unwrap();
        let reference = ts(2024, 5, 20, 8, 0, 0);
        assert_eq!(
            f.parse_strict("09:15", reference, &en()),
            Some(ts(2024, 5, 20, 9, 15, 0))
        );
    }

    #[test]
    fn test_partial_date_pattern() {
        let f = DateFormat::compile("MM/yyyy").unwrap();
        let reference = ts(2024, 1, 31, 0, 0, 0);
        assert_eq!(
            f.parse_strict("02/2023", reference, &en()),
            Some(ts(2023, 2, 1, 0, 0, 0))
        );
    }

    #[test]
    fn test_parse_two_digit_year_and_trailing_text() {
        let f = DateFormat::compile("dd.MM.yy").unwrap();
        let l = en();
        assert_eq!(f.parse_strict("05.03.24", 0, &l), Some(ts(2024, 3, 5, 0, 0, 0)));
        assert_eq!(f.parse_strict("05.03.85", 0, &l), Some(ts(1985, 3, 5, 0, 0, 0)));
        assert_eq!(f.parse_strict("05.03.245", 0, &l), None);
        assert_eq!(f.parse_strict("05.03.2", 0, &l), None);

        let f = DateFormat::compile("MMM d").unwrap();
        assert_eq!(f.parse_strict("Mar 5 ", 0, &l), None);
        assert_eq!(f.parse_strict("Mars 5", 0, &l), None);
    }

    #[test]
    fn test_round_trip() {
        let l = en();
        let patterns = [
            "yyyy-MM-dd HH:mm:ss",
            "dd.MM.yyyy H:m:s",
            "MMM d yyyy hh:mm:ss a",
            "'week of' MMMM dd, yyyy HH:mm:ss",
        ];
        for pattern in patterns {
            let f = DateFormat::compile(pattern).unwrap();
            for t in (-2_000_000_000_000i64..4_000_000_000_000).step_by(7_777_777_777) {
                let v = t - t.rem_euclid(1000);
                let text = f.format(v, &l);
                assert_eq!(f.parse_strict(&text, 0, &l), Some(v), "{pattern}: {text}");
            }
        }
    }

    #[test]
    fn test_round_trip_truncates_to_pattern_precision() {
        let f = DateFormat::compile("yyyy-MM-dd").unwrap();
        let l = en();
        let v = ts(2024, 7, 4, 18, 30, 12) + 345;
        let text = f.format(v, &l);
        assert_eq!(text, "2024-07-04");
        assert_eq!(f.parse_strict(&text, 0, &l), Some(ts(2024, 7, 4, 0, 0, 0)));
    }

    #[test]
    fn test_format_is_idempotent() {
        let f = DateFormat::compile("yyyy-MM-dd HH:mm:ss").unwrap();
        let l = en();
        let v = ts(1999, 12, 31, 23, 59, 59);
        assert_eq!(f.format(v, &l), f.format(v, &l));
    }
}
