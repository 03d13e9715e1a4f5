//! Year range parsed out of existing `@copyright` content.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// `(first, last)` years. `last` is absent when the content names one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub first: i32,
    pub last: Option<i32>,
}

impl DateRange {
    /// Render as `first-last`, collapsing to one year when both are equal.
    /// A missing `last` is filled with `fallback_last`.
    pub fn render(&self, fallback_last: i32) -> String {
        let last = self.last.unwrap_or(fallback_last);
        if last == self.first {
            self.first.to_string()
        } else {
            format!("{}-{}", self.first, last)
        }
    }

    /// Earliest first year and latest last year of both. An open `last`
    /// runs to the current year, so it wins over any closed one.
    pub fn widen(self, other: DateRange) -> DateRange {
        let last = match (self.last, other.last) {
            (Some(a), Some(b)) => Some(a.max(b)),
            _ => None,
        };
        DateRange {
            first: self.first.min(other.first),
            last,
        }
    }
}

fn year_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\b(\d{4})(?:\s*-\s*(\d{4}))?\b").ok())
        .as_ref()
}

/// First `YYYY` or `YYYY-YYYY` in `content`; `None` when there is none.
pub fn parse_date_range(content: &str) -> Option<DateRange> {
    let caps = year_pattern()?.captures(content)?;
    let first = caps.get(1)?.as_str().parse().ok()?;
    let last = caps.get(2).and_then(|m| m.as_str().parse().ok());
    Some(DateRange { first, last })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(
            parse_date_range("Copyright (c) 2015-2018 Zend Technologies"),
            Some(DateRange {
                first: 2015,
                last: Some(2018)
            })
        );
    }

    #[test]
    fn test_parse_range_with_spaces() {
        assert_eq!(
            parse_date_range("(c) 2005 - 2016"),
            Some(DateRange {
                first: 2005,
                last: Some(2016)
            })
        );
    }

    #[test]
    fn test_parse_single_year() {
        assert_eq!(
            parse_date_range("Copyright (c) 2017 Foo"),
            Some(DateRange {
                first: 2017,
                last: None
            })
        );
    }

    #[test]
    fn test_parse_absent() {
        assert_eq!(parse_date_range("https://github.com/foo/bar Copyright"), None);
        assert_eq!(parse_date_range("build 123456"), None);
        assert_eq!(parse_date_range(""), None);
    }

    #[test]
    fn test_render() {
        let range = DateRange {
            first: 2015,
            last: Some(2018),
        };
        assert_eq!(range.render(2026), "2015-2018");
        let open = DateRange {
            first: 2015,
            last: None,
        };
        assert_eq!(open.render(2026), "2015-2026");
        let same = DateRange {
            first: 2026,
            last: None,
        };
        assert_eq!(same.render(2026), "2026");
    }

    #[test]
    fn test_widen() {
        let a = DateRange {
            first: 2010,
            last: Some(2012),
        };
        let b = DateRange {
            first: 2016,
            last: Some(2019),
        };
        let expected = DateRange {
            first: 2010,
            last: Some(2019),
        };
        assert_eq!(a.widen(b), expected);
        assert_eq!(b.widen(a), expected);

        let open = DateRange {
            first: 2014,
            last: None,
        };
        assert_eq!(
            a.widen(open),
            DateRange {
                first: 2010,
                last: None
            }
        );
    }
}
