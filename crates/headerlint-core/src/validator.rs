//! Expected content of the required tags and the comparison against it.

use crate::date_range::{parse_date_range, DateRange};
use crate::domain::tag::DocTag;
use crate::identity::RepositoryIdentity;

/// Canonical content for `tag`. `@link` shares the `@see` template.
pub fn expected_content(tag: DocTag, repo: &RepositoryIdentity) -> String {
    let url = repo.github_url();
    match tag {
        DocTag::See | DocTag::Link => format!("{url} for the canonical source repository"),
        DocTag::Copyright => format!("{url}/blob/master/COPYRIGHT.md Copyright"),
        DocTag::License => format!("{url}/blob/master/LICENSE.md New BSD License"),
    }
}

/// Outcome of comparing one tag's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentCheck {
    pub expected: String,
    pub matches: bool,
    /// Years found in the original `@copyright` content, if any.
    pub date_range: Option<DateRange>,
}

/// Compare `content` with the canonical text for `tag`. The match is exact,
/// anchored at both ends.
pub fn validate_content(tag: DocTag, content: &str, repo: &RepositoryIdentity) -> ContentCheck {
    let expected = expected_content(tag, repo);
    let date_range = match tag {
        DocTag::Copyright => parse_date_range(content),
        _ => None,
    };
    ContentCheck {
        matches: content == expected,
        expected,
        date_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RepositoryIdentity {
        RepositoryIdentity::parse("foo/bar").expect("valid")
    }

    #[test]
    fn test_expected_templates() {
        assert_eq!(
            expected_content(DocTag::See, &repo()),
            "https://github.com/foo/bar for the canonical source repository"
        );
        assert_eq!(
            expected_content(DocTag::Link, &repo()),
            expected_content(DocTag::See, &repo())
        );
        assert_eq!(
            expected_content(DocTag::Copyright, &repo()),
            "https://github.com/foo/bar/blob/master/COPYRIGHT.md Copyright"
        );
        assert_eq!(
            expected_content(DocTag::License, &repo()),
            "https://github.com/foo/bar/blob/master/LICENSE.md New BSD License"
        );
    }

    #[test]
    fn test_exact_match() {
        let check = validate_content(
            DocTag::License,
            "https://github.com/foo/bar/blob/master/LICENSE.md New BSD License",
            &repo(),
        );
        assert!(check.matches);
        assert_eq!(check.date_range, None);
    }

    #[test]
    fn test_match_is_anchored() {
        let check = validate_content(
            DocTag::See,
            "https://github.com/foo/bar for the canonical source repository!",
            &repo(),
        );
        assert!(!check.matches);
        let check = validate_content(
            DocTag::See,
            "see https://github.com/foo/bar for the canonical source repository",
            &repo(),
        );
        assert!(!check.matches);
    }

    #[test]
    fn test_copyright_parses_years_from_original() {
        let check = validate_content(
            DocTag::Copyright,
            "Copyright (c) 2015-2018 Foo Inc. (http://www.foo.com)",
            &repo(),
        );
        assert!(!check.matches);
        assert_eq!(
            check.date_range,
            Some(DateRange {
                first: 2015,
                last: Some(2018)
            })
        );
    }

    #[test]
    fn test_years_only_parsed_for_copyright() {
        let check = validate_content(DocTag::License, "2015-2018 BSD", &repo());
        assert_eq!(check.date_range, None);
    }
}
