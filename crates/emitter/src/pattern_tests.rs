use super::*;
use proptest::prelude::*;
use yare::parameterized;

#[parameterized(
    exact = { "user.created", "user.created", true },
    exact_mismatch = { "user.created", "user.deleted", false },
    exact_prefix_is_not_enough = { "user.created", "user", false },
    universal = { "**", "anything", true },
    universal_dotted = { "**", "a.b.c", true },
    universal_empty_name = { "**", "", true },
    trailing_wildcard = { "user.*", "user.created", true },
    trailing_wildcard_empty_tail = { "user.*", "user.", true },
    trailing_wildcard_wrong_prefix = { "user.*", "admin.created", false },
    wildcard_spans_separators = { "user.*", "user.a.b.c", true },
    single_star_any = { "*", "anything", true },
    single_star_empty = { "*", "", true },
    infix_wildcard = { "a*z", "a.middle.z", true },
    infix_wildcard_mismatch = { "a*z", "a.middle.x", false },
    two_wildcards = { "*.*", "a.b", true },
    two_wildcards_need_the_literal = { "*.*", "ab", false },
    empty_pattern_empty_name = { "", "", true },
    empty_pattern_nonempty_name = { "", "x", false },
)]
fn pattern_matching(pattern: &str, event: &str, expected: bool) {
    assert_eq!(EventPattern::new(pattern).matches(event), expected);
}

#[test]
fn as_str_returns_the_raw_pattern() {
    assert_eq!(EventPattern::new("user.*").as_str(), "user.*");
}

proptest! {
    #[test]
    fn literal_pattern_matches_exactly_itself(name in "[a-z.:]{0,12}", other in "[a-z.:]{0,12}") {
        let pattern = EventPattern::new(name.as_str());
        prop_assert!(pattern.matches(&name));
        prop_assert_eq!(pattern.matches(&other), name == other);
    }

    #[test]
    fn universal_matches_anything(name in ".*") {
        prop_assert!(EventPattern::new("**").matches(&name));
    }

    #[test]
    fn prefix_wildcard_matches_any_suffix(prefix in "[a-z.]{0,8}", suffix in "[a-z.]{0,8}") {
        let pattern = EventPattern::new(format!("{prefix}*"));
        let name = format!("{prefix}{suffix}");
        prop_assert!(pattern.matches(&name));
    }
}
