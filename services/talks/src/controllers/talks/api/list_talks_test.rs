use super::{parse_entity_tag, parse_wait};
use skillshare_test::test;
use std::time::Duration;

#[test]
fn entity_tag() {
    assert_eq!(parse_entity_tag(r#""12""#), Some("12"));
    assert_eq!(parse_entity_tag(r#"W/"12""#), Some("12"));
    assert_eq!(parse_entity_tag(r#""""#), Some(""));
    assert_eq!(parse_entity_tag(r#""1", "2""#), Some(r#"1", "2"#));
    assert_eq!(parse_entity_tag("12"), None);
    assert_eq!(parse_entity_tag(r#""12"#), None);
}

#[test]
fn wait_preference() {
    assert_eq!(parse_wait("wait=90"), Some(Duration::from_secs(90)));
    assert_eq!(parse_wait("respond-async, wait=5"), Some(Duration::from_secs(5)));
    assert_eq!(parse_wait("wait=0"), Some(Duration::ZERO));
    assert_eq!(parse_wait("wait=12s"), Some(Duration::from_secs(12)));
    assert_eq!(parse_wait("await=5, wait=7"), Some(Duration::from_secs(7)));
    assert_eq!(parse_wait("wait=, wait=3"), Some(Duration::from_secs(3)));
    assert_eq!(parse_wait("wait=99999999999999999999999"), Some(Duration::from_secs(u64::MAX)));
    assert_eq!(parse_wait("await=5"), None);
    assert_eq!(parse_wait("wait"), None);
    assert_eq!(parse_wait(""), None);
}
