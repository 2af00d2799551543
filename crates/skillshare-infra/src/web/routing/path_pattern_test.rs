use crate::web::routing::{PathPattern, PatternError};
use skillshare_test::test;

#[test]
fn parse_rejects_invalid_patterns() {
    assert_eq!(
        PathPattern::parse("talks"),
        Err(PatternError::MissingRoot("talks".into()))
    );
    assert!(matches!(
        PathPattern::parse("/talks/{}"),
        Err(PatternError::InvalidCapture { .. })
    ));
    assert!(matches!(
        PathPattern::parse("/talks/{title"),
        Err(PatternError::InvalidCapture { .. })
    ));
    assert!(matches!(
        PathPattern::parse("/talks/x{title}"),
        Err(PatternError::InvalidCapture { .. })
    ));
    assert!(matches!(
        PathPattern::parse("/talks/{title}/{title}"),
        Err(PatternError::DuplicateCapture { .. })
    ));
}

#[test]
fn match_literal_path() {
    let pattern = PathPattern::parse("/talks").unwrap();
    let params = pattern.match_path("/talks").unwrap();
    assert!(params.is_empty());

    assert!(pattern.match_path("/talks/").is_none());
    assert!(pattern.match_path("/talk").is_none());
    assert!(pattern.match_path("/talks/Intro").is_none());
    assert!(pattern.match_path("talks").is_none());
}

#[test]
fn match_captures_single_segment() {
    let pattern = PathPattern::parse("/talks/{title}").unwrap();

    let params = pattern.match_path("/talks/Intro").unwrap();
    assert_eq!(params.get("title"), Some("Intro"));
    assert_eq!(params.len(), 1);

    assert!(pattern.match_path("/talks/").is_none());
    assert!(pattern.match_path("/talks").is_none());
    assert!(pattern.match_path("/talks/Intro/comments").is_none());
}

#[test]
fn match_decodes_captures() {
    let pattern = PathPattern::parse("/talks/{title}/comments").unwrap();

    let params = pattern.match_path("/talks/Unituning%20%C3%A9s%20te/comments").unwrap();
    assert_eq!(params.get("title"), Some("Unituning és te"));
    assert_eq!(params.get("missing"), None);

    let params = pattern.match_path("/talks/a%2Fb/comments").unwrap();
    assert_eq!(params.get("title"), Some("a/b"));

    // invalid utf-8 does not match
    assert!(pattern.match_path("/talks/%FF/comments").is_none());
}
