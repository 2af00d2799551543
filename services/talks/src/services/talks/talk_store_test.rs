use crate::services::talks::{Comment, Talk, TalkStore};
use indexmap::IndexMap;
use skillshare_test::test;

fn comment(author: &str, message: &str) -> Comment {
    Comment {
        author: author.into(),
        message: message.into(),
    }
}

#[test]
fn put_and_get() {
    let mut store = TalkStore::new();
    assert_eq!(store.version(), 0);
    assert!(store.get("Intro").is_none());

    assert!(store.put("Intro", "Ann", "Basics"));
    assert_eq!(store.version(), 1);

    let talk = store.get("Intro").unwrap();
    assert_eq!(talk.title, "Intro");
    assert_eq!(talk.presenter, "Ann");
    assert_eq!(talk.summary, "Basics");
    assert!(talk.comments.is_empty());
}

#[test]
fn put_replaces_and_resets_comments() {
    let mut store = TalkStore::new();
    assert!(store.put("Intro", "Ann", "Basics"));
    assert!(store.add_comment("Intro", comment("Bob", "Nice")));
    assert_eq!(store.get("Intro").unwrap().comments.len(), 1);

    // same fields, but the comments are dropped, thus it is a change
    assert!(store.put("Intro", "Ann", "Basics"));
    assert_eq!(store.version(), 3);
    assert!(store.get("Intro").unwrap().comments.is_empty());

    assert!(store.put("Intro", "Cecil", "Advanced"));
    assert_eq!(store.version(), 4);
    assert_eq!(store.get("Intro").unwrap().presenter, "Cecil");
}

#[test]
fn duplicate_put_is_noop() {
    let mut store = TalkStore::new();
    assert!(store.put("Intro", "Ann", "Basics"));
    assert!(!store.put("Intro", "Ann", "Basics"));
    assert_eq!(store.version(), 1);
}

#[test]
fn delete_is_idempotent() {
    let mut store = TalkStore::new();
    store.put("Intro", "Ann", "Basics");

    assert!(store.delete("Intro"));
    assert_eq!(store.version(), 2);
    assert!(!store.delete("Intro"));
    assert_eq!(store.version(), 2);
    assert!(store.is_empty());
}

#[test]
fn comment_on_missing_talk() {
    let mut store = TalkStore::new();
    assert!(!store.add_comment("Ghost", comment("Bob", "Boo")));
    assert_eq!(store.version(), 0);
}

#[test]
fn version_counts_effective_mutations() {
    let mut store = TalkStore::new();
    let mut expected = 0;

    for (i, title) in ["A", "B", "C", "A", "B"].iter().enumerate() {
        if store.put(title, "P", &format!("S{}", i % 3)) {
            expected += 1;
        }
        if store.add_comment(title, comment("X", "Y")) {
            expected += 1;
        }
        if store.delete("Missing") {
            expected += 1;
        }
        assert_eq!(store.version(), expected);
    }
    assert_eq!(expected, 10);
}

#[test]
fn list_keeps_insertion_order() {
    let mut store = TalkStore::new();
    store.put("A", "P", "S");
    store.put("B", "P", "S");
    store.put("C", "P", "S");
    store.put("A", "Q", "S");
    store.delete("B");

    let titles: Vec<_> = store.list().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, ["A", "C"]);

    let snapshot = store.snapshot();
    assert_eq!(snapshot.version, 5);
    assert_eq!(snapshot.etag(), "\"5\"");
    assert_eq!(snapshot.talks.len(), 2);
}

#[test]
fn from_talks_uses_keys_as_title() {
    let mut talks = IndexMap::new();
    talks.insert(
        "Intro".to_string(),
        Talk {
            title: "Other".into(),
            presenter: "Ann".into(),
            summary: "Basics".into(),
            comments: vec![comment("Bob", "Nice")],
        },
    );

    let store = TalkStore::from_talks(talks);
    assert_eq!(store.version(), 0);
    assert_eq!(store.len(), 1);
    let talk = store.get("Intro").unwrap();
    assert_eq!(talk.title, "Intro");
    assert_eq!(talk.comments.len(), 1);
}
