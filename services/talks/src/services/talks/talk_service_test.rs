use crate::{
    repositories::{ArchiveWriter, MemoryTalkArchive},
    services::talks::{Comment, TalkError, TalkPoll, TalkService, TalkStatus, TalkStore},
};
use skillshare_test::test;
use std::{sync::Arc, time::Duration};
use tokio::time::{self, Instant};

fn comment(author: &str) -> Comment {
    Comment {
        author: author.into(),
        message: "Hello".into(),
    }
}

fn assert_elapsed(start: Instant, expected: Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(10),
        "elapsed {elapsed:?}, expected {expected:?}"
    );
}

fn create_service(max_wait: Option<Duration>) -> (TalkService, Arc<MemoryTalkArchive>) {
    let archive = Arc::new(MemoryTalkArchive::new());
    let store = TalkStore::new();
    let writer = ArchiveWriter::spawn(archive.clone(), Arc::new(store.snapshot()));
    (TalkService::new(store, writer, max_wait), archive)
}

#[test]
async fn mutations_bump_version() {
    let (service, archive) = create_service(None);
    assert_eq!(service.version(), 0);

    assert!(service.put_talk("Intro", "Ann", "Basics"));
    assert!(!service.put_talk("Intro", "Ann", "Basics"));
    service.add_comment("Intro", comment("Bob")).unwrap();
    assert!(matches!(
        service.add_comment("Ghost", comment("Bob")),
        Err(TalkError::TalkNotFound(title)) if title == "Ghost"
    ));
    assert!(service.delete_talk("Intro"));
    assert!(!service.delete_talk("Intro"));
    assert_eq!(service.version(), 3);
    assert_eq!(service.snapshot().version, 3);

    service.put_talk("Advanced", "Cecil", "More");
    service.flush().await;
    let stored = archive.talks();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored["Advanced"].presenter, "Cecil");
}

#[test]
async fn poll_without_tag_or_wait() {
    let (service, _) = create_service(None);
    service.put_talk("Intro", "Ann", "Basics");

    match service.poll(None, None) {
        TalkPoll::Modified(snapshot) => {
            assert_eq!(snapshot.version, 1);
            assert_eq!(snapshot.talks[0].title, "Intro");
        }
        _ => panic!("expected a modified response"),
    }

    assert!(matches!(service.poll(Some("0"), None), TalkPoll::Modified(_)));
    assert!(matches!(service.poll(Some("01"), None), TalkPoll::Modified(_)));
    assert!(matches!(service.poll(Some("1"), None), TalkPoll::NotModified));
}

#[test(paused)]
async fn poll_times_out() {
    let (service, _) = create_service(None);

    let start = Instant::now();
    let pending = match service.poll(Some("0"), Some(Duration::from_secs(2))) {
        TalkPoll::Pending(pending) => pending,
        _ => panic!("expected a pending response"),
    };
    assert_eq!(service.status().pending_waiters, 1);

    assert!(pending.changed().await.is_none());
    assert_elapsed(start, Duration::from_secs(2));
    assert_eq!(service.status().pending_waiters, 0);
}

#[test(paused)]
async fn poll_wait_is_capped() {
    let (service, _) = create_service(Some(Duration::from_secs(5)));

    let start = Instant::now();
    let pending = match service.poll(Some("0"), Some(Duration::from_secs(3600))) {
        TalkPoll::Pending(pending) => pending,
        _ => panic!("expected a pending response"),
    };
    assert!(pending.changed().await.is_none());
    assert_elapsed(start, Duration::from_secs(5));
}

#[test(paused)]
async fn change_resolves_pending_poll() {
    let (service, _) = create_service(None);

    let pending = match service.poll(Some("0"), Some(Duration::from_secs(10))) {
        TalkPoll::Pending(pending) => pending,
        _ => panic!("expected a pending response"),
    };

    let writer = service.clone();
    tokio::spawn(async move {
        time::sleep(Duration::from_secs(1)).await;
        writer.put_talk("Intro", "Ann", "Basics");
    });

    let start = Instant::now();
    let snapshot = pending.changed().await.unwrap();
    assert_elapsed(start, Duration::from_secs(1));
    assert_eq!(snapshot.version, 1);
    assert_eq!(snapshot.talks.len(), 1);

    // the timer is stopped, nothing left to resolve
    time::sleep(Duration::from_secs(20)).await;
    assert_eq!(service.status().pending_waiters, 0);
}

#[test(paused)]
async fn noop_mutations_do_not_notify() {
    let (service, _) = create_service(None);
    service.put_talk("Intro", "Ann", "Basics");

    let pending = match service.poll(Some("1"), Some(Duration::from_secs(3))) {
        TalkPoll::Pending(pending) => pending,
        _ => panic!("expected a pending response"),
    };

    assert!(!service.delete_talk("Ghost"));
    assert!(!service.put_talk("Intro", "Ann", "Basics"));
    assert!(service.add_comment("Ghost", comment("Bob")).is_err());
    assert_eq!(service.status().pending_waiters, 1);

    assert!(pending.changed().await.is_none());
    assert_eq!(service.version(), 1);
}

#[test(paused)]
async fn dropped_poll_releases_waiter() {
    let (service, _) = create_service(None);

    let pending = service.poll(Some("0"), Some(Duration::from_secs(30)));
    assert!(matches!(pending, TalkPoll::Pending(_)));
    assert_eq!(service.status().pending_waiters, 1);

    drop(pending);
    assert_eq!(service.status().pending_waiters, 0);
}

#[test(paused)]
async fn zero_wait_expires_at_once() {
    let (service, _) = create_service(None);

    let pending = match service.poll(Some("0"), Some(Duration::ZERO)) {
        TalkPoll::Pending(pending) => pending,
        _ => panic!("expected a pending response"),
    };
    assert!(pending.changed().await.is_none());
}

#[test]
async fn concurrent_waiters_see_the_first_change() {
    let (service, _) = create_service(None);
    service.put_talk("Intro", "Ann", "Basics");

    let mut waiters = Vec::new();
    for _ in 0..16 {
        let service = service.clone();
        waiters.push(tokio::spawn(async move {
            match service.poll(Some("1"), Some(Duration::from_secs(30))) {
                TalkPoll::Pending(pending) => pending.changed().await,
                _ => panic!("expected a pending response"),
            }
        }));
    }
    while service.status().pending_waiters < 16 {
        tokio::task::yield_now().await;
    }

    let mut writers = Vec::new();
    for i in 0..16 {
        let service = service.clone();
        writers.push(tokio::spawn(async move {
            service.add_comment("Intro", comment(&format!("user{i}"))).unwrap();
        }));
    }
    for writer in writers {
        writer.await.unwrap();
    }

    for waiter in waiters {
        let snapshot = waiter.await.unwrap().expect("the change is delivered");
        assert_eq!(snapshot.version, 2);
        assert_eq!(snapshot.talks[0].comments.len(), 1);
    }

    assert_eq!(
        service.status(),
        TalkStatus {
            version: 17,
            talk_count: 1,
            pending_waiters: 0
        }
    );
}
