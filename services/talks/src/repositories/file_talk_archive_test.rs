use crate::{
    repositories::{ArchiveError, FileTalkArchive, TalkArchive},
    services::talks::{Comment, Talk},
};
use skillshare_test::test;
use std::fs;
use tempfile::TempDir;

fn talk(title: &str) -> Talk {
    Talk {
        title: title.into(),
        presenter: "Ann".into(),
        summary: "Basics".into(),
        comments: vec![Comment {
            author: "Bob".into(),
            message: "Nice".into(),
        }],
    }
}

#[test]
async fn missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let archive = FileTalkArchive::new(dir.path().join("talks.json"));

    let talks = archive.load().await.unwrap();
    assert!(talks.is_empty());
}

#[test]
async fn corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("talks.json");
    fs::write(&path, "{not json").unwrap();
    let archive = FileTalkArchive::new(&path);

    assert!(matches!(archive.load().await, Err(ArchiveError::Json(_))));
}

#[test]
async fn store_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("talks.json");
    let archive = FileTalkArchive::new(&path);

    archive.store(&[talk("Intro"), talk("Advanced")]).await.unwrap();
    assert!(!dir.path().join("talks.json.tmp").exists());

    let content: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(content["Intro"]["presenter"], "Ann");
    assert_eq!(content["Advanced"]["comments"][0]["author"], "Bob");

    let talks = archive.load().await.unwrap();
    let titles: Vec<_> = talks.keys().cloned().collect();
    assert_eq!(titles, ["Intro", "Advanced"]);
    assert_eq!(talks["Intro"], talk("Intro"));

    archive.store(&[]).await.unwrap();
    assert!(archive.load().await.unwrap().is_empty());
}

#[test]
async fn comments_are_optional() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("talks.json");
    fs::write(&path, r#"{"Intro": {"title": "Intro", "presenter": "Ann", "summary": "Basics"}}"#).unwrap();
    let archive = FileTalkArchive::new(&path);

    let talks = archive.load().await.unwrap();
    assert!(talks["Intro"].comments.is_empty());
}
