use super::{Comment, Talk, TalkSnapshot};
use indexmap::IndexMap;

/// Versioned collection of the talks.
///
/// The version is increased by one for each mutation that changes the content and
/// the talks are listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TalkStore {
    talks: IndexMap<String, Talk>,
    version: u64,
}

impl TalkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from persisted talks. The key is the title, a differing `title` field
    /// is overwritten.
    pub fn from_talks(talks: IndexMap<String, Talk>) -> Self {
        let talks = talks
            .into_iter()
            .map(|(key, mut talk)| {
                if talk.title != key {
                    log::warn!("Talk stored as {key:?} has title {:?}, using the key", talk.title);
                    talk.title = key.clone();
                }
                (key, talk)
            })
            .collect();
        Self { talks, version: 0 }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.talks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.talks.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&Talk> {
        self.talks.get(title)
    }

    pub fn list(&self) -> Vec<Talk> {
        self.talks.values().cloned().collect()
    }

    pub fn snapshot(&self) -> TalkSnapshot {
        TalkSnapshot {
            version: self.version,
            talks: self.list(),
        }
    }

    /// Create or replace a talk, the comments are dropped. Returns false if the stored talk
    /// is identical to the new one and nothing was changed.
    pub fn put(&mut self, title: &str, presenter: &str, summary: &str) -> bool {
        let talk = Talk {
            title: title.to_owned(),
            presenter: presenter.to_owned(),
            summary: summary.to_owned(),
            comments: Vec::new(),
        };

        if self.talks.get(title) == Some(&talk) {
            return false;
        }

        self.talks.insert(talk.title.clone(), talk);
        self.version += 1;
        true
    }

    pub fn delete(&mut self, title: &str) -> bool {
        if self.talks.shift_remove(title).is_some() {
            self.version += 1;
            true
        } else {
            false
        }
    }

    pub fn add_comment(&mut self, title: &str, comment: Comment) -> bool {
        match self.talks.get_mut(title) {
            Some(talk) => {
                talk.comments.push(comment);
                self.version += 1;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "./talk_store_test.rs"]
mod talk_store_test;
