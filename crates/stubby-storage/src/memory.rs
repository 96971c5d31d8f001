use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use stubby_core::{
    ClickStats, Created, Identifier, ReadRepository, Repository, RepositoryError, Result,
    UrlRecord,
};
use stubby_generator::{Generator, RandomGenerator};
use tracing::{debug, error, trace};
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

/// Tuning knobs for [`InMemoryRepository`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct RepositorySettings {
    /// How many candidates to draw from the generator before giving up
    /// with `GenerationExhausted`. Values below 1 are treated as 1.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
    /// Initial capacity of both indices.
    #[builder(default = 0)]
    pub capacity: usize,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// In-memory storage entry for one identifier.
#[derive(Debug, Clone)]
struct StoredUrl {
    destination: String,
    created_at: Timestamp,
    clicks: u64,
}

impl StoredUrl {
    fn to_record(&self, id: &str) -> UrlRecord {
        UrlRecord {
            id: Identifier::new(id),
            destination: self.destination.clone(),
            created_at: self.created_at,
            clicks: self.clicks,
        }
    }
}

/// In-memory implementation of the repository traits using two DashMaps.
///
/// `by_id` maps identifiers to records and `by_destination` maps each
/// destination to the identifier it was given. An entry is only ever added
/// to `by_destination` after its record is in `by_id`, and both writes happen
/// while the destination's entry guard is held. Locks are always taken in the
/// order `by_destination` then `by_id`.
#[derive(Debug)]
pub struct InMemoryRepository<G = RandomGenerator> {
    by_id: DashMap<String, StoredUrl>,
    by_destination: DashMap<String, String>,
    generator: G,
    max_attempts: u32,
}

impl<G: Generator> InMemoryRepository<G> {
    /// Creates a new in-memory repository drawing identifiers from `generator`.
    pub fn new(generator: G) -> Self {
        Self::with_settings(generator, RepositorySettings::default())
    }

    pub fn with_settings(generator: G, settings: RepositorySettings) -> Self {
        Self {
            by_id: DashMap::with_capacity(settings.capacity),
            by_destination: DashMap::with_capacity(settings.capacity),
            generator,
            max_attempts: settings.max_attempts.max(1),
        }
    }

    /// Draws candidates until one is free in `by_id` and stores the record there.
    ///
    /// Must be called with the destination's entry guard held.
    fn insert_fresh(&self, destination: &str) -> Result<UrlRecord> {
        for attempt in 1..=self.max_attempts {
            let candidate: Identifier = self.generator.generate().into();

            match self.by_id.entry(candidate.into_string()) {
                Entry::Occupied(slot) => {
                    debug!(id = %slot.key(), attempt, "identifier collision, retrying");
                }
                Entry::Vacant(slot) => {
                    let stored = StoredUrl {
                        destination: destination.to_owned(),
                        created_at: Timestamp::now(),
                        clicks: 0,
                    };
                    let record = stored.to_record(slot.key());
                    slot.insert(stored);
                    return Ok(record);
                }
            }
        }

        error!(
            destination,
            attempts = self.max_attempts,
            "identifier generation exhausted"
        );
        Err(RepositoryError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }
}

impl Default for InMemoryRepository<RandomGenerator> {
    fn default() -> Self {
        Self::new(RandomGenerator::default())
    }
}

#[async_trait]
impl<G: Generator> ReadRepository for InMemoryRepository<G> {
    async fn lookup(&self, id: &str) -> Result<Option<UrlRecord>> {
        Ok(self.by_id.get(id).map(|stored| stored.to_record(id)))
    }

    async fn stats(&self, id: &str) -> Result<Option<ClickStats>> {
        Ok(self.by_id.get(id).map(|stored| ClickStats {
            clicks: stored.clicks,
        }))
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.by_id.len())
    }
}

#[async_trait]
impl<G: Generator> Repository for InMemoryRepository<G> {
    async fn create_or_fetch(&self, destination: &str) -> Result<Created> {
        if destination.is_empty() {
            return Err(RepositoryError::InvalidInput(
                "destination cannot be empty".to_string(),
            ));
        }

        match self.by_destination.entry(destination.to_owned()) {
            Entry::Occupied(slot) => {
                let id = slot.get();
                let record = self
                    .by_id
                    .get(id.as_str())
                    .map(|stored| stored.to_record(id))
                    .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;

                trace!(id = %record.id, destination, "destination already shortened");
                Ok(Created {
                    record,
                    is_new: false,
                })
            }
            Entry::Vacant(slot) => {
                let record = self.insert_fresh(destination)?;
                slot.insert(record.id.as_str().to_owned());

                debug!(id = %record.id, destination, "created short url");
                Ok(Created {
                    record,
                    is_new: true,
                })
            }
        }
    }

    async fn record_click(&self, id: &str) -> Result<()> {
        let Some(mut stored) = self.by_id.get_mut(id) else {
            return Err(RepositoryError::NotFound(id.to_owned()));
        };

        stored.clicks += 1;
        trace!(id, clicks = stored.clicks, "click recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};
    use std::sync::{Arc, Mutex};
    use stubby_generator::SeqGenerator;

    /// Hands out a fixed list of identifiers, then repeats the last one.
    struct ScriptedGenerator {
        ids: Mutex<VecDeque<&'static str>>,
        last: &'static str,
    }

    impl ScriptedGenerator {
        fn new(ids: &[&'static str]) -> Self {
            Self {
                ids: Mutex::new(ids.iter().copied().collect()),
                last: ids.last().copied().unwrap(),
            }
        }
    }

    impl Generator for ScriptedGenerator {
        type Output = Identifier;

        fn generate(&self) -> Identifier {
            let next = self.ids.lock().unwrap().pop_front().unwrap_or(self.last);
            Identifier::new(next)
        }
    }

    fn random_repo() -> InMemoryRepository {
        InMemoryRepository::default()
    }

    fn seq_repo() -> InMemoryRepository<SeqGenerator> {
        InMemoryRepository::new(SeqGenerator::with_prefix("t"))
    }

    #[tokio::test]
    async fn create_then_lookup() {
        let repo = seq_repo();

        let created = repo.create_or_fetch("https://example.com/a").await.unwrap();
        assert!(created.is_new);
        assert_eq!(created.record.id.as_str(), "t0000");
        assert_eq!(created.record.clicks, 0);

        let found = repo.lookup("t0000").await.unwrap().unwrap();
        assert_eq!(found, created.record);
    }

    #[tokio::test]
    async fn same_destination_is_deduplicated() {
        let repo = random_repo();

        let first = repo.create_or_fetch("https://example.com/a").await.unwrap();
        let second = repo.create_or_fetch("https://example.com/a").await.unwrap();

        assert!(first.is_new);
        assert!(!second.is_new);
        assert_eq!(first.record.id, second.record.id);
        assert_eq!(first.record.created_at, second.record.created_at);
        assert_eq!(repo.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn distinct_destinations_get_distinct_ids() {
        let repo = random_repo();

        let a = repo.create_or_fetch("https://example.com/a").await.unwrap();
        let b = repo.create_or_fetch("https://example.com/b").await.unwrap();

        assert_ne!(a.record.id, b.record.id);
        assert_eq!(repo.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn empty_destination_is_rejected() {
        let repo = seq_repo();
        repo.create_or_fetch("https://example.com").await.unwrap();

        let err = repo.create_or_fetch("").await.unwrap_err();

        assert!(matches!(err, RepositoryError::InvalidInput(_)));
        assert_eq!(repo.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unknown_identifier() {
        let repo = seq_repo();

        assert!(repo.lookup("nope").await.unwrap().is_none());
        assert!(repo.stats("nope").await.unwrap().is_none());
        assert_eq!(
            repo.record_click("nope").await.unwrap_err(),
            RepositoryError::NotFound("nope".to_string())
        );
    }

    #[tokio::test]
    async fn record_click_increments_counter() {
        let repo = seq_repo();
        let id = repo
            .create_or_fetch("https://example.com")
            .await
            .unwrap()
            .record
            .id;

        for _ in 0..3 {
            repo.record_click(id.as_str()).await.unwrap();
        }

        assert_eq!(
            repo.stats(id.as_str()).await.unwrap(),
            Some(ClickStats { clicks: 3 })
        );
        assert_eq!(repo.lookup(id.as_str()).await.unwrap().unwrap().clicks, 3);
    }

    #[tokio::test]
    async fn lookup_does_not_count_clicks() {
        let repo = seq_repo();
        let id = repo
            .create_or_fetch("https://example.com")
            .await
            .unwrap()
            .record
            .id;

        repo.lookup(id.as_str()).await.unwrap();
        repo.lookup(id.as_str()).await.unwrap();

        assert_eq!(repo.stats(id.as_str()).await.unwrap().unwrap().clicks, 0);
    }

    #[tokio::test]
    async fn retries_on_collision() {
        let repo = InMemoryRepository::new(ScriptedGenerator::new(&["dup", "dup", "fresh"]));

        let first = repo.create_or_fetch("https://example.com/1").await.unwrap();
        let second = repo.create_or_fetch("https://example.com/2").await.unwrap();

        assert_eq!(first.record.id.as_str(), "dup");
        assert_eq!(second.record.id.as_str(), "fresh");
        assert_eq!(
            repo.lookup("dup").await.unwrap().unwrap().destination,
            "https://example.com/1"
        );
    }

    #[tokio::test]
    async fn exhaustion_leaves_no_partial_state() {
        let settings = RepositorySettings::builder().max_attempts(3).build();
        let repo = InMemoryRepository::with_settings(ScriptedGenerator::new(&["same"]), settings);

        repo.create_or_fetch("https://example.com/1").await.unwrap();
        let err = repo
            .create_or_fetch("https://example.com/2")
            .await
            .unwrap_err();

        assert_eq!(err, RepositoryError::GenerationExhausted { attempts: 3 });
        assert_eq!(repo.len().await.unwrap(), 1);

        // The failed destination must not have been indexed.
        let again = repo
            .create_or_fetch("https://example.com/2")
            .await
            .unwrap_err();
        assert_eq!(again, RepositoryError::GenerationExhausted { attempts: 3 });

        // The earlier record is untouched.
        let existing = repo.create_or_fetch("https://example.com/1").await.unwrap();
        assert!(!existing.is_new);
        assert_eq!(existing.record.id.as_str(), "same");
    }

    #[tokio::test]
    async fn zero_max_attempts_still_tries_once() {
        let settings = RepositorySettings::builder().max_attempts(0).build();
        let repo = InMemoryRepository::with_settings(SeqGenerator::with_prefix("z"), settings);

        let created = repo.create_or_fetch("https://example.com").await.unwrap();
        assert_eq!(created.record.id.as_str(), "z0000");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_create_of_same_destination() {
        let repo = Arc::new(random_repo());
        let mut handles = vec![];

        for _ in 0..32 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.create_or_fetch("https://example.com/race").await.unwrap()
            }));
        }

        let mut results = vec![];
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        let ids: HashSet<_> = results.iter().map(|c| c.record.id.clone()).collect();
        assert_eq!(ids.len(), 1);
        assert_eq!(results.iter().filter(|c| c.is_new).count(), 1);
        assert_eq!(repo.len().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_create_of_distinct_destinations() {
        let repo = Arc::new(random_repo());
        let mut handles = vec![];

        for i in 0..100u32 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.create_or_fetch(&format!("https://example{i}.com"))
                    .await
                    .unwrap()
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            let created = handle.await.unwrap();
            assert!(created.is_new);
            ids.insert(created.record.id);
        }

        assert_eq!(ids.len(), 100);
        assert_eq!(repo.len().await.unwrap(), 100);
        for i in 0..100u32 {
            let again = repo
                .create_or_fetch(&format!("https://example{i}.com"))
                .await
                .unwrap();
            assert!(ids.contains(&again.record.id));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_clicks_are_not_lost() {
        let repo = Arc::new(seq_repo());
        let a = repo.create_or_fetch("https://a.com").await.unwrap().record.id;
        let b = repo.create_or_fetch("https://b.com").await.unwrap().record.id;
        let mut handles = vec![];

        for i in 0..8 {
            let repo = Arc::clone(&repo);
            let id = if i % 2 == 0 { a.clone() } else { b.clone() };
            handles.push(tokio::spawn(async move {
                for _ in 0..125 {
                    repo.record_click(id.as_str()).await.unwrap();
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(repo.stats(a.as_str()).await.unwrap().unwrap().clicks, 500);
        assert_eq!(repo.stats(b.as_str()).await.unwrap().unwrap().clicks, 500);
    }
}
