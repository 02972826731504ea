//! Two-tier cache behavior through the services: read-through idempotence,
//! mirror population, prefix-scoped invalidation and mirror fail-open.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{
    BrokenCache, InMemoryCategoryRepository, InMemoryJobRepository, base_record, category_record,
    en_translation,
};
use job_board::application::services::{CategoryService, JobService};
use job_board::domain::entities::{JobPatch, JobType, NewJob};
use job_board::domain::query::JobSearchParams;
use job_board::infrastructure::cache::{CacheBackend, InMemoryCache, LayeredCache};

const TTL: Duration = Duration::from_secs(60);

struct Harness {
    primary: Arc<InMemoryCache>,
    mirror: Arc<InMemoryCache>,
    job_repository: Arc<InMemoryJobRepository>,
    category_repository: Arc<InMemoryCategoryRepository>,
    job_service: JobService<InMemoryJobRepository>,
    category_service: CategoryService<InMemoryCategoryRepository>,
}

fn harness(jobs: Vec<job_board::domain::entities::JobRecord>) -> Harness {
    let primary = Arc::new(InMemoryCache::new());
    let mirror = Arc::new(InMemoryCache::new());
    let cache = Arc::new(LayeredCache::new(
        primary.clone(),
        Some(mirror.clone()),
        TTL,
    ));

    let job_repository = Arc::new(InMemoryJobRepository::new(jobs));
    let category_repository = Arc::new(InMemoryCategoryRepository::new(vec![category_record(
        1, "Design",
    )]));

    Harness {
        job_service: JobService::new(job_repository.clone(), cache.clone()),
        category_service: CategoryService::new(category_repository.clone(), cache),
        primary,
        mirror,
        job_repository,
        category_repository,
    }
}

fn new_job() -> NewJob {
    NewJob {
        job_type: JobType::Contract,
        experience: None,
        salary_min: None,
        salary_max: None,
        skills: vec![],
        is_remote: false,
        is_featured: false,
        user_id: 1,
        country_id: 1,
        city_id: 1,
        category_id: None,
        expires_at: None,
        translations: vec![en_translation("New job", "Fresh")],
    }
}

#[tokio::test]
async fn test_repeated_reads_are_byte_identical_and_hit_cache() {
    let h = harness(vec![base_record(1), base_record(2)]);
    let params = JobSearchParams::default();

    let first = h.job_service.search(&params).await.unwrap();
    let second = h.job_service.search(&params).await.unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(h.job_repository.search_calls(), 1);
}

#[tokio::test]
async fn test_read_miss_populates_the_mirror() {
    let h = harness(vec![base_record(1)]);

    h.job_service
        .search(&JobSearchParams::default())
        .await
        .unwrap();
    h.job_service.find(1, Some("en")).await.unwrap();

    let mirror_keys = h.mirror.keys("job").await.unwrap();
    assert_eq!(mirror_keys.len(), 2);
    assert!(mirror_keys.iter().any(|k| k.starts_with("job:search:")));
    assert!(mirror_keys.contains(&"job:1:en".to_string()));

    // Both tiers carry the same serialized value.
    for key in mirror_keys {
        assert_eq!(
            h.primary.get(&key).await.unwrap(),
            h.mirror.get(&key).await.unwrap()
        );
    }
}

#[tokio::test]
async fn test_job_write_clears_only_the_job_namespace_in_both_tiers() {
    let h = harness(vec![base_record(1)]);

    // Populate job and category namespaces.
    h.job_service
        .search(&JobSearchParams::default())
        .await
        .unwrap();
    h.job_service.find(1, None).await.unwrap();
    h.category_service.list(Some("en")).await.unwrap();

    assert!(!h.primary.keys("job").await.unwrap().is_empty());
    assert!(!h.primary.keys("category").await.unwrap().is_empty());

    h.job_service.create(new_job()).await.unwrap();

    for tier in [&h.primary, &h.mirror] {
        // create() re-reads the new job through the cache, so only that
        // fresh key may live in the job namespace now.
        let job_keys = tier.keys("job").await.unwrap();
        assert_eq!(job_keys, vec!["job:2:en".to_string()]);
        assert!(!tier.keys("category").await.unwrap().is_empty());
    }

    // The category list is still served from cache.
    h.category_service.list(Some("en")).await.unwrap();
    assert_eq!(h.category_repository.list_calls(), 1);

    // The job search is not: the write invalidated it.
    h.job_service
        .search(&JobSearchParams::default())
        .await
        .unwrap();
    assert_eq!(h.job_repository.search_calls(), 2);
}

#[tokio::test]
async fn test_category_write_leaves_job_namespace_untouched() {
    let h = harness(vec![base_record(1)]);

    h.job_service
        .search(&JobSearchParams::default())
        .await
        .unwrap();
    h.category_service.list(None).await.unwrap();

    h.category_service.delete(1).await.unwrap();

    for tier in [&h.primary, &h.mirror] {
        assert!(!tier.keys("job").await.unwrap().is_empty());
        assert!(tier.keys("category").await.unwrap().is_empty());
    }

    h.job_service
        .search(&JobSearchParams::default())
        .await
        .unwrap();
    assert_eq!(h.job_repository.search_calls(), 1);
}

#[tokio::test]
async fn test_update_invalidates_before_returning() {
    let h = harness(vec![base_record(1)]);

    let before = h.job_service.find(1, None).await.unwrap();
    assert_eq!(before.translation.as_ref().unwrap().title, "Job 1");

    let updated = h
        .job_service
        .update(
            1,
            JobPatch {
                translations: Some(vec![en_translation("Renamed", "Changed")]),
                ..Default::default()
            },
            Some("en"),
        )
        .await
        .unwrap();

    // The returned view already reflects the write; the stale entry is gone.
    assert_eq!(updated.translation.as_ref().unwrap().title, "Renamed");
    let after = h.job_service.find(1, None).await.unwrap();
    assert_eq!(after.translation.as_ref().unwrap().title, "Renamed");
}

#[tokio::test]
async fn test_broken_mirror_never_breaks_reads_or_writes() {
    let primary = Arc::new(InMemoryCache::new());
    let cache = Arc::new(LayeredCache::new(
        primary.clone(),
        Some(Arc::new(BrokenCache)),
        TTL,
    ));
    let repository = Arc::new(InMemoryJobRepository::new(vec![base_record(1)]));
    let service = JobService::new(repository.clone(), cache);

    // Read path: mirror write failures are swallowed.
    let result = service.search(&JobSearchParams::default()).await.unwrap();
    assert_eq!(result.total_items, 1);

    // Write path: mirror invalidation failure does not block the primary.
    service.delete(1).await.unwrap();
    assert!(primary.keys("job").await.unwrap().is_empty());
}
