//! End-to-end search behavior through the job service: filtering semantics,
//! salary boundaries, pagination math and localization, over the in-memory
//! fake store.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{InMemoryJobRepository, base_record, category_record, record_with};
use job_board::application::services::JobService;
use job_board::domain::entities::JobType;
use job_board::domain::query::JobSearchParams;
use job_board::infrastructure::cache::{InMemoryCache, LayeredCache};

const TTL: Duration = Duration::from_secs(60);

fn service(repository: Arc<InMemoryJobRepository>) -> JobService<InMemoryJobRepository> {
    let cache = Arc::new(LayeredCache::new(Arc::new(InMemoryCache::new()), None, TTL));
    JobService::new(repository, cache)
}

fn params() -> JobSearchParams {
    JobSearchParams::default()
}

#[tokio::test]
async fn test_inactive_jobs_are_always_excluded() {
    let repository = Arc::new(InMemoryJobRepository::new(vec![
        base_record(1),
        record_with(2, |r| r.job.is_active = false),
    ]));
    let service = service(repository);

    let result = service.search(&params()).await.unwrap();
    assert_eq!(result.total_items, 1);
    assert_eq!(result.data[0].id, 1);
}

#[tokio::test]
async fn test_salary_lower_bound_is_inclusive() {
    let repository = Arc::new(InMemoryJobRepository::new(vec![record_with(1, |r| {
        r.job.salary_min = Some(3000);
        r.job.salary_max = Some(5000);
    })]));
    let service = service(repository);

    let at_boundary = service
        .search(&JobSearchParams {
            salary_min: Some("3000".to_string()),
            ..params()
        })
        .await
        .unwrap();
    assert_eq!(at_boundary.total_items, 1);

    let above_boundary = service
        .search(&JobSearchParams {
            salary_min: Some("5001".to_string()),
            ..params()
        })
        .await
        .unwrap();
    assert_eq!(above_boundary.total_items, 0);
}

#[tokio::test]
async fn test_pagination_boundary() {
    let jobs = (1..=25).map(base_record).collect();
    let repository = Arc::new(InMemoryJobRepository::new(jobs));
    let service = service(repository);

    let page3 = service
        .search(&JobSearchParams {
            page: Some("3".to_string()),
            limit: Some("10".to_string()),
            ..params()
        })
        .await
        .unwrap();

    assert_eq!(page3.total_items, 25);
    assert_eq!(page3.total_pages, 3);
    assert_eq!(page3.page, 3);
    assert_eq!(page3.limit, 10);
    assert_eq!(page3.data.len(), 5);
    assert!(!page3.has_next_page);
    assert!(page3.has_prev_page);
}

#[tokio::test]
async fn test_default_sort_is_posted_at_desc() {
    let repository = Arc::new(InMemoryJobRepository::new(vec![
        base_record(1),
        base_record(3),
        base_record(2),
    ]));
    let service = service(repository);

    let result = service.search(&params()).await.unwrap();
    let ids: Vec<i64> = result.data.iter().map(|j| j.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_unknown_sort_behaves_like_default() {
    let jobs: Vec<_> = (1..=3).map(base_record).collect();
    let repository = Arc::new(InMemoryJobRepository::new(jobs.clone()));
    let hostile_service = service(repository);
    let hostile = hostile_service
        .search(&JobSearchParams {
            sort: Some("dropTable".to_string()),
            ..params()
        })
        .await
        .unwrap();

    let repository = Arc::new(InMemoryJobRepository::new(jobs));
    let default_service = service(repository);
    let default = default_service.search(&params()).await.unwrap();

    assert_eq!(hostile, default);
}

#[tokio::test]
async fn test_junk_category_entries_match_clean_request() {
    let design = record_with(1, |r| {
        r.job.category_id = Some(10);
        r.category = Some(category_record(10, "Design"));
    });
    let marketing = record_with(2, |r| {
        r.job.category_id = Some(11);
        r.category = Some(category_record(11, "Marketing"));
    });

    let repository = Arc::new(InMemoryJobRepository::new(vec![design, marketing]));
    let service = service(repository.clone());

    let messy = service
        .search(&JobSearchParams {
            category: Some("undefined,null,Design".to_string()),
            ..params()
        })
        .await
        .unwrap();
    assert_eq!(messy.total_items, 1);
    assert_eq!(messy.data[0].id, 1);

    // The equivalent clean request normalizes to the same spec, so it is
    // answered from the cache without another store query.
    let clean = service
        .search(&JobSearchParams {
            category: Some("Design".to_string()),
            ..params()
        })
        .await
        .unwrap();
    assert_eq!(clean, messy);
    assert_eq!(repository.search_calls(), 1);
}

#[tokio::test]
async fn test_free_text_search_matches_title_and_skills() {
    let titled = record_with(1, |r| {
        r.translations[0].title = "Senior Rust Engineer".to_string();
    });
    let skilled = record_with(2, |r| {
        r.job.skills = vec!["rust".to_string(), "tokio".to_string()];
    });
    let unrelated = base_record(3);

    let repository = Arc::new(InMemoryJobRepository::new(vec![titled, skilled, unrelated]));
    let service = service(repository);

    let result = service
        .search(&JobSearchParams {
            search: Some("Rust".to_string()),
            ..params()
        })
        .await
        .unwrap();

    let mut ids: Vec<i64> = result.data.iter().map(|j| j.id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_type_filter_drops_invalid_values() {
    let repository = Arc::new(InMemoryJobRepository::new(vec![
        base_record(1),
        record_with(2, |r| r.job.job_type = JobType::Contract),
    ]));
    let service = service(repository);

    let result = service
        .search(&JobSearchParams {
            job_types: Some("contract,banana".to_string()),
            ..params()
        })
        .await
        .unwrap();

    assert_eq!(result.total_items, 1);
    assert_eq!(result.data[0].id, 2);
}

#[tokio::test]
async fn test_views_are_localized_with_fallback() {
    let record = record_with(1, |r| {
        r.translations.push(job_board::domain::entities::JobTranslation {
            lang: "ka".to_string(),
            title: "სათაური".to_string(),
            description: "აღწერა".to_string(),
            company: None,
            location: None,
            benefits: None,
            requirements: None,
        });
    });
    let repository = Arc::new(InMemoryJobRepository::new(vec![record]));
    let service = service(repository);

    let ka = service
        .search(&JobSearchParams {
            lang: Some("ka".to_string()),
            ..params()
        })
        .await
        .unwrap();
    assert_eq!(ka.data[0].translation.as_ref().unwrap().title, "სათაური");

    // Unknown language falls back to the first translation (English here).
    let fr = service
        .search(&JobSearchParams {
            lang: Some("fr".to_string()),
            ..params()
        })
        .await
        .unwrap();
    assert_eq!(fr.data[0].translation.as_ref().unwrap().title, "Job 1");
}
