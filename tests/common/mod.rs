#![allow(dead_code)]

//! In-memory fakes shared by the integration tests.
//!
//! `InMemoryJobRepository` evaluates the normalized predicate tree against a
//! plain `Vec`, mirroring the store adapter contract without a live
//! Postgres. Call counters let tests assert when the read path actually
//! reached the store.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use job_board::domain::entities::{
    CategoryPatch, CategoryRecord, CategoryTranslation, Job, JobPatch, JobRecord, JobTranslation,
    JobType, NewJob,
};
use job_board::domain::query::{Field, JobQuerySpec, Predicate, SortField, SortOrder, TextField, Value};
use job_board::domain::repositories::{CategoryRepository, JobRepository};
use job_board::error::AppError;
use job_board::infrastructure::cache::{CacheBackend, CacheError, CacheResult};

pub fn fixed_time(offset_secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + offset_secs, 0).unwrap()
}

pub fn en_translation(title: &str, description: &str) -> JobTranslation {
    JobTranslation {
        lang: "en".to_string(),
        title: title.to_string(),
        description: description.to_string(),
        company: None,
        location: None,
        benefits: None,
        requirements: None,
    }
}

/// A plain active full-time job; tests tweak fields as needed.
pub fn base_record(id: i64) -> JobRecord {
    let t = fixed_time(id);
    JobRecord {
        job: Job {
            id,
            job_type: JobType::FullTime,
            experience: None,
            salary_min: None,
            salary_max: None,
            skills: Vec::new(),
            is_remote: false,
            is_featured: false,
            is_active: true,
            user_id: 1,
            country_id: 1,
            city_id: 1,
            category_id: None,
            posted_at: t,
            expires_at: None,
            created_at: t,
            updated_at: t,
        },
        translations: vec![en_translation(
            &format!("Job {id}"),
            &format!("Description {id}"),
        )],
        category: None,
        city: None,
        country: None,
        user: None,
    }
}

pub fn record_with(id: i64, tweak: impl FnOnce(&mut JobRecord)) -> JobRecord {
    let mut record = base_record(id);
    tweak(&mut record);
    record
}

// ── Fake job repository ─────────────────────────────────────────────────────

pub struct InMemoryJobRepository {
    jobs: Mutex<Vec<JobRecord>>,
    search_calls: AtomicUsize,
    find_calls: AtomicUsize,
}

impl InMemoryJobRepository {
    pub fn new(jobs: Vec<JobRecord>) -> Self {
        Self {
            jobs: Mutex::new(jobs),
            search_calls: AtomicUsize::new(0),
            find_calls: AtomicUsize::new(0),
        }
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }
}

fn eval_eq(record: &JobRecord, field: Field, value: &Value) -> bool {
    match (field, value) {
        (Field::IsActive, Value::Bool(b)) => record.job.is_active == *b,
        (Field::IsRemote, Value::Bool(b)) => record.job.is_remote == *b,
        (Field::JobType, Value::Str(s)) => record.job.job_type.as_str() == s,
        (Field::Experience, Value::Str(s)) => {
            record.job.experience.is_some_and(|e| e.as_str() == s)
        }
        (Field::CountryId, Value::Int(i)) => record.job.country_id == *i,
        (Field::CityId, Value::Int(i)) => record.job.city_id == *i,
        _ => false,
    }
}

fn field_i64(record: &JobRecord, field: Field) -> Option<i64> {
    match field {
        Field::SalaryMin => record.job.salary_min,
        Field::SalaryMax => record.job.salary_max,
        _ => None,
    }
}

fn eval_predicate(record: &JobRecord, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::Eq { field, value } => eval_eq(record, *field, value),
        Predicate::In { field, values } => values.iter().any(|v| eval_eq(record, *field, v)),
        Predicate::Gte { field, value } => field_i64(record, *field).is_some_and(|v| v >= *value),
        Predicate::Lte { field, value } => field_i64(record, *field).is_some_and(|v| v <= *value),
        Predicate::TranslatedContains {
            field,
            needle,
            langs,
        } => {
            let needle = needle.to_lowercase();
            record.translations.iter().any(|t| {
                langs.contains(&t.lang)
                    && match field {
                        TextField::Title => t.title.to_lowercase().contains(&needle),
                        TextField::Description => t.description.to_lowercase().contains(&needle),
                    }
            })
        }
        Predicate::CategoryIn { names, langs } => record.category.as_ref().is_some_and(|c| {
            c.translations
                .iter()
                .any(|t| langs.contains(&t.lang) && names.contains(&t.name))
        }),
        Predicate::SkillsIntersect { terms } => {
            record.job.skills.iter().any(|s| terms.contains(s))
        }
        Predicate::And { all } => all.iter().all(|p| eval_predicate(record, p)),
        Predicate::Or { any } => any.iter().any(|p| eval_predicate(record, p)),
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn search(&self, spec: &JobQuerySpec) -> Result<(Vec<JobRecord>, i64), AppError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        let jobs = self.jobs.lock().unwrap();
        let mut matches: Vec<JobRecord> = jobs
            .iter()
            .filter(|r| eval_predicate(r, &spec.predicate))
            .cloned()
            .collect();

        matches.sort_by(|a, b| {
            let ord = match spec.sort {
                SortField::PostedAt => a.job.posted_at.cmp(&b.job.posted_at),
                SortField::SalaryMin => a.job.salary_min.cmp(&b.job.salary_min),
                SortField::SalaryMax => a.job.salary_max.cmp(&b.job.salary_max),
                SortField::CreatedAt => a.job.created_at.cmp(&b.job.created_at),
            };
            match spec.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });

        let total = matches.len() as i64;
        let page = matches
            .into_iter()
            .skip(spec.offset() as usize)
            .take(spec.limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<JobRecord>, AppError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        let jobs = self.jobs.lock().unwrap();
        Ok(jobs.iter().find(|r| r.job.id == id).cloned())
    }

    async fn create(&self, new_job: NewJob) -> Result<i64, AppError> {
        let mut jobs = self.jobs.lock().unwrap();
        let id = jobs.iter().map(|r| r.job.id).max().unwrap_or(0) + 1;
        let now = fixed_time(id);
        jobs.push(JobRecord {
            job: Job {
                id,
                job_type: new_job.job_type,
                experience: new_job.experience,
                salary_min: new_job.salary_min,
                salary_max: new_job.salary_max,
                skills: new_job.skills,
                is_remote: new_job.is_remote,
                is_featured: new_job.is_featured,
                is_active: true,
                user_id: new_job.user_id,
                country_id: new_job.country_id,
                city_id: new_job.city_id,
                category_id: new_job.category_id,
                posted_at: now,
                expires_at: new_job.expires_at,
                created_at: now,
                updated_at: now,
            },
            translations: new_job.translations,
            category: None,
            city: None,
            country: None,
            user: None,
        });
        Ok(id)
    }

    async fn update(&self, id: i64, patch: JobPatch) -> Result<(), AppError> {
        let mut jobs = self.jobs.lock().unwrap();
        let record = jobs
            .iter_mut()
            .find(|r| r.job.id == id)
            .ok_or_else(|| AppError::not_found("Job not found", json!({ "id": id })))?;

        if let Some(job_type) = patch.job_type {
            record.job.job_type = job_type;
        }
        if let Some(experience) = patch.experience {
            record.job.experience = experience;
        }
        if let Some(salary_min) = patch.salary_min {
            record.job.salary_min = salary_min;
        }
        if let Some(salary_max) = patch.salary_max {
            record.job.salary_max = salary_max;
        }
        if let Some(skills) = patch.skills {
            record.job.skills = skills;
        }
        if let Some(is_remote) = patch.is_remote {
            record.job.is_remote = is_remote;
        }
        if let Some(is_featured) = patch.is_featured {
            record.job.is_featured = is_featured;
        }
        if let Some(is_active) = patch.is_active {
            record.job.is_active = is_active;
        }
        if let Some(category_id) = patch.category_id {
            record.job.category_id = category_id;
        }
        if let Some(expires_at) = patch.expires_at {
            record.job.expires_at = expires_at;
        }
        if let Some(translations) = patch.translations {
            // Match-or-create by language, like the store layer.
            for incoming in translations {
                match record
                    .translations
                    .iter_mut()
                    .find(|t| t.lang == incoming.lang)
                {
                    Some(existing) => *existing = incoming,
                    None => record.translations.push(incoming),
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<Job, AppError> {
        let mut jobs = self.jobs.lock().unwrap();
        let index = jobs
            .iter()
            .position(|r| r.job.id == id)
            .ok_or_else(|| AppError::not_found("Job not found", json!({ "id": id })))?;
        Ok(jobs.remove(index).job)
    }
}

// ── Fake category repository ────────────────────────────────────────────────

pub struct InMemoryCategoryRepository {
    categories: Mutex<Vec<CategoryRecord>>,
    list_calls: AtomicUsize,
}

impl InMemoryCategoryRepository {
    pub fn new(categories: Vec<CategoryRecord>) -> Self {
        Self {
            categories: Mutex::new(categories),
            list_calls: AtomicUsize::new(0),
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

pub fn category_record(id: i64, name_en: &str) -> CategoryRecord {
    CategoryRecord {
        id,
        translations: vec![CategoryTranslation {
            lang: "en".to_string(),
            name: name_en.to_string(),
        }],
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<CategoryRecord>, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CategoryRecord>, AppError> {
        let categories = self.categories.lock().unwrap();
        Ok(categories.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, translations: Vec<CategoryTranslation>) -> Result<i64, AppError> {
        let mut categories = self.categories.lock().unwrap();
        let id = categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        categories.push(CategoryRecord { id, translations });
        Ok(id)
    }

    async fn update(&self, id: i64, patch: CategoryPatch) -> Result<(), AppError> {
        let mut categories = self.categories.lock().unwrap();
        let record = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found("Category not found", json!({ "id": id })))?;
        for incoming in patch.translations {
            match record
                .translations
                .iter_mut()
                .find(|t| t.lang == incoming.lang)
            {
                Some(existing) => *existing = incoming,
                None => record.translations.push(incoming),
            }
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut categories = self.categories.lock().unwrap();
        let index = categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AppError::not_found("Category not found", json!({ "id": id })))?;
        categories.remove(index);
        Ok(())
    }
}

// ── Broken cache backend ────────────────────────────────────────────────────

/// A cache backend whose every operation fails; used to prove the mirror is
/// best-effort.
pub struct BrokenCache;

#[async_trait]
impl CacheBackend for BrokenCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::Connection("mirror down".to_string()))
    }
    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Err(CacheError::Connection("mirror down".to_string()))
    }
    async fn keys(&self, _prefix: &str) -> CacheResult<Vec<String>> {
        Err(CacheError::Connection("mirror down".to_string()))
    }
    async fn delete(&self, _keys: &[String]) -> CacheResult<u64> {
        Err(CacheError::Connection("mirror down".to_string()))
    }
    async fn health_check(&self) -> bool {
        false
    }
}
