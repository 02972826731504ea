//! PostgreSQL implementation of the job repository.
//!
//! Renders the store-agnostic predicate tree into SQL with
//! [`sqlx::QueryBuilder`]; every literal is a bound parameter. Related
//! records (translations, category, city, country, user) are loaded with
//! batched `= ANY` queries after the page query.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::domain::entities::{
    CategoryRecord, CategoryTranslation, CityRecord, CityTranslation, CountryRecord,
    CountryTranslation, Experience, Job, JobPatch, JobRecord, JobTranslation, JobType, NewJob,
    UserSummary,
};
use crate::domain::query::{Field, JobQuerySpec, Predicate, SortField, SortOrder, TextField, Value};
use crate::domain::repositories::JobRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::translations::upsert_translations;

const JOB_COLUMNS: &str = "j.id, j.job_type, j.experience, j.salary_min, j.salary_max, j.skills, \
     j.is_remote, j.is_featured, j.is_active, j.user_id, j.country_id, j.city_id, j.category_id, \
     j.posted_at, j.expires_at, j.created_at, j.updated_at";

/// PostgreSQL repository for job storage and search.
pub struct PgJobRepository {
    pool: Arc<PgPool>,
}

impl PgJobRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn load_records(&self, rows: Vec<JobRow>) -> Result<Vec<JobRecord>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let job_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let category_ids: Vec<i64> = rows
            .iter()
            .filter_map(|r| r.category_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let city_ids: Vec<i64> = rows
            .iter()
            .map(|r| r.city_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let country_ids: Vec<i64> = rows
            .iter()
            .map(|r| r.country_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let user_ids: Vec<i64> = rows
            .iter()
            .map(|r| r.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut job_translations: HashMap<i64, Vec<JobTranslation>> = HashMap::new();
        let translation_rows: Vec<JobTranslationRow> = sqlx::query_as(
            "SELECT job_id, lang, title, description, company, location, benefits, requirements \
             FROM job_translations WHERE job_id = ANY($1) ORDER BY id",
        )
        .bind(&job_ids)
        .fetch_all(self.pool.as_ref())
        .await?;
        for row in translation_rows {
            job_translations
                .entry(row.job_id)
                .or_default()
                .push(row.into_translation());
        }

        let mut category_translations: HashMap<i64, Vec<CategoryTranslation>> = HashMap::new();
        let rows_ct: Vec<NameTranslationRow> = sqlx::query_as(
            "SELECT category_id AS owner_id, lang, name FROM category_translations \
             WHERE category_id = ANY($1) ORDER BY id",
        )
        .bind(&category_ids)
        .fetch_all(self.pool.as_ref())
        .await?;
        for row in rows_ct {
            category_translations
                .entry(row.owner_id)
                .or_default()
                .push(CategoryTranslation {
                    lang: row.lang,
                    name: row.name,
                });
        }

        let mut city_country: HashMap<i64, i64> = HashMap::new();
        let city_rows: Vec<CityRow> =
            sqlx::query_as("SELECT id, country_id FROM cities WHERE id = ANY($1)")
                .bind(&city_ids)
                .fetch_all(self.pool.as_ref())
                .await?;
        for row in city_rows {
            city_country.insert(row.id, row.country_id);
        }

        let mut city_translations: HashMap<i64, Vec<CityTranslation>> = HashMap::new();
        let rows_cit: Vec<NameTranslationRow> = sqlx::query_as(
            "SELECT city_id AS owner_id, lang, name FROM city_translations \
             WHERE city_id = ANY($1) ORDER BY id",
        )
        .bind(&city_ids)
        .fetch_all(self.pool.as_ref())
        .await?;
        for row in rows_cit {
            city_translations
                .entry(row.owner_id)
                .or_default()
                .push(CityTranslation {
                    lang: row.lang,
                    name: row.name,
                });
        }

        let mut country_translations: HashMap<i64, Vec<CountryTranslation>> = HashMap::new();
        let rows_cot: Vec<NameTranslationRow> = sqlx::query_as(
            "SELECT country_id AS owner_id, lang, name FROM country_translations \
             WHERE country_id = ANY($1) ORDER BY id",
        )
        .bind(&country_ids)
        .fetch_all(self.pool.as_ref())
        .await?;
        for row in rows_cot {
            country_translations
                .entry(row.owner_id)
                .or_default()
                .push(CountryTranslation {
                    lang: row.lang,
                    name: row.name,
                });
        }

        let mut countries: HashMap<i64, CountryRecord> = HashMap::new();
        let country_rows: Vec<CountryRow> =
            sqlx::query_as("SELECT id, code FROM countries WHERE id = ANY($1)")
                .bind(&country_ids)
                .fetch_all(self.pool.as_ref())
                .await?;
        for row in country_rows {
            countries.insert(
                row.id,
                CountryRecord {
                    id: row.id,
                    code: row.code,
                    translations: country_translations.remove(&row.id).unwrap_or_default(),
                },
            );
        }

        let mut users: HashMap<i64, UserSummary> = HashMap::new();
        let user_rows: Vec<UserRow> =
            sqlx::query_as("SELECT id, name FROM users WHERE id = ANY($1)")
                .bind(&user_ids)
                .fetch_all(self.pool.as_ref())
                .await?;
        for row in user_rows {
            users.insert(
                row.id,
                UserSummary {
                    id: row.id,
                    name: row.name,
                },
            );
        }

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let category = row.category_id.map(|cid| CategoryRecord {
                id: cid,
                translations: category_translations.get(&cid).cloned().unwrap_or_default(),
            });
            let city = city_country.get(&row.city_id).map(|country_id| CityRecord {
                id: row.city_id,
                country_id: *country_id,
                translations: city_translations.get(&row.city_id).cloned().unwrap_or_default(),
                country: None,
            });
            let country = countries.get(&row.country_id).cloned();
            let user = users.get(&row.user_id).cloned();
            let translations = job_translations.remove(&row.id).unwrap_or_default();

            records.push(JobRecord {
                job: row.into_job()?,
                translations,
                category,
                city,
                country,
                user,
            });
        }

        Ok(records)
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn search(&self, spec: &JobQuerySpec) -> Result<(Vec<JobRecord>, i64), AppError> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {JOB_COLUMNS} FROM jobs j WHERE "));
        push_predicate(&mut qb, &spec.predicate);
        // Secondary sort on id keeps pagination stable when the sort key ties.
        qb.push(" ORDER BY ")
            .push(sort_column(spec.sort))
            .push(order_sql(spec.order))
            .push(", j.id")
            .push(order_sql(spec.order))
            .push(" LIMIT ")
            .push_bind(spec.limit)
            .push(" OFFSET ")
            .push_bind(spec.offset());

        let rows: Vec<JobRow> = qb.build_query_as().fetch_all(self.pool.as_ref()).await?;

        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM jobs j WHERE ");
        push_predicate(&mut count_qb, &spec.predicate);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(self.pool.as_ref())
            .await?;

        let records = self.load_records(rows).await?;
        Ok((records, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<JobRecord>, AppError> {
        let row: Option<JobRow> =
            sqlx::query_as(&format!("SELECT {JOB_COLUMNS} FROM jobs j WHERE j.id = $1"))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut records = self.load_records(vec![row]).await?;
        Ok(records.pop())
    }

    async fn create(&self, new_job: NewJob) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO jobs (job_type, experience, salary_min, salary_max, skills, is_remote, \
             is_featured, user_id, country_id, city_id, category_id, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING id",
        )
        .bind(new_job.job_type.as_str())
        .bind(new_job.experience.map(|e| e.as_str()))
        .bind(new_job.salary_min)
        .bind(new_job.salary_max)
        .bind(&new_job.skills)
        .bind(new_job.is_remote)
        .bind(new_job.is_featured)
        .bind(new_job.user_id)
        .bind(new_job.country_id)
        .bind(new_job.city_id)
        .bind(new_job.category_id)
        .bind(new_job.expires_at)
        .fetch_one(&mut *tx)
        .await?;

        upsert_translations(&mut tx, id, &new_job.translations).await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn update(&self, id: i64, patch: JobPatch) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE jobs SET updated_at = now()");
        if let Some(job_type) = patch.job_type {
            qb.push(", job_type = ").push_bind(job_type.as_str());
        }
        if let Some(experience) = patch.experience {
            qb.push(", experience = ")
                .push_bind(experience.map(|e| e.as_str()));
        }
        if let Some(salary_min) = patch.salary_min {
            qb.push(", salary_min = ").push_bind(salary_min);
        }
        if let Some(salary_max) = patch.salary_max {
            qb.push(", salary_max = ").push_bind(salary_max);
        }
        if let Some(skills) = patch.skills {
            qb.push(", skills = ").push_bind(skills);
        }
        if let Some(is_remote) = patch.is_remote {
            qb.push(", is_remote = ").push_bind(is_remote);
        }
        if let Some(is_featured) = patch.is_featured {
            qb.push(", is_featured = ").push_bind(is_featured);
        }
        if let Some(is_active) = patch.is_active {
            qb.push(", is_active = ").push_bind(is_active);
        }
        if let Some(category_id) = patch.category_id {
            qb.push(", category_id = ").push_bind(category_id);
        }
        if let Some(expires_at) = patch.expires_at {
            qb.push(", expires_at = ").push_bind(expires_at);
        }
        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Job not found", json!({ "id": id })));
        }

        if let Some(translations) = patch.translations {
            upsert_translations(&mut tx, id, &translations).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<Job, AppError> {
        let row: Option<JobRow> = sqlx::query_as(&format!(
            "DELETE FROM jobs j WHERE j.id = $1 RETURNING {JOB_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.ok_or_else(|| AppError::not_found("Job not found", json!({ "id": id })))?
            .into_job()
    }
}

// ── Row types ───────────────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
struct JobRow {
    id: i64,
    job_type: String,
    experience: Option<String>,
    salary_min: Option<i64>,
    salary_max: Option<i64>,
    skills: Vec<String>,
    is_remote: bool,
    is_featured: bool,
    is_active: bool,
    user_id: i64,
    country_id: i64,
    city_id: i64,
    category_id: Option<i64>,
    posted_at: chrono::DateTime<chrono::Utc>,
    expires_at: Option<chrono::DateTime<chrono::Utc>>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl JobRow {
    fn into_job(self) -> Result<Job, AppError> {
        let job_type = JobType::parse(&self.job_type).ok_or_else(|| {
            AppError::internal("Unknown job type in store", json!({ "value": self.job_type }))
        })?;
        let experience = match &self.experience {
            Some(raw) => Some(Experience::parse(raw).ok_or_else(|| {
                AppError::internal("Unknown experience in store", json!({ "value": raw }))
            })?),
            None => None,
        };

        Ok(Job {
            id: self.id,
            job_type,
            experience,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            skills: self.skills,
            is_remote: self.is_remote,
            is_featured: self.is_featured,
            is_active: self.is_active,
            user_id: self.user_id,
            country_id: self.country_id,
            city_id: self.city_id,
            category_id: self.category_id,
            posted_at: self.posted_at,
            expires_at: self.expires_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct JobTranslationRow {
    job_id: i64,
    lang: String,
    title: String,
    description: String,
    company: Option<String>,
    location: Option<String>,
    benefits: Option<String>,
    requirements: Option<String>,
}

impl JobTranslationRow {
    fn into_translation(self) -> JobTranslation {
        JobTranslation {
            lang: self.lang,
            title: self.title,
            description: self.description,
            company: self.company,
            location: self.location,
            benefits: self.benefits,
            requirements: self.requirements,
        }
    }
}

#[derive(sqlx::FromRow)]
struct NameTranslationRow {
    owner_id: i64,
    lang: String,
    name: String,
}

#[derive(sqlx::FromRow)]
struct CityRow {
    id: i64,
    country_id: i64,
}

#[derive(sqlx::FromRow)]
struct CountryRow {
    id: i64,
    code: String,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
}

// ── Predicate rendering ─────────────────────────────────────────────────────

fn scalar_column(field: Field) -> &'static str {
    match field {
        Field::IsActive => "j.is_active",
        Field::IsRemote => "j.is_remote",
        Field::JobType => "j.job_type",
        Field::Experience => "j.experience",
        Field::CountryId => "j.country_id",
        Field::CityId => "j.city_id",
        Field::SalaryMin => "j.salary_min",
        Field::SalaryMax => "j.salary_max",
    }
}

fn text_column(field: TextField) -> &'static str {
    match field {
        TextField::Title => "t.title",
        TextField::Description => "t.description",
    }
}

fn sort_column(sort: SortField) -> &'static str {
    match sort {
        SortField::PostedAt => "j.posted_at",
        SortField::SalaryMin => "j.salary_min",
        SortField::SalaryMax => "j.salary_max",
        SortField::CreatedAt => "j.created_at",
    }
}

fn order_sql(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => " ASC",
        SortOrder::Desc => " DESC",
    }
}

/// Escapes LIKE metacharacters so the needle matches literally.
fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &Value) {
    match value {
        Value::Bool(b) => {
            qb.push_bind(*b);
        }
        Value::Int(i) => {
            qb.push_bind(*i);
        }
        Value::Str(s) => {
            qb.push_bind(s.clone());
        }
    }
}

/// Recursively renders the predicate tree. Column names come from fixed
/// lookup tables; every literal is a bound parameter.
fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    match predicate {
        Predicate::Eq { field, value } => {
            qb.push(scalar_column(*field)).push(" = ");
            push_value(qb, value);
        }
        Predicate::In { field, values } => {
            qb.push(scalar_column(*field)).push(" = ANY(");
            if matches!(values.first(), Some(Value::Int(_))) {
                let ints: Vec<i64> = values
                    .iter()
                    .filter_map(|v| match v {
                        Value::Int(i) => Some(*i),
                        _ => None,
                    })
                    .collect();
                qb.push_bind(ints);
            } else {
                let strs: Vec<String> = values
                    .iter()
                    .filter_map(|v| match v {
                        Value::Str(s) => Some(s.clone()),
                        _ => None,
                    })
                    .collect();
                qb.push_bind(strs);
            }
            qb.push(")");
        }
        Predicate::Gte { field, value } => {
            qb.push(scalar_column(*field)).push(" >= ").push_bind(*value);
        }
        Predicate::Lte { field, value } => {
            qb.push(scalar_column(*field)).push(" <= ").push_bind(*value);
        }
        Predicate::TranslatedContains {
            field,
            needle,
            langs,
        } => {
            qb.push("EXISTS (SELECT 1 FROM job_translations t WHERE t.job_id = j.id AND t.lang = ANY(")
                .push_bind(langs.clone())
                .push(") AND ")
                .push(text_column(*field))
                .push(" ILIKE ")
                .push_bind(format!("%{}%", escape_like(needle)))
                .push(")");
        }
        Predicate::CategoryIn { names, langs } => {
            qb.push(
                "EXISTS (SELECT 1 FROM category_translations ct \
                 WHERE ct.category_id = j.category_id AND ct.lang = ANY(",
            )
            .push_bind(langs.clone())
            .push(") AND ct.name = ANY(")
            .push_bind(names.clone())
            .push("))");
        }
        Predicate::SkillsIntersect { terms } => {
            qb.push("j.skills && ").push_bind(terms.clone());
        }
        Predicate::And { all } => {
            if all.is_empty() {
                qb.push("TRUE");
                return;
            }
            qb.push("(");
            for (i, p) in all.iter().enumerate() {
                if i > 0 {
                    qb.push(" AND ");
                }
                push_predicate(qb, p);
            }
            qb.push(")");
        }
        Predicate::Or { any } => {
            if any.is_empty() {
                qb.push("FALSE");
                return;
            }
            qb.push("(");
            for (i, p) in any.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                push_predicate(qb, p);
            }
            qb.push(")");
        }
    }
}
