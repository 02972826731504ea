//! Job entity, its enum domains and translation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Employment type of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Freelance,
}

impl JobType {
    pub const ALL: [JobType; 5] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Internship,
        JobType::Freelance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "FULL_TIME",
            JobType::PartTime => "PART_TIME",
            JobType::Contract => "CONTRACT",
            JobType::Internship => "INTERNSHIP",
            JobType::Freelance => "FREELANCE",
        }
    }

    /// Lenient parser: trims and upper-cases the input, returns `None` for
    /// anything outside the enum domain instead of erroring.
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_uppercase();
        Self::ALL.iter().copied().find(|t| t.as_str() == upper)
    }
}

/// Required experience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Experience {
    Junior,
    Middle,
    Senior,
    Lead,
}

impl Experience {
    pub const ALL: [Experience; 4] = [
        Experience::Junior,
        Experience::Middle,
        Experience::Senior,
        Experience::Lead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::Junior => "JUNIOR",
            Experience::Middle => "MIDDLE",
            Experience::Senior => "SENIOR",
            Experience::Lead => "LEAD",
        }
    }

    /// Lenient parser, same contract as [`JobType::parse`].
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_uppercase();
        Self::ALL.iter().copied().find(|e| e.as_str() == upper)
    }
}

/// A job posting. Display fields live in [`JobTranslation`] records,
/// one per language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub experience: Option<Experience>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub skills: Vec<String>,
    pub is_remote: bool,
    pub is_featured: bool,
    pub is_active: bool,
    pub user_id: i64,
    pub country_id: i64,
    pub city_id: i64,
    pub category_id: Option<i64>,
    pub posted_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-language display fields of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTranslation {
    pub lang: String,
    pub title: String,
    pub description: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub benefits: Option<String>,
    pub requirements: Option<String>,
}

/// A job as loaded from the store: the row itself, its full translation
/// collection, and the related records read paths flatten into a
/// localized view.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub job: Job,
    pub translations: Vec<JobTranslation>,
    pub category: Option<super::category::CategoryRecord>,
    pub city: Option<super::city::CityRecord>,
    pub country: Option<super::country::CountryRecord>,
    pub user: Option<super::user::UserSummary>,
}

/// Input data for creating a new job.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub job_type: JobType,
    pub experience: Option<Experience>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub skills: Vec<String>,
    pub is_remote: bool,
    pub is_featured: bool,
    pub user_id: i64,
    pub country_id: i64,
    pub city_id: i64,
    pub category_id: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub translations: Vec<JobTranslation>,
}

/// Partial update for an existing job.
///
/// `None` fields are left unchanged. `expires_at: Some(None)` clears the
/// expiry; `Some(Some(t))` sets it. Translations are upserted by language.
#[derive(Debug, Clone, Default)]
pub struct JobPatch {
    pub job_type: Option<JobType>,
    pub experience: Option<Option<Experience>>,
    pub salary_min: Option<Option<i64>>,
    pub salary_max: Option<Option<i64>>,
    pub skills: Option<Vec<String>>,
    pub is_remote: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub category_id: Option<Option<i64>>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
    pub translations: Option<Vec<JobTranslation>>,
}
