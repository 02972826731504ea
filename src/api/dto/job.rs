//! DTOs for job endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::domain::entities::{Experience, JobPatch, JobTranslation, JobType, NewJob};
use crate::error::AppError;

/// One translation submitted with a job write.
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobTranslationDto {
    #[validate(length(min = 1))]
    pub lang: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub benefits: Option<String>,
    pub requirements: Option<String>,
}

impl JobTranslationDto {
    pub fn into_translation(self) -> JobTranslation {
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

/// Request to create a job posting.
///
/// Unlike the lenient search parameters, write payloads are strict: an
/// unknown enum value or a missing field rejects the request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub user_id: i64,
    pub country_id: i64,
    pub city_id: i64,
    pub category_id: Option<i64>,
    #[validate(range(min = 0))]
    pub salary_min: Option<i64>,
    #[validate(range(min = 0))]
    pub salary_max: Option<i64>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience: Option<Experience>,
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_remote: bool,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub translations: Vec<JobTranslationDto>,
}

impl CreateJobRequest {
    pub fn into_new_job(self) -> NewJob {
        NewJob {
            job_type: self.job_type,
            experience: self.experience,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            skills: self.skills,
            is_remote: self.is_remote,
            is_featured: self.is_featured,
            user_id: self.user_id,
            country_id: self.country_id,
            city_id: self.city_id,
            category_id: self.category_id,
            expires_at: self.expires_at,
            translations: self
                .translations
                .into_iter()
                .map(JobTranslationDto::into_translation)
                .collect(),
        }
    }
}

/// Request to partially update a job. Absent fields are left unchanged;
/// translations are upserted by language.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    pub experience: Option<Experience>,
    #[validate(range(min = 0))]
    pub salary_min: Option<i64>,
    #[validate(range(min = 0))]
    pub salary_max: Option<i64>,
    pub skills: Option<Vec<String>>,
    pub is_remote: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub category_id: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
    #[validate(nested)]
    pub translations: Option<Vec<JobTranslationDto>>,
}

impl UpdateJobRequest {
    pub fn into_patch(self) -> JobPatch {
        JobPatch {
            job_type: self.job_type,
            experience: self.experience.map(Some),
            salary_min: self.salary_min.map(Some),
            salary_max: self.salary_max.map(Some),
            skills: self.skills,
            is_remote: self.is_remote,
            is_featured: self.is_featured,
            is_active: self.is_active,
            category_id: self.category_id.map(Some),
            expires_at: self.expires_at.map(Some),
            translations: self.translations.map(|translations| {
                translations
                    .into_iter()
                    .map(JobTranslationDto::into_translation)
                    .collect()
            }),
        }
    }
}

/// Cross-field check the derive can't express: both salary bounds present
/// implies `min <= max`.
pub fn check_salary_range(min: Option<i64>, max: Option<i64>) -> Result<(), AppError> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(AppError::bad_request(
                "salaryMin must not exceed salaryMax",
                json!({ "salaryMin": min, "salaryMax": max }),
            ));
        }
    }
    Ok(())
}
