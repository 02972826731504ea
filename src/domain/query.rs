//! Query specification builder for job search.
//!
//! Converts the raw, untrusted search parameters into a normalized,
//! store-agnostic [`JobQuerySpec`]. Parsing is deliberately lenient: a
//! malformed dimension degrades to "ignored", never to a request error.
//! The normalized spec has a canonical serialized form, so semantically
//! equal requests always map to the same cache key.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Experience, JobType};
use crate::domain::localization::{normalize_lang, search_langs};

/// Raw job search parameters as they arrive on the query string.
///
/// Every dimension is string-typed so that junk input can never reject the
/// request; normalization happens in [`build_query_spec`]. List-valued
/// params are comma-separated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobSearchParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub lang: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub job_types: Option<String>,
    pub experience: Option<String>,
    pub category: Option<String>,
    pub country_id: Option<String>,
    pub city_id: Option<String>,
    pub remote: Option<String>,
    pub salary_min: Option<String>,
    pub salary_max: Option<String>,
}

/// Scalar columns a predicate can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    IsActive,
    IsRemote,
    JobType,
    Experience,
    CountryId,
    CityId,
    SalaryMin,
    SalaryMax,
}

/// Translated text columns searchable by the free-text dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    Title,
    Description,
}

/// A scalar literal inside a predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
}

/// Store-agnostic predicate tree. The store adapter renders it into SQL;
/// tests evaluate it in memory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    Eq {
        field: Field,
        value: Value,
    },
    In {
        field: Field,
        values: Vec<Value>,
    },
    Gte {
        field: Field,
        value: i64,
    },
    Lte {
        field: Field,
        value: i64,
    },
    /// Case-insensitive substring match on a translated text column,
    /// restricted to translations in `langs`.
    TranslatedContains {
        field: TextField,
        needle: String,
        langs: Vec<String>,
    },
    /// Category membership by translated category name over a language set.
    CategoryIn {
        names: Vec<String>,
        langs: Vec<String>,
    },
    /// Set-intersection test against the job's skills column.
    SkillsIntersect {
        terms: Vec<String>,
    },
    And {
        all: Vec<Predicate>,
    },
    Or {
        any: Vec<Predicate>,
    },
}

/// Whitelisted sort keys. Anything else falls back to [`SortField::PostedAt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    PostedAt,
    SalaryMin,
    SalaryMax,
    CreatedAt,
}

impl SortField {
    /// Accepts both `postedAt` and `posted_at` spellings; unknown values
    /// fall back to the default sort.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().replace('_', "").as_str() {
            "salarymin" => SortField::SalaryMin,
            "salarymax" => SortField::SalaryMax,
            "createdat" => SortField::CreatedAt,
            _ => SortField::PostedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Normalized, fully-determined search query. Field order is fixed, so the
/// serialized form is canonical and usable as a cache key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobQuerySpec {
    pub lang: String,
    pub predicate: Predicate,
    pub sort: SortField,
    pub order: SortOrder,
    pub page: i64,
    pub limit: i64,
}

impl JobQuerySpec {
    pub fn offset(&self) -> i64 {
        ((self.page - 1) * self.limit).max(0)
    }

    /// Deterministic cache key: the entity namespace plus the canonical
    /// JSON form of the spec.
    pub fn cache_key(&self) -> String {
        let canonical =
            serde_json::to_string(self).expect("query spec serialization is infallible");
        format!("job:search:{canonical}")
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn parse_i64(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
}

/// Builds the normalized query spec from raw parameters. Never fails:
/// invalid dimensions are dropped, out-of-range pagination is clamped.
pub fn build_query_spec(raw: &JobSearchParams) -> JobQuerySpec {
    let lang = normalize_lang(raw.lang.as_deref());
    let langs = search_langs(&lang);

    let mut all = vec![Predicate::Eq {
        field: Field::IsActive,
        value: Value::Bool(true),
    }];

    // Employment type: the multi-valued dimension wins over the single one.
    let types: Vec<JobType> = split_list(raw.job_types.as_deref())
        .iter()
        .filter_map(|v| JobType::parse(v))
        .collect();
    if !types.is_empty() {
        all.push(Predicate::In {
            field: Field::JobType,
            values: types
                .into_iter()
                .map(|t| Value::Str(t.as_str().to_string()))
                .collect(),
        });
    } else if let Some(t) = raw.job_type.as_deref().and_then(JobType::parse) {
        all.push(Predicate::Eq {
            field: Field::JobType,
            value: Value::Str(t.as_str().to_string()),
        });
    }

    let experience: Vec<Experience> = split_list(raw.experience.as_deref())
        .iter()
        .filter_map(|v| Experience::parse(v))
        .collect();
    if !experience.is_empty() {
        all.push(Predicate::In {
            field: Field::Experience,
            values: experience
                .into_iter()
                .map(|e| Value::Str(e.as_str().to_string()))
                .collect(),
        });
    }

    if let Some(country_id) = parse_i64(raw.country_id.as_deref()) {
        all.push(Predicate::Eq {
            field: Field::CountryId,
            value: Value::Int(country_id),
        });
    }
    if let Some(city_id) = parse_i64(raw.city_id.as_deref()) {
        all.push(Predicate::Eq {
            field: Field::CityId,
            value: Value::Int(city_id),
        });
    }

    // Junk entries ("undefined", "null", empty) are dropped before building
    // the sub-predicate; an empty remainder means "no filter", not
    // "match nothing".
    let categories: Vec<String> = split_list(raw.category.as_deref())
        .into_iter()
        .filter(|v| v != "undefined" && v != "null")
        .collect();
    if !categories.is_empty() {
        all.push(Predicate::CategoryIn {
            names: categories,
            langs: langs.clone(),
        });
    }

    match raw.remote.as_deref().map(str::trim) {
        Some("true") => all.push(Predicate::Eq {
            field: Field::IsRemote,
            value: Value::Bool(true),
        }),
        Some("false") => all.push(Predicate::Eq {
            field: Field::IsRemote,
            value: Value::Bool(false),
        }),
        _ => {}
    }

    if let Some(min) = parse_i64(raw.salary_min.as_deref()).filter(|v| *v >= 0) {
        all.push(Predicate::Gte {
            field: Field::SalaryMin,
            value: min,
        });
    }
    if let Some(max) = parse_i64(raw.salary_max.as_deref()).filter(|v| *v >= 0) {
        all.push(Predicate::Lte {
            field: Field::SalaryMax,
            value: max,
        });
    }

    if let Some(search) = raw.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let terms: Vec<String> = search
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        all.push(Predicate::Or {
            any: vec![
                Predicate::TranslatedContains {
                    field: TextField::Title,
                    needle: search.to_string(),
                    langs: langs.clone(),
                },
                Predicate::TranslatedContains {
                    field: TextField::Description,
                    needle: search.to_string(),
                    langs,
                },
                Predicate::SkillsIntersect { terms },
            ],
        });
    }

    let sort = raw
        .sort
        .as_deref()
        .map(SortField::parse)
        .unwrap_or(SortField::PostedAt);
    let order = raw
        .order
        .as_deref()
        .map(SortOrder::parse)
        .unwrap_or(SortOrder::Desc);

    let limit = parse_i64(raw.limit.as_deref())
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(1, MAX_LIMIT);
    let page = parse_i64(raw.page.as_deref()).unwrap_or(1).max(1);

    JobQuerySpec {
        lang,
        predicate: Predicate::And { all },
        sort,
        order,
        page,
        limit,
    }
}
