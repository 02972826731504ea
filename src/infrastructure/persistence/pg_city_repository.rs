//! PostgreSQL implementation of the city repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::domain::entities::{
    CityPatch, CityRecord, CityTranslation, CountryRecord, CountryTranslation, NewCity,
};
use crate::domain::repositories::CityRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::translations::upsert_translations;

/// PostgreSQL repository for city storage. City records are loaded together
/// with their owning country so read paths can localize the nested relation.
pub struct PgCityRepository {
    pool: Arc<PgPool>,
}

impl PgCityRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn assemble(&self, rows: Vec<(i64, i64)>) -> Result<Vec<CityRecord>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let city_ids: Vec<i64> = rows.iter().map(|(id, _)| *id).collect();
        let country_ids: Vec<i64> = rows
            .iter()
            .map(|(_, country_id)| *country_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut city_translations: HashMap<i64, Vec<CityTranslation>> = HashMap::new();
        let translation_rows: Vec<(i64, String, String)> = sqlx::query_as(
            "SELECT city_id, lang, name FROM city_translations \
             WHERE city_id = ANY($1) ORDER BY id",
        )
        .bind(&city_ids)
        .fetch_all(self.pool.as_ref())
        .await?;
        for (city_id, lang, name) in translation_rows {
            city_translations
                .entry(city_id)
                .or_default()
                .push(CityTranslation { lang, name });
        }

        let mut country_translations: HashMap<i64, Vec<CountryTranslation>> = HashMap::new();
        let country_translation_rows: Vec<(i64, String, String)> = sqlx::query_as(
            "SELECT country_id, lang, name FROM country_translations \
             WHERE country_id = ANY($1) ORDER BY id",
        )
        .bind(&country_ids)
        .fetch_all(self.pool.as_ref())
        .await?;
        for (country_id, lang, name) in country_translation_rows {
            country_translations
                .entry(country_id)
                .or_default()
                .push(CountryTranslation { lang, name });
        }

        let mut countries: HashMap<i64, CountryRecord> = HashMap::new();
        let country_rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, code FROM countries WHERE id = ANY($1)")
                .bind(&country_ids)
                .fetch_all(self.pool.as_ref())
                .await?;
        for (id, code) in country_rows {
            countries.insert(
                id,
                CountryRecord {
                    id,
                    code,
                    translations: country_translations.remove(&id).unwrap_or_default(),
                },
            );
        }

        Ok(rows
            .into_iter()
            .map(|(id, country_id)| CityRecord {
                id,
                country_id,
                translations: city_translations.remove(&id).unwrap_or_default(),
                country: countries.get(&country_id).cloned(),
            })
            .collect())
    }
}

#[async_trait]
impl CityRepository for PgCityRepository {
    async fn list(&self, country_id: Option<i64>) -> Result<Vec<CityRecord>, AppError> {
        let rows: Vec<(i64, i64)> = match country_id {
            Some(country_id) => {
                sqlx::query_as("SELECT id, country_id FROM cities WHERE country_id = $1 ORDER BY id")
                    .bind(country_id)
                    .fetch_all(self.pool.as_ref())
                    .await?
            }
            None => {
                sqlx::query_as("SELECT id, country_id FROM cities ORDER BY id")
                    .fetch_all(self.pool.as_ref())
                    .await?
            }
        };

        self.assemble(rows).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CityRecord>, AppError> {
        let row: Option<(i64, i64)> =
            sqlx::query_as("SELECT id, country_id FROM cities WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut records = self.assemble(vec![row]).await?;
        Ok(records.pop())
    }

    async fn create(&self, new_city: NewCity) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;
        let id: i64 =
            sqlx::query_scalar("INSERT INTO cities (country_id) VALUES ($1) RETURNING id")
                .bind(new_city.country_id)
                .fetch_one(&mut *tx)
                .await?;
        upsert_translations(&mut tx, id, &new_city.translations).await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn update(&self, id: i64, patch: CityPatch) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let touched = if let Some(country_id) = patch.country_id {
            sqlx::query("UPDATE cities SET country_id = $1 WHERE id = $2")
                .bind(country_id)
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected()
                > 0
        } else {
            sqlx::query_scalar::<_, i64>("SELECT id FROM cities WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .is_some()
        };
        if !touched {
            return Err(AppError::not_found("City not found", json!({ "id": id })));
        }

        if let Some(translations) = patch.translations {
            upsert_translations(&mut tx, id, &translations).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("City not found", json!({ "id": id })));
        }
        Ok(())
    }
}
