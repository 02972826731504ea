//! PostgreSQL implementation of the country repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{CountryPatch, CountryRecord, CountryTranslation, NewCountry};
use crate::domain::repositories::CountryRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::translations::upsert_translations;

/// PostgreSQL repository for country storage.
pub struct PgCountryRepository {
    pool: Arc<PgPool>,
}

impl PgCountryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn load_translations(
        &self,
        ids: &[i64],
    ) -> Result<HashMap<i64, Vec<CountryTranslation>>, AppError> {
        let rows: Vec<(i64, String, String)> = sqlx::query_as(
            "SELECT country_id, lang, name FROM country_translations \
             WHERE country_id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut grouped: HashMap<i64, Vec<CountryTranslation>> = HashMap::new();
        for (country_id, lang, name) in rows {
            grouped
                .entry(country_id)
                .or_default()
                .push(CountryTranslation { lang, name });
        }
        Ok(grouped)
    }
}

#[async_trait]
impl CountryRepository for PgCountryRepository {
    async fn list(&self) -> Result<Vec<CountryRecord>, AppError> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, code FROM countries ORDER BY id")
                .fetch_all(self.pool.as_ref())
                .await?;

        let ids: Vec<i64> = rows.iter().map(|(id, _)| *id).collect();
        let mut translations = self.load_translations(&ids).await?;
        Ok(rows
            .into_iter()
            .map(|(id, code)| CountryRecord {
                id,
                code,
                translations: translations.remove(&id).unwrap_or_default(),
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CountryRecord>, AppError> {
        let row: Option<(i64, String)> =
            sqlx::query_as("SELECT id, code FROM countries WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        let Some((id, code)) = row else {
            return Ok(None);
        };
        let mut translations = self.load_translations(&[id]).await?;
        Ok(Some(CountryRecord {
            id,
            code,
            translations: translations.remove(&id).unwrap_or_default(),
        }))
    }

    async fn create(&self, new_country: NewCountry) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;
        let id: i64 = sqlx::query_scalar("INSERT INTO countries (code) VALUES ($1) RETURNING id")
            .bind(&new_country.code)
            .fetch_one(&mut *tx)
            .await?;
        upsert_translations(&mut tx, id, &new_country.translations).await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn update(&self, id: i64, patch: CountryPatch) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let touched = if let Some(code) = patch.code {
            sqlx::query("UPDATE countries SET code = $1 WHERE id = $2")
                .bind(code)
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected()
                > 0
        } else {
            sqlx::query_scalar::<_, i64>("SELECT id FROM countries WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .is_some()
        };
        if !touched {
            return Err(AppError::not_found(
                "Country not found",
                json!({ "id": id }),
            ));
        }

        if let Some(translations) = patch.translations {
            upsert_translations(&mut tx, id, &translations).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM countries WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Country not found",
                json!({ "id": id }),
            ));
        }
        Ok(())
    }
}
