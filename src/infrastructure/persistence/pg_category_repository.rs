//! PostgreSQL implementation of the category repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{CategoryPatch, CategoryRecord, CategoryTranslation};
use crate::domain::repositories::CategoryRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::translations::upsert_translations;

/// PostgreSQL repository for category storage.
pub struct PgCategoryRepository {
    pool: Arc<PgPool>,
}

impl PgCategoryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn load_translations(
        &self,
        ids: &[i64],
    ) -> Result<HashMap<i64, Vec<CategoryTranslation>>, AppError> {
        let rows: Vec<(i64, String, String)> = sqlx::query_as(
            "SELECT category_id, lang, name FROM category_translations \
             WHERE category_id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut grouped: HashMap<i64, Vec<CategoryTranslation>> = HashMap::new();
        for (category_id, lang, name) in rows {
            grouped
                .entry(category_id)
                .or_default()
                .push(CategoryTranslation { lang, name });
        }
        Ok(grouped)
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list(&self) -> Result<Vec<CategoryRecord>, AppError> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM categories ORDER BY id")
            .fetch_all(self.pool.as_ref())
            .await?;

        let mut translations = self.load_translations(&ids).await?;
        Ok(ids
            .into_iter()
            .map(|id| CategoryRecord {
                id,
                translations: translations.remove(&id).unwrap_or_default(),
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CategoryRecord>, AppError> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        let Some(id) = found else {
            return Ok(None);
        };
        let mut translations = self.load_translations(&[id]).await?;
        Ok(Some(CategoryRecord {
            id,
            translations: translations.remove(&id).unwrap_or_default(),
        }))
    }

    async fn create(&self, translations: Vec<CategoryTranslation>) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;
        let id: i64 = sqlx::query_scalar("INSERT INTO categories DEFAULT VALUES RETURNING id")
            .fetch_one(&mut *tx)
            .await?;
        upsert_translations(&mut tx, id, &translations).await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn update(&self, id: i64, patch: CategoryPatch) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Err(AppError::not_found(
                "Category not found",
                json!({ "id": id }),
            ));
        }

        upsert_translations(&mut tx, id, &patch.translations).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Category not found",
                json!({ "id": id }),
            ));
        }
        Ok(())
    }
}
