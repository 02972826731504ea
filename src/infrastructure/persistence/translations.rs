//! Generic match-or-create for translation rows.
//!
//! Every translatable entity stores its per-language fields in a satellite
//! table with a `(owner, lang)` uniqueness constraint. Writes therefore
//! upsert by language: an existing row for the language is updated, a
//! missing one is created. The composition is implemented once here and
//! parameterized by the entity's translation type.

use crate::domain::entities::{
    CategoryTranslation, CityTranslation, CountryTranslation, JobTranslation,
};
use crate::error::AppError;
use sqlx::query_builder::Separated;
use sqlx::{PgConnection, Postgres, QueryBuilder};

/// Table shape of one translation type: where the rows live, how they point
/// at their owner, and which value columns they carry beyond `lang`.
pub trait TranslationUpsert {
    const TABLE: &'static str;
    const FK_COLUMN: &'static str;
    /// Value columns in bind order; all are updated on conflict.
    const COLUMNS: &'static [&'static str];

    fn lang(&self) -> &str;
    fn push_binds(&self, b: &mut Separated<'_, '_, Postgres, &'static str>);
}

/// Upserts `rows` for `owner_id` in a single statement:
/// `INSERT … ON CONFLICT (fk, lang) DO UPDATE`.
pub async fn upsert_translations<T: TranslationUpsert>(
    conn: &mut PgConnection,
    owner_id: i64,
    rows: &[T],
) -> Result<(), AppError> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut qb =
        QueryBuilder::<Postgres>::new(format!("INSERT INTO {} ({}, lang", T::TABLE, T::FK_COLUMN));
    for col in T::COLUMNS {
        qb.push(", ");
        qb.push(*col);
    }
    qb.push(") ");

    qb.push_values(rows, |mut b, row| {
        b.push_bind(owner_id);
        b.push_bind(row.lang().to_string());
        row.push_binds(&mut b);
    });

    qb.push(format!(" ON CONFLICT ({}, lang) DO UPDATE SET ", T::FK_COLUMN));
    for (i, col) in T::COLUMNS.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(format!("{col} = EXCLUDED.{col}"));
    }

    qb.build().execute(conn).await?;
    Ok(())
}

impl TranslationUpsert for JobTranslation {
    const TABLE: &'static str = "job_translations";
    const FK_COLUMN: &'static str = "job_id";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "company",
        "location",
        "benefits",
        "requirements",
    ];

    fn lang(&self) -> &str {
        &self.lang
    }

    fn push_binds(&self, b: &mut Separated<'_, '_, Postgres, &'static str>) {
        b.push_bind(self.title.clone());
        b.push_bind(self.description.clone());
        b.push_bind(self.company.clone());
        b.push_bind(self.location.clone());
        b.push_bind(self.benefits.clone());
        b.push_bind(self.requirements.clone());
    }
}

impl TranslationUpsert for CategoryTranslation {
    const TABLE: &'static str = "category_translations";
    const FK_COLUMN: &'static str = "category_id";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn lang(&self) -> &str {
        &self.lang
    }

    fn push_binds(&self, b: &mut Separated<'_, '_, Postgres, &'static str>) {
        b.push_bind(self.name.clone());
    }
}

impl TranslationUpsert for CityTranslation {
    const TABLE: &'static str = "city_translations";
    const FK_COLUMN: &'static str = "city_id";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn lang(&self) -> &str {
        &self.lang
    }

    fn push_binds(&self, b: &mut Separated<'_, '_, Postgres, &'static str>) {
        b.push_bind(self.name.clone());
    }
}

impl TranslationUpsert for CountryTranslation {
    const TABLE: &'static str = "country_translations";
    const FK_COLUMN: &'static str = "country_id";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn lang(&self) -> &str {
        &self.lang
    }

    fn push_binds(&self, b: &mut Separated<'_, '_, Postgres, &'static str>) {
        b.push_bind(self.name.clone());
    }
}
