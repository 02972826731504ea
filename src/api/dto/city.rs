//! DTOs for city endpoints.

use serde::Deserialize;
use validator::Validate;

use super::translation::NameTranslationDto;
use crate::domain::entities::{CityPatch, CityTranslation, NewCity};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCityRequest {
    pub country_id: i64,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub translations: Vec<NameTranslationDto>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCityRequest {
    pub country_id: Option<i64>,
    #[validate(nested)]
    pub translations: Option<Vec<NameTranslationDto>>,
}

fn into_translations(dtos: Vec<NameTranslationDto>) -> Vec<CityTranslation> {
    dtos.into_iter()
        .map(|t| CityTranslation {
            lang: t.lang,
            name: t.name,
        })
        .collect()
}

impl CreateCityRequest {
    pub fn into_new_city(self) -> NewCity {
        NewCity {
            country_id: self.country_id,
            translations: into_translations(self.translations),
        }
    }
}

impl UpdateCityRequest {
    pub fn into_patch(self) -> CityPatch {
        CityPatch {
            country_id: self.country_id,
            translations: self.translations.map(into_translations),
        }
    }
}

/// Query parameters for the city list endpoint. `country_id` is parsed
/// leniently: junk degrades to "no filter".
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CityListQuery {
    pub country_id: Option<String>,
    pub lang: Option<String>,
}

impl CityListQuery {
    pub fn country_id(&self) -> Option<i64> {
        self.country_id.as_deref().and_then(|v| v.trim().parse().ok())
    }
}
