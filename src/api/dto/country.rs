//! DTOs for country endpoints.

use serde::Deserialize;
use validator::Validate;

use super::translation::NameTranslationDto;
use crate::domain::entities::{CountryPatch, CountryTranslation, NewCountry};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCountryRequest {
    #[validate(length(min = 2, max = 2))]
    pub code: String,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub translations: Vec<NameTranslationDto>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCountryRequest {
    #[validate(length(min = 2, max = 2))]
    pub code: Option<String>,
    #[validate(nested)]
    pub translations: Option<Vec<NameTranslationDto>>,
}

fn into_translations(dtos: Vec<NameTranslationDto>) -> Vec<CountryTranslation> {
    dtos.into_iter()
        .map(|t| CountryTranslation {
            lang: t.lang,
            name: t.name,
        })
        .collect()
}

impl CreateCountryRequest {
    pub fn into_new_country(self) -> NewCountry {
        NewCountry {
            code: self.code.to_uppercase(),
            translations: into_translations(self.translations),
        }
    }
}

impl UpdateCountryRequest {
    pub fn into_patch(self) -> CountryPatch {
        CountryPatch {
            code: self.code.map(|c| c.to_uppercase()),
            translations: self.translations.map(into_translations),
        }
    }
}
