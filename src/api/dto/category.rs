//! DTOs for category endpoints.

use serde::Deserialize;
use validator::Validate;

use super::translation::NameTranslationDto;
use crate::domain::entities::{CategoryPatch, CategoryTranslation};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub translations: Vec<NameTranslationDto>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub translations: Vec<NameTranslationDto>,
}

fn into_translations(dtos: Vec<NameTranslationDto>) -> Vec<CategoryTranslation> {
    dtos.into_iter()
        .map(|t| CategoryTranslation {
            lang: t.lang,
            name: t.name,
        })
        .collect()
}

impl CreateCategoryRequest {
    pub fn into_translations(self) -> Vec<CategoryTranslation> {
        into_translations(self.translations)
    }
}

impl UpdateCategoryRequest {
    pub fn into_patch(self) -> CategoryPatch {
        CategoryPatch {
            translations: into_translations(self.translations),
        }
    }
}
