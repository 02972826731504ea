//! Shared name-translation DTO for category, city and country writes.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A `{lang, name}` pair submitted with a write.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct NameTranslationDto {
    #[validate(length(min = 1))]
    pub lang: String,
    #[validate(length(min = 1))]
    pub name: String,
}
