//! Language negotiation query parameter.

use serde::Deserialize;

/// Optional `lang` query parameter; unset defaults to `"en"` downstream.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LangQuery {
    pub lang: Option<String>,
}
