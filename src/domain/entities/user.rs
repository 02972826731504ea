//! Public projection of the job owner.

use serde::{Deserialize, Serialize};

/// The only user shape ever exposed by read paths. Email and password hash
/// exist solely in the store; no view type carries them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
}
