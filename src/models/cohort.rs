//! Cohort information served by `GET /info`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Static facts about the running cohort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CohortInfo {
    /// Academy running the cohort.
    pub academy: String,
    /// Curriculum taught.
    pub curriculum: String,
    /// Cohort number.
    pub cohort: u32,
}
