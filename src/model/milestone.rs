use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Milestone workflow state. Stored as text; transitions are not guarded,
/// the generic update path accepts any assignment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Milestone {
    pub milestone_id: i32,
    pub milestone_name: String,
    pub description: Option<String>,
    #[schema(value_type = String, format = "date")]
    pub due_date: NaiveDate,
    #[schema(value_type = Option<String>, format = "date", nullable = true)]
    pub completion_date: Option<NaiveDate>,
    #[schema(example = "in_progress")]
    pub status: String,
    pub details_done: Option<String>,
    pub details_remaining: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_round_trips_through_storage_form() {
        for status in [
            MilestoneStatus::Pending,
            MilestoneStatus::InProgress,
            MilestoneStatus::Completed,
        ] {
            let stored = status.to_string();
            assert_eq!(MilestoneStatus::from_str(&stored).unwrap(), status);
        }
        assert_eq!(MilestoneStatus::InProgress.to_string(), "in_progress");
    }
}
