use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct ProjectDetail {
    #[schema(example = 1)]
    pub project_number: i32,
    #[schema(example = "Customer Portal Redesign")]
    pub project_name: String,
    #[schema(value_type = String, example = "250000.00")]
    pub budget: Decimal,
    #[schema(value_type = String, format = "date")]
    pub date_started: NaiveDate,
    #[schema(value_type = Option<String>, format = "date", nullable = true)]
    pub date_ended: Option<NaiveDate>,
    pub manager_name: String,
    pub manager_id: i32,
    pub department_name: String,
    pub department_id: i32,
}

/// Listing row; `status` is derived from `date_ended` in the query.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct ProjectRow {
    pub project_number: i32,
    pub project_name: String,
    #[schema(value_type = String)]
    pub budget: Decimal,
    #[schema(value_type = String, format = "date")]
    pub date_started: NaiveDate,
    #[schema(value_type = Option<String>, format = "date", nullable = true)]
    pub date_ended: Option<NaiveDate>,
    pub manager_name: String,
    pub department_name: String,
    #[schema(example = "Active")]
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectStatistics {
    pub project: ProjectDetail,
    pub team_size: i64,
    pub current_team_size: i64,
    #[schema(value_type = String)]
    pub total_person_hours: Decimal,
    pub total_milestones: i64,
    pub completed_milestones: i64,
    pub in_progress_milestones: i64,
    pub pending_milestones: i64,
}

/// Per-department rollup of project counts, budget and person-hours.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct DepartmentProjectsRow {
    pub department_name: String,
    pub total_projects: i64,
    pub active_projects: i64,
    #[schema(value_type = Option<String>, nullable = true)]
    pub total_budget: Option<Decimal>,
    #[schema(value_type = Option<String>, nullable = true)]
    pub avg_team_size: Option<Decimal>,
    #[schema(value_type = Option<String>, nullable = true)]
    pub total_person_hours: Option<Decimal>,
}
