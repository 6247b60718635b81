use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct TeamMember {
    pub employee_number: i32,
    pub employee_name: String,
    pub title: String,
    pub role: String,
    #[schema(value_type = String, example = "120.0")]
    pub hours_worked: Decimal,
    #[schema(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = Option<String>, format = "date", nullable = true)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeProjectRow {
    pub project_number: i32,
    pub project_name: String,
    pub role: String,
    #[schema(value_type = String)]
    pub hours_worked: Decimal,
    #[schema(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = Option<String>, format = "date", nullable = true)]
    pub end_date: Option<NaiveDate>,
    pub manager_name: String,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct ProductivityRow {
    pub employee_number: i32,
    pub employee_name: String,
    pub title: String,
    pub department_name: Option<String>,
    pub projects_count: i64,
    #[schema(value_type = Option<String>, nullable = true)]
    pub total_hours: Option<Decimal>,
    pub current_projects: i64,
}
