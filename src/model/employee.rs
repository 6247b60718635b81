use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Which of the two pay schemes applies to an employee. A salaried
/// employee's pay comes from the current JobHistory row; an hourly
/// employee's from `Employee.hourly_rate`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EmploymentType {
    Salaried,
    Hourly,
}

/// Detail view joining the current job-history row and the org units.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeDetail {
    #[schema(example = 1001)]
    pub employee_number: i32,

    #[schema(example = "Alice Johnson")]
    pub employee_name: String,

    #[schema(example = "Senior Software Engineer")]
    pub title: String,

    #[schema(example = "salaried")]
    pub employment_type: String,

    #[schema(value_type = Option<String>, nullable = true)]
    pub hourly_rate: Option<Decimal>,

    #[schema(value_type = Option<String>, example = "110000.00", nullable = true)]
    pub current_salary: Option<Decimal>,

    #[schema(example = "Software Development", nullable = true)]
    pub department_name: Option<String>,

    #[schema(example = "Technology Division", nullable = true)]
    pub division_name: Option<String>,

    #[schema(example = "2023-01-01", value_type = Option<String>, format = "date", nullable = true)]
    pub current_job_start: Option<NaiveDate>,
}

/// Roster row: salary and rate coalesced to zero, org unit coalesced to
/// department, then division, then "Unassigned".
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeSummary {
    pub employee_number: i32,
    pub employee_name: String,
    pub title: String,
    pub employment_type: String,
    #[schema(value_type = String)]
    pub salary: Decimal,
    #[schema(value_type = String)]
    pub hourly_rate: Decimal,
    pub org_unit: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn employment_type_parses_stored_values() {
        assert_eq!(
            EmploymentType::from_str("salaried").unwrap(),
            EmploymentType::Salaried
        );
        assert_eq!(
            EmploymentType::from_str("hourly").unwrap(),
            EmploymentType::Hourly
        );
        assert!(EmploymentType::from_str("contractor").is_err());
    }

    #[test]
    fn employment_type_displays_lowercase() {
        assert_eq!(EmploymentType::Salaried.to_string(), "salaried");
        assert_eq!(EmploymentType::Hourly.to_string(), "hourly");
    }
}
