use crate::api::employee::{CreateEmployee, PromoteEmployee};
use crate::api::payroll::RunPayroll;
use crate::api::project::{
    AssignEmployee, CompleteMilestone, CreateMilestone, CreateProject, RemoveAssignment,
    UpdateHours, UpdateMilestone, UpdateProject,
};
use crate::model::assignment::{EmployeeProjectRow, ProductivityRow, TeamMember};
use crate::model::employee::{EmployeeDetail, EmployeeSummary, EmploymentType};
use crate::model::job_history::JobHistory;
use crate::model::milestone::{Milestone, MilestoneStatus};
use crate::model::payroll::{
    DepartmentPayrollRow, PayrollRecord, PayrollReportRow, PayrollRunEntry, YearlyTaxSummary,
};
use crate::model::project::{
    DepartmentProjectsRow, ProjectDetail, ProjectRow, ProjectStatistics,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Workforce API",
        version = "1.0.0",
        description = r#"
## HR/Payroll & Project Management

This API fronts a company database with two applications sharing one
relational store.

### Key Features
- **Employee Management**
  - Employee records with a time-versioned job-history ledger
  - Promotions that atomically close and open job-history rows
- **Payroll Processing**
  - Monthly payroll runs for salaried and hourly employees
  - Fixed-rate federal/state/other withholding, W-2 style yearly summaries
- **Project Management**
  - Projects, team assignments with hour logging, milestone tracking
- **Reporting**
  - Department payroll and project summaries, employee productivity

### Response Format
- JSON-based RESTful responses
- Lookups return 404 with a message body when the record does not exist

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::promote_employee,
        crate::api::employee::salary_history,

        crate::api::payroll::run_payroll,
        crate::api::payroll::payroll_report,
        crate::api::payroll::employee_payroll_history,
        crate::api::payroll::tax_summary,
        crate::api::payroll::department_payroll_summary,

        crate::api::project::create_project,
        crate::api::project::list_projects,
        crate::api::project::get_project,
        crate::api::project::update_project,
        crate::api::project::project_team,
        crate::api::project::assign_employee,
        crate::api::project::update_hours,
        crate::api::project::remove_assignment,
        crate::api::project::employee_projects,
        crate::api::project::add_milestone,
        crate::api::project::list_milestones,
        crate::api::project::update_milestone,
        crate::api::project::complete_milestone,
        crate::api::project::project_statistics,
        crate::api::project::department_projects_summary,
        crate::api::project::productivity_report
    ),
    components(
        schemas(
            CreateEmployee,
            PromoteEmployee,
            EmployeeDetail,
            EmployeeSummary,
            EmploymentType,
            JobHistory,
            RunPayroll,
            PayrollRecord,
            PayrollRunEntry,
            PayrollReportRow,
            YearlyTaxSummary,
            DepartmentPayrollRow,
            CreateProject,
            UpdateProject,
            ProjectDetail,
            ProjectRow,
            ProjectStatistics,
            DepartmentProjectsRow,
            AssignEmployee,
            UpdateHours,
            RemoveAssignment,
            TeamMember,
            EmployeeProjectRow,
            ProductivityRow,
            CreateMilestone,
            UpdateMilestone,
            CompleteMilestone,
            Milestone,
            MilestoneStatus
        )
    ),
    tags(
        (name = "Employee", description = "Employee and job-history APIs"),
        (name = "Payroll", description = "Payroll processing and tax summary APIs"),
        (name = "Project", description = "Project lifecycle APIs"),
        (name = "Team", description = "Team assignment APIs"),
        (name = "Milestone", description = "Milestone tracking APIs"),
        (name = "Report", description = "Aggregate reporting APIs"),
    )
)]
pub struct ApiDoc;
