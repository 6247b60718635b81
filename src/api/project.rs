use actix_web::error::ErrorBadRequest;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::api::payroll::DepartmentQuery;
use crate::model::milestone::MilestoneStatus;
use crate::projects::{MilestoneChanges, ProjectChanges, ProjectLedger};

#[derive(Deserialize, ToSchema)]
pub struct CreateProject {
    #[schema(example = 8)]
    pub project_number: i32,

    #[schema(example = "Cloud Infrastructure Upgrade")]
    pub project_name: String,

    #[schema(value_type = String, example = "300000.00")]
    pub budget: Decimal,

    #[schema(example = "2025-04-01", format = "date", value_type = String)]
    pub date_started: NaiveDate,

    #[schema(example = "2025-12-31", format = "date", value_type = Option<String>, nullable = true)]
    pub date_ended: Option<NaiveDate>,

    #[schema(example = 3001)]
    pub manager_emp_id: i32,

    #[schema(example = 3)]
    pub department_id: i32,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateProject {
    pub project_name: Option<String>,
    #[schema(value_type = Option<String>, nullable = true)]
    pub budget: Option<Decimal>,
    #[schema(format = "date", value_type = Option<String>, nullable = true)]
    pub date_ended: Option<NaiveDate>,
    pub manager_emp_id: Option<i32>,
}

#[derive(Deserialize, ToSchema)]
pub struct AssignEmployee {
    #[schema(example = 3001)]
    pub employee_number: i32,

    #[schema(example = "Project Manager")]
    pub role: String,

    #[schema(example = "2025-04-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,

    /// Hours already logged at assignment time, usually zero.
    #[schema(value_type = Option<String>, example = "0", nullable = true)]
    pub hours_worked: Option<Decimal>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateHours {
    /// Hours to add to the running total, not an absolute value.
    #[schema(value_type = String, example = "40")]
    pub additional_hours: Decimal,
}

#[derive(Deserialize, ToSchema)]
pub struct RemoveAssignment {
    #[schema(example = "2025-03-31", format = "date", value_type = String)]
    pub end_date: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateMilestone {
    #[schema(example = "Backend Development")]
    pub milestone_name: String,

    pub description: Option<String>,

    #[schema(example = "2025-03-15", format = "date", value_type = String)]
    pub due_date: NaiveDate,

    #[schema(example = "pending")]
    pub status: Option<MilestoneStatus>,

    pub details_done: Option<String>,
    pub details_remaining: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateMilestone {
    pub milestone_name: Option<String>,
    pub description: Option<String>,
    #[schema(format = "date", value_type = Option<String>, nullable = true)]
    pub due_date: Option<NaiveDate>,
    #[schema(format = "date", value_type = Option<String>, nullable = true)]
    pub completion_date: Option<NaiveDate>,
    pub status: Option<MilestoneStatus>,
    pub details_done: Option<String>,
    pub details_remaining: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct CompleteMilestone {
    /// Defaults to today when omitted.
    #[schema(example = "2025-03-20", format = "date", value_type = Option<String>, nullable = true)]
    pub completion_date: Option<NaiveDate>,
}

#[derive(Deserialize, IntoParams)]
pub struct ProjectListQuery {
    /// Include completed projects (default true)
    pub include_completed: Option<bool>,
}

#[derive(Deserialize, IntoParams)]
pub struct CurrentOnlyQuery {
    /// Restrict to current assignments (default true)
    pub current_only: Option<bool>,
}

// -------------------- Projects --------------------

/// Create Project
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProject,
    responses(
        (status = 201, description = "Project created", body = Object, example = json!({
            "message": "Project created",
            "project_number": 8
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Project"
)]
pub async fn create_project(
    ledger: web::Data<ProjectLedger>,
    payload: web::Json<CreateProject>,
) -> actix_web::Result<impl Responder> {
    let project_number = ledger
        .create_project(
            payload.project_number,
            &payload.project_name,
            payload.budget,
            payload.date_started,
            payload.manager_emp_id,
            payload.department_id,
            payload.date_ended,
        )
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create project");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Project created",
        "project_number": project_number
    })))
}

/// List projects
#[utoipa::path(
    get,
    path = "/api/projects",
    params(ProjectListQuery),
    responses(
        (status = 200, description = "Projects with derived status", body = [crate::model::project::ProjectRow])
    ),
    tag = "Project"
)]
pub async fn list_projects(
    ledger: web::Data<ProjectLedger>,
    query: web::Query<ProjectListQuery>,
) -> actix_web::Result<impl Responder> {
    let rows = ledger
        .list_projects(query.include_completed.unwrap_or(true))
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list projects");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Get Project by number
#[utoipa::path(
    get,
    path = "/api/projects/{project_number}",
    params(
        ("project_number", description = "Project number")
    ),
    responses(
        (status = 200, description = "Project found", body = crate::model::project::ProjectDetail),
        (status = 404, description = "Project not found", body = Object, example = json!({
            "message": "Project not found"
        }))
    ),
    tag = "Project"
)]
pub async fn get_project(
    ledger: web::Data<ProjectLedger>,
    path: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    let project_number = path.into_inner();

    let detail = ledger.project_info(project_number).await.map_err(|e| {
        error!(error = %e, project_number, "Failed to fetch project");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    match detail {
        Some(project) => Ok(HttpResponse::Ok().json(project)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Project not found"
        }))),
    }
}

/// Update Project fields
#[utoipa::path(
    put,
    path = "/api/projects/{project_number}",
    params(
        ("project_number", description = "Project number")
    ),
    request_body = UpdateProject,
    responses(
        (status = 200, description = "Project updated"),
        (status = 400, description = "No fields provided for update"),
        (status = 404, description = "Project not found")
    ),
    tag = "Project"
)]
pub async fn update_project(
    ledger: web::Data<ProjectLedger>,
    path: web::Path<i32>,
    payload: web::Json<UpdateProject>,
) -> actix_web::Result<impl Responder> {
    let project_number = path.into_inner();
    let payload = payload.into_inner();

    let changes = ProjectChanges {
        project_name: payload.project_name,
        budget: payload.budget,
        date_ended: payload.date_ended,
        manager_emp_id: payload.manager_emp_id,
    };

    if changes.is_empty() {
        return Err(ErrorBadRequest("No fields provided for update"));
    }

    let updated = ledger
        .update_project(project_number, changes)
        .await
        .map_err(|e| {
            error!(error = %e, project_number, "Failed to update project");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if !updated {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Project not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Project updated"
    })))
}

// -------------------- Team --------------------

/// Project team
#[utoipa::path(
    get,
    path = "/api/projects/{project_number}/team",
    params(
        ("project_number", description = "Project number"),
        CurrentOnlyQuery
    ),
    responses(
        (status = 200, description = "Assigned employees", body = [crate::model::assignment::TeamMember])
    ),
    tag = "Team"
)]
pub async fn project_team(
    ledger: web::Data<ProjectLedger>,
    path: web::Path<i32>,
    query: web::Query<CurrentOnlyQuery>,
) -> actix_web::Result<impl Responder> {
    let project_number = path.into_inner();

    let members = ledger
        .project_team(project_number, query.current_only.unwrap_or(true))
        .await
        .map_err(|e| {
            error!(error = %e, project_number, "Failed to fetch project team");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(members))
}

/// Assign an employee to a project
#[utoipa::path(
    post,
    path = "/api/projects/{project_number}/team",
    params(
        ("project_number", description = "Project number")
    ),
    request_body = AssignEmployee,
    responses(
        (status = 201, description = "Employee assigned", body = Object, example = json!({
            "message": "Employee assigned"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Team"
)]
pub async fn assign_employee(
    ledger: web::Data<ProjectLedger>,
    path: web::Path<i32>,
    payload: web::Json<AssignEmployee>,
) -> actix_web::Result<impl Responder> {
    let project_number = path.into_inner();

    ledger
        .assign(
            payload.employee_number,
            project_number,
            &payload.role,
            payload.start_date,
            payload.hours_worked.unwrap_or_default(),
            true,
        )
        .await
        .map_err(|e| {
            error!(error = %e, project_number, "Failed to assign employee");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Employee assigned"
    })))
}

/// Log additional hours on an assignment
#[utoipa::path(
    put,
    path = "/api/projects/{project_number}/team/{employee_number}/hours",
    params(
        ("project_number", description = "Project number"),
        ("employee_number", description = "Employee number")
    ),
    request_body = UpdateHours,
    responses(
        (status = 200, description = "Hours updated", body = Object, example = json!({
            "message": "Hours updated",
            "total_hours": "240.0"
        })),
        (status = 404, description = "No matching assignment")
    ),
    tag = "Team"
)]
pub async fn update_hours(
    ledger: web::Data<ProjectLedger>,
    path: web::Path<(i32, i32)>,
    payload: web::Json<UpdateHours>,
) -> actix_web::Result<impl Responder> {
    let (project_number, employee_number) = path.into_inner();

    let total = ledger
        .update_hours(employee_number, project_number, payload.additional_hours)
        .await
        .map_err(|e| {
            error!(error = %e, employee_number, project_number, "Failed to update hours");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match total {
        Some(total_hours) => Ok(HttpResponse::Ok().json(json!({
            "message": "Hours updated",
            "total_hours": total_hours
        }))),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "No matching assignment"
        }))),
    }
}

/// Remove an employee from a project
///
/// Stamps the end date and clears the current flag; the assignment row is
/// kept for history.
#[utoipa::path(
    put,
    path = "/api/projects/{project_number}/team/{employee_number}/remove",
    params(
        ("project_number", description = "Project number"),
        ("employee_number", description = "Employee number")
    ),
    request_body = RemoveAssignment,
    responses(
        (status = 200, description = "Employee removed from project"),
        (status = 404, description = "No matching assignment")
    ),
    tag = "Team"
)]
pub async fn remove_assignment(
    ledger: web::Data<ProjectLedger>,
    path: web::Path<(i32, i32)>,
    payload: web::Json<RemoveAssignment>,
) -> actix_web::Result<impl Responder> {
    let (project_number, employee_number) = path.into_inner();

    let removed = ledger
        .remove(employee_number, project_number, payload.end_date)
        .await
        .map_err(|e| {
            error!(error = %e, employee_number, project_number, "Failed to remove assignment");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if !removed {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "No matching assignment"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee removed from project"
    })))
}

/// Projects an employee is or was assigned to
#[utoipa::path(
    get,
    path = "/api/employees/{employee_number}/projects",
    params(
        ("employee_number", description = "Employee number"),
        CurrentOnlyQuery
    ),
    responses(
        (status = 200, description = "Assignments with project info", body = [crate::model::assignment::EmployeeProjectRow])
    ),
    tag = "Team"
)]
pub async fn employee_projects(
    ledger: web::Data<ProjectLedger>,
    path: web::Path<i32>,
    query: web::Query<CurrentOnlyQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_number = path.into_inner();

    let rows = ledger
        .employee_projects(employee_number, query.current_only.unwrap_or(true))
        .await
        .map_err(|e| {
            error!(error = %e, employee_number, "Failed to fetch employee projects");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(rows))
}

// -------------------- Milestones --------------------

/// Add a milestone to a project
#[utoipa::path(
    post,
    path = "/api/projects/{project_number}/milestones",
    params(
        ("project_number", description = "Project number")
    ),
    request_body = CreateMilestone,
    responses(
        (status = 201, description = "Milestone added", body = Object, example = json!({
            "message": "Milestone added",
            "milestone_id": 15
        }))
    ),
    tag = "Milestone"
)]
pub async fn add_milestone(
    ledger: web::Data<ProjectLedger>,
    path: web::Path<i32>,
    payload: web::Json<CreateMilestone>,
) -> actix_web::Result<impl Responder> {
    let project_number = path.into_inner();

    let milestone_id = ledger
        .add_milestone(
            project_number,
            &payload.milestone_name,
            payload.description.as_deref(),
            payload.due_date,
            payload.status.unwrap_or(MilestoneStatus::Pending),
            payload.details_done.as_deref(),
            payload.details_remaining.as_deref(),
        )
        .await
        .map_err(|e| {
            error!(error = %e, project_number, "Failed to add milestone");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Milestone added",
        "milestone_id": milestone_id
    })))
}

/// Milestones of a project, by due date
#[utoipa::path(
    get,
    path = "/api/projects/{project_number}/milestones",
    params(
        ("project_number", description = "Project number")
    ),
    responses(
        (status = 200, description = "Milestones", body = [crate::model::milestone::Milestone])
    ),
    tag = "Milestone"
)]
pub async fn list_milestones(
    ledger: web::Data<ProjectLedger>,
    path: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    let project_number = path.into_inner();

    let milestones = ledger.project_milestones(project_number).await.map_err(|e| {
        error!(error = %e, project_number, "Failed to fetch milestones");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(milestones))
}

/// Update milestone fields
#[utoipa::path(
    put,
    path = "/api/milestones/{milestone_id}",
    params(
        ("milestone_id", description = "Milestone ID")
    ),
    request_body = UpdateMilestone,
    responses(
        (status = 200, description = "Milestone updated"),
        (status = 400, description = "No fields provided for update"),
        (status = 404, description = "Milestone not found")
    ),
    tag = "Milestone"
)]
pub async fn update_milestone(
    ledger: web::Data<ProjectLedger>,
    path: web::Path<i32>,
    payload: web::Json<UpdateMilestone>,
) -> actix_web::Result<impl Responder> {
    let milestone_id = path.into_inner();
    let payload = payload.into_inner();

    let changes = MilestoneChanges {
        milestone_name: payload.milestone_name,
        description: payload.description,
        due_date: payload.due_date,
        completion_date: payload.completion_date,
        status: payload.status,
        details_done: payload.details_done,
        details_remaining: payload.details_remaining,
    };

    if changes.is_empty() {
        return Err(ErrorBadRequest("No fields provided for update"));
    }

    let updated = ledger
        .update_milestone(milestone_id, changes)
        .await
        .map_err(|e| {
            error!(error = %e, milestone_id, "Failed to update milestone");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if !updated {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Milestone not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Milestone updated"
    })))
}

/// Mark a milestone completed
#[utoipa::path(
    put,
    path = "/api/milestones/{milestone_id}/complete",
    params(
        ("milestone_id", description = "Milestone ID")
    ),
    request_body = CompleteMilestone,
    responses(
        (status = 200, description = "Milestone completed"),
        (status = 404, description = "Milestone not found")
    ),
    tag = "Milestone"
)]
pub async fn complete_milestone(
    ledger: web::Data<ProjectLedger>,
    path: web::Path<i32>,
    payload: web::Json<CompleteMilestone>,
) -> actix_web::Result<impl Responder> {
    let milestone_id = path.into_inner();

    let completed = ledger
        .complete_milestone(milestone_id, payload.completion_date)
        .await
        .map_err(|e| {
            error!(error = %e, milestone_id, "Failed to complete milestone");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if !completed {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Milestone not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Milestone completed"
    })))
}

// -------------------- Reports --------------------

/// Comprehensive statistics for one project
#[utoipa::path(
    get,
    path = "/api/projects/{project_number}/statistics",
    params(
        ("project_number", description = "Project number")
    ),
    responses(
        (status = 200, description = "Project statistics", body = crate::model::project::ProjectStatistics),
        (status = 404, description = "Project not found")
    ),
    tag = "Report"
)]
pub async fn project_statistics(
    ledger: web::Data<ProjectLedger>,
    path: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    let project_number = path.into_inner();

    let stats = ledger.project_statistics(project_number).await.map_err(|e| {
        error!(error = %e, project_number, "Failed to fetch project statistics");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    match stats {
        Some(stats) => Ok(HttpResponse::Ok().json(stats)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Project not found"
        }))),
    }
}

/// Project counts, budgets and person-hours per department
#[utoipa::path(
    get,
    path = "/api/reports/department-projects",
    params(DepartmentQuery),
    responses(
        (status = 200, description = "Per-department project summary", body = [crate::model::project::DepartmentProjectsRow])
    ),
    tag = "Report"
)]
pub async fn department_projects_summary(
    ledger: web::Data<ProjectLedger>,
    query: web::Query<DepartmentQuery>,
) -> actix_web::Result<impl Responder> {
    let rows = ledger
        .department_projects_summary(query.department_id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch department projects summary");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Hours and project counts per employee with assignments
#[utoipa::path(
    get,
    path = "/api/reports/productivity",
    responses(
        (status = 200, description = "Productivity rows, most hours first", body = [crate::model::assignment::ProductivityRow])
    ),
    tag = "Report"
)]
pub async fn productivity_report(
    ledger: web::Data<ProjectLedger>,
) -> actix_web::Result<impl Responder> {
    let rows = ledger.employee_productivity_report().await.map_err(|e| {
        error!(error = %e, "Failed to fetch productivity report");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(rows))
}
