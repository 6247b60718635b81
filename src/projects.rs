use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use crate::error::LedgerResult;
use crate::model::assignment::{EmployeeProjectRow, ProductivityRow, TeamMember};
use crate::model::milestone::{Milestone, MilestoneStatus};
use crate::model::project::{
    DepartmentProjectsRow, ProjectDetail, ProjectRow, ProjectStatistics,
};
use crate::sqlgen::{SqlValue, UpdateBuilder};

/// Fields of a project that may be changed after creation. Absent fields
/// are left untouched.
#[derive(Debug, Default, Clone)]
pub struct ProjectChanges {
    pub project_name: Option<String>,
    pub budget: Option<Decimal>,
    pub date_ended: Option<NaiveDate>,
    pub manager_emp_id: Option<i32>,
}

impl ProjectChanges {
    pub fn is_empty(&self) -> bool {
        self.project_name.is_none()
            && self.budget.is_none()
            && self.date_ended.is_none()
            && self.manager_emp_id.is_none()
    }

    fn into_update(self) -> UpdateBuilder {
        UpdateBuilder::new("Project")
            .set_opt("project_name", self.project_name.map(SqlValue::Text))
            .set_opt("budget", self.budget.map(SqlValue::Decimal))
            .set_opt("date_ended", self.date_ended.map(SqlValue::Date))
            .set_opt("manager_emp_id", self.manager_emp_id.map(SqlValue::Int))
    }
}

/// Fields of a milestone that may be changed after creation. Status may be
/// set to anything here; only `complete_milestone` stamps the completion
/// date as well.
#[derive(Debug, Default, Clone)]
pub struct MilestoneChanges {
    pub milestone_name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub status: Option<MilestoneStatus>,
    pub details_done: Option<String>,
    pub details_remaining: Option<String>,
}

impl MilestoneChanges {
    pub fn is_empty(&self) -> bool {
        self.milestone_name.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.completion_date.is_none()
            && self.status.is_none()
            && self.details_done.is_none()
            && self.details_remaining.is_none()
    }

    fn into_update(self) -> UpdateBuilder {
        UpdateBuilder::new("ProjectMilestone")
            .set_opt("milestone_name", self.milestone_name.map(SqlValue::Text))
            .set_opt("description", self.description.map(SqlValue::Text))
            .set_opt("due_date", self.due_date.map(SqlValue::Date))
            .set_opt("completion_date", self.completion_date.map(SqlValue::Date))
            .set_opt(
                "status",
                self.status.map(|s| SqlValue::Text(s.to_string())),
            )
            .set_opt("details_done", self.details_done.map(SqlValue::Text))
            .set_opt(
                "details_remaining",
                self.details_remaining.map(SqlValue::Text),
            )
    }
}

/// Projects, team assignments and milestone tracking.
#[derive(Clone)]
pub struct ProjectLedger {
    pool: PgPool,
}

impl ProjectLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== PROJECT MANAGEMENT ====================

    pub async fn create_project(
        &self,
        project_number: i32,
        project_name: &str,
        budget: Decimal,
        date_started: NaiveDate,
        manager_emp_id: i32,
        department_id: i32,
        date_ended: Option<NaiveDate>,
    ) -> LedgerResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO Project
            (project_number, project_name, budget, date_started,
             date_ended, manager_emp_id, department_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING project_number
            "#,
        )
        .bind(project_number)
        .bind(project_name)
        .bind(budget)
        .bind(date_started)
        .bind(date_ended)
        .bind(manager_emp_id)
        .bind(department_id)
        .fetch_one(&self.pool)
        .await?;

        info!(project_number = id, project_name, manager_emp_id, "project created");
        Ok(id)
    }

    pub async fn project_info(&self, project_number: i32) -> LedgerResult<Option<ProjectDetail>> {
        let detail = sqlx::query_as::<_, ProjectDetail>(
            r#"
            SELECT
                p.project_number,
                p.project_name,
                p.budget,
                p.date_started,
                p.date_ended,
                m.employee_name AS manager_name,
                m.employee_number AS manager_id,
                d.department_name,
                d.department_id
            FROM Project p
            JOIN Employee m ON p.manager_emp_id = m.employee_number
            JOIN Department d ON p.department_id = d.department_id
            WHERE p.project_number = $1
            "#,
        )
        .bind(project_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(detail)
    }

    /// Apply a partial update. Returns `false` when the change-set is empty
    /// or no such project exists.
    pub async fn update_project(
        &self,
        project_number: i32,
        changes: ProjectChanges,
    ) -> LedgerResult<bool> {
        if changes.is_empty() {
            return Ok(false);
        }

        let affected = changes
            .into_update()
            .execute(&self.pool, "project_number", project_number)
            .await?;

        if affected > 0 {
            info!(project_number, "project updated");
        }
        Ok(affected > 0)
    }

    pub async fn list_projects(&self, include_completed: bool) -> LedgerResult<Vec<ProjectRow>> {
        let rows = if include_completed {
            sqlx::query_as::<_, ProjectRow>(
                r#"
                SELECT
                    p.project_number,
                    p.project_name,
                    p.budget,
                    p.date_started,
                    p.date_ended,
                    m.employee_name AS manager_name,
                    d.department_name,
                    CASE WHEN p.date_ended IS NULL THEN 'Active' ELSE 'Completed' END AS status
                FROM Project p
                JOIN Employee m ON p.manager_emp_id = m.employee_number
                JOIN Department d ON p.department_id = d.department_id
                ORDER BY p.project_number
                "#,
            )
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, ProjectRow>(
                r#"
                SELECT
                    p.project_number,
                    p.project_name,
                    p.budget,
                    p.date_started,
                    p.date_ended,
                    m.employee_name AS manager_name,
                    d.department_name,
                    'Active' AS status
                FROM Project p
                JOIN Employee m ON p.manager_emp_id = m.employee_number
                JOIN Department d ON p.department_id = d.department_id
                WHERE p.date_ended IS NULL
                ORDER BY p.project_number
                "#,
            )
            .fetch_all(&self.pool)
            .await?
        };

        Ok(rows)
    }

    // ==================== TEAM MANAGEMENT ====================

    pub async fn assign(
        &self,
        employee_number: i32,
        project_number: i32,
        role: &str,
        start_date: NaiveDate,
        hours_worked: Decimal,
        is_current: bool,
    ) -> LedgerResult<()> {
        sqlx::query(
            r#"
            INSERT INTO EmployeeProject
            (employee_number, project_number, role, hours_worked,
             start_date, is_current)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(employee_number)
        .bind(project_number)
        .bind(role)
        .bind(hours_worked)
        .bind(start_date)
        .bind(is_current)
        .execute(&self.pool)
        .await?;

        info!(employee_number, project_number, role, "employee assigned to project");
        Ok(())
    }

    /// Add hours to an assignment and return the new total, or `None`
    /// when no assignment matches.
    pub async fn update_hours(
        &self,
        employee_number: i32,
        project_number: i32,
        additional_hours: Decimal,
    ) -> LedgerResult<Option<Decimal>> {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            UPDATE EmployeeProject
            SET hours_worked = hours_worked + $1
            WHERE employee_number = $2 AND project_number = $3
            RETURNING hours_worked
            "#,
        )
        .bind(additional_hours)
        .bind(employee_number)
        .bind(project_number)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(total) = total {
            info!(employee_number, project_number, %total, "assignment hours updated");
        }
        Ok(total)
    }

    /// Close an assignment: stamp the end date and clear the current flag.
    /// The row itself is kept. Returns `false` when no assignment matches.
    pub async fn remove(
        &self,
        employee_number: i32,
        project_number: i32,
        end_date: NaiveDate,
    ) -> LedgerResult<bool> {
        let removed = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE EmployeeProject
            SET end_date = $1, is_current = FALSE
            WHERE employee_number = $2 AND project_number = $3
            RETURNING employee_number
            "#,
        )
        .bind(end_date)
        .bind(employee_number)
        .bind(project_number)
        .fetch_optional(&self.pool)
        .await?;

        if removed.is_some() {
            info!(employee_number, project_number, "employee removed from project");
        }
        Ok(removed.is_some())
    }

    pub async fn project_team(
        &self,
        project_number: i32,
        current_only: bool,
    ) -> LedgerResult<Vec<TeamMember>> {
        let members = if current_only {
            sqlx::query_as::<_, TeamMember>(
                r#"
                SELECT
                    e.employee_number,
                    e.employee_name,
                    e.title,
                    ep.role,
                    ep.hours_worked,
                    ep.start_date,
                    ep.end_date
                FROM EmployeeProject ep
                JOIN Employee e ON ep.employee_number = e.employee_number
                WHERE ep.project_number = $1 AND ep.is_current = TRUE
                ORDER BY e.employee_name
                "#,
            )
            .bind(project_number)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, TeamMember>(
                r#"
                SELECT
                    e.employee_number,
                    e.employee_name,
                    e.title,
                    ep.role,
                    ep.hours_worked,
                    ep.start_date,
                    ep.end_date
                FROM EmployeeProject ep
                JOIN Employee e ON ep.employee_number = e.employee_number
                WHERE ep.project_number = $1
                ORDER BY e.employee_name
                "#,
            )
            .bind(project_number)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(members)
    }

    pub async fn employee_projects(
        &self,
        employee_number: i32,
        current_only: bool,
    ) -> LedgerResult<Vec<EmployeeProjectRow>> {
        let rows = if current_only {
            sqlx::query_as::<_, EmployeeProjectRow>(
                r#"
                SELECT
                    p.project_number,
                    p.project_name,
                    ep.role,
                    ep.hours_worked,
                    ep.start_date,
                    ep.end_date,
                    m.employee_name AS manager_name
                FROM EmployeeProject ep
                JOIN Project p ON ep.project_number = p.project_number
                JOIN Employee m ON p.manager_emp_id = m.employee_number
                WHERE ep.employee_number = $1 AND ep.is_current = TRUE
                ORDER BY ep.start_date DESC
                "#,
            )
            .bind(employee_number)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, EmployeeProjectRow>(
                r#"
                SELECT
                    p.project_number,
                    p.project_name,
                    ep.role,
                    ep.hours_worked,
                    ep.start_date,
                    ep.end_date,
                    m.employee_name AS manager_name
                FROM EmployeeProject ep
                JOIN Project p ON ep.project_number = p.project_number
                JOIN Employee m ON p.manager_emp_id = m.employee_number
                WHERE ep.employee_number = $1
                ORDER BY ep.start_date DESC
                "#,
            )
            .bind(employee_number)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(rows)
    }

    // ==================== MILESTONE MANAGEMENT ====================

    pub async fn add_milestone(
        &self,
        project_number: i32,
        milestone_name: &str,
        description: Option<&str>,
        due_date: NaiveDate,
        status: MilestoneStatus,
        details_done: Option<&str>,
        details_remaining: Option<&str>,
    ) -> LedgerResult<i32> {
        let milestone_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO ProjectMilestone
            (project_number, milestone_name, description, due_date,
             status, details_done, details_remaining)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING milestone_id
            "#,
        )
        .bind(project_number)
        .bind(milestone_name)
        .bind(description)
        .bind(due_date)
        .bind(status.to_string())
        .bind(details_done)
        .bind(details_remaining)
        .fetch_one(&self.pool)
        .await?;

        info!(milestone_id, project_number, milestone_name, "milestone added");
        Ok(milestone_id)
    }

    pub async fn update_milestone(
        &self,
        milestone_id: i32,
        changes: MilestoneChanges,
    ) -> LedgerResult<bool> {
        if changes.is_empty() {
            return Ok(false);
        }

        let affected = changes
            .into_update()
            .execute(&self.pool, "milestone_id", milestone_id)
            .await?;

        if affected > 0 {
            info!(milestone_id, "milestone updated");
        }
        Ok(affected > 0)
    }

    /// Mark a milestone completed, stamping the completion date (today
    /// when omitted). Does not check the previous status.
    pub async fn complete_milestone(
        &self,
        milestone_id: i32,
        completion_date: Option<NaiveDate>,
    ) -> LedgerResult<bool> {
        let completion_date = completion_date.unwrap_or_else(|| Local::now().date_naive());

        self.update_milestone(
            milestone_id,
            MilestoneChanges {
                status: Some(MilestoneStatus::Completed),
                completion_date: Some(completion_date),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn project_milestones(&self, project_number: i32) -> LedgerResult<Vec<Milestone>> {
        let milestones = sqlx::query_as::<_, Milestone>(
            r#"
            SELECT
                milestone_id,
                milestone_name,
                description,
                due_date,
                completion_date,
                status,
                details_done,
                details_remaining
            FROM ProjectMilestone
            WHERE project_number = $1
            ORDER BY due_date
            "#,
        )
        .bind(project_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(milestones)
    }

    // ==================== REPORTING AND STATISTICS ====================

    /// Snapshot of a project: detail row, team totals and milestone
    /// counts, read in one transaction. `Ok(None)` for an unknown project.
    pub async fn project_statistics(
        &self,
        project_number: i32,
    ) -> LedgerResult<Option<ProjectStatistics>> {
        let mut tx = self.pool.begin().await?;

        let project = sqlx::query_as::<_, ProjectDetail>(
            r#"
            SELECT
                p.project_number,
                p.project_name,
                p.budget,
                p.date_started,
                p.date_ended,
                m.employee_name AS manager_name,
                m.employee_number AS manager_id,
                d.department_name,
                d.department_id
            FROM Project p
            JOIN Employee m ON p.manager_emp_id = m.employee_number
            JOIN Department d ON p.department_id = d.department_id
            WHERE p.project_number = $1
            "#,
        )
        .bind(project_number)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(project) = project else {
            return Ok(None);
        };

        let (team_size, total_hours) = sqlx::query_as::<_, (i64, Option<Decimal>)>(
            r#"
            SELECT
                COUNT(DISTINCT employee_number) AS team_size,
                SUM(hours_worked) AS total_hours
            FROM EmployeeProject
            WHERE project_number = $1
            "#,
        )
        .bind(project_number)
        .fetch_one(&mut *tx)
        .await?;

        let current_team_size = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT employee_number)
            FROM EmployeeProject
            WHERE project_number = $1 AND is_current = TRUE
            "#,
        )
        .bind(project_number)
        .fetch_one(&mut *tx)
        .await?;

        let (total, completed, in_progress, pending) =
            sqlx::query_as::<_, (i64, i64, i64, i64)>(
                r#"
                SELECT
                    COUNT(*) AS total_milestones,
                    COUNT(CASE WHEN status = 'completed' THEN 1 END) AS completed,
                    COUNT(CASE WHEN status = 'in_progress' THEN 1 END) AS in_progress,
                    COUNT(CASE WHEN status = 'pending' THEN 1 END) AS pending
                FROM ProjectMilestone
                WHERE project_number = $1
                "#,
            )
            .bind(project_number)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(ProjectStatistics {
            project,
            team_size,
            current_team_size,
            total_person_hours: total_hours.unwrap_or_default(),
            total_milestones: total,
            completed_milestones: completed,
            in_progress_milestones: in_progress,
            pending_milestones: pending,
        }))
    }

    pub async fn department_projects_summary(
        &self,
        department_id: Option<i32>,
    ) -> LedgerResult<Vec<DepartmentProjectsRow>> {
        let rows = match department_id {
            Some(department_id) => {
                sqlx::query_as::<_, DepartmentProjectsRow>(
                    r#"
                    SELECT
                        d.department_name,
                        COUNT(p.project_number) AS total_projects,
                        COUNT(CASE WHEN p.date_ended IS NULL AND p.project_number IS NOT NULL
                              THEN 1 END) AS active_projects,
                        SUM(p.budget) AS total_budget,
                        AVG(team_stats.team_size) AS avg_team_size,
                        SUM(team_stats.total_hours) AS total_person_hours
                    FROM Department d
                    LEFT JOIN Project p ON d.department_id = p.department_id
                    LEFT JOIN (
                        SELECT
                            project_number,
                            COUNT(DISTINCT employee_number) AS team_size,
                            SUM(hours_worked) AS total_hours
                        FROM EmployeeProject
                        GROUP BY project_number
                    ) team_stats ON p.project_number = team_stats.project_number
                    WHERE d.department_id = $1
                    GROUP BY d.department_name
                    "#,
                )
                .bind(department_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DepartmentProjectsRow>(
                    r#"
                    SELECT
                        d.department_name,
                        COUNT(p.project_number) AS total_projects,
                        COUNT(CASE WHEN p.date_ended IS NULL AND p.project_number IS NOT NULL
                              THEN 1 END) AS active_projects,
                        SUM(p.budget) AS total_budget,
                        AVG(team_stats.team_size) AS avg_team_size,
                        SUM(team_stats.total_hours) AS total_person_hours
                    FROM Department d
                    LEFT JOIN Project p ON d.department_id = p.department_id
                    LEFT JOIN (
                        SELECT
                            project_number,
                            COUNT(DISTINCT employee_number) AS team_size,
                            SUM(hours_worked) AS total_hours
                        FROM EmployeeProject
                        GROUP BY project_number
                    ) team_stats ON p.project_number = team_stats.project_number
                    GROUP BY d.department_name
                    ORDER BY d.department_name
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    pub async fn employee_productivity_report(&self) -> LedgerResult<Vec<ProductivityRow>> {
        let rows = sqlx::query_as::<_, ProductivityRow>(
            r#"
            SELECT
                e.employee_number,
                e.employee_name,
                e.title,
                d.department_name,
                COUNT(DISTINCT ep.project_number) AS projects_count,
                SUM(ep.hours_worked) AS total_hours,
                COUNT(CASE WHEN ep.is_current = TRUE THEN 1 END) AS current_projects
            FROM Employee e
            JOIN EmployeeProject ep ON e.employee_number = ep.employee_number
            LEFT JOIN Department d ON e.department_id = d.department_id
            GROUP BY e.employee_number, e.employee_name, e.title, d.department_name
            ORDER BY total_hours DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_change_sets_are_detected() {
        assert!(ProjectChanges::default().is_empty());
        assert!(MilestoneChanges::default().is_empty());

        let changes = ProjectChanges {
            budget: Some(Decimal::new(30000000, 2)),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }

    #[test]
    fn project_changes_map_to_their_columns() {
        let changes = ProjectChanges {
            project_name: Some("Cloud Infrastructure Upgrade".into()),
            date_ended: NaiveDate::from_ymd_opt(2025, 3, 31),
            ..Default::default()
        };

        let (sql, values) = changes.into_update().build("project_number");
        assert_eq!(
            sql,
            "UPDATE Project SET project_name = $1, date_ended = $2 WHERE project_number = $3"
        );
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn milestone_completion_fields_serialize_as_stored_text() {
        let changes = MilestoneChanges {
            status: Some(MilestoneStatus::Completed),
            completion_date: NaiveDate::from_ymd_opt(2025, 3, 20),
            ..Default::default()
        };

        let (sql, values) = changes.into_update().build("milestone_id");
        assert_eq!(
            sql,
            "UPDATE ProjectMilestone SET completion_date = $1, status = $2 WHERE milestone_id = $3"
        );
        assert_eq!(values[1], SqlValue::Text("completed".into()));
    }
}
