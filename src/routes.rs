use crate::{
    api::{employee, payroll, project},
    config::Config,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{number}
                    .service(
                        web::resource("/{employee_number}")
                            .route(web::get().to(employee::get_employee)),
                    )
                    .service(
                        web::resource("/{employee_number}/promote")
                            .route(web::put().to(employee::promote_employee)),
                    )
                    .service(
                        web::resource("/{employee_number}/salary-history")
                            .route(web::get().to(employee::salary_history)),
                    )
                    .service(
                        web::resource("/{employee_number}/payroll")
                            .route(web::get().to(payroll::employee_payroll_history)),
                    )
                    .service(
                        web::resource("/{employee_number}/tax-summary/{year}")
                            .route(web::get().to(payroll::tax_summary)),
                    )
                    .service(
                        web::resource("/{employee_number}/projects")
                            .route(web::get().to(project::employee_projects)),
                    ),
            )
            .service(
                web::scope("/payroll")
                    .service(
                        web::resource("/run").route(web::post().to(payroll::run_payroll)),
                    )
                    .service(
                        web::resource("/report").route(web::get().to(payroll::payroll_report)),
                    )
                    .service(
                        web::resource("/department-summary")
                            .route(web::get().to(payroll::department_payroll_summary)),
                    ),
            )
            .service(
                web::scope("/projects")
                    // /projects
                    .service(
                        web::resource("")
                            .route(web::post().to(project::create_project))
                            .route(web::get().to(project::list_projects)),
                    )
                    // /projects/{number}
                    .service(
                        web::resource("/{project_number}")
                            .route(web::get().to(project::get_project))
                            .route(web::put().to(project::update_project)),
                    )
                    .service(
                        web::resource("/{project_number}/team")
                            .route(web::get().to(project::project_team))
                            .route(web::post().to(project::assign_employee)),
                    )
                    .service(
                        web::resource("/{project_number}/team/{employee_number}/hours")
                            .route(web::put().to(project::update_hours)),
                    )
                    .service(
                        web::resource("/{project_number}/team/{employee_number}/remove")
                            .route(web::put().to(project::remove_assignment)),
                    )
                    .service(
                        web::resource("/{project_number}/milestones")
                            .route(web::post().to(project::add_milestone))
                            .route(web::get().to(project::list_milestones)),
                    )
                    .service(
                        web::resource("/{project_number}/statistics")
                            .route(web::get().to(project::project_statistics)),
                    ),
            )
            .service(
                web::scope("/milestones")
                    .service(
                        web::resource("/{milestone_id}")
                            .route(web::put().to(project::update_milestone)),
                    )
                    .service(
                        web::resource("/{milestone_id}/complete")
                            .route(web::put().to(project::complete_milestone)),
                    ),
            )
            .service(
                web::scope("/reports")
                    .service(
                        web::resource("/department-projects")
                            .route(web::get().to(project::department_projects_summary)),
                    )
                    .service(
                        web::resource("/productivity")
                            .route(web::get().to(project::productivity_report)),
                    ),
            ),
    );
}
