mod app_shell;
pub use app_shell::AppShell;

mod protected;
pub use protected::Protected;

mod landing;
pub use landing::Landing;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod projects;
pub use projects::Projects;

mod project_detail;
pub use project_detail::ProjectDetail;

mod vacancy_detail;
pub use vacancy_detail::VacancyDetail;

mod dashboard;
pub use dashboard::Dashboard;

mod project_create;
pub use project_create::ProjectCreate;

mod project_edit;
pub use project_edit::ProjectEdit;

mod vacancy_responses;
pub use vacancy_responses::VacancyResponses;

mod profile;
pub use profile::Profile;

mod not_found;
pub use not_found::NotFound;
