use dioxus::prelude::*;

use api::{ApiClient, ApiError, QueryClient};
use store::{AppConfig, TokenManager};
use ui::{ApiProvider, AuthProvider, DashboardProvider, ToastProvider};
use views::{
    AppShell, Dashboard, Landing, Login, NotFound, Profile, ProjectCreate, ProjectDetail,
    ProjectEdit, Projects, Protected, Register, VacancyDetail, VacancyResponses,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AppShell)]
        #[route("/")]
        Landing {},
        #[route("/login?:redirect")]
        Login { redirect: String },
        #[route("/register")]
        Register {},
        #[route("/projects?:..query")]
        Projects { query: String },
        #[route("/projects/:id")]
        ProjectDetail { id: i64 },
        #[route("/vacancies/:id")]
        VacancyDetail { id: i64 },
        #[layout(Protected)]
            #[route("/dashboard")]
            Dashboard {},
            #[route("/dashboard/projects/new")]
            ProjectCreate {},
            #[route("/dashboard/projects/:id/edit")]
            ProjectEdit { id: i64 },
            #[route("/dashboard/vacancies/:id/responses")]
            VacancyResponses { id: i64 },
            #[route("/profile")]
            Profile {},
        #[end_layout]
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");
const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

const CONFIG_TOML: &str = include_str!("../projecthub.toml");

fn main() {
    dioxus::logger::init(tracing::Level::INFO).ok();
    dioxus::launch(App);
}

/// Embedded config, with `PROJECTHUB_API_URL` from the build environment taking
/// precedence over `api.base_url`.
fn load_config() -> AppConfig {
    let config = AppConfig::from_toml(CONFIG_TOML).unwrap_or_else(|e| {
        tracing::warn!(error = %e, file = AppConfig::filename(), "Invalid config, using defaults");
        AppConfig::default()
    });
    match option_env!("PROJECTHUB_API_URL") {
        Some(url) if !url.trim().is_empty() => config.with_api_url(url),
        _ => config,
    }
}

#[derive(Clone)]
struct Services {
    config: AppConfig,
    client: ApiClient,
    queries: QueryClient,
}

fn bootstrap() -> Result<Services, ApiError> {
    let config = load_config();
    let tokens = TokenManager::new(ui::make_store());
    let client = ApiClient::new(&config.api, tokens)?;
    let queries = QueryClient::new(&config.cache);
    tracing::info!(base_url = %client.base_url(), "API client ready");
    Ok(Services {
        config,
        client,
        queries,
    })
}

#[component]
fn App() -> Element {
    let services = use_hook(bootstrap);

    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Stylesheet { href: MAIN_CSS }
        document::Stylesheet { href: TAILWIND_CSS }

        match services {
            Ok(Services { config, client, queries }) => rsx! {
                ApiProvider {
                    client: client,
                    queries: queries,
                    config: config,
                    AuthProvider {
                        ToastProvider {
                            DashboardProvider {
                                Router::<Route> {}
                            }
                        }
                    }
                }
            },
            Err(e) => rsx! {
                div {
                    class: "flex flex-col items-center justify-center min-h-screen gap-2 p-8 text-center",
                    h1 { class: "m-0 text-xl font-bold text-neutral-800", "ProjectHub cannot start" }
                    p { class: "m-0 text-sm text-red-600", "Invalid API configuration: {e}" }
                }
            },
        }
    }
}
