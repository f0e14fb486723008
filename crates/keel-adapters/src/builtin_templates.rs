//! Built-in template texts.
//!
//! This module provides [`all_variants`], the single entry-point for the
//! templates that ship with Keel. Every text is a compile-time string; the
//! store never touches the filesystem.
//!
//! # Variant registration rules
//!
//! - one `default` variant (no selectors) per identifier, where a single
//!   text serves every configuration;
//! - architecture-selected variants for the solution and service-crate
//!   manifests (workspace layout differs per style);
//! - database-selected variants for the settings file (connection blocks
//!   differ per provider).
//!
//! Feature toggles never select variants, whether a file is generated at
//! all is the planner's decision.

use keel_core::domain::{Architecture, DatabaseProvider, TemplateId};

use crate::template_store::TemplateVariant;

/// All shipped template variants, in registration order.
pub fn all_variants() -> Vec<TemplateVariant> {
    let mut variants = Vec::new();

    // ── solution manifest, per architecture ───────────────────────────────
    variants.push(TemplateVariant::for_architecture(
        TemplateId::SolutionManifest,
        Architecture::Monolith,
        SOLUTION_MONOLITH,
    ));
    variants.push(TemplateVariant::for_architecture(
        TemplateId::SolutionManifest,
        Architecture::ModularMonolith,
        SOLUTION_MODULAR,
    ));
    variants.push(TemplateVariant::for_architecture(
        TemplateId::SolutionManifest,
        Architecture::Microservices,
        SOLUTION_MICROSERVICES,
    ));

    // ── service crate manifest, per architecture ──────────────────────────
    variants.push(TemplateVariant::for_architecture(
        TemplateId::ApiManifest,
        Architecture::Monolith,
        API_MANIFEST_MONOLITH,
    ));
    variants.push(TemplateVariant::for_architecture(
        TemplateId::ApiManifest,
        Architecture::ModularMonolith,
        API_MANIFEST_MODULAR,
    ));
    variants.push(TemplateVariant::for_architecture(
        TemplateId::ApiManifest,
        Architecture::Microservices,
        API_MANIFEST_MICROSERVICES,
    ));

    // ── settings, per database ────────────────────────────────────────────
    variants.push(TemplateVariant::for_database(
        TemplateId::AppSettings,
        DatabaseProvider::Postgres,
        SETTINGS_POSTGRES,
    ));
    variants.push(TemplateVariant::for_database(
        TemplateId::AppSettings,
        DatabaseProvider::MySql,
        SETTINGS_MYSQL,
    ));
    variants.push(TemplateVariant::for_database(
        TemplateId::AppSettings,
        DatabaseProvider::Sqlite,
        SETTINGS_SQLITE,
    ));
    variants.push(TemplateVariant::for_database(
        TemplateId::AppSettings,
        DatabaseProvider::Mssql,
        SETTINGS_MSSQL,
    ));

    // ── single-variant roles ──────────────────────────────────────────────
    variants.push(TemplateVariant::for_all(TemplateId::ApiMain, API_MAIN));
    variants.push(TemplateVariant::for_all(TemplateId::WebManifest, WEB_MANIFEST));
    variants.push(TemplateVariant::for_all(TemplateId::WebMain, WEB_MAIN));
    variants.push(TemplateVariant::for_all(TemplateId::Ignore, GITIGNORE));
    variants.push(TemplateVariant::for_all(TemplateId::Readme, README));
    variants.push(TemplateVariant::for_all(TemplateId::ContainerFile, DOCKERFILE));
    variants.push(TemplateVariant::for_all(TemplateId::ComposeFile, COMPOSE));
    variants.push(TemplateVariant::for_all(
        TemplateId::ModuleManifest,
        MODULE_MANIFEST,
    ));
    variants.push(TemplateVariant::for_all(TemplateId::ModuleLib, MODULE_LIB));

    variants
}

// ============================================================================
// Solution manifests
// ============================================================================

const SOLUTION_MONOLITH: &str = r#"[workspace]
members = [{% for member in members %}
    "{{ member }}",{% endfor %}
]
resolver = "3"

[workspace.package]
version = "0.1.0"
edition = "{{ rust_edition }}"

[profile.release]
lto = "thin"
strip = true
"#;

const SOLUTION_MODULAR: &str = r#"[workspace]
members = [{% for member in members %}
    "{{ member }}",{% endfor %}
]
resolver = "3"

[workspace.package]
version = "0.1.0"
edition = "{{ rust_edition }}"

# Module crates inherit their dependency versions from this table so the
# whole workspace moves in lockstep.
[workspace.dependencies]
anyhow = "1.0"
axum = "0.8"
serde = { version = "1.0", features = ["derive"] }
tokio = { version = "1.40", features = ["rt-multi-thread", "macros", "net"] }
tracing = "0.1"
tracing-subscriber = { version = "0.3", features = ["env-filter"] }
{% if mssql %}tiberius = { version = "0.12", default-features = false, features = ["rustls"] }
{% else %}sqlx = { version = "0.8", default-features = false, features = ["runtime-tokio", "macros", "{{ database_feature }}"] }
{% endif %}
[profile.release]
lto = "thin"
strip = true
"#;

const SOLUTION_MICROSERVICES: &str = r#"# {{ project_name }}, service workspace.
# Each member is deployed independently and pins its own dependencies.
[workspace]
members = [{% for member in members %}
    "{{ member }}",{% endfor %}
]
resolver = "3"

[workspace.package]
version = "0.1.0"
edition = "{{ rust_edition }}"

[profile.release]
lto = "thin"
codegen-units = 1
strip = true
"#;

// ============================================================================
// Service crate manifests
// ============================================================================

const API_MANIFEST_MONOLITH: &str = r#"[package]
name = "{{ project_kebab }}"
version.workspace = true
edition.workspace = true

[dependencies]
anyhow = "1.0"
axum = "0.8"
serde = { version = "1.0", features = ["derive"] }
tokio = { version = "1.40", features = ["rt-multi-thread", "macros", "net"] }
tracing = "0.1"
tracing-subscriber = { version = "0.3", features = ["env-filter"] }
{% if mssql %}tiberius = { version = "0.12", default-features = false, features = ["rustls"] }
{% else %}sqlx = { version = "0.8", default-features = false, features = ["runtime-tokio", "macros", "{{ database_feature }}"] }
{% endif %}{% if sample_module %}{{ project_kebab }}-sample = { path = "../{{ project_kebab }}-sample" }
{% endif %}"#;

const API_MANIFEST_MODULAR: &str = r#"[package]
name = "{{ project_kebab }}-api"
version.workspace = true
edition.workspace = true

[dependencies]
anyhow = { workspace = true }
axum = { workspace = true }
serde = { workspace = true }
tokio = { workspace = true }
tracing = { workspace = true }
tracing-subscriber = { workspace = true }
{% if mssql %}tiberius = { workspace = true }
{% else %}sqlx = { workspace = true }
{% endif %}{% if sample_module %}{{ project_kebab }}-sample = { path = "../{{ project_kebab }}-sample" }
{% endif %}"#;

const API_MANIFEST_MICROSERVICES: &str = r#"[package]
name = "{{ project_kebab }}-api"
version.workspace = true
edition.workspace = true
description = "{{ project_name }} API service"

# Pinned per service: this crate deploys on its own cadence.
[dependencies]
anyhow = "1.0"
axum = "0.8"
serde = { version = "1.0", features = ["derive"] }
tokio = { version = "1.40", features = ["rt-multi-thread", "macros", "net"] }
tracing = "0.1"
tracing-subscriber = { version = "0.3", features = ["env-filter"] }
{% if mssql %}tiberius = { version = "0.12", default-features = false, features = ["rustls"] }
{% else %}sqlx = { version = "0.8", default-features = false, features = ["runtime-tokio", "macros", "{{ database_feature }}"] }
{% endif %}{% if sample_module %}{{ project_kebab }}-sample = { path = "../{{ project_kebab }}-sample" }
{% endif %}"#;

// ============================================================================
// Entry points
// ============================================================================

const API_MAIN: &str = r#"//! {{ project_name }} service entry point.

use axum::{Router, routing::get};
use tracing::info;
{% if sample_module %}
use {{ project_snake }}_sample as sample_module;
{% endif %}
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let app = Router::new()
        .route("/health", get(health)){% if sample_module %}
        .nest("/sample", sample_module::router()){% endif %};

    let addr = "0.0.0.0:8080";
    info!(%addr, "{{ project_kebab }} listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(app, listener).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}
"#;

const WEB_MANIFEST: &str = r#"[package]
name = "{{ project_kebab }}-web"
version.workspace = true
edition.workspace = true

[dependencies]
anyhow = "1.0"
axum = "0.8"
tokio = { version = "1.40", features = ["rt-multi-thread", "macros", "net"] }
tracing = "0.1"
tracing-subscriber = { version = "0.3", features = ["env-filter"] }
"#;

const WEB_MAIN: &str = r#"//! {{ project_name }} web front end.

use axum::{Router, response::Html, routing::get};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let app = Router::new().route("/", get(index));

    let addr = "0.0.0.0:8090";
    info!(%addr, "{{ project_kebab }}-web listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(app, listener).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html("<h1>{{ project_pascal }}</h1><p>Served by the web crate.</p>")
}
"#;

// ============================================================================
// Settings, per database
// ============================================================================

const SETTINGS_POSTGRES: &str = r#"# {{ project_name }} runtime configuration.

[service]
name = "{{ project_kebab }}"
instance = "{{ project_id }}"

[server]
host = "0.0.0.0"
port = 8080

[database]
provider = "postgres"
url = "{{ database_url }}"
max_connections = 10
statement_timeout_secs = 30
"#;

const SETTINGS_MYSQL: &str = r#"# {{ project_name }} runtime configuration.

[service]
name = "{{ project_kebab }}"
instance = "{{ project_id }}"

[server]
host = "0.0.0.0"
port = 8080

[database]
provider = "mysql"
url = "{{ database_url }}"
max_connections = 10
"#;

const SETTINGS_SQLITE: &str = r#"# {{ project_name }} runtime configuration.

[service]
name = "{{ project_kebab }}"
instance = "{{ project_id }}"

[server]
host = "0.0.0.0"
port = 8080

# Embedded database: the file lives next to the service.
[database]
provider = "sqlite"
url = "{{ database_url }}"
create_if_missing = true
"#;

const SETTINGS_MSSQL: &str = r#"# {{ project_name }} runtime configuration.

[service]
name = "{{ project_kebab }}"
instance = "{{ project_id }}"

[server]
host = "0.0.0.0"
port = 8080

[database]
provider = "mssql"
url = "{{ database_url }}"
max_connections = 10
trust_server_certificate = true
"#;

// ============================================================================
// Repository files
// ============================================================================

const GITIGNORE: &str = r#"/target
**/*.rs.bk
.env
{% if sqlite %}/data/
{% endif %}"#;

const README: &str = r#"# {{ project_name }}

Scaffolded with [Keel](https://github.com/keel-tools/keel) in {{ year }}.

- kind: {{ project_kind }}
- architecture: {{ architecture }}
- database: {{ database }}

## Getting started

```sh
cargo run -p {% if monolith %}{{ project_kebab }}{% else %}{{ project_kebab }}-api{% endif %}
```

The service listens on `http://localhost:8080`; check `GET /health`.
{% if orchestration %}
## Local infrastructure

```sh
docker compose up -d
```
{% endif %}{% if sample_module %}
## Sample module

A sample module crate is mounted under `/sample`. Use it as the pattern
for your own modules, then delete it.
{% endif %}"#;

const DOCKERFILE: &str = r#"FROM rust:1.85-slim AS builder
WORKDIR /app
COPY . .
RUN cargo build --release --locked

FROM debian:bookworm-slim
RUN useradd --system --home /app app
WORKDIR /app
COPY --from=builder /app/target/release/{% if monolith %}{{ project_kebab }}{% else %}{{ project_kebab }}-api{% endif %} /usr/local/bin/{{ project_kebab }}
COPY config ./config
USER app
EXPOSE 8080
ENTRYPOINT ["/usr/local/bin/{{ project_kebab }}"]
"#;

const COMPOSE: &str = r#"services:
  api:
    build: .
    ports:
      - "8080:8080"
    environment:
      DATABASE_URL: "{{ database_url }}"
{% if sqlite %}    volumes:
      - ./data:/app/data
{% else %}    depends_on:
      - db

  db:
{% if postgres %}    image: postgres:17-alpine
    environment:
      POSTGRES_USER: {{ project_snake }}
      POSTGRES_PASSWORD: {{ project_snake }}
      POSTGRES_DB: {{ project_snake }}
    ports:
      - "5432:5432"
{% endif %}{% if mysql %}    image: mysql:8.4
    environment:
      MYSQL_DATABASE: {{ project_snake }}
      MYSQL_USER: {{ project_snake }}
      MYSQL_PASSWORD: {{ project_snake }}
      MYSQL_RANDOM_ROOT_PASSWORD: "yes"
    ports:
      - "3306:3306"
{% endif %}{% if mssql %}    image: mcr.microsoft.com/mssql/server:2022-latest
    environment:
      ACCEPT_EULA: "Y"
      MSSQL_SA_PASSWORD: "ChangeMe!1433"
    ports:
      - "1433:1433"
{% endif %}{% endif %}"#;

// ============================================================================
// Sample module crate
// ============================================================================

const MODULE_MANIFEST: &str = r#"[package]
name = "{{ project_kebab }}-sample"
version.workspace = true
edition.workspace = true

[dependencies]
axum = "0.8"
serde = { version = "1.0", features = ["derive"] }
"#;

const MODULE_LIB: &str = r#"//! Sample module for {{ project_name }}.
//!
//! Mounted by the API under `/sample`. Use it as the pattern for real
//! modules, then delete it.

use axum::{Json, Router, routing::get};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: String,
}

pub fn router() -> Router {
    Router::new().route("/hello", get(hello))
}

async fn hello() -> Json<Greeting> {
    Json(Greeting {
        message: "hello from {{ project_kebab }}".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_builds() {
        let _ = router();
    }
}
"#;

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use keel_core::domain::template::{parse, validate_template};

    #[test]
    fn every_variant_parses() {
        for variant in all_variants() {
            parse(variant.text).unwrap_or_else(|e| {
                panic!("built-in template {} fails to parse: {e}", variant.id)
            });
        }
    }

    #[test]
    fn every_variant_passes_schema_validation() {
        for variant in all_variants() {
            let parsed = parse(variant.text).unwrap();
            let findings = validate_template(&parsed);
            assert!(
                findings.iter().all(|f| !f.is_unknown_name()),
                "built-in template {} references unknown names: {findings:?}",
                variant.id
            );
        }
    }

    #[test]
    fn no_identifier_is_registered_twice_with_equal_selectors() {
        let variants = all_variants();
        for (i, a) in variants.iter().enumerate() {
            for b in &variants[i + 1..] {
                assert!(
                    !(a.id == b.id
                        && a.architecture == b.architecture
                        && a.database == b.database),
                    "duplicate variant registration for {}",
                    a.id
                );
            }
        }
    }
}
