//! Template engine for page markup using Jinja2 syntax.
//!
//! Templates live in `templates/views/` and are compiled into the binary.

use minijinja::{AutoEscape, Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static VIEW_ENV: OnceLock<Environment<'static>> = OnceLock::new();

const TEMPLATES: &[(&str, &str)] = &[
    ("bills.jinja", include_str!("../../../templates/views/bills.jinja")),
    ("error.jinja", include_str!("../../../templates/views/error.jinja")),
    ("loading.jinja", include_str!("../../../templates/views/loading.jinja")),
    ("preview.jinja", include_str!("../../../templates/views/preview.jinja")),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    // Store data ends up in markup; escape everything.
    env.set_auto_escape_callback(|_| AutoEscape::Html);

    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load view template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded view template: {}", name);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    VIEW_ENV.get_or_init(init_environment)
}

/// Render a view template with the given context.
///
/// # Example
/// ```ignore
/// use minijinja::context;
///
/// let html = render_view("error.jinja", context! { message => "Erreur 404" })?;
/// ```
pub fn render_view(template_name: &str, ctx: Value) -> Result<String, ViewError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| ViewError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| ViewError::RenderError(e.to_string()))
}
