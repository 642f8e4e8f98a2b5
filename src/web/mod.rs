//! Browser-facing layer.
//!
//! Serves the submission form, the result page and the short link redirect.
//! Pages are rendered server-side with Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`handlers`] - Form, result and redirect handlers
//! - [`routes`] - Route configuration

pub mod handlers;
pub mod routes;
