//! HTML form handlers and the public redirect endpoint.

mod index;
mod redirect;
mod shorten;
mod templates;

pub use index::index_handler;
pub use redirect::{NOT_FOUND_REDIRECT, redirect_handler};
pub use shorten::shorten_form_handler;
pub use templates::{IndexTemplate, ResultTemplate};
