//! Classification of database errors raised by the mapping store.

use crate::domain::repositories::UniqueColumn;

/// Constraint guarding `url_mappings.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "url_mappings_short_code_key";

/// Constraint guarding `url_mappings.original_url`.
pub const ORIGINAL_URL_CONSTRAINT: &str = "url_mappings_original_url_key";

/// Returns the column whose uniqueness constraint `e` violated, if any.
///
/// Constraint names come from `migrations/`; an unrecognized unique violation
/// returns `None` and is handled as a generic store error.
pub fn unique_violation_column(e: &sqlx::Error) -> Option<UniqueColumn> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    column_for_constraint(db_err.constraint()?)
}

fn column_for_constraint(constraint: &str) -> Option<UniqueColumn> {
    match constraint {
        SHORT_CODE_CONSTRAINT => Some(UniqueColumn::ShortCode),
        ORIGINAL_URL_CONSTRAINT => Some(UniqueColumn::OriginalUrl),
        _ => None,
    }
}
