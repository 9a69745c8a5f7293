pub mod audio;
pub mod court;
pub mod docket;
pub mod judge;
pub mod opinion;
pub mod opinion_citation;
pub mod position;

use shared_types::AppError;
use uuid::Uuid;

/// Parse a keyset pagination cursor for a UUID-keyed table.
pub(crate) fn uuid_cursor(after: Option<&str>) -> Result<Option<Uuid>, AppError> {
    after
        .map(|s| {
            Uuid::parse_str(s)
                .map_err(|_| AppError::bad_request(format!("Invalid pagination cursor '{s}'")))
        })
        .transpose()
}
