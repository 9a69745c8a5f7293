use chrono::NaiveDate;
use shared_types::{AppError, DateGranularity, NewPosition, RawPosition};

use super::counties::CountyTable;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a dump date into a calendar day.
///
/// Accepts `YYYY-MM-DD`, `MM/DD/YYYY`, and ISO datetimes (the time part is
/// discarded). Every imported date is stored with day granularity.
pub fn convert_date_to_gran_format(raw: &str) -> Result<NaiveDate, AppError> {
    let trimmed = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    // 2001-05-01T00:00:00Z and friends
    if let Some(prefix) = trimmed.get(..10) {
        if trimmed[10..].starts_with(['T', ' ']) {
            if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
                return Ok(date);
            }
        }
    }

    Err(AppError::invalid_field(
        "date",
        format!("unrecognized date '{raw}'"),
    ))
}

fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trim every field, drop blanks, and map courts and counties through the
/// county table. The result is still a raw position; see
/// [`normalize_position`].
pub fn process_positions(raw: &[RawPosition], counties: &CountyTable) -> Vec<RawPosition> {
    raw.iter()
        .map(|p| RawPosition {
            court: clean(&p.court).map(|c| counties.resolve_court(&c)),
            organization_name: clean(&p.organization_name),
            position_type: clean(&p.position_type),
            job_title: clean(&p.job_title),
            how_selected: clean(&p.how_selected),
            location_city: clean(&p.location_city),
            location_county: clean(&p.location_county).map(|c| {
                counties
                    .county(&c)
                    .map(|county| county.name.clone())
                    .unwrap_or(c)
            }),
            date_start: clean(&p.date_start),
            date_termination: clean(&p.date_termination),
            termination_reason: clean(&p.termination_reason),
            pending_status: clean(&p.pending_status),
            inactive_status: clean(&p.inactive_status),
        })
        .collect()
}

/// Turn a processed position into an insertable one.
///
/// `pending_status` and `inactive_status` are dropped. A court wins over an
/// organization name, a position type wins over a job title, and the
/// termination reason only survives alongside a termination date.
pub fn normalize_position(position: RawPosition) -> Result<NewPosition, AppError> {
    let date_start = position
        .date_start
        .as_deref()
        .map(convert_date_to_gran_format)
        .transpose()
        .map_err(|e| AppError::invalid_field("date_start", e.message))?;
    let date_termination = position
        .date_termination
        .as_deref()
        .map(convert_date_to_gran_format)
        .transpose()
        .map_err(|e| AppError::invalid_field("date_termination", e.message))?;

    let organization_name = match position.court {
        Some(_) => None,
        None => position.organization_name,
    };
    let job_title = match position.position_type {
        Some(_) => None,
        None => position.job_title,
    };
    let termination_reason = date_termination.and(position.termination_reason);

    Ok(NewPosition {
        court_id: position.court,
        organization_name,
        position_type: position.position_type,
        job_title,
        how_selected: position.how_selected,
        location_city: position.location_city,
        location_county: position.location_county,
        date_start,
        date_granularity_start: date_start.map(|_| DateGranularity::Day),
        date_termination,
        date_granularity_termination: date_termination.map(|_| DateGranularity::Day),
        termination_reason,
    })
}
