use shared_types::{AppError, NewJudge};

const HONORIFICS: [&str; 5] = ["hon.", "hon", "honorable", "judge", "justice"];

/// A full name split into its stored parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub full: String,
    pub first: String,
    pub middle: Option<String>,
    pub last: String,
    pub suffix: Option<String>,
}

impl From<ParsedName> for NewJudge {
    fn from(name: ParsedName) -> Self {
        Self {
            name_full: name.full,
            name_first: name.first,
            name_middle: name.middle,
            name_last: name.last,
            name_suffix: name.suffix,
        }
    }
}

fn canonical_suffix(token: &str) -> Option<&'static str> {
    let lower = token.trim_end_matches(',').to_lowercase();
    let lower = if lower == "jr" || lower == "sr" {
        format!("{lower}.")
    } else {
        lower
    };
    match lower.as_str() {
        "jr." => Some("Jr."),
        "sr." => Some("Sr."),
        "ii" => Some("II"),
        "iii" => Some("III"),
        "iv" => Some("IV"),
        _ => None,
    }
}

/// Split a judge's name into first, middle, last, and suffix.
///
/// Accepts "First Middle Last Suffix" and "Last, First Middle". Leading
/// honorifics ("Hon.", "Judge", ...) are dropped. A one-word name is
/// stored as the last name.
pub fn parse_full_name(full: &str) -> Result<ParsedName, AppError> {
    let collapsed = full.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut tokens: Vec<String> = collapsed
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    while tokens
        .first()
        .is_some_and(|t| HONORIFICS.contains(&t.to_lowercase().as_str()))
    {
        tokens.remove(0);
    }
    let bare = tokens.join(" ");

    let mut suffix = None;
    if let Some(s) = tokens.last().and_then(|t| canonical_suffix(t)) {
        suffix = Some(s.to_string());
        tokens.pop();
    }

    // "Last, First Middle"
    let comma = tokens.iter().position(|t| t.ends_with(','));
    if let Some(idx) = comma.filter(|idx| idx + 1 < tokens.len()) {
        let last = tokens[..=idx].join(" ").trim_end_matches(',').to_string();
        let rest: Vec<String> = tokens[idx + 1..]
            .iter()
            .map(|t| t.trim_end_matches(',').to_string())
            .collect();
        tokens = rest;
        tokens.push(last);
    }
    for token in tokens.iter_mut() {
        *token = token.trim_end_matches(',').to_string();
    }
    tokens.retain(|t| !t.is_empty());

    let Some(last) = tokens.pop() else {
        return Err(AppError::invalid_field(
            "full_name",
            format!("cannot parse a name from '{full}'"),
        ));
    };
    let first = if tokens.is_empty() {
        String::new()
    } else {
        tokens.remove(0)
    };
    let middle = if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    };

    Ok(ParsedName {
        full: bare,
        first,
        middle,
        last,
        suffix,
    })
}
