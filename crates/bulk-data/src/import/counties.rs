use std::collections::{BTreeMap, HashMap};

use shared_types::AppError;

const BUNDLED: &str = include_str!("../../data/ca_counties.json");

/// Prefix of every California superior court jurisdiction key.
pub const SUPERIOR_COURT_PREFIX: &str = "casuperct";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct County {
    pub name: String,
    pub abbreviation: String,
}

/// California county names and their short abbreviations.
#[derive(Debug, Clone)]
pub struct CountyTable {
    by_name: HashMap<String, County>,
}

impl CountyTable {
    /// The table shipped with the binary.
    pub fn bundled() -> Result<Self, AppError> {
        Self::from_json(BUNDLED)
    }

    /// Parse a `{ "County Name": "abbr", ... }` document.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut by_name = HashMap::with_capacity(raw.len());
        for (name, abbreviation) in raw {
            let abbreviation = abbreviation.trim().to_lowercase();
            if abbreviation.is_empty() {
                return Err(AppError::config(format!(
                    "county '{name}' has an empty abbreviation"
                )));
            }
            by_name.insert(
                name.trim().to_lowercase(),
                County {
                    name: name.trim().to_string(),
                    abbreviation,
                },
            );
        }
        Ok(Self { by_name })
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Case-insensitive lookup; a trailing "County" is ignored.
    pub fn county(&self, name: &str) -> Option<&County> {
        let key = name.trim().to_lowercase();
        let key = key.strip_suffix(" county").unwrap_or(&key).trim();
        self.by_name.get(key)
    }

    /// `casuperct<abbr>` for a known county.
    pub fn court_id_for_county(&self, name: &str) -> Option<String> {
        self.county(name)
            .map(|c| format!("{SUPERIOR_COURT_PREFIX}{}", c.abbreviation))
    }

    /// Map a court as written in a dump to a jurisdiction key.
    ///
    /// Recognizes "Superior Court of California, County of X",
    /// "X County Superior Court", "X Superior Court", and a bare county
    /// name. Anything else is taken to already be a key and returned trimmed.
    pub fn resolve_court(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        let lower = trimmed.to_lowercase();

        let county_part = lower
            .strip_prefix("superior court of california, county of ")
            .or_else(|| lower.strip_suffix(" superior court"))
            .unwrap_or(&lower);

        match self.court_id_for_county(county_part) {
            Some(id) => id,
            None => trimmed.to_string(),
        }
    }
}
