//! Alumni profile rules: required fields, graduation-year coercion, and the
//! directory filter contract.
//!
//! Filter contract: `search` matches name, company or current role as a
//! case-insensitive substring; `course` and `domain` are case-insensitive
//! substrings; `year` is exact. An empty value or `all` disables a filter.

use serde_json::Value;

use crate::error::CoreError;

/// Sentinel a client may send to mean "no filter".
pub const FILTER_ALL: &str = "all";

/// Accepted graduation years.
pub const MIN_GRADUATION_YEAR: i32 = 1900;
pub const MAX_GRADUATION_YEAR: i32 = 2100;

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Normalized directory filter. `None` fields do not constrain the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlumniFilter {
    pub search: Option<String>,
    pub course: Option<String>,
    pub domain: Option<String>,
    pub year: Option<i32>,
}

/// The profile fields a filter looks at.
#[derive(Debug, Clone, Copy)]
pub struct FilterFields<'a> {
    pub name: &'a str,
    pub company: Option<&'a str>,
    pub current_role: Option<&'a str>,
    pub course: &'a str,
    pub domain: Option<&'a str>,
    pub graduation_year: i32,
}

impl AlumniFilter {
    /// Build a filter from raw query parameters.
    pub fn from_params(
        search: Option<&str>,
        course: Option<&str>,
        domain: Option<&str>,
        year: Option<&str>,
    ) -> Result<Self, CoreError> {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let year = match active(year) {
            None => None,
            Some(y) => Some(y.parse::<i32>().map_err(|_| {
                CoreError::Validation(format!("Invalid year filter '{y}'"))
            })?),
        };

        Ok(Self {
            search,
            course: active(course).map(str::to_string),
            domain: active(domain).map(str::to_string),
            year,
        })
    }

    pub fn matches(&self, fields: FilterFields<'_>) -> bool {
        if let Some(search) = &self.search {
            let hit = contains_ci(fields.name, search)
                || fields.company.is_some_and(|c| contains_ci(c, search))
                || fields.current_role.is_some_and(|r| contains_ci(r, search));
            if !hit {
                return false;
            }
        }
        if let Some(course) = &self.course {
            if !contains_ci(fields.course, course) {
                return false;
            }
        }
        if let Some(domain) = &self.domain {
            if !fields.domain.is_some_and(|d| contains_ci(d, domain)) {
                return false;
            }
        }
        if let Some(year) = self.year {
            if fields.graduation_year != year {
                return false;
            }
        }
        true
    }
}

/// A filter value that is neither empty nor the `all` sentinel.
fn active(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(FILTER_ALL))
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ---------------------------------------------------------------------------
// Profile input
// ---------------------------------------------------------------------------

/// Raw profile fields from a create or update call.
#[derive(Debug, Clone, Default)]
pub struct AlumniDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub graduation_year: Option<Value>,
    pub current_role: Option<String>,
    pub company: Option<String>,
    pub domain: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub linkedin: Option<String>,
    pub image: Option<String>,
}

/// A validated profile, ready to persist. Empty optional strings are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidAlumni {
    pub name: String,
    pub email: Option<String>,
    pub course: String,
    pub graduation_year: i32,
    pub current_role: Option<String>,
    pub company: Option<String>,
    pub domain: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub linkedin: Option<String>,
    pub image: Option<String>,
}

impl AlumniDraft {
    pub fn validate(self) -> Result<ValidAlumni, CoreError> {
        let name = non_empty(self.name);
        let course = non_empty(self.course);
        let (Some(name), Some(course), Some(year)) = (name, course, self.graduation_year) else {
            return Err(CoreError::Validation(
                "Name, course, and graduation year are required".to_string(),
            ));
        };
        let graduation_year = coerce_year(&year)?;

        Ok(ValidAlumni {
            name,
            email: non_empty(self.email),
            course,
            graduation_year,
            current_role: non_empty(self.current_role),
            company: non_empty(self.company),
            domain: non_empty(self.domain),
            location: non_empty(self.location),
            summary: non_empty(self.summary),
            linkedin: non_empty(self.linkedin),
            image: non_empty(self.image),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Coerce a graduation year sent as a JSON number or a numeric string.
pub fn coerce_year(value: &Value) -> Result<i32, CoreError> {
    let year = match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
    .ok_or_else(|| CoreError::Validation(format!("Graduation year must be numeric, got {value}")))?;

    if !(MIN_GRADUATION_YEAR..=MAX_GRADUATION_YEAR).contains(&year) {
        return Err(CoreError::Validation(format!(
            "Graduation year must be between {MIN_GRADUATION_YEAR} and {MAX_GRADUATION_YEAR}"
        )));
    }
    Ok(year)
}
