//! Alumni directory entry model.

use alumni_core::alumni::{AlumniFilter, FilterFields};
use alumni_core::error::CoreError;
use alumni_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `alumni` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alumni {
    pub id: DbId,
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
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Alumni {
    pub fn filter_fields(&self) -> FilterFields<'_> {
        FilterFields {
            name: &self.name,
            company: self.company.as_deref(),
            current_role: self.current_role.as_deref(),
            course: &self.course,
            domain: self.domain.as_deref(),
            graduation_year: self.graduation_year,
        }
    }

    pub fn summary(&self) -> AlumniSummary {
        AlumniSummary {
            id: self.id,
            name: self.name.clone(),
            company: self.company.clone(),
        }
    }
}

/// The alumni projection embedded in connection request listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlumniSummary {
    pub id: DbId,
    pub name: String,
    pub company: Option<String>,
}

/// Query parameters for the directory listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlumniQuery {
    pub search: Option<String>,
    pub course: Option<String>,
    pub domain: Option<String>,
    pub year: Option<String>,
}

impl AlumniQuery {
    pub fn to_filter(&self) -> Result<AlumniFilter, CoreError> {
        AlumniFilter::from_params(
            self.search.as_deref(),
            self.course.as_deref(),
            self.domain.as_deref(),
            self.year.as_deref(),
        )
    }
}
