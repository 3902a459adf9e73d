//! Repository for the `alumni` table.

use alumni_core::alumni::{AlumniFilter, ValidAlumni};
use alumni_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::alumni::Alumni;

/// `current_role` is quoted: `CURRENT_ROLE` is an SQL keyword.
const COLUMNS: &str = "id, name, email, course, graduation_year, \"current_role\", company, \
                        domain, location, summary, linkedin, image, created_at, updated_at";

/// Provides CRUD operations for alumni directory entries.
pub struct AlumniRepo;

impl AlumniRepo {
    /// List entries matching `filter`, ordered by name.
    ///
    /// Text filters are case-insensitive substring matches; `NULL` parameters
    /// disable their clause.
    pub async fn list<'e>(
        db: impl PgExecutor<'e>,
        filter: &AlumniFilter,
    ) -> Result<Vec<Alumni>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alumni
             WHERE ($1::TEXT IS NULL
                    OR name ILIKE $1 ESCAPE '\\'
                    OR company ILIKE $1 ESCAPE '\\'
                    OR \"current_role\" ILIKE $1 ESCAPE '\\')
               AND ($2::TEXT IS NULL OR course ILIKE $2 ESCAPE '\\')
               AND ($3::TEXT IS NULL OR domain ILIKE $3 ESCAPE '\\')
               AND ($4::INTEGER IS NULL OR graduation_year = $4)
             ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, Alumni>(&query)
            .bind(filter.search.as_deref().map(contains_pattern))
            .bind(filter.course.as_deref().map(contains_pattern))
            .bind(filter.domain.as_deref().map(contains_pattern))
            .bind(filter.year)
            .fetch_all(db)
            .await
    }

    pub async fn find_by_id<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Alumni>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alumni WHERE id = $1");
        sqlx::query_as::<_, Alumni>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn create<'e>(
        db: impl PgExecutor<'e>,
        input: &ValidAlumni,
    ) -> Result<Alumni, sqlx::Error> {
        let query = format!(
            "INSERT INTO alumni
                (name, email, course, graduation_year, \"current_role\", company,
                 domain, location, summary, linkedin, image)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alumni>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.course)
            .bind(input.graduation_year)
            .bind(&input.current_role)
            .bind(&input.company)
            .bind(&input.domain)
            .bind(&input.location)
            .bind(&input.summary)
            .bind(&input.linkedin)
            .bind(&input.image)
            .fetch_one(db)
            .await
    }

    /// Replace every field of an entry. Returns `None` if no row with the
    /// given `id` exists.
    pub async fn update<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        input: &ValidAlumni,
    ) -> Result<Option<Alumni>, sqlx::Error> {
        let query = format!(
            "UPDATE alumni SET
                name = $2,
                email = $3,
                course = $4,
                graduation_year = $5,
                \"current_role\" = $6,
                company = $7,
                domain = $8,
                location = $9,
                summary = $10,
                linkedin = $11,
                image = $12
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alumni>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.course)
            .bind(input.graduation_year)
            .bind(&input.current_role)
            .bind(&input.company)
            .bind(&input.domain)
            .bind(&input.location)
            .bind(&input.summary)
            .bind(&input.linkedin)
            .bind(&input.image)
            .fetch_optional(db)
            .await
    }

    /// Returns `true` if a row was removed. Referencing requests must be
    /// deleted first.
    pub async fn delete<'e>(db: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM alumni WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists<'e>(db: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM alumni WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await
    }
}

/// Wrap a term for `ILIKE`, escaping the wildcard characters it may contain.
fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
