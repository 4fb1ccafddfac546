use std::fmt;

use sqlx::{Postgres, QueryBuilder};

pub mod department;
pub mod institution;
#[cfg(test)]
pub mod memory;

/// Tagged persistence error. Handlers match on the tag instead of digging
/// through driver-specific error types.
#[derive(Debug)]
pub enum RepoError {
    Conflict(String),
    NotFound,
    Other(String),
}

impl fmt::Display for RepoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoError::Conflict(msg) => write!(f, "{}", msg),
            RepoError::NotFound => write!(f, "record not found"),
            RepoError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Conflict(db.message().to_string())
            }
            _ => RepoError::Other(err.to_string()),
        }
    }
}

/// Columns a list query may be ordered by. Anything outside this set is
/// rejected at parse time rather than forwarded to the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Name,
    Region,
    Country,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Accepts the camelCase tokens of the query string; absent means id.
    pub fn parse(token: Option<&str>) -> Result<Self, String> {
        match token {
            None => Ok(SortField::Id),
            Some("id") => Ok(SortField::Id),
            Some("name") => Ok(SortField::Name),
            Some("region") => Ok(SortField::Region),
            Some("country") => Ok(SortField::Country),
            Some("createdAt") => Ok(SortField::CreatedAt),
            Some("updatedAt") => Ok(SortField::UpdatedAt),
            Some(other) => Err(format!("Cannot sort by field: {}", other)),
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Region => "region",
            SortField::Country => "country",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Only a `desc` token selects descending; anything else is ascending.
    pub fn parse(token: Option<&str>) -> Self {
        match token {
            Some(t) if t.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Optional substring filters for list queries. Both entities expose the
/// same filterable columns.
#[derive(Debug, Clone, Default)]
pub struct EntityFilters {
    pub name: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl EntityFilters {
    fn entries(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("name", self.name.as_deref()),
            ("region", self.region.as_deref()),
            ("country", self.country.as_deref()),
        ]
    }
}

/// Assembles `SELECT * FROM <table> [WHERE ...] ORDER BY ...`. Present
/// filters become parameterized `LIKE '%v%'` predicates ANDed together;
/// empty values contribute nothing. Column and direction come from enums,
/// never from caller strings.
pub(crate) fn build_list_query(
    table: &str,
    filters: &EntityFilters,
    sort_by: SortField,
    sort_order: SortOrder,
) -> QueryBuilder<'static, Postgres> {
    let mut builder: QueryBuilder<'static, Postgres> =
        QueryBuilder::new(format!("SELECT * FROM {}", table));

    let mut separator = " WHERE ";
    for (column, value) in filters.entries() {
        let Some(value) = value else { continue };
        if value.is_empty() {
            continue;
        }
        builder.push(separator);
        builder.push(column);
        builder.push(" LIKE ");
        builder.push_bind(format!("%{}%", value));
        separator = " AND ";
    }

    builder.push(" ORDER BY ");
    builder.push(sort_by.column());
    builder.push(" ");
    builder.push(sort_order.sql());
    builder
}
