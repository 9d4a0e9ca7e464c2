use serde::{Deserialize, Serialize};
use validator::Validate;

/// Plain page/limit pagination used by most list endpoints.
#[derive(Serialize, Deserialize, Validate)]
pub struct RequestQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

/// Query parameters for list endpoints scoped to a caller's email.
#[derive(Serialize, Deserialize, Validate)]
pub struct EmailScopeQueryDto {
    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

/// Explicit scope for filtered list queries. Endpoints branch on this
/// variant instead of probing for an optional email.
#[derive(Debug, Clone, PartialEq)]
pub enum ListScope {
    All,
    ByEmail(String),
}

impl ListScope {
    pub fn from_query(email: Option<String>) -> Self {
        match email {
            Some(email) if !email.is_empty() => ListScope::ByEmail(email),
            _ => ListScope::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortField {
    Price,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Sort specification for the public property list. Parsed from
/// `field`/`order` query strings into a closed pair so the store layer
/// never interpolates caller input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertySort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for PropertySort {
    fn default() -> Self {
        PropertySort {
            field: SortField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

impl PropertySort {
    pub fn parse(field: Option<&str>, order: Option<&str>) -> Result<Self, String> {
        let field = match field {
            None => SortField::CreatedAt,
            Some("price") => SortField::Price,
            Some("createdAt") => SortField::CreatedAt,
            Some(other) => return Err(format!("Unknown sort field: {}", other)),
        };

        let order = match order {
            None => SortOrder::Desc,
            Some("asc") => SortOrder::Asc,
            Some("desc") => SortOrder::Desc,
            Some(other) => return Err(format!("Unknown sort order: {}", other)),
        };

        Ok(PropertySort { field, order })
    }

    pub fn order_clause(&self) -> &'static str {
        match (self.field, self.order) {
            (SortField::Price, SortOrder::Asc) => "min_price ASC",
            (SortField::Price, SortOrder::Desc) => "min_price DESC",
            (SortField::CreatedAt, SortOrder::Asc) => "created_at ASC",
            (SortField::CreatedAt, SortOrder::Desc) => "created_at DESC",
        }
    }
}

#[derive(Serialize, Deserialize, Validate)]
pub struct PropertyListQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub size: Option<usize>,
    pub field: Option<String>,
    pub order: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_email_means_unscoped() {
        assert_eq!(ListScope::from_query(None), ListScope::All);
        assert_eq!(ListScope::from_query(Some(String::new())), ListScope::All);
    }

    #[test]
    fn present_email_scopes_the_query() {
        assert_eq!(
            ListScope::from_query(Some("agent@example.com".to_string())),
            ListScope::ByEmail("agent@example.com".to_string())
        );
    }

    #[test]
    fn sort_defaults_to_newest_first() {
        let sort = PropertySort::parse(None, None).unwrap();
        assert_eq!(sort.order_clause(), "created_at DESC");
    }

    #[test]
    fn sort_parses_known_fields() {
        let sort = PropertySort::parse(Some("price"), Some("asc")).unwrap();
        assert_eq!(sort.field, SortField::Price);
        assert_eq!(sort.order, SortOrder::Asc);
        assert_eq!(sort.order_clause(), "min_price ASC");
    }

    #[test]
    fn sort_rejects_unknown_input() {
        assert!(PropertySort::parse(Some("agent_email"), None).is_err());
        assert!(PropertySort::parse(Some("price"), Some("sideways")).is_err());
    }
}
