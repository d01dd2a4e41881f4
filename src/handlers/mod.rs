//! HTTP handlers, one module per API area.

pub mod balances;
pub mod clients;
pub mod receipts;
pub mod resources;
pub mod shipments;
pub mod units;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::{
    entities::EntityState,
    errors::ServiceError,
    services::documents::DocumentFilter,
};

/// `?state=` filter for catalog list endpoints.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub state: Option<EntityState>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NamePayload {
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkIds {
    pub ids: Vec<i64>,
}

/// Raw document list filters; id lists arrive as comma-separated strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentQuery {
    pub numbers: Option<String>,
    pub resource_ids: Option<String>,
    pub unit_ids: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DocumentQuery {
    pub fn into_filter(self) -> Result<DocumentFilter, ServiceError> {
        Ok(DocumentFilter {
            numbers: parse_id_list(self.numbers.as_deref())?,
            resource_ids: parse_id_list(self.resource_ids.as_deref())?,
            unit_ids: parse_id_list(self.unit_ids.as_deref())?,
            from: self.from,
            to: self.to,
        })
    }
}

/// Parses a comma-separated id list; absent or empty means no filter.
pub(crate) fn parse_id_list(raw: Option<&str>) -> Result<Vec<i64>, ServiceError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| ServiceError::ValidationError(format!("Invalid id value: {part}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_ids() {
        assert_eq!(parse_id_list(Some("1, 2,3")).unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_id_list(None).unwrap(), Vec::<i64>::new());
        assert_eq!(parse_id_list(Some("")).unwrap(), Vec::<i64>::new());
        assert!(parse_id_list(Some("1,x")).is_err());
    }
}
