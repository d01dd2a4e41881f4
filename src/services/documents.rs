//! Pieces shared by the receipt and shipment document services: line input
//! validation, sequential document numbering and catalog reference checks.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IsolationLevel, QueryFilter, QuerySelect, TransactionTrait,
};
use serde::Deserialize;

use crate::{
    dto::DocumentLineView,
    entities::{resource, unit},
    errors::ServiceError,
    messages,
};

/// One document line as submitted by a caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLineInput {
    pub resource_id: i64,
    pub unit_id: i64,
    pub count: Decimal,
}

/// Filter set accepted by the document list endpoints. Empty id lists and
/// absent dates match everything.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    pub numbers: Vec<i64>,
    pub resource_ids: Vec<i64>,
    pub unit_ids: Vec<i64>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Opens the transaction every document mutation runs in. Mutations read
/// balance rows before writing them, so the isolation level must keep two
/// concurrent debits from both passing the sufficiency pre-check against
/// the same stale count. SQLite transactions are always serializable; the
/// explicit level matters on Postgres.
pub(crate) async fn begin_serializable(
    db: &DatabaseConnection,
) -> Result<DatabaseTransaction, ServiceError> {
    db.begin_with_config(Some(IsolationLevel::Serializable), None)
        .await
        .map_err(ServiceError::from)
}

/// Rejects non-positive counts and duplicate (resource, unit) pairs.
/// Line matching during updates keys on the pair, so it must be unique
/// within one document.
pub(crate) fn validate_lines(lines: &[DocumentLineInput]) -> Result<(), ServiceError> {
    let mut seen = BTreeSet::new();
    for line in lines {
        if line.count <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                messages::LINE_COUNT_NOT_POSITIVE.to_string(),
            ));
        }
        if !seen.insert((line.resource_id, line.unit_id)) {
            return Err(ServiceError::ValidationError(
                messages::DUPLICATE_LINE.to_string(),
            ));
        }
    }
    Ok(())
}

/// Verifies every referenced resource and unit exists, so bad references
/// surface as a validation error instead of a foreign key failure.
pub(crate) async fn ensure_line_refs<C>(
    conn: &C,
    lines: &[DocumentLineInput],
) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    let resource_ids: BTreeSet<i64> = lines.iter().map(|l| l.resource_id).collect();
    let unit_ids: BTreeSet<i64> = lines.iter().map(|l| l.unit_id).collect();

    if !resource_ids.is_empty() {
        let found = resource::Entity::find()
            .filter(resource::Column::Id.is_in(resource_ids.iter().copied()))
            .all(conn)
            .await?;
        if found.len() != resource_ids.len() {
            return Err(ServiceError::ValidationError(
                messages::UNKNOWN_LINE_RESOURCE.to_string(),
            ));
        }
    }
    if !unit_ids.is_empty() {
        let found = unit::Entity::find()
            .filter(unit::Column::Id.is_in(unit_ids.iter().copied()))
            .all(conn)
            .await?;
        if found.len() != unit_ids.len() {
            return Err(ServiceError::ValidationError(
                messages::UNKNOWN_LINE_UNIT.to_string(),
            ));
        }
    }
    Ok(())
}

/// Next sequential document number: max existing + 1, starting at 1.
pub(crate) async fn next_number<E, C>(conn: &C, number_column: E::Column) -> Result<i64, ServiceError>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let max = E::find()
        .select_only()
        .column_as(number_column.max(), "max_number")
        .into_tuple::<Option<i64>>()
        .one(conn)
        .await?;
    Ok(max.flatten().unwrap_or(0) + 1)
}

/// Loads id-to-name maps for resources and units in one pass, for joining
/// display names onto document lines.
pub(crate) async fn catalog_name_maps<C>(
    conn: &C,
) -> Result<(HashMap<i64, String>, HashMap<i64, String>), ServiceError>
where
    C: ConnectionTrait,
{
    let resources = resource::Entity::find()
        .all(conn)
        .await?
        .into_iter()
        .map(|r| (r.id, r.name))
        .collect();
    let units = unit::Entity::find()
        .all(conn)
        .await?
        .into_iter()
        .map(|u| (u.id, u.name))
        .collect();
    Ok((resources, units))
}

pub(crate) fn line_view(
    id: i64,
    resource_id: i64,
    unit_id: i64,
    count: Decimal,
    resources: &HashMap<i64, String>,
    units: &HashMap<i64, String>,
) -> DocumentLineView {
    DocumentLineView {
        id,
        resource_id,
        resource_name: resources.get(&resource_id).cloned().unwrap_or_default(),
        unit_id,
        unit_name: units.get(&unit_id).cloned().unwrap_or_default(),
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    fn line(resource_id: i64, unit_id: i64, count: Decimal) -> DocumentLineInput {
        DocumentLineInput {
            resource_id,
            unit_id,
            count,
        }
    }

    #[test]
    fn rejects_non_positive_counts() {
        assert_matches!(
            validate_lines(&[line(1, 1, dec!(0))]),
            Err(ServiceError::ValidationError(_))
        );
        assert_matches!(
            validate_lines(&[line(1, 1, dec!(-3))]),
            Err(ServiceError::ValidationError(_))
        );
    }

    #[test]
    fn rejects_duplicate_pairs() {
        let lines = [line(1, 2, dec!(1)), line(1, 2, dec!(4))];
        assert_matches!(
            validate_lines(&lines),
            Err(ServiceError::ValidationError(_))
        );
    }

    #[test]
    fn accepts_distinct_pairs() {
        let lines = [line(1, 1, dec!(1)), line(1, 2, dec!(1)), line(2, 1, dec!(1))];
        assert!(validate_lines(&lines).is_ok());
    }
}
