//! Receipt documents: inbound stock that credits the balance at creation.
//!
//! Updates reconcile line by line against the stored document so only the
//! net movement touches the ledger; deletes reverse the whole document.
//! Every mutation runs in a single transaction.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, instrument};

use crate::{
    dto::ReceiptDocumentView,
    entities::{receipt_document, receipt_line},
    errors::ServiceError,
    messages,
    services::{
        balances,
        documents::{self, DocumentFilter, DocumentLineInput},
    },
};

#[derive(Clone)]
pub struct ReceiptService {
    db: Arc<DatabaseConnection>,
}

impl ReceiptService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists receipt documents matching the filter, lines included.
    /// Resource/unit filters keep a document when any of its lines match.
    #[instrument(skip(self, filter))]
    pub async fn list(&self, filter: &DocumentFilter) -> Result<Vec<ReceiptDocumentView>, ServiceError> {
        let db = &*self.db;
        let mut query = receipt_document::Entity::find()
            .order_by_asc(receipt_document::Column::Number);
        if !filter.numbers.is_empty() {
            query = query.filter(receipt_document::Column::Number.is_in(filter.numbers.iter().copied()));
        }
        if let Some(from) = filter.from {
            query = query.filter(receipt_document::Column::Date.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(receipt_document::Column::Date.lte(to));
        }
        let docs = query.all(db).await?;

        let lines = receipt_line::Entity::find()
            .filter(
                receipt_line::Column::DocumentId.is_in(docs.iter().map(|d| d.id)),
            )
            .all(db)
            .await?;
        let mut by_doc: HashMap<i64, Vec<receipt_line::Model>> = HashMap::new();
        for line in lines {
            by_doc.entry(line.document_id).or_default().push(line);
        }

        let (resource_names, unit_names) = documents::catalog_name_maps(db).await?;
        let views = docs
            .into_iter()
            .filter_map(|doc| {
                let lines = by_doc.remove(&doc.id).unwrap_or_default();
                if !filter.resource_ids.is_empty()
                    && !lines.iter().any(|l| filter.resource_ids.contains(&l.resource_id))
                {
                    return None;
                }
                if !filter.unit_ids.is_empty()
                    && !lines.iter().any(|l| filter.unit_ids.contains(&l.unit_id))
                {
                    return None;
                }
                Some(ReceiptDocumentView {
                    id: doc.id,
                    number: doc.number,
                    date: doc.date,
                    lines: lines
                        .into_iter()
                        .map(|l| {
                            documents::line_view(
                                l.id,
                                l.resource_id,
                                l.unit_id,
                                l.count,
                                &resource_names,
                                &unit_names,
                            )
                        })
                        .collect(),
                })
            })
            .collect();
        Ok(views)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<ReceiptDocumentView, ServiceError> {
        let db = &*self.db;
        let doc = find_document(db, id).await?;
        let lines = doc.find_related(receipt_line::Entity).all(db).await?;
        let (resource_names, unit_names) = documents::catalog_name_maps(db).await?;
        Ok(ReceiptDocumentView {
            id: doc.id,
            number: doc.number,
            date: doc.date,
            lines: lines
                .into_iter()
                .map(|l| {
                    documents::line_view(
                        l.id,
                        l.resource_id,
                        l.unit_id,
                        l.count,
                        &resource_names,
                        &unit_names,
                    )
                })
                .collect(),
        })
    }

    /// Creates a receipt and credits the balance per line. A receipt may be
    /// created without lines.
    #[instrument(skip(self, lines))]
    pub async fn create(&self, lines: &[DocumentLineInput]) -> Result<ReceiptDocumentView, ServiceError> {
        documents::validate_lines(lines)?;
        let db = &*self.db;
        documents::ensure_line_refs(db, lines).await?;

        let txn = documents::begin_serializable(db).await?;
        let number =
            documents::next_number::<receipt_document::Entity, _>(&txn, receipt_document::Column::Number)
                .await?;
        let doc = receipt_document::ActiveModel {
            number: Set(number),
            date: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        for line in lines {
            receipt_line::ActiveModel {
                document_id: Set(doc.id),
                resource_id: Set(line.resource_id),
                unit_id: Set(line.unit_id),
                count: Set(line.count),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            balances::credit(&txn, line.resource_id, line.unit_id, line.count).await?;
        }
        txn.commit().await?;

        info!(id = doc.id, number, "receipt created");
        self.get(doc.id).await
    }

    /// Replaces the document's lines, moving only the per-pair delta on the
    /// balance. Shrinking a line (or dropping it) must pass the debit
    /// pre-check, so stock consumed by later shipments cannot go negative.
    #[instrument(skip(self, lines))]
    pub async fn update(&self, id: i64, lines: &[DocumentLineInput]) -> Result<ReceiptDocumentView, ServiceError> {
        documents::validate_lines(lines)?;
        let db = &*self.db;
        documents::ensure_line_refs(db, lines).await?;

        let txn = documents::begin_serializable(db).await?;
        let doc = find_document(&txn, id).await?;
        let existing = doc.find_related(receipt_line::Entity).all(&txn).await?;

        let old: HashMap<(i64, i64), Decimal> = existing
            .iter()
            .map(|l| ((l.resource_id, l.unit_id), l.count))
            .collect();

        // Credits first, then debits, so a rebalancing between pairs inside
        // one update is not order-sensitive.
        let mut debits = Vec::new();
        for line in lines {
            let delta = line.count - old.get(&(line.resource_id, line.unit_id)).copied().unwrap_or_default();
            if delta > Decimal::ZERO {
                balances::credit(&txn, line.resource_id, line.unit_id, delta).await?;
            } else if delta < Decimal::ZERO {
                debits.push((line.resource_id, line.unit_id, -delta));
            }
        }
        for old_line in &existing {
            if !lines
                .iter()
                .any(|l| l.resource_id == old_line.resource_id && l.unit_id == old_line.unit_id)
            {
                debits.push((old_line.resource_id, old_line.unit_id, old_line.count));
            }
        }
        for (resource_id, unit_id, amount) in debits {
            balances::debit(&txn, resource_id, unit_id, amount).await?;
        }

        receipt_line::Entity::delete_many()
            .filter(receipt_line::Column::DocumentId.eq(doc.id))
            .exec(&txn)
            .await?;
        for line in lines {
            receipt_line::ActiveModel {
                document_id: Set(doc.id),
                resource_id: Set(line.resource_id),
                unit_id: Set(line.unit_id),
                count: Set(line.count),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
        txn.commit().await?;

        info!(id, "receipt updated");
        self.get(id).await
    }

    /// Deletes a receipt, debiting every line back off the balance. Fails
    /// with 400 when the stock has already been shipped out.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let db = &*self.db;
        let txn = documents::begin_serializable(db).await?;
        let doc = find_document(&txn, id).await?;
        let lines = doc.find_related(receipt_line::Entity).all(&txn).await?;
        for line in &lines {
            balances::debit(&txn, line.resource_id, line.unit_id, line.count).await?;
        }
        receipt_line::Entity::delete_many()
            .filter(receipt_line::Column::DocumentId.eq(doc.id))
            .exec(&txn)
            .await?;
        receipt_document::Entity::delete_by_id(doc.id).exec(&txn).await?;
        txn.commit().await?;

        info!(id, "receipt deleted");
        Ok(())
    }
}

async fn find_document<C>(conn: &C, id: i64) -> Result<receipt_document::Model, ServiceError>
where
    C: ConnectionTrait,
{
    receipt_document::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(messages::RECEIPT_NOT_FOUND.to_string()))
}
