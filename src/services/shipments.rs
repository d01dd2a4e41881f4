//! Shipment documents: outbound stock reserved at sign time.
//!
//! Creating or editing an unsigned shipment never touches the balance; the
//! debit happens when the document is signed and is credited back when it
//! is withdrawn. Editing or deleting a signed document reverses the old
//! reservation before applying the new state, all inside one transaction.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, instrument};

use crate::{
    dto::ShipmentDocumentView,
    entities::{client, shipment_document, shipment_line, DocumentState},
    errors::ServiceError,
    messages,
    services::{
        balances,
        documents::{self, DocumentFilter, DocumentLineInput},
    },
};

#[derive(Clone)]
pub struct ShipmentService {
    db: Arc<DatabaseConnection>,
}

impl ShipmentService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists shipment documents matching the filter, lines and client name
    /// included. Resource/unit filters keep a document when any line matches.
    #[instrument(skip(self, filter))]
    pub async fn list(&self, filter: &DocumentFilter) -> Result<Vec<ShipmentDocumentView>, ServiceError> {
        let db = &*self.db;
        let mut query = shipment_document::Entity::find()
            .order_by_asc(shipment_document::Column::Number);
        if !filter.numbers.is_empty() {
            query = query.filter(shipment_document::Column::Number.is_in(filter.numbers.iter().copied()));
        }
        if let Some(from) = filter.from {
            query = query.filter(shipment_document::Column::Date.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(shipment_document::Column::Date.lte(to));
        }
        let docs = query.all(db).await?;

        let lines = shipment_line::Entity::find()
            .filter(shipment_line::Column::DocumentId.is_in(docs.iter().map(|d| d.id)))
            .all(db)
            .await?;
        let mut by_doc: HashMap<i64, Vec<shipment_line::Model>> = HashMap::new();
        for line in lines {
            by_doc.entry(line.document_id).or_default().push(line);
        }

        let (resource_names, unit_names) = documents::catalog_name_maps(db).await?;
        let client_names = client_name_map(db).await?;

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
                Some(view(&doc, lines, &resource_names, &unit_names, &client_names))
            })
            .collect();
        Ok(views)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<ShipmentDocumentView, ServiceError> {
        let db = &*self.db;
        let doc = find_document(db, id).await?;
        let lines = doc.find_related(shipment_line::Entity).all(db).await?;
        let (resource_names, unit_names) = documents::catalog_name_maps(db).await?;
        let client_names = client_name_map(db).await?;
        Ok(view(&doc, lines, &resource_names, &unit_names, &client_names))
    }

    /// Creates an unsigned shipment. The balance is not touched until the
    /// document is signed.
    #[instrument(skip(self, lines))]
    pub async fn create(
        &self,
        client_id: i64,
        lines: &[DocumentLineInput],
    ) -> Result<ShipmentDocumentView, ServiceError> {
        if lines.is_empty() {
            return Err(ServiceError::ValidationError(
                messages::SHIPMENT_NO_LINES.to_string(),
            ));
        }
        documents::validate_lines(lines)?;
        let db = &*self.db;
        if client::Entity::find_by_id(client_id).one(db).await?.is_none() {
            return Err(ServiceError::ValidationError(
                messages::SHIPMENT_CLIENT_MISSING.to_string(),
            ));
        }
        documents::ensure_line_refs(db, lines).await?;

        let txn = documents::begin_serializable(db).await?;
        let number = documents::next_number::<shipment_document::Entity, _>(
            &txn,
            shipment_document::Column::Number,
        )
        .await?;
        let doc = shipment_document::ActiveModel {
            number: Set(number),
            client_id: Set(client_id),
            date: Set(Utc::now()),
            state: Set(DocumentState::NotSigned),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        insert_lines(&txn, doc.id, lines).await?;
        txn.commit().await?;

        info!(id = doc.id, number, "shipment created");
        self.get(doc.id).await
    }

    /// Replaces the document's lines. For a signed document the old
    /// reservation is credited back and a new one is debited against the
    /// replacement lines; any shortfall aborts the whole update.
    #[instrument(skip(self, lines))]
    pub async fn update(&self, id: i64, lines: &[DocumentLineInput]) -> Result<ShipmentDocumentView, ServiceError> {
        if lines.is_empty() {
            return Err(ServiceError::ValidationError(
                messages::SHIPMENT_NO_LINES.to_string(),
            ));
        }
        documents::validate_lines(lines)?;
        let db = &*self.db;
        documents::ensure_line_refs(db, lines).await?;

        let txn = documents::begin_serializable(db).await?;
        let doc = find_document(&txn, id).await?;
        let existing = doc.find_related(shipment_line::Entity).all(&txn).await?;
        let signed = doc.state == DocumentState::Signed;

        if signed {
            for line in &existing {
                balances::credit(&txn, line.resource_id, line.unit_id, line.count).await?;
            }
        }
        shipment_line::Entity::delete_many()
            .filter(shipment_line::Column::DocumentId.eq(doc.id))
            .exec(&txn)
            .await?;
        insert_lines(&txn, doc.id, lines).await?;
        if signed {
            for line in lines {
                balances::debit(&txn, line.resource_id, line.unit_id, line.count).await?;
            }
        }
        txn.commit().await?;

        info!(id, "shipment updated");
        self.get(id).await
    }

    /// Deletes a shipment, returning its reservation to the balance first
    /// when the document is signed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let db = &*self.db;
        let txn = documents::begin_serializable(db).await?;
        let doc = find_document(&txn, id).await?;
        if doc.state == DocumentState::Signed {
            let lines = doc.find_related(shipment_line::Entity).all(&txn).await?;
            for line in &lines {
                balances::credit(&txn, line.resource_id, line.unit_id, line.count).await?;
            }
        }
        shipment_line::Entity::delete_many()
            .filter(shipment_line::Column::DocumentId.eq(doc.id))
            .exec(&txn)
            .await?;
        shipment_document::Entity::delete_by_id(doc.id).exec(&txn).await?;
        txn.commit().await?;

        info!(id, "shipment deleted");
        Ok(())
    }

    /// Signs the document, debiting every line. Any shortfall rolls the
    /// whole operation back.
    #[instrument(skip(self))]
    pub async fn sign(&self, id: i64) -> Result<ShipmentDocumentView, ServiceError> {
        let db = &*self.db;
        let txn = documents::begin_serializable(db).await?;
        let doc = find_document(&txn, id).await?;
        if doc.state == DocumentState::Signed {
            return Err(ServiceError::InvalidOperation(
                messages::SHIPMENT_ALREADY_SIGNED.to_string(),
            ));
        }
        let lines = doc.find_related(shipment_line::Entity).all(&txn).await?;
        for line in &lines {
            balances::debit(&txn, line.resource_id, line.unit_id, line.count).await?;
        }
        let mut active = doc.into_active_model();
        active.state = Set(DocumentState::Signed);
        active.update(&txn).await?;
        txn.commit().await?;

        info!(id, "shipment signed");
        self.get(id).await
    }

    /// Reverts a signed document, crediting every line back.
    #[instrument(skip(self))]
    pub async fn withdraw(&self, id: i64) -> Result<ShipmentDocumentView, ServiceError> {
        let db = &*self.db;
        let txn = documents::begin_serializable(db).await?;
        let doc = find_document(&txn, id).await?;
        if doc.state == DocumentState::NotSigned {
            return Err(ServiceError::InvalidOperation(
                messages::SHIPMENT_ALREADY_WITHDRAWN.to_string(),
            ));
        }
        let lines = doc.find_related(shipment_line::Entity).all(&txn).await?;
        for line in &lines {
            balances::credit(&txn, line.resource_id, line.unit_id, line.count).await?;
        }
        let mut active = doc.into_active_model();
        active.state = Set(DocumentState::NotSigned);
        active.update(&txn).await?;
        txn.commit().await?;

        info!(id, "shipment withdrawn");
        self.get(id).await
    }
}

async fn find_document<C>(conn: &C, id: i64) -> Result<shipment_document::Model, ServiceError>
where
    C: ConnectionTrait,
{
    shipment_document::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(messages::SHIPMENT_NOT_FOUND.to_string()))
}

async fn insert_lines<C>(conn: &C, document_id: i64, lines: &[DocumentLineInput]) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    for line in lines {
        shipment_line::ActiveModel {
            document_id: Set(document_id),
            resource_id: Set(line.resource_id),
            unit_id: Set(line.unit_id),
            count: Set(line.count),
            ..Default::default()
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

async fn client_name_map<C>(conn: &C) -> Result<HashMap<i64, String>, ServiceError>
where
    C: ConnectionTrait,
{
    Ok(client::Entity::find()
        .all(conn)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}

fn view(
    doc: &shipment_document::Model,
    lines: Vec<shipment_line::Model>,
    resource_names: &HashMap<i64, String>,
    unit_names: &HashMap<i64, String>,
    client_names: &HashMap<i64, String>,
) -> ShipmentDocumentView {
    ShipmentDocumentView {
        id: doc.id,
        number: doc.number,
        client_id: doc.client_id,
        client_name: client_names.get(&doc.client_id).cloned().unwrap_or_default(),
        date: doc.date,
        state: doc.state,
        lines: lines
            .into_iter()
            .map(|l| {
                documents::line_view(
                    l.id,
                    l.resource_id,
                    l.unit_id,
                    l.count,
                    resource_names,
                    unit_names,
                )
            })
            .collect(),
    }
}
