//! User-facing response messages.
//!
//! The three catalog kinds share message templates resolved at compile
//! time through `CatalogKind`, so services and handlers never format
//! entity names at runtime.

/// The catalog family an operation runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Resource,
    Unit,
    Client,
}

impl CatalogKind {
    pub const fn created(self) -> &'static str {
        match self {
            CatalogKind::Resource => "Resource created",
            CatalogKind::Unit => "Unit of measure created",
            CatalogKind::Client => "Client created",
        }
    }

    pub const fn updated(self) -> &'static str {
        match self {
            CatalogKind::Resource => "Resource updated",
            CatalogKind::Unit => "Unit of measure updated",
            CatalogKind::Client => "Client updated",
        }
    }

    pub const fn deleted(self) -> &'static str {
        match self {
            CatalogKind::Resource => "Resource deleted",
            CatalogKind::Unit => "Unit of measure deleted",
            CatalogKind::Client => "Client deleted",
        }
    }

    pub const fn archived(self) -> &'static str {
        match self {
            CatalogKind::Resource => "Resource archived",
            CatalogKind::Unit => "Unit of measure archived",
            CatalogKind::Client => "Client archived",
        }
    }

    pub const fn not_found(self) -> &'static str {
        match self {
            CatalogKind::Resource => "Resource not found",
            CatalogKind::Unit => "Unit of measure not found",
            CatalogKind::Client => "Client not found",
        }
    }

    pub const fn already_exists(self) -> &'static str {
        match self {
            CatalogKind::Resource => "Resource with this name already exists",
            CatalogKind::Unit => "Unit of measure with this name already exists",
            CatalogKind::Client => "Client with this name already exists",
        }
    }

    pub const fn already_archived(self) -> &'static str {
        match self {
            CatalogKind::Resource => "Resource is already archived",
            CatalogKind::Unit => "Unit of measure is already archived",
            CatalogKind::Client => "Client is already archived",
        }
    }

    pub const fn in_use(self) -> &'static str {
        match self {
            CatalogKind::Resource => "Resource is used in documents and cannot be deleted",
            CatalogKind::Unit => "Unit of measure is used in documents and cannot be deleted",
            CatalogKind::Client => "Client is used in documents and cannot be deleted",
        }
    }

    pub const fn blank_name(self) -> &'static str {
        match self {
            CatalogKind::Resource => "Resource name must not be blank",
            CatalogKind::Unit => "Unit of measure name must not be blank",
            CatalogKind::Client => "Client name must not be blank",
        }
    }
}

pub const RECEIPT_NOT_FOUND: &str = "Receipt document not found";
pub const RECEIPT_CREATED: &str = "Receipt document created";
pub const RECEIPT_UPDATED: &str = "Receipt document updated";

pub const SHIPMENT_NOT_FOUND: &str = "Shipment document not found";
pub const SHIPMENT_CREATED: &str = "Shipment document created";
pub const SHIPMENT_UPDATED: &str = "Shipment document updated";
pub const SHIPMENT_SIGNED: &str = "Shipment document signed";
pub const SHIPMENT_WITHDRAWN: &str = "Shipment document withdrawn";
pub const SHIPMENT_ALREADY_SIGNED: &str = "Shipment document is already signed";
pub const SHIPMENT_ALREADY_WITHDRAWN: &str = "Shipment document is already withdrawn";
pub const SHIPMENT_NO_LINES: &str = "Shipment document must have at least one line";
pub const SHIPMENT_CLIENT_MISSING: &str = "Client does not exist";

pub const NOT_ENOUGH_RESOURCE: &str = "Not enough resource on the balance";
pub const LINE_COUNT_NOT_POSITIVE: &str = "Line count must be greater than zero";
pub const DUPLICATE_LINE: &str = "Document contains duplicate resource and unit pairs";
pub const UNKNOWN_LINE_RESOURCE: &str = "Line references an unknown resource";
pub const UNKNOWN_LINE_UNIT: &str = "Line references an unknown unit of measure";

pub const BULK_ARCHIVE_DONE: &str = "Bulk archive finished";
pub const BULK_DELETE_DONE: &str = "Bulk delete finished";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_messages_name_the_kind() {
        assert!(CatalogKind::Unit.not_found().starts_with("Unit of measure"));
        assert!(CatalogKind::Client.in_use().starts_with("Client"));
        assert!(CatalogKind::Resource
            .already_exists()
            .starts_with("Resource"));
    }
}
