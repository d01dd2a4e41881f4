pub mod balances;
pub mod catalog;
pub mod clients;
pub mod documents;
pub mod receipts;
pub mod resources;
pub mod shipments;
pub mod units;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use balances::BalanceService;
pub use clients::ClientService;
pub use receipts::ReceiptService;
pub use resources::ResourceService;
pub use shipments::ShipmentService;
pub use units::UnitService;

/// All domain services, cloned cheaply into the router state.
#[derive(Clone)]
pub struct AppServices {
    pub resources: ResourceService,
    pub units: UnitService,
    pub clients: ClientService,
    pub balances: BalanceService,
    pub receipts: ReceiptService,
    pub shipments: ShipmentService,
}

impl AppServices {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            resources: ResourceService::new(db.clone()),
            units: UnitService::new(db.clone()),
            clients: ClientService::new(db.clone()),
            balances: BalanceService::new(db.clone()),
            receipts: ReceiptService::new(db.clone()),
            shipments: ShipmentService::new(db),
        }
    }
}
