//! Inventory line items consumed by a job or service order.
//!
//! Stored rows are replaced by diff: rows that match an existing
//! (name, quantity) pair are left alone, missing ones are created, and the
//! leftovers are deleted only after every create succeeded. An interrupted
//! sync can leave duplicates but never an order with no items.

use api_client::ApiClient;
use shared_types::{
    AppError, JobOrderItem, NewJobOrderItem, NewServiceOrderItem, ServiceOrderItem,
};

use crate::fields::FieldErrors;

/// One item row as edited in the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemRow {
    pub item_name: String,
    pub quantity: i64,
}

impl ItemRow {
    pub fn new(item_name: impl Into<String>, quantity: i64) -> Self {
        Self {
            item_name: item_name.into(),
            quantity,
        }
    }
}

/// A row as the backend stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredItem {
    pub id: i64,
    pub item_name: String,
    pub quantity: i64,
}

impl From<JobOrderItem> for StoredItem {
    fn from(item: JobOrderItem) -> Self {
        Self {
            id: item.id,
            item_name: item.item_name,
            quantity: item.quantity,
        }
    }
}

impl From<ServiceOrderItem> for StoredItem {
    fn from(item: ServiceOrderItem) -> Self {
        Self {
            id: item.id,
            item_name: item.item_name,
            quantity: item.quantity,
        }
    }
}

/// Check every row and drop fully blank ones.
///
/// A row must name an item and carry a positive quantity. With
/// `require_one`, at least one row must remain.
pub fn validate_rows(
    rows: &[ItemRow],
    errors: &mut FieldErrors,
    require_one: bool,
) -> Option<Vec<ItemRow>> {
    let mut valid = Vec::with_capacity(rows.len());
    let mut bad = false;
    for row in rows {
        let name = row.item_name.trim();
        if name.is_empty() && row.quantity == 0 {
            continue;
        }
        if name.is_empty() || row.quantity <= 0 {
            bad = true;
            continue;
        }
        valid.push(ItemRow::new(name, row.quantity));
    }

    if bad {
        errors.insert("items", "Each item needs a name and a quantity above zero");
        return None;
    }
    if require_one && valid.is_empty() {
        errors.insert("items", "Add at least one item with a quantity above zero");
        return None;
    }
    Some(valid)
}

/// Requests needed to turn `stored` into `desired`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPlan {
    pub create: Vec<ItemRow>,
    pub delete: Vec<i64>,
    pub unchanged: usize,
}

impl ItemPlan {
    pub fn is_noop(&self) -> bool {
        self.create.is_empty() && self.delete.is_empty()
    }
}

pub fn plan_item_sync(stored: &[StoredItem], desired: &[ItemRow]) -> ItemPlan {
    let mut leftovers: Vec<&StoredItem> = stored.iter().collect();
    let mut plan = ItemPlan::default();
    for row in desired {
        let found = leftovers
            .iter()
            .position(|s| s.item_name == row.item_name && s.quantity == row.quantity);
        match found {
            Some(i) => {
                leftovers.remove(i);
                plan.unchanged += 1;
            }
            None => plan.create.push(row.clone()),
        }
    }
    plan.delete = leftovers.into_iter().map(|s| s.id).collect();
    plan
}

/// The item endpoints of one parent record.
pub(crate) trait ItemStore {
    async fn list(&self) -> Result<Vec<StoredItem>, AppError>;
    async fn create(&self, row: &ItemRow) -> Result<StoredItem, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

pub(crate) struct JobOrderItems<'a> {
    pub api: &'a ApiClient,
    pub job_order_id: i64,
}

impl ItemStore for JobOrderItems<'_> {
    async fn list(&self) -> Result<Vec<StoredItem>, AppError> {
        let items = self.api.list_job_order_items(self.job_order_id).await?;
        Ok(items.into_iter().map(StoredItem::from).collect())
    }

    async fn create(&self, row: &ItemRow) -> Result<StoredItem, AppError> {
        let body = NewJobOrderItem {
            job_order_id: self.job_order_id,
            item_name: row.item_name.clone(),
            quantity: row.quantity,
        };
        Ok(self.api.create_job_order_item(&body).await?.into())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.api.delete_job_order_item(id).await
    }
}

pub(crate) struct ServiceOrderItems<'a> {
    pub api: &'a ApiClient,
    pub service_order_id: i64,
}

impl ItemStore for ServiceOrderItems<'_> {
    async fn list(&self) -> Result<Vec<StoredItem>, AppError> {
        let items = self
            .api
            .list_service_order_items(self.service_order_id)
            .await?;
        Ok(items.into_iter().map(StoredItem::from).collect())
    }

    async fn create(&self, row: &ItemRow) -> Result<StoredItem, AppError> {
        let body = NewServiceOrderItem {
            service_order_id: self.service_order_id,
            item_name: row.item_name.clone(),
            quantity: row.quantity,
        };
        Ok(self.api.create_service_order_item(&body).await?.into())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.api.delete_service_order_item(id).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSyncSummary {
    pub created: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

/// Which step of the sync failed.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemSyncError {
    List(AppError),
    Create { item_name: String, source: AppError },
    /// New rows exist, so the order may now list duplicates.
    Delete { id: i64, source: AppError },
}

impl ItemSyncError {
    pub fn context(&self) -> String {
        match self {
            ItemSyncError::List(_) => "Failed to load current items".to_string(),
            ItemSyncError::Create { item_name, .. } => format!("Failed to save item {item_name}"),
            ItemSyncError::Delete { id, .. } => {
                format!("New items saved but old item #{id} could not be removed")
            }
        }
    }

    pub fn source(&self) -> &AppError {
        match self {
            ItemSyncError::List(source)
            | ItemSyncError::Create { source, .. }
            | ItemSyncError::Delete { source, .. } => source,
        }
    }
}

pub(crate) async fn sync_items<S: ItemStore>(
    store: &S,
    desired: &[ItemRow],
) -> Result<ItemSyncSummary, ItemSyncError> {
    let stored = store.list().await.map_err(ItemSyncError::List)?;
    let plan = plan_item_sync(&stored, desired);
    tracing::debug!(
        create = plan.create.len(),
        delete = plan.delete.len(),
        unchanged = plan.unchanged,
        "Syncing items"
    );

    for row in &plan.create {
        store
            .create(row)
            .await
            .map_err(|source| ItemSyncError::Create {
                item_name: row.item_name.clone(),
                source,
            })?;
    }
    for &id in &plan.delete {
        store
            .delete(id)
            .await
            .map_err(|source| ItemSyncError::Delete { id, source })?;
    }

    Ok(ItemSyncSummary {
        created: plan.create.len(),
        deleted: plan.delete.len(),
        unchanged: plan.unchanged,
    })
}
