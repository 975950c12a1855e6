use api_client::ApiClient;
use shared_types::{
    AppError, PhotoAttachment, ServiceOrder, ServiceOrderImage, ServiceOrderItem, ServiceOrderUpdate,
    ServiceVisitStatus, SupportStatus,
};

use crate::context::AppContext;
use crate::fields::{non_empty, required, required_choice, CrewFields, FieldErrors};
use crate::filter::option_names;
use crate::line_items::{sync_items, validate_rows, ItemRow, ServiceOrderItems};
use crate::lookups::ServiceOrderLookups;
use crate::outcome::SubmitReport;
use crate::photos::PhotoSlots;
use crate::session::{FormPhase, FormSession};

/// The repair ticket modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOrderForm {
    record: ServiceOrder,
    pub concern: String,
    pub concern_remarks: String,
    pub support_status: Option<SupportStatus>,
    pub support_remarks: String,
    pub visit_status: Option<ServiceVisitStatus>,
    pub repair_category: String,
    pub crew: CrewFields,
    pub visit_remarks: String,
    pub items: Vec<ItemRow>,
    pub photos: PhotoSlots<ServiceOrderImage>,
    lookups: ServiceOrderLookups,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOrderSubmission {
    pub id: i64,
    /// Image URLs hold what is already stored; new uploads are merged in
    /// at submit time.
    pub update: ServiceOrderUpdate,
    pub photos: Vec<PhotoAttachment>,
    pub items: Vec<ItemRow>,
}

impl ServiceOrderForm {
    pub fn new(record: ServiceOrder, items: Vec<ServiceOrderItem>, lookups: ServiceOrderLookups) -> Self {
        Self {
            concern: record.concern.clone(),
            concern_remarks: record.concern_remarks.clone().unwrap_or_default(),
            support_status: Some(record.support_status),
            support_remarks: record.support_remarks.clone().unwrap_or_default(),
            visit_status: record.visit_status,
            repair_category: record.repair_category.clone().unwrap_or_default(),
            crew: CrewFields::from_parts(
                record.visit_by.as_deref(),
                record.visit_with.as_deref(),
                record.visit_with_other.as_deref(),
            ),
            visit_remarks: record.visit_remarks.clone().unwrap_or_default(),
            items: items
                .into_iter()
                .map(|i| ItemRow::new(i.item_name, i.quantity))
                .collect(),
            photos: PhotoSlots::default(),
            record,
            lookups,
        }
    }

    pub fn record(&self) -> &ServiceOrder {
        &self.record
    }

    pub fn item_options(&self) -> Vec<String> {
        option_names(&self.lookups.inventory_items)
    }

    pub fn technician_options(&self) -> Vec<String> {
        self.lookups
            .technicians
            .iter()
            .map(|t| t.display_name())
            .collect()
    }

    pub fn validate(&self) -> Result<ServiceOrderSubmission, FieldErrors> {
        let mut errors = FieldErrors::new();

        let concern = required(&mut errors, "concern", "Concern", &self.concern);
        let support_status = required_choice(
            &mut errors,
            "support_status",
            "a support status",
            self.support_status,
        );
        if matches!(
            support_status,
            Some(SupportStatus::Resolved | SupportStatus::Failed)
        ) {
            required(
                &mut errors,
                "support_remarks",
                "Support remarks",
                &self.support_remarks,
            );
        }

        let on_visit = support_status == Some(SupportStatus::ForVisit);
        let visit_status = if on_visit {
            required_choice(&mut errors, "visit_status", "a visit status", self.visit_status)
        } else {
            None
        };
        match visit_status {
            Some(ServiceVisitStatus::Done) => {
                required(
                    &mut errors,
                    "repair_category",
                    "Repair category",
                    &self.repair_category,
                );
                self.crew.require_full(&mut errors);
                required(&mut errors, "visit_remarks", "Visit remarks", &self.visit_remarks);
                for slot in ServiceOrderImage::ALL {
                    self.photos
                        .require(&mut errors, slot, self.record.images.get(slot));
                }
            }
            Some(ServiceVisitStatus::Reschedule | ServiceVisitStatus::Failed) => {
                required(&mut errors, "visit_by", "Visit by", &self.crew.visit_by);
                required(&mut errors, "visit_remarks", "Visit remarks", &self.visit_remarks);
            }
            _ => {}
        }
        let items = validate_rows(&self.items, &mut errors, false);

        if !errors.is_empty() {
            return Err(errors);
        }
        let (Some(concern), Some(items)) = (concern, items) else {
            return Err(errors);
        };

        // Visit details only travel with a ticket that is out for a visit.
        let visit_text = |value: &str| if on_visit { non_empty(value) } else { None };
        Ok(ServiceOrderSubmission {
            id: self.record.id,
            update: ServiceOrderUpdate {
                concern,
                concern_remarks: non_empty(&self.concern_remarks),
                support_status,
                support_remarks: non_empty(&self.support_remarks),
                visit_status,
                repair_category: visit_text(&self.repair_category),
                visit_by: visit_text(&self.crew.visit_by),
                visit_with: visit_text(&self.crew.visit_with),
                visit_with_other: visit_text(&self.crew.visit_with_other),
                visit_remarks: visit_text(&self.visit_remarks),
                images: self.record.images.clone(),
                updated_by: None,
            },
            photos: self.photos.attachments(),
            items,
        })
    }
}

/// Upload new photos, save the ticket with their URLs, then sync items.
#[tracing::instrument(skip(api, submission), fields(service_order_id = submission.id))]
pub async fn submit_service_order(
    api: &ApiClient,
    submission: ServiceOrderSubmission,
    acting_user: &str,
) -> SubmitReport<ServiceOrder> {
    let mut report = SubmitReport::new();
    let ServiceOrderSubmission {
        id,
        mut update,
        photos,
        items,
    } = submission;
    update.updated_by = Some(acting_user.to_string());

    if !photos.is_empty() {
        match api.upload_to_drive(&photos).await {
            Ok(uploaded) => {
                for slot in ServiceOrderImage::ALL {
                    if let Some(url) = uploaded.url_for(slot) {
                        update.images.set(slot, url);
                    }
                }
                report.success(format!("{} photo(s) uploaded", photos.len()));
            }
            Err(e) => {
                report.fail("Failed to upload photos", &e);
                return report;
            }
        }
    }

    let service_order = match api.update_service_order(id, &update).await {
        Ok(service_order) => {
            report.success("Service order updated");
            service_order
        }
        Err(e) => {
            report.fail("Failed to update service order", &e);
            return report;
        }
    };

    let store = ServiceOrderItems {
        api,
        service_order_id: id,
    };
    match sync_items(&store, &items).await {
        Ok(summary) if summary.created + summary.deleted > 0 => report.success(format!(
            "Items saved ({} added, {} removed)",
            summary.created, summary.deleted
        )),
        Ok(_) => {}
        Err(e) => report.fail(&e.context(), e.source()),
    }

    report.finish(service_order)
}

pub async fn open_service_order(
    ctx: &AppContext,
    id: i64,
) -> Result<FormSession<ServiceOrderForm>, AppError> {
    let (record, items, lookups) = tokio::try_join!(
        ctx.api.get_service_order(id),
        ctx.api.list_service_order_items(id),
        ServiceOrderLookups::fetch(&ctx.api),
    )?;
    Ok(FormSession::open(ServiceOrderForm::new(record, items, lookups)))
}

impl FormSession<ServiceOrderForm> {
    pub async fn save(&mut self, ctx: &AppContext, on_save: impl FnOnce(&ServiceOrder)) -> FormPhase {
        self.run(
            ServiceOrderForm::validate,
            |submission| submit_service_order(&ctx.api, submission, ctx.acting_user()),
            on_save,
        )
        .await
    }
}
