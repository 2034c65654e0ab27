//! Lab order endpoints.
//!
//! - `GET /api/lab-orders?status=&collectorId=` — enriched list
//! - `POST /api/lab-orders` — find-or-create the patient, then the order and its lines
//! - `GET /api/lab-orders/:id` — enriched with results
//! - `PATCH /api/lab-orders/:id/status`
//! - `PATCH /api/lab-orders/:id/assign-collector`
//! - `GET /api/lab-orders/:id/results`
//!
//! Responses are denormalized: each order carries its patient, collector
//! (`null` when unassigned) and service lines with their catalog entries.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::api::error::{ApiError, FieldIssue};
use crate::api::types::{parse_id, ApiContext, ValidJson};
use crate::models::enums::OrderStatus;
use crate::models::{
    Collector, LabOrder, LabService, NewPatient, OrderDraft, OrderService, Patient, ServiceLine,
    TestResult,
};
use crate::storage::Storage;

// ═══════════════════════════════════════════════════════════
// Response types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabOrderView {
    #[serde(flatten)]
    pub order: LabOrder,
    pub patient: Option<Patient>,
    pub collector: Option<Collector>,
    pub services: Vec<OrderServiceView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<TestResult>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderServiceView {
    #[serde(flatten)]
    pub line: OrderService,
    pub service: Option<LabService>,
}

// ═══════════════════════════════════════════════════════════
// Request types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    pub status: Option<String>,
    pub collector_id: Option<String>,
}

/// Patient reference on a new order. An `id` or `nationalId` that matches
/// an existing patient is reused; otherwise the remaining fields register
/// a new one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatient {
    pub id: Option<i64>,
    pub national_id: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub patient: OrderPatient,
    pub order: OrderDraft,
    #[serde(default)]
    pub services: Vec<ServiceLine>,
}

impl Validate for CreateOrderRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let result = ValidationErrors::merge(Ok(()), "order", self.order.validate());
        ValidationErrors::merge_all(
            result,
            "services",
            self.services.iter().map(Validate::validate).collect(),
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct StatusChange {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CollectorAssignment {
    pub collector_id: i64,
}

// ═══════════════════════════════════════════════════════════
// Enrichment
// ═══════════════════════════════════════════════════════════

fn enrich(
    storage: &dyn Storage,
    order: LabOrder,
    with_results: bool,
) -> Result<LabOrderView, ApiError> {
    let patient = storage.get_patient(order.patient_id)?;
    let collector = match order.collector_id {
        Some(id) => storage.get_collector(id)?,
        None => None,
    };
    let services = storage
        .get_order_services(order.id)?
        .into_iter()
        .map(|line| {
            let service = storage.get_lab_service(line.service_id)?;
            Ok(OrderServiceView { line, service })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;
    let results = if with_results {
        Some(storage.get_test_results(order.id)?)
    } else {
        None
    };

    Ok(LabOrderView {
        order,
        patient,
        collector,
        services,
        results,
    })
}

fn find_order(storage: &dyn Storage, raw_id: &str) -> Result<LabOrder, ApiError> {
    let id = parse_id(raw_id, "order")?;
    storage
        .get_lab_order(id)?
        .ok_or_else(|| ApiError::NotFound("Order not found".into()))
}

// ═══════════════════════════════════════════════════════════
// Patient resolution
// ═══════════════════════════════════════════════════════════

impl OrderPatient {
    /// Fields needed to register a new patient, or one issue per missing field.
    fn registration(self) -> Result<NewPatient, ApiError> {
        let mut missing = Vec::new();
        let mut require = |field: &str, present: bool| {
            if !present {
                missing.push(FieldIssue {
                    field: format!("patient.{field}"),
                    code: "required".into(),
                    message: format!("{field} is required to register a new patient"),
                });
            }
        };
        require("name", self.name.is_some());
        require("nationalId", self.national_id.is_some());
        require("phone", self.phone.is_some());
        require("age", self.age.is_some());

        match (self.name, self.national_id, self.phone, self.age) {
            (Some(name), Some(national_id), Some(phone), Some(age)) => Ok(NewPatient {
                name,
                national_id,
                phone,
                age,
                address: self.address,
            }),
            _ => Err(ApiError::Validation(missing)),
        }
    }
}

/// By id when given, then by national id, else register.
fn resolve_patient(storage: &dyn Storage, reference: OrderPatient) -> Result<Patient, ApiError> {
    if let Some(id) = reference.id {
        if let Some(patient) = storage.get_patient(id)? {
            return Ok(patient);
        }
        tracing::debug!(patient_id = id, "Order references unknown patient id");
    }
    if let Some(national_id) = reference.national_id.as_deref() {
        if let Some(patient) = storage.get_patient_by_national_id(national_id)? {
            return Ok(patient);
        }
    }

    let input = reference.registration()?;
    ValidationErrors::merge(Ok(()), "patient", input.validate())?;
    let patient = storage.create_patient(input)?;
    tracing::info!(patient_id = patient.id, "Patient registered with order");
    Ok(patient)
}

// ═══════════════════════════════════════════════════════════
// Handlers
// ═══════════════════════════════════════════════════════════

pub async fn list(
    State(ctx): State<ApiContext>,
    Query(filter): Query<OrderFilter>,
) -> Result<Json<Vec<LabOrderView>>, ApiError> {
    let storage = ctx.storage.as_ref();
    // Blank values (`?status=&collectorId=`) mean "no filter".
    let status = filter.status.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let collector = filter
        .collector_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let orders = match (status, collector) {
        (Some(status), _) => storage.get_lab_orders_by_status(status.parse::<OrderStatus>()?)?,
        (None, Some(collector)) => {
            storage.get_lab_orders_by_collector(parse_id(collector, "collector")?)?
        }
        (None, None) => storage.get_all_lab_orders()?,
    };

    let views = orders
        .into_iter()
        .map(|order| enrich(storage, order, false))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(views))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<LabOrderView>, ApiError> {
    let storage = ctx.storage.as_ref();
    let order = find_order(storage, &id)?;
    Ok(Json(enrich(storage, order, true)?))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    ValidJson(request): ValidJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<LabOrderView>), ApiError> {
    let storage = ctx.storage.as_ref();
    let patient = resolve_patient(storage, request.patient)?;
    let order = storage.create_lab_order(request.order.for_patient(patient.id))?;
    for line in &request.services {
        storage.create_order_service(line.for_order(order.id))?;
    }

    tracing::info!(
        order_id = order.id,
        order_number = %order.order_number,
        patient_id = patient.id,
        lines = request.services.len(),
        "Lab order created"
    );
    Ok((StatusCode::CREATED, Json(enrich(storage, order, false)?)))
}

pub async fn update_status(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    ValidJson(change): ValidJson<StatusChange>,
) -> Result<Json<LabOrder>, ApiError> {
    let id = parse_id(&id, "order")?;
    match ctx.storage.update_lab_order_status(id, change.status)? {
        Some(order) => {
            tracing::info!(order_id = id, status = %order.status, "Order status changed");
            Ok(Json(order))
        }
        None => {
            tracing::warn!(order_id = id, "Status change for unknown order");
            Err(ApiError::NotFound("Order not found".into()))
        }
    }
}

pub async fn assign_collector(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    ValidJson(assignment): ValidJson<CollectorAssignment>,
) -> Result<Json<LabOrder>, ApiError> {
    let id = parse_id(&id, "order")?;
    match ctx
        .storage
        .assign_collector_to_order(id, assignment.collector_id)?
    {
        Some(order) => {
            tracing::info!(
                order_id = id,
                collector_id = assignment.collector_id,
                "Collector assigned"
            );
            Ok(Json(order))
        }
        None => {
            tracing::warn!(order_id = id, "Collector assignment for unknown order");
            Err(ApiError::NotFound("Order not found".into()))
        }
    }
}

pub async fn results(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TestResult>>, ApiError> {
    let id = parse_id(&id, "order")?;
    Ok(Json(ctx.storage.get_test_results(id)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fixtures::*;
    use crate::storage::MemStorage;

    fn line(service_id: i64) -> ServiceLine {
        ServiceLine {
            service_id,
            quantity: 1,
            price: 40.0,
        }
    }

    #[test]
    fn request_without_services_is_valid() {
        let request = CreateOrderRequest {
            patient: OrderPatient::default(),
            order: order_draft(80.0),
            services: Vec::new(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn request_reports_bad_line_items() {
        let mut bad = line(1);
        bad.quantity = 0;
        let request = CreateOrderRequest {
            patient: OrderPatient::default(),
            order: order_draft(80.0),
            services: vec![line(2), bad],
        };
        let err: ApiError = request.validate().unwrap_err().into();
        let ApiError::Validation(issues) = err else {
            panic!("expected validation error");
        };
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "services[1].quantity");
    }

    #[test]
    fn resolve_reuses_patient_by_national_id() {
        let store = MemStorage::new();
        let existing = store.create_patient(new_patient("Mona", "2900")).unwrap();
        let reference = OrderPatient {
            national_id: Some("2900".into()),
            ..OrderPatient::default()
        };
        let patient = resolve_patient(&store, reference).unwrap();
        assert_eq!(patient.id, existing.id);
        assert_eq!(store.get_all_patients().unwrap().len(), 1);
    }

    #[test]
    fn resolve_prefers_id_over_national_id() {
        let store = MemStorage::new();
        let first = store.create_patient(new_patient("Mona", "2900")).unwrap();
        store.create_patient(new_patient("Omar", "3100")).unwrap();
        let reference = OrderPatient {
            id: Some(first.id),
            national_id: Some("3100".into()),
            ..OrderPatient::default()
        };
        assert_eq!(resolve_patient(&store, reference).unwrap().id, first.id);
    }

    #[test]
    fn resolve_registers_unknown_patient() {
        let store = MemStorage::new();
        let reference = OrderPatient {
            national_id: Some("4100".into()),
            name: Some("Yara".into()),
            phone: Some("0550000000".into()),
            age: Some(31),
            ..OrderPatient::default()
        };
        let patient = resolve_patient(&store, reference).unwrap();
        assert_eq!(patient.name, "Yara");
        assert_eq!(
            store.get_patient_by_national_id("4100").unwrap().unwrap().id,
            patient.id
        );
    }

    #[test]
    fn resolve_lists_missing_registration_fields() {
        let store = MemStorage::new();
        let reference = OrderPatient {
            national_id: Some("5000".into()),
            ..OrderPatient::default()
        };
        let err = resolve_patient(&store, reference).unwrap_err();
        let ApiError::Validation(issues) = err else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, ["patient.name", "patient.phone", "patient.age"]);
        assert!(store.get_all_patients().unwrap().is_empty());
    }

    #[test]
    fn enrich_leaves_collector_null_when_unassigned() {
        let store = MemStorage::new();
        let patient = store.create_patient(new_patient("Ali", "1")).unwrap();
        let service = store
            .create_lab_service(new_lab_service("CBC", "hematology", 40.0))
            .unwrap();
        let order = store
            .create_lab_order(order_draft(40.0).for_patient(patient.id))
            .unwrap();
        store
            .create_order_service(line(service.id).for_order(order.id))
            .unwrap();

        let view = enrich(&store, order, true).unwrap();
        assert_eq!(view.patient.unwrap().id, patient.id);
        assert!(view.collector.is_none());
        assert_eq!(view.services.len(), 1);
        assert_eq!(view.services[0].service.as_ref().unwrap().id, service.id);
        assert_eq!(view.results.unwrap().len(), 0);
    }
}
