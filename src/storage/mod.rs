//! Storage contract for every lab entity.
//!
//! `Storage` is implemented by two backends:
//! - [`MemStorage`] keeps all entities in process memory.
//! - [`DatabaseStorage`] delegates to a `MemStorage` except for users,
//!   which are persisted in SQLite.
//!
//! Absence is reported as `Ok(None)`, never as an error. Callers decide
//! how to surface it. Foreign keys are not checked here.

pub mod dashboard;
pub mod database;
pub mod memory;
pub mod seed;

#[cfg(test)]
pub(crate) mod fixtures;

pub use dashboard::{compute_dashboard_stats, DashboardStats};
pub use database::DatabaseStorage;
pub use memory::MemStorage;

use thiserror::Error;

use crate::db::DatabaseError;
use crate::models::enums::OrderStatus;
use crate::models::*;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type StorageResult<T> = Result<T, StorageError>;

pub trait Storage: Send + Sync {
    // ── Patients ────────────────────────────────────────────
    fn get_patient(&self, id: i64) -> StorageResult<Option<Patient>>;
    fn get_all_patients(&self) -> StorageResult<Vec<Patient>>;
    /// First patient registered with this national id.
    fn get_patient_by_national_id(&self, national_id: &str) -> StorageResult<Option<Patient>>;
    fn create_patient(&self, input: NewPatient) -> StorageResult<Patient>;

    // ── Collectors ──────────────────────────────────────────
    fn get_collector(&self, id: i64) -> StorageResult<Option<Collector>>;
    fn get_all_collectors(&self) -> StorageResult<Vec<Collector>>;
    fn create_collector(&self, input: NewCollector) -> StorageResult<Collector>;
    fn update_collector_status(
        &self,
        id: i64,
        update: CollectorStatusUpdate,
    ) -> StorageResult<Option<Collector>>;

    // ── Lab services ────────────────────────────────────────
    fn get_lab_service(&self, id: i64) -> StorageResult<Option<LabService>>;
    fn get_all_lab_services(&self) -> StorageResult<Vec<LabService>>;
    fn get_lab_services_by_category(&self, category: &str) -> StorageResult<Vec<LabService>>;
    fn create_lab_service(&self, input: NewLabService) -> StorageResult<LabService>;

    // ── Lab orders ──────────────────────────────────────────
    fn get_lab_order(&self, id: i64) -> StorageResult<Option<LabOrder>>;
    /// Newest first.
    fn get_all_lab_orders(&self) -> StorageResult<Vec<LabOrder>>;
    fn get_lab_orders_by_status(&self, status: OrderStatus) -> StorageResult<Vec<LabOrder>>;
    fn get_lab_orders_by_collector(&self, collector_id: i64) -> StorageResult<Vec<LabOrder>>;
    fn create_lab_order(&self, input: NewLabOrder) -> StorageResult<LabOrder>;
    /// Any status may replace any other.
    fn update_lab_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> StorageResult<Option<LabOrder>>;
    /// Sets the collector and moves the order to `collection_scheduled`.
    fn assign_collector_to_order(
        &self,
        id: i64,
        collector_id: i64,
    ) -> StorageResult<Option<LabOrder>>;

    // ── Order services ──────────────────────────────────────
    fn get_order_services(&self, order_id: i64) -> StorageResult<Vec<OrderService>>;
    fn create_order_service(&self, input: NewOrderService) -> StorageResult<OrderService>;

    // ── Test results ────────────────────────────────────────
    fn get_test_result(&self, id: i64) -> StorageResult<Option<TestResult>>;
    fn get_test_results(&self, order_id: i64) -> StorageResult<Vec<TestResult>>;
    fn create_test_result(&self, input: NewTestResult) -> StorageResult<TestResult>;
    fn update_test_result(
        &self,
        id: i64,
        update: TestResultUpdate,
    ) -> StorageResult<Option<TestResult>>;

    // ── Inventory ───────────────────────────────────────────
    fn get_inventory_item(&self, id: i64) -> StorageResult<Option<InventoryItem>>;
    fn get_all_inventory(&self) -> StorageResult<Vec<InventoryItem>>;
    /// Items with `current_stock <= min_threshold`.
    fn get_low_stock_items(&self) -> StorageResult<Vec<InventoryItem>>;
    fn create_inventory_item(&self, input: NewInventoryItem) -> StorageResult<InventoryItem>;
    /// Applies a signed delta. `last_restocked` moves only on a positive delta.
    fn update_inventory_stock(&self, id: i64, delta: i32)
        -> StorageResult<Option<InventoryItem>>;

    // ── Users ───────────────────────────────────────────────
    fn get_user(&self, id: &str) -> StorageResult<Option<User>>;
    /// Insert or update by `id`. Email is plain data; accounts may share one.
    fn upsert_user(&self, input: UpsertUser) -> StorageResult<User>;

    // ── Dashboard ───────────────────────────────────────────
    fn get_dashboard_stats(&self) -> StorageResult<DashboardStats>;
}
