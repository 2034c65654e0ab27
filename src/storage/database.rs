//! SQLite-backed user accounts over the in-memory store.
//!
//! Every operation except user lookup and upsert is forwarded to the owned
//! [`MemStorage`]. Users go to the `users` table so accounts survive restarts.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::Connection;

use super::dashboard::DashboardStats;
use super::memory::MemStorage;
use super::{Storage, StorageError, StorageResult};
use crate::db;
use crate::models::enums::OrderStatus;
use crate::models::*;

pub struct DatabaseStorage {
    memory: MemStorage,
    conn: Mutex<Connection>,
}

impl DatabaseStorage {
    /// Open (or create) the user database at `path`.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = db::open_database(path)?;
        let tables = db::count_tables(&conn)?;
        tracing::info!(path = %path.display(), tables, "User database opened");
        Ok(Self::with_connection(conn))
    }

    /// Wrap an already-migrated connection.
    pub fn with_connection(conn: Connection) -> Self {
        Self {
            memory: MemStorage::new(),
            conn: Mutex::new(conn),
        }
    }

    /// The in-memory half, for seeding and backfills.
    pub fn memory(&self) -> &MemStorage {
        &self.memory
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

impl Storage for DatabaseStorage {
    fn get_patient(&self, id: i64) -> StorageResult<Option<Patient>> {
        self.memory.get_patient(id)
    }

    fn get_all_patients(&self) -> StorageResult<Vec<Patient>> {
        self.memory.get_all_patients()
    }

    fn get_patient_by_national_id(&self, national_id: &str) -> StorageResult<Option<Patient>> {
        self.memory.get_patient_by_national_id(national_id)
    }

    fn create_patient(&self, input: NewPatient) -> StorageResult<Patient> {
        self.memory.create_patient(input)
    }

    fn get_collector(&self, id: i64) -> StorageResult<Option<Collector>> {
        self.memory.get_collector(id)
    }

    fn get_all_collectors(&self) -> StorageResult<Vec<Collector>> {
        self.memory.get_all_collectors()
    }

    fn create_collector(&self, input: NewCollector) -> StorageResult<Collector> {
        self.memory.create_collector(input)
    }

    fn update_collector_status(
        &self,
        id: i64,
        update: CollectorStatusUpdate,
    ) -> StorageResult<Option<Collector>> {
        self.memory.update_collector_status(id, update)
    }

    fn get_lab_service(&self, id: i64) -> StorageResult<Option<LabService>> {
        self.memory.get_lab_service(id)
    }

    fn get_all_lab_services(&self) -> StorageResult<Vec<LabService>> {
        self.memory.get_all_lab_services()
    }

    fn get_lab_services_by_category(&self, category: &str) -> StorageResult<Vec<LabService>> {
        self.memory.get_lab_services_by_category(category)
    }

    fn create_lab_service(&self, input: NewLabService) -> StorageResult<LabService> {
        self.memory.create_lab_service(input)
    }

    fn get_lab_order(&self, id: i64) -> StorageResult<Option<LabOrder>> {
        self.memory.get_lab_order(id)
    }

    fn get_all_lab_orders(&self) -> StorageResult<Vec<LabOrder>> {
        self.memory.get_all_lab_orders()
    }

    fn get_lab_orders_by_status(&self, status: OrderStatus) -> StorageResult<Vec<LabOrder>> {
        self.memory.get_lab_orders_by_status(status)
    }

    fn get_lab_orders_by_collector(&self, collector_id: i64) -> StorageResult<Vec<LabOrder>> {
        self.memory.get_lab_orders_by_collector(collector_id)
    }

    fn create_lab_order(&self, input: NewLabOrder) -> StorageResult<LabOrder> {
        self.memory.create_lab_order(input)
    }

    fn update_lab_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> StorageResult<Option<LabOrder>> {
        self.memory.update_lab_order_status(id, status)
    }

    fn assign_collector_to_order(
        &self,
        id: i64,
        collector_id: i64,
    ) -> StorageResult<Option<LabOrder>> {
        self.memory.assign_collector_to_order(id, collector_id)
    }

    fn get_order_services(&self, order_id: i64) -> StorageResult<Vec<OrderService>> {
        self.memory.get_order_services(order_id)
    }

    fn create_order_service(&self, input: NewOrderService) -> StorageResult<OrderService> {
        self.memory.create_order_service(input)
    }

    fn get_test_result(&self, id: i64) -> StorageResult<Option<TestResult>> {
        self.memory.get_test_result(id)
    }

    fn get_test_results(&self, order_id: i64) -> StorageResult<Vec<TestResult>> {
        self.memory.get_test_results(order_id)
    }

    fn create_test_result(&self, input: NewTestResult) -> StorageResult<TestResult> {
        self.memory.create_test_result(input)
    }

    fn update_test_result(
        &self,
        id: i64,
        update: TestResultUpdate,
    ) -> StorageResult<Option<TestResult>> {
        self.memory.update_test_result(id, update)
    }

    fn get_inventory_item(&self, id: i64) -> StorageResult<Option<InventoryItem>> {
        self.memory.get_inventory_item(id)
    }

    fn get_all_inventory(&self) -> StorageResult<Vec<InventoryItem>> {
        self.memory.get_all_inventory()
    }

    fn get_low_stock_items(&self) -> StorageResult<Vec<InventoryItem>> {
        self.memory.get_low_stock_items()
    }

    fn create_inventory_item(&self, input: NewInventoryItem) -> StorageResult<InventoryItem> {
        self.memory.create_inventory_item(input)
    }

    fn update_inventory_stock(
        &self,
        id: i64,
        delta: i32,
    ) -> StorageResult<Option<InventoryItem>> {
        self.memory.update_inventory_stock(id, delta)
    }

    fn get_user(&self, id: &str) -> StorageResult<Option<User>> {
        let conn = self.conn()?;
        Ok(db::get_user(&conn, id)?)
    }

    fn upsert_user(&self, input: UpsertUser) -> StorageResult<User> {
        let conn = self.conn()?;
        Ok(db::upsert_user(&conn, &input, Utc::now())?)
    }

    fn get_dashboard_stats(&self) -> StorageResult<DashboardStats> {
        self.memory.get_dashboard_stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fixtures::*;

    #[test]
    fn users_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.db");

        let first = {
            let store = DatabaseStorage::open(&path).unwrap();
            store.upsert_user(upsert_user("u-1", "Hala")).unwrap()
        };

        let reopened = DatabaseStorage::open(&path).unwrap();
        let user = reopened.get_user("u-1").unwrap().unwrap();
        assert_eq!(user.first_name.as_deref(), Some("Hala"));
        assert_eq!(user.created_at, first.created_at);
    }

    #[test]
    fn upsert_updates_existing_row() {
        let store = DatabaseStorage::with_connection(db::open_memory_database().unwrap());
        let created = store.upsert_user(upsert_user("u-2", "Sami")).unwrap();
        let updated = store.upsert_user(upsert_user("u-2", "Samir")).unwrap();

        assert_eq!(updated.first_name.as_deref(), Some("Samir"));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn email_is_not_a_key() {
        let store = DatabaseStorage::with_connection(db::open_memory_database().unwrap());
        let mut first = upsert_user("u-4", "Lina");
        first.email = Some("front-desk@lab.example".into());
        let mut second = upsert_user("u-5", "Omar");
        second.email = first.email.clone();

        store.upsert_user(first).unwrap();
        store.upsert_user(second).unwrap();
        assert_eq!(
            store.get_user("u-5").unwrap().unwrap().email.as_deref(),
            Some("front-desk@lab.example")
        );
        assert!(store.get_user("u-4").unwrap().is_some());
    }

    #[test]
    fn users_bypass_memory_tables() {
        let store = DatabaseStorage::with_connection(db::open_memory_database().unwrap());
        store.upsert_user(upsert_user("u-3", "Dana")).unwrap();
        assert!(store.memory().get_user("u-3").unwrap().is_none());
        assert!(store.get_user("u-3").unwrap().is_some());
    }

    #[test]
    fn other_entities_live_in_memory() {
        let store = DatabaseStorage::with_connection(db::open_memory_database().unwrap());
        let patient = store.create_patient(new_patient("Ali", "777")).unwrap();
        assert_eq!(
            store.memory().get_patient(patient.id).unwrap().unwrap(),
            patient
        );
        assert!(store.get_patient(patient.id + 1).unwrap().is_none());
    }
}
