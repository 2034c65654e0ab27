//! In-memory backend.
//!
//! All tables sit behind one `RwLock`. Reads share the lock; every mutation
//! holds the write lock for its whole read-modify-write, so concurrent stock
//! adjustments on the same item cannot overwrite each other.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Local, Utc};

use super::dashboard::{compute_dashboard_stats, DashboardStats};
use super::{Storage, StorageError, StorageResult};
use crate::models::enums::OrderStatus;
use crate::models::*;

/// Last id handed out per entity. Ids start at 1.
#[derive(Debug, Default)]
struct IdSequences {
    patient: i64,
    collector: i64,
    lab_service: i64,
    lab_order: i64,
    order_service: i64,
    test_result: i64,
    inventory: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[derive(Debug, Default)]
struct Tables {
    patients: BTreeMap<i64, Patient>,
    collectors: BTreeMap<i64, Collector>,
    lab_services: BTreeMap<i64, LabService>,
    lab_orders: BTreeMap<i64, LabOrder>,
    order_services: BTreeMap<i64, OrderService>,
    test_results: BTreeMap<i64, TestResult>,
    inventory: BTreeMap<i64, InventoryItem>,
    users: HashMap<String, User>,
    ids: IdSequences,
}

/// Process-local store. Construct once and share behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemStorage {
    tables: RwLock<Tables>,
}

fn newest_first(mut orders: Vec<LabOrder>) -> Vec<LabOrder> {
    orders.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    orders
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| StorageError::LockPoisoned)
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| StorageError::LockPoisoned)
    }

    /// Create an order with an explicit creation time. Used for backfilling
    /// history; `create_lab_order` calls this with the current time.
    pub fn insert_lab_order_at(
        &self,
        input: NewLabOrder,
        created_at: DateTime<Utc>,
    ) -> StorageResult<LabOrder> {
        let mut tables = self.write()?;
        let id = next_id(&mut tables.ids.lab_order);
        let order = LabOrder::from_new(id, input, created_at);
        tables.lab_orders.insert(id, order.clone());
        Ok(order)
    }

    /// Dashboard numbers as seen at `now`.
    pub fn dashboard_stats_at(&self, now: &DateTime<Local>) -> StorageResult<DashboardStats> {
        let tables = self.read()?;
        Ok(compute_dashboard_stats(tables.lab_orders.values(), now))
    }

    fn with_order<F>(&self, id: i64, mutate: F) -> StorageResult<Option<LabOrder>>
    where
        F: FnOnce(&mut LabOrder),
    {
        let mut tables = self.write()?;
        let Some(order) = tables.lab_orders.get_mut(&id) else {
            return Ok(None);
        };
        mutate(order);
        order.updated_at = Utc::now();
        Ok(Some(order.clone()))
    }
}

impl Storage for MemStorage {
    fn get_patient(&self, id: i64) -> StorageResult<Option<Patient>> {
        Ok(self.read()?.patients.get(&id).cloned())
    }

    fn get_all_patients(&self) -> StorageResult<Vec<Patient>> {
        Ok(self.read()?.patients.values().cloned().collect())
    }

    fn get_patient_by_national_id(&self, national_id: &str) -> StorageResult<Option<Patient>> {
        Ok(self
            .read()?
            .patients
            .values()
            .find(|p| p.national_id == national_id)
            .cloned())
    }

    fn create_patient(&self, input: NewPatient) -> StorageResult<Patient> {
        let mut tables = self.write()?;
        let id = next_id(&mut tables.ids.patient);
        let patient = Patient::from_new(id, input, Utc::now());
        tables.patients.insert(id, patient.clone());
        Ok(patient)
    }

    fn get_collector(&self, id: i64) -> StorageResult<Option<Collector>> {
        Ok(self.read()?.collectors.get(&id).cloned())
    }

    fn get_all_collectors(&self) -> StorageResult<Vec<Collector>> {
        Ok(self.read()?.collectors.values().cloned().collect())
    }

    fn create_collector(&self, input: NewCollector) -> StorageResult<Collector> {
        let mut tables = self.write()?;
        let id = next_id(&mut tables.ids.collector);
        let collector = Collector::from_new(id, input);
        tables.collectors.insert(id, collector.clone());
        Ok(collector)
    }

    fn update_collector_status(
        &self,
        id: i64,
        update: CollectorStatusUpdate,
    ) -> StorageResult<Option<Collector>> {
        let mut tables = self.write()?;
        Ok(tables.collectors.get_mut(&id).map(|collector| {
            collector.apply_status(update);
            collector.clone()
        }))
    }

    fn get_lab_service(&self, id: i64) -> StorageResult<Option<LabService>> {
        Ok(self.read()?.lab_services.get(&id).cloned())
    }

    fn get_all_lab_services(&self) -> StorageResult<Vec<LabService>> {
        Ok(self.read()?.lab_services.values().cloned().collect())
    }

    fn get_lab_services_by_category(&self, category: &str) -> StorageResult<Vec<LabService>> {
        Ok(self
            .read()?
            .lab_services
            .values()
            .filter(|s| s.category == category)
            .cloned()
            .collect())
    }

    fn create_lab_service(&self, input: NewLabService) -> StorageResult<LabService> {
        let mut tables = self.write()?;
        let id = next_id(&mut tables.ids.lab_service);
        let service = LabService::from_new(id, input);
        tables.lab_services.insert(id, service.clone());
        Ok(service)
    }

    fn get_lab_order(&self, id: i64) -> StorageResult<Option<LabOrder>> {
        Ok(self.read()?.lab_orders.get(&id).cloned())
    }

    fn get_all_lab_orders(&self) -> StorageResult<Vec<LabOrder>> {
        let orders = self.read()?.lab_orders.values().cloned().collect();
        Ok(newest_first(orders))
    }

    fn get_lab_orders_by_status(&self, status: OrderStatus) -> StorageResult<Vec<LabOrder>> {
        let orders = self
            .read()?
            .lab_orders
            .values()
            .filter(|o| o.status == status)
            .cloned()
            .collect();
        Ok(newest_first(orders))
    }

    fn get_lab_orders_by_collector(&self, collector_id: i64) -> StorageResult<Vec<LabOrder>> {
        let orders = self
            .read()?
            .lab_orders
            .values()
            .filter(|o| o.collector_id == Some(collector_id))
            .cloned()
            .collect();
        Ok(newest_first(orders))
    }

    fn create_lab_order(&self, input: NewLabOrder) -> StorageResult<LabOrder> {
        self.insert_lab_order_at(input, Utc::now())
    }

    fn update_lab_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> StorageResult<Option<LabOrder>> {
        self.with_order(id, |order| order.status = status)
    }

    fn assign_collector_to_order(
        &self,
        id: i64,
        collector_id: i64,
    ) -> StorageResult<Option<LabOrder>> {
        self.with_order(id, |order| {
            order.collector_id = Some(collector_id);
            order.status = OrderStatus::CollectionScheduled;
        })
    }

    fn get_order_services(&self, order_id: i64) -> StorageResult<Vec<OrderService>> {
        Ok(self
            .read()?
            .order_services
            .values()
            .filter(|s| s.order_id == order_id)
            .cloned()
            .collect())
    }

    fn create_order_service(&self, input: NewOrderService) -> StorageResult<OrderService> {
        let mut tables = self.write()?;
        let id = next_id(&mut tables.ids.order_service);
        let line = OrderService::from_new(id, input);
        tables.order_services.insert(id, line.clone());
        Ok(line)
    }

    fn get_test_result(&self, id: i64) -> StorageResult<Option<TestResult>> {
        Ok(self.read()?.test_results.get(&id).cloned())
    }

    fn get_test_results(&self, order_id: i64) -> StorageResult<Vec<TestResult>> {
        Ok(self
            .read()?
            .test_results
            .values()
            .filter(|r| r.order_id == order_id)
            .cloned()
            .collect())
    }

    fn create_test_result(&self, input: NewTestResult) -> StorageResult<TestResult> {
        let mut tables = self.write()?;
        let id = next_id(&mut tables.ids.test_result);
        let result = TestResult::from_new(id, input, Utc::now());
        tables.test_results.insert(id, result.clone());
        Ok(result)
    }

    fn update_test_result(
        &self,
        id: i64,
        update: TestResultUpdate,
    ) -> StorageResult<Option<TestResult>> {
        let mut tables = self.write()?;
        Ok(tables.test_results.get_mut(&id).map(|result| {
            result.apply_update(update, Utc::now());
            result.clone()
        }))
    }

    fn get_inventory_item(&self, id: i64) -> StorageResult<Option<InventoryItem>> {
        Ok(self.read()?.inventory.get(&id).cloned())
    }

    fn get_all_inventory(&self) -> StorageResult<Vec<InventoryItem>> {
        Ok(self.read()?.inventory.values().cloned().collect())
    }

    fn get_low_stock_items(&self) -> StorageResult<Vec<InventoryItem>> {
        Ok(self
            .read()?
            .inventory
            .values()
            .filter(|item| item.is_low_stock())
            .cloned()
            .collect())
    }

    fn create_inventory_item(&self, input: NewInventoryItem) -> StorageResult<InventoryItem> {
        let mut tables = self.write()?;
        let id = next_id(&mut tables.ids.inventory);
        let item = InventoryItem::from_new(id, input);
        tables.inventory.insert(id, item.clone());
        Ok(item)
    }

    fn update_inventory_stock(
        &self,
        id: i64,
        delta: i32,
    ) -> StorageResult<Option<InventoryItem>> {
        let mut tables = self.write()?;
        Ok(tables.inventory.get_mut(&id).map(|item| {
            item.adjust_stock(delta, Utc::now());
            item.clone()
        }))
    }

    fn get_user(&self, id: &str) -> StorageResult<Option<User>> {
        Ok(self.read()?.users.get(id).cloned())
    }

    fn upsert_user(&self, input: UpsertUser) -> StorageResult<User> {
        let mut tables = self.write()?;
        let existing = tables.users.get(&input.id);
        let user = User::from_upsert(input, existing, Utc::now());
        tables.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    fn get_dashboard_stats(&self) -> StorageResult<DashboardStats> {
        self.dashboard_stats_at(&Local::now())
    }
}
