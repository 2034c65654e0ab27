//! Synthetic demo data.
//!
//! Not part of the storage contract: the binary calls this after building a
//! backend when seeding is enabled, and tests drive it with a fixed-seed RNG.

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use super::memory::MemStorage;
use super::{Storage, StorageResult};
use crate::models::enums::*;
use crate::models::*;

#[derive(Debug, Clone, Copy)]
pub struct SeedOptions {
    pub patients: usize,
    pub orders: usize,
    /// Orders are backdated up to this many days.
    pub history_days: i64,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            patients: 40,
            orders: 120,
            history_days: 90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub lab_services: usize,
    pub collectors: usize,
    pub inventory_items: usize,
    pub patients: usize,
    pub orders: usize,
    pub order_services: usize,
    pub test_results: usize,
}

// (name, code, category, price, preparation, sample type, turnaround hours)
const CATALOG: &[(&str, &str, &str, f64, Option<&str>, &str, i32)] = &[
    ("Complete Blood Count", "CBC", "hematology", 80.0, None, "blood", 6),
    ("Erythrocyte Sedimentation Rate", "ESR", "hematology", 40.0, None, "blood", 6),
    ("Fasting Blood Sugar", "FBS", "biochemistry", 35.0, Some("Fast 8-10 hours"), "blood", 4),
    ("Glycated Hemoglobin", "HBA1C", "biochemistry", 120.0, None, "blood", 24),
    ("Lipid Profile", "LIPID", "biochemistry", 150.0, Some("Fast 12 hours"), "blood", 12),
    ("Liver Function Test", "LFT", "biochemistry", 180.0, None, "blood", 12),
    ("Kidney Function Test", "KFT", "biochemistry", 160.0, None, "blood", 12),
    ("Thyroid Stimulating Hormone", "TSH", "hormones", 110.0, None, "blood", 24),
    ("Vitamin D (25-OH)", "VITD", "vitamins", 200.0, None, "blood", 48),
    ("Urinalysis", "UA", "urine", 45.0, Some("First morning sample"), "urine", 4),
    ("C-Reactive Protein", "CRP", "immunology", 70.0, None, "blood", 8),
    ("Ferritin", "FERR", "hematology", 95.0, None, "blood", 24),
];

// (item, category, stock, threshold, unit, supplier)
const INVENTORY: &[(&str, InventoryCategory, i32, i32, &str, &str)] = &[
    ("EDTA tubes", InventoryCategory::Consumables, 450, 200, "pcs", "Gulf Medical Supply"),
    ("Serum separator tubes", InventoryCategory::Consumables, 120, 150, "pcs", "Gulf Medical Supply"),
    ("Butterfly needles 23G", InventoryCategory::Consumables, 80, 80, "pcs", "Al Noor Trading"),
    ("Alcohol swabs", InventoryCategory::Consumables, 1200, 300, "pcs", "Al Noor Trading"),
    ("Glucose reagent kit", InventoryCategory::Reagents, 6, 4, "kit", "BioDiag"),
    ("HbA1c reagent kit", InventoryCategory::Reagents, 2, 3, "kit", "BioDiag"),
    ("Portable centrifuge", InventoryCategory::Equipment, 3, 1, "unit", "LabTech"),
    ("Cool box", InventoryCategory::Equipment, 5, 6, "unit", "LabTech"),
];

const COLLECTORS: &[&str] = &[
    "Khalid Al-Otaibi",
    "Fatimah Al-Zahrani",
    "Ibrahim Al-Harbi",
    "Noura Al-Qahtani",
    "Majed Al-Shehri",
];

const FIRST_NAMES: &[&str] = &[
    "Ahmed", "Mohammed", "Sara", "Aisha", "Omar", "Reem", "Yousef", "Huda", "Faisal", "Lina",
    "Tariq", "Mariam", "Hassan", "Nada", "Ziad", "Dalia",
];

const LAST_NAMES: &[&str] = &[
    "Al-Saud", "Al-Ghamdi", "Al-Mutairi", "Al-Dosari", "Al-Anazi", "Al-Shammari", "Al-Malki",
    "Al-Juhani",
];

const DISTRICTS: &[&str] = &[
    "Al Olaya", "Al Malqa", "Al Nakheel", "Al Yasmin", "Al Rawdah", "Al Sulimaniyah",
];

const TIME_SLOTS: &[&str] = &["08:00-10:00", "10:00-12:00", "12:00-14:00", "16:00-18:00"];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &'a [&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("+9665{:08}", rng.gen_range(0..100_000_000u32))
}

fn random_status<R: Rng + ?Sized>(rng: &mut R) -> OrderStatus {
    OrderStatus::ALL
        .choose(rng)
        .copied()
        .unwrap_or(OrderStatus::Registered)
}

fn random_priority<R: Rng + ?Sized>(rng: &mut R) -> Priority {
    match rng.gen_range(0..10) {
        0 => Priority::Urgent,
        1 | 2 => Priority::High,
        3..=7 => Priority::Normal,
        _ => Priority::Low,
    }
}

/// Fill `store` with a catalog, collectors, inventory, patients, and a
/// backdated order history with line items and results.
pub fn seed_demo_data<R: Rng + ?Sized>(
    store: &MemStorage,
    rng: &mut R,
    options: SeedOptions,
) -> StorageResult<SeedSummary> {
    let services = CATALOG
        .iter()
        .map(|&(name, code, category, price, preparation, sample_type, turnaround)| {
            store.create_lab_service(NewLabService {
                name: name.into(),
                code: code.into(),
                category: category.into(),
                price,
                preparation: preparation.map(Into::into),
                sample_type: sample_type.into(),
                turnaround_hours: turnaround,
            })
        })
        .collect::<StorageResult<Vec<_>>>()?;

    let collectors = COLLECTORS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let status = match i % 3 {
                0 => CollectorStatus::Available,
                1 => CollectorStatus::Busy,
                _ => CollectorStatus::Offline,
            };
            store.create_collector(NewCollector {
                name: (*name).into(),
                phone: phone(rng),
                is_active: status != CollectorStatus::Offline,
                current_lat: Some(format!("{:.4}", 24.6 + rng.gen_range(0.0..0.3))),
                current_lng: Some(format!("{:.4}", 46.6 + rng.gen_range(0.0..0.3))),
                status,
            })
        })
        .collect::<StorageResult<Vec<_>>>()?;

    for &(item_name, category, stock, threshold, unit, supplier) in INVENTORY {
        store.create_inventory_item(NewInventoryItem {
            item_name: item_name.into(),
            category,
            current_stock: stock,
            min_threshold: threshold,
            unit: unit.into(),
            supplier: Some(supplier.into()),
        })?;
    }

    let mut patients = Vec::with_capacity(options.patients);
    for _ in 0..options.patients {
        let patient = store.create_patient(NewPatient {
            name: format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES)),
            national_id: format!("1{:09}", rng.gen_range(0..1_000_000_000u32)),
            phone: phone(rng),
            age: rng.gen_range(1..90),
            address: Some(format!(
                "{} St {}, {}, Riyadh",
                rng.gen_range(1..400),
                rng.gen_range(1..60),
                pick(rng, DISTRICTS)
            )),
        })?;
        patients.push(patient);
    }

    let now = Utc::now();
    let mut order_services = 0;
    let mut test_results = 0;
    let mut orders = 0;

    for _ in 0..options.orders {
        let Some(patient) = patients.choose(rng) else {
            break;
        };
        let status = random_status(rng);
        let collector_id = match status {
            OrderStatus::Registered => None,
            _ => collectors.choose(rng).map(|c| c.id),
        };
        let created_at = now
            - Duration::minutes(rng.gen_range(0..options.history_days.max(1) * 24 * 60));

        let line_count = rng.gen_range(1..=3).min(services.len());
        let lines: Vec<_> = services.choose_multiple(rng, line_count).collect();
        let total_amount: f64 = lines.iter().map(|s| s.price).sum();

        let order = store.insert_lab_order_at(
            OrderDraft {
                collector_id,
                status: Some(status),
                scheduled_date: Some((created_at + Duration::days(1)).date_naive()),
                time_slot: Some(pick(rng, TIME_SLOTS).into()),
                collection_address: patient.address.clone().unwrap_or_default(),
                priority: random_priority(rng),
                notes: None,
                total_amount,
            }
            .for_patient(patient.id),
            created_at,
        )?;
        orders += 1;

        for service in lines {
            store.create_order_service(NewOrderService {
                order_id: order.id,
                service_id: service.id,
                quantity: 1,
                price: service.price,
            })?;
            order_services += 1;

            let result_status = match status {
                OrderStatus::Processing => Some(ResultStatus::Pending),
                OrderStatus::Completed => Some(ResultStatus::Reviewed),
                OrderStatus::Delivered => Some(ResultStatus::Validated),
                _ => None,
            };
            if let Some(result_status) = result_status {
                let recorded = result_status != ResultStatus::Pending;
                store.create_test_result(NewTestResult {
                    order_id: order.id,
                    service_id: service.id,
                    result: recorded.then(|| format!("{:.1}", rng.gen_range(1.0..150.0))),
                    normal_range: None,
                    unit: None,
                    status: result_status,
                })?;
                test_results += 1;
            }
        }
    }

    let summary = SeedSummary {
        lab_services: services.len(),
        collectors: collectors.len(),
        inventory_items: INVENTORY.len(),
        patients: patients.len(),
        orders,
        order_services,
        test_results,
    };
    tracing::info!(?summary, "Demo data seeded");
    Ok(summary)
}
