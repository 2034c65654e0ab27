//! Input builders shared by storage and API tests.

use crate::models::enums::*;
use crate::models::*;

pub fn new_patient(name: &str, national_id: &str) -> NewPatient {
    NewPatient {
        name: name.into(),
        national_id: national_id.into(),
        phone: "+966500000000".into(),
        age: 34,
        address: Some("7 King Fahd Rd".into()),
    }
}

pub fn new_collector(name: &str) -> NewCollector {
    NewCollector {
        name: name.into(),
        phone: "+966511111111".into(),
        is_active: true,
        current_lat: None,
        current_lng: None,
        status: CollectorStatus::Available,
    }
}

pub fn new_lab_service(name: &str, category: &str, price: f64) -> NewLabService {
    NewLabService {
        name: name.into(),
        code: name.to_uppercase().replace(' ', "_"),
        category: category.into(),
        price,
        preparation: None,
        sample_type: "blood".into(),
        turnaround_hours: 24,
    }
}

pub fn order_draft(total_amount: f64) -> OrderDraft {
    OrderDraft {
        collector_id: None,
        status: None,
        scheduled_date: None,
        time_slot: None,
        collection_address: "7 King Fahd Rd".into(),
        priority: Priority::Normal,
        notes: None,
        total_amount,
    }
}

pub fn new_inventory_item(name: &str, current_stock: i32, min_threshold: i32) -> NewInventoryItem {
    NewInventoryItem {
        item_name: name.into(),
        category: InventoryCategory::Consumables,
        current_stock,
        min_threshold,
        unit: "box".into(),
        supplier: Some("Gulf Medical Supply".into()),
    }
}

pub fn upsert_user(id: &str, first_name: &str) -> UpsertUser {
    UpsertUser {
        id: id.into(),
        email: Some(format!("{id}@lab.example")),
        first_name: Some(first_name.into()),
        last_name: Some("Haddad".into()),
        profile_image_url: None,
    }
}
