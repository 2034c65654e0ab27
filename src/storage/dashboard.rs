//! Dashboard aggregation.
//!
//! A full scan over the order set on every call. Day and month boundaries
//! are taken in the time zone of `now`.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::models::enums::OrderStatus;
use crate::models::LabOrder;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Orders created since midnight.
    pub today_orders: u64,
    /// Orders in `registered` or `collection_scheduled`.
    pub pending_collection: u64,
    /// Orders in `completed`.
    pub ready_results: u64,
    /// Sum of `total_amount` for orders created this calendar month.
    pub monthly_revenue: f64,
}

/// Start of `date` in `tz`, as UTC. Falls back to the earliest valid
/// instant when local midnight is skipped by a DST change.
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Utc>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            date.and_hms_opt(1, 0, 0)
                .and_then(|one_am| tz.from_local_datetime(&one_am).earliest())
        })
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn compute_dashboard_stats<'a, Tz, I>(orders: I, now: &DateTime<Tz>) -> DashboardStats
where
    Tz: TimeZone,
    I: IntoIterator<Item = &'a LabOrder>,
{
    let tz = now.timezone();
    let today = now.date_naive();
    let today_start = start_of_day(&tz, today);
    let month_start = today
        .with_day(1)
        .and_then(|first| start_of_day(&tz, first));

    let mut stats = DashboardStats {
        today_orders: 0,
        pending_collection: 0,
        ready_results: 0,
        monthly_revenue: 0.0,
    };

    for order in orders {
        if today_start.is_some_and(|start| order.created_at >= start) {
            stats.today_orders += 1;
        }
        if order.status.is_pending_collection() {
            stats.pending_collection += 1;
        }
        if order.status == OrderStatus::Completed {
            stats.ready_results += 1;
        }
        if month_start.is_some_and(|start| order.created_at >= start) {
            stats.monthly_revenue += order.total_amount;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::Priority;
    use chrono::FixedOffset;

    fn order(id: i64, created_at: DateTime<Utc>, status: OrderStatus, total: f64) -> LabOrder {
        LabOrder {
            id,
            order_number: format!("LAB-2026-{id:03}"),
            patient_id: 1,
            collector_id: None,
            status,
            scheduled_date: None,
            time_slot: None,
            collection_address: "addr".into(),
            priority: Priority::Normal,
            notes: None,
            total_amount: total,
            created_at,
            updated_at: created_at,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn fixed_seed_matches_manual_recount() {
        use OrderStatus::*;
        let now = at(2026, 6, 15, 14);
        let orders = vec![
            order(1, at(2026, 6, 15, 1), Registered, 100.0),
            order(2, at(2026, 6, 15, 9), CollectionScheduled, 250.0),
            order(3, at(2026, 6, 15, 13), Completed, 75.5),
            order(4, at(2026, 6, 14, 23), Completed, 60.0),
            order(5, at(2026, 6, 1, 0), Processing, 40.0),
            order(6, at(2026, 5, 31, 23), Delivered, 500.0),
            order(7, at(2026, 5, 20, 10), Registered, 90.0),
            order(8, at(2025, 6, 15, 10), Completed, 30.0),
            order(9, at(2026, 6, 10, 8), Collected, 20.0),
            order(10, at(2026, 4, 2, 8), Delivered, 10.0),
        ];

        let stats = compute_dashboard_stats(&orders, &now);
        assert_eq!(stats.today_orders, 3);
        assert_eq!(stats.pending_collection, 3);
        assert_eq!(stats.ready_results, 3);
        // 100 + 250 + 75.5 + 60 + 40 + 20
        assert!((stats.monthly_revenue - 545.5).abs() < 1e-9);
    }

    #[test]
    fn day_boundary_follows_local_offset() {
        // 02:00 at UTC+3 is 23:00 UTC the previous day.
        let riyadh = FixedOffset::east_opt(3 * 3600).unwrap();
        let now = riyadh.with_ymd_and_hms(2026, 6, 15, 2, 0, 0).unwrap();
        let orders = vec![
            order(1, at(2026, 6, 14, 21), OrderStatus::Registered, 10.0),
            order(2, at(2026, 6, 14, 20), OrderStatus::Registered, 10.0),
        ];

        let stats = compute_dashboard_stats(&orders, &now);
        // Local midnight is 21:00 UTC on the 14th.
        assert_eq!(stats.today_orders, 1);
    }

    #[test]
    fn empty_order_set_is_all_zero() {
        let stats = compute_dashboard_stats(&Vec::<LabOrder>::new(), &Utc::now());
        assert_eq!(
            stats,
            DashboardStats {
                today_orders: 0,
                pending_collection: 0,
                ready_results: 0,
                monthly_revenue: 0.0,
            }
        );
    }
}
