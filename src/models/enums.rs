use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The serde representation uses the same wire strings.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(CollectorStatus {
    Available => "available",
    Busy => "busy",
    Offline => "offline",
});

str_enum!(OrderStatus {
    Registered => "registered",
    CollectionScheduled => "collection_scheduled",
    Collected => "collected",
    Processing => "processing",
    Completed => "completed",
    Delivered => "delivered",
});

str_enum!(Priority {
    Urgent => "urgent",
    High => "high",
    Normal => "normal",
    Low => "low",
});

str_enum!(ResultStatus {
    Pending => "pending",
    Completed => "completed",
    Reviewed => "reviewed",
    Validated => "validated",
});

str_enum!(InventoryCategory {
    Consumables => "consumables",
    Reagents => "reagents",
    Equipment => "equipment",
});

impl OrderStatus {
    /// Every status, in the intended lifecycle order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Registered,
        OrderStatus::CollectionScheduled,
        OrderStatus::Collected,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Delivered,
    ];

    /// Orders still waiting for a sample to be drawn.
    pub fn is_pending_collection(&self) -> bool {
        matches!(self, Self::Registered | Self::CollectionScheduled)
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

impl Default for ResultStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl Default for CollectorStatus {
    fn default() -> Self {
        Self::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn order_status_round_trip() {
        for (variant, s) in [
            (OrderStatus::Registered, "registered"),
            (OrderStatus::CollectionScheduled, "collection_scheduled"),
            (OrderStatus::Collected, "collected"),
            (OrderStatus::Processing, "processing"),
            (OrderStatus::Completed, "completed"),
            (OrderStatus::Delivered, "delivered"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(OrderStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&OrderStatus::CollectionScheduled).unwrap();
        assert_eq!(json, "\"collection_scheduled\"");
        let parsed: InventoryCategory = serde_json::from_str("\"reagents\"").unwrap();
        assert_eq!(parsed, InventoryCategory::Reagents);
    }

    #[test]
    fn pending_collection_covers_first_two_stages() {
        let pending: Vec<_> = OrderStatus::ALL
            .iter()
            .filter(|s| s.is_pending_collection())
            .collect();
        assert_eq!(
            pending,
            vec![&OrderStatus::Registered, &OrderStatus::CollectionScheduled]
        );
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(OrderStatus::from_str("cancelled").is_err());
        assert!(CollectorStatus::from_str("asleep").is_err());
        assert!(Priority::from_str("").is_err());
        assert!(serde_json::from_str::<ResultStatus>("\"final\"").is_err());
    }
}
