pub mod collector;
pub mod enums;
pub mod inventory;
pub mod lab_order;
pub mod lab_service;
pub mod patient;
pub mod test_result;
pub mod user;

pub use collector::*;
pub use inventory::*;
pub use lab_order::*;
pub use lab_service::*;
pub use patient::*;
pub use test_result::*;
pub use user::*;
