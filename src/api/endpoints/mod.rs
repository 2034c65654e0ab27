pub mod collectors;
pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod lab_orders;
pub mod lab_services;
pub mod patients;
pub mod test_results;
pub mod users;
