pub mod admissions;
pub mod billing;
pub mod emergency;
pub mod facility;
pub mod health;
pub mod patients;
pub mod vitals;
