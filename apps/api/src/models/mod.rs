pub mod admin;
pub mod case_study;
pub mod education;
pub mod experience;
pub mod profile;
