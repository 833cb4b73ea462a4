//! REST client for the Upoint backend

mod client;
mod error_mapper;
mod failure;
mod traits;
mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error_mapper::map_failure;
pub use failure::ApiFailure;
pub use traits::UpointApi;
pub use types::{AddressPayload, CompanyPayload, CompanySummary, EmployeePayload};

#[cfg(test)]
pub use traits::MockUpointApi;
