//! Trait abstraction for the API client to enable mocking in tests

use super::failure::ApiFailure;
use super::types::{AddressPayload, CompanyPayload, CompanySummary, EmployeePayload};
use async_trait::async_trait;
use serde_json::Value;

/// Operations the TUI performs against the Upoint backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpointApi: Send + Sync {
    /// Register a company with its address
    async fn create_company(&self, payload: &CompanyPayload) -> Result<Value, ApiFailure>;

    /// Register an employee
    async fn create_employee(&self, payload: &EmployeePayload) -> Result<Value, ApiFailure>;

    /// Register a standalone address
    async fn create_address(&self, payload: &AddressPayload) -> Result<Value, ApiFailure>;

    /// List companies for the employee form selector
    async fn list_companies(&self) -> Result<Vec<CompanySummary>, ApiFailure>;

    /// Total number of employees
    async fn employee_count(&self) -> Result<u64, ApiFailure>;

    /// Total number of time records
    async fn record_count(&self) -> Result<u64, ApiFailure>;

    /// Install or drop the bearer token sent with requests
    fn set_token(&self, token: Option<String>);
}
