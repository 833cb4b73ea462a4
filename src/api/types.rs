//! Wire types exchanged with the Upoint API

use serde::{Deserialize, Serialize};

/// Address nested in a company registration, or sent on its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressPayload {
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,
    pub cep: String,
}

/// Body of the company creation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPayload {
    pub razao_social: String,
    pub nome_fantasia: String,
    pub cnpj: String,
    pub email: String,
    pub telefone: String,
    pub endereco: AddressPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Body of the employee creation call. The address travels flattened,
/// with the state under `estado`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    pub login: String,
    pub senha: String,
    pub role: String,
    pub cpf: String,
    pub email: String,
    pub nome: String,
    pub telefone: String,
    pub cargo: String,
    pub departamento: String,
    pub empresa_id: String,
    pub cep: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
}

/// Entry of the company listing used by the employee form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub nome_fantasia: String,
    #[serde(default)]
    pub razao_social: Option<String>,
}

impl CompanySummary {
    /// Name shown in the selector
    pub fn display_name(&self) -> &str {
        if !self.nome_fantasia.is_empty() {
            &self.nome_fantasia
        } else {
            self.razao_social.as_deref().unwrap_or(&self.id)
        }
    }
}

/// Response of the count endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub total: u64,
}

/// Accept numeric or string ids
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "unexpected company id: {other}"
        ))),
    }
}
