//! Conversion of validated form values into API payloads
//!
//! Formatting punctuation is stripped from document numbers, postal codes
//! and phones; state codes are uppercased; an empty complement is sent as
//! an empty string; coordinates are parsed to numbers.

use super::errors::FieldError;
use super::form_state::{FormKind, FormValues};
use super::format::digits_only;
use super::schema::parse_number;
use crate::api::{AddressPayload, CompanyPayload, EmployeePayload};

/// Outgoing body for one of the creation endpoints
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Company(CompanyPayload),
    Employee(EmployeePayload),
    Address(AddressPayload),
}

impl Payload {
    pub fn kind(&self) -> FormKind {
        match self {
            Payload::Company(_) => FormKind::Company,
            Payload::Employee(_) => FormKind::Employee,
            Payload::Address(_) => FormKind::Address,
        }
    }
}

// Sent exactly as validated
fn text(values: &FormValues, field: &str) -> String {
    values.get(field).to_string()
}

fn coordinate(values: &FormValues, field: &str) -> Result<f64, FieldError> {
    parse_number(values.get(field))
        .ok_or_else(|| FieldError::validation(field, format!("{field} must be a number")))
}

fn address(values: &FormValues) -> AddressPayload {
    AddressPayload {
        logradouro: text(values, "logradouro"),
        numero: text(values, "numero"),
        complemento: text(values, "complemento"),
        bairro: text(values, "bairro"),
        cidade: text(values, "cidade"),
        uf: values.get("uf").to_uppercase(),
        cep: digits_only(values.get("cep")),
    }
}

/// Build the payload for `kind` from a validated snapshot
pub fn build(kind: FormKind, values: &FormValues) -> Result<Payload, Vec<FieldError>> {
    match kind {
        FormKind::Company => {
            let latitude = coordinate(values, "latitude");
            let longitude = coordinate(values, "longitude");
            let (latitude, longitude) = match (latitude, longitude) {
                (Ok(lat), Ok(lon)) => (lat, lon),
                (lat, lon) => {
                    return Err([lat.err(), lon.err()].into_iter().flatten().collect());
                }
            };
            Ok(Payload::Company(CompanyPayload {
                razao_social: text(values, "razaoSocial"),
                nome_fantasia: text(values, "nomeFantasia"),
                cnpj: digits_only(values.get("cnpj")),
                email: text(values, "email"),
                telefone: digits_only(values.get("telefone")),
                endereco: address(values),
                latitude: Some(latitude),
                longitude: Some(longitude),
            }))
        }
        FormKind::Employee => Ok(Payload::Employee(EmployeePayload {
            login: text(values, "login"),
            senha: values.get("senha").to_string(),
            role: text(values, "role"),
            cpf: digits_only(values.get("cpf")),
            email: text(values, "email"),
            nome: text(values, "nome"),
            telefone: digits_only(values.get("telefone")),
            cargo: text(values, "cargo"),
            departamento: text(values, "departamento"),
            empresa_id: text(values, "empresaId"),
            cep: digits_only(values.get("cep")),
            logradouro: text(values, "logradouro"),
            numero: text(values, "numero"),
            complemento: text(values, "complemento"),
            bairro: text(values, "bairro"),
            cidade: text(values, "cidade"),
            estado: values.get("estado").to_uppercase(),
        })),
        FormKind::Address => Ok(Payload::Address(address(values))),
    }
}
