//! Declarative validation rules for the registration forms
//!
//! Each form kind has one static [`Schema`]: an ordered list of field rules,
//! each an ordered list of checks. A field reports only its first failing
//! check, mirroring how the inline error under a field is rendered.

use super::errors::FieldError;
use super::form_state::{FormKind, FormValues};
use once_cell::sync::Lazy;
use regex::Regex;

// Digit classes are spelled `[0-9]`: `\d` is Unicode-aware in `regex`
static CNPJ_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}\.[0-9]{3}\.[0-9]{3}/[0-9]{4}-[0-9]{2}$|^[0-9]{14}$").expect("cnpj regex")
});
static CPF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}$|^[0-9]{11}$").expect("cpf regex")
});
static CEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{5}-?[0-9]{3}$").expect("cep regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9\s()+-]+$").expect("phone regex"));
static UF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}$").expect("uf regex"));
static LOGIN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z_-]+$").expect("login regex"));
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-ZÀ-ÿ\s]+$").expect("name regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email regex")
});

/// Allowed employee roles
pub const ROLES: &[&str] = &["ADMIN", "USER"];

/// Brazilian federative units
pub const STATES: &[&str] = &[
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB", "PR",
    "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

/// A single check applied to a field value
#[derive(Debug)]
pub enum Check {
    Required(&'static str),
    MinLen(usize, &'static str),
    MaxLen(usize, &'static str),
    ExactLen(usize, &'static str),
    Pattern(&'static Lazy<Regex>, &'static str),
    Email(&'static str),
    /// At least one lowercase letter, one uppercase letter and one digit
    PasswordStrength(&'static str),
    OneOf(&'static [&'static str], &'static str),
    Number(&'static str),
    /// Inclusive numeric range; values that do not parse are left to `Number`
    Range(f64, f64, &'static str),
}

impl Check {
    /// Returns the failure message if `value` does not pass
    fn failure(&self, value: &str) -> Option<&'static str> {
        let len = value.chars().count();
        let failed = match self {
            Check::Required(_) => value.trim().is_empty(),
            Check::MinLen(min, _) => len < *min,
            Check::MaxLen(max, _) => len > *max,
            Check::ExactLen(n, _) => len != *n,
            Check::Pattern(re, _) => !re.is_match(value),
            Check::Email(_) => !EMAIL_RE.is_match(value),
            Check::PasswordStrength(_) => {
                !(value.chars().any(|c| c.is_ascii_lowercase())
                    && value.chars().any(|c| c.is_ascii_uppercase())
                    && value.chars().any(|c| c.is_ascii_digit()))
            }
            Check::OneOf(allowed, _) => !allowed.contains(&value),
            Check::Number(_) => parse_number(value).is_none(),
            Check::Range(min, max, _) => {
                parse_number(value).is_some_and(|n| n < *min || n > *max)
            }
        };
        failed.then_some(self.message())
    }

    fn message(&self) -> &'static str {
        match self {
            Check::Required(m)
            | Check::MinLen(_, m)
            | Check::MaxLen(_, m)
            | Check::ExactLen(_, m)
            | Check::Pattern(_, m)
            | Check::Email(m)
            | Check::PasswordStrength(m)
            | Check::OneOf(_, m)
            | Check::Number(m)
            | Check::Range(_, _, m) => m,
        }
    }
}

/// Parse a coordinate-style number, rejecting NaN and infinities
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Rules for one field
#[derive(Debug)]
pub struct FieldRule {
    pub field: &'static str,
    /// Empty optional fields skip every check
    pub optional: bool,
    pub checks: Vec<Check>,
}

impl FieldRule {
    fn required(field: &'static str, checks: Vec<Check>) -> Self {
        Self {
            field,
            optional: false,
            checks,
        }
    }

    fn optional(field: &'static str, checks: Vec<Check>) -> Self {
        Self {
            field,
            optional: true,
            checks,
        }
    }

    /// Validate a single value
    pub fn check(&self, value: &str) -> Option<FieldError> {
        if self.optional && value.is_empty() {
            return None;
        }
        self.checks
            .iter()
            .find_map(|c| c.failure(value))
            .map(|message| FieldError::validation(self.field, message))
    }
}

/// Validation rules of one form kind
#[derive(Debug)]
pub struct Schema {
    pub rules: Vec<FieldRule>,
}

impl Schema {
    /// Get the schema for a form kind
    pub fn for_kind(kind: FormKind) -> &'static Schema {
        match kind {
            FormKind::Company => &COMPANY,
            FormKind::Employee => &EMPLOYEE,
            FormKind::Address => &ADDRESS,
        }
    }

    /// Validate a full snapshot. Missing values are treated as empty.
    pub fn validate(&self, values: &FormValues) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = self
            .rules
            .iter()
            .filter_map(|rule| rule.check(values.get(rule.field)))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate one field, e.g. after a keystroke
    pub fn validate_field(&self, field: &str, value: &str) -> Option<FieldError> {
        self.rules
            .iter()
            .find(|r| r.field == field)
            .and_then(|r| r.check(value))
    }
}

fn email_rules() -> FieldRule {
    FieldRule::required(
        "email",
        vec![
            Check::Email("Invalid email"),
            Check::MinLen(5, "Email must have at least 5 characters"),
        ],
    )
}

fn phone_rules() -> FieldRule {
    FieldRule::required(
        "telefone",
        vec![
            Check::MinLen(10, "Phone must have at least 10 digits"),
            Check::MaxLen(15, "Phone must have at most 15 digits"),
            Check::Pattern(&PHONE_RE, "Invalid phone format"),
        ],
    )
}

/// Address rules; the state field is `uf` or `estado` depending on the form
fn address_rules(state_field: &'static str) -> Vec<FieldRule> {
    vec![
        FieldRule::required(
            "cep",
            vec![
                Check::MinLen(8, "CEP must have 8 digits"),
                Check::MaxLen(9, "Invalid CEP"),
                Check::Pattern(&CEP_RE, "Invalid CEP format"),
            ],
        ),
        FieldRule::required(
            "logradouro",
            vec![
                Check::MinLen(5, "Street must have at least 5 characters"),
                Check::MaxLen(100, "Street must have at most 100 characters"),
            ],
        ),
        FieldRule::required(
            "numero",
            vec![
                Check::MinLen(1, "Number is required"),
                Check::MaxLen(10, "Number must have at most 10 characters"),
            ],
        ),
        FieldRule::optional(
            "complemento",
            vec![Check::MaxLen(50, "Complement must have at most 50 characters")],
        ),
        FieldRule::required(
            "bairro",
            vec![
                Check::MinLen(2, "District must have at least 2 characters"),
                Check::MaxLen(50, "District must have at most 50 characters"),
            ],
        ),
        FieldRule::required(
            "cidade",
            vec![
                Check::MinLen(2, "City must have at least 2 characters"),
                Check::MaxLen(50, "City must have at most 50 characters"),
            ],
        ),
        FieldRule::required(
            state_field,
            vec![
                Check::ExactLen(2, "State must have exactly 2 characters"),
                Check::Pattern(&UF_RE, "State must be 2 uppercase letters"),
            ],
        ),
    ]
}

static COMPANY: Lazy<Schema> = Lazy::new(|| {
    let mut rules = vec![
        FieldRule::required(
            "razaoSocial",
            vec![
                Check::MinLen(2, "Legal name must have at least 2 characters"),
                Check::MaxLen(100, "Legal name must have at most 100 characters"),
            ],
        ),
        FieldRule::required(
            "nomeFantasia",
            vec![
                Check::MinLen(2, "Trade name must have at least 2 characters"),
                Check::MaxLen(100, "Trade name must have at most 100 characters"),
            ],
        ),
        FieldRule::required(
            "cnpj",
            vec![Check::Pattern(&CNPJ_RE, "Invalid CNPJ format")],
        ),
        email_rules(),
        phone_rules(),
    ];
    rules.extend(address_rules("uf"));
    rules.push(FieldRule::required(
        "latitude",
        vec![
            Check::Required("Latitude is required"),
            Check::Number("Latitude must be a number"),
            Check::Range(-90.0, 90.0, "Latitude must be between -90 and 90"),
        ],
    ));
    rules.push(FieldRule::required(
        "longitude",
        vec![
            Check::Required("Longitude is required"),
            Check::Number("Longitude must be a number"),
            Check::Range(-180.0, 180.0, "Longitude must be between -180 and 180"),
        ],
    ));
    Schema { rules }
});

static EMPLOYEE: Lazy<Schema> = Lazy::new(|| {
    let mut rules = vec![
        FieldRule::required(
            "login",
            vec![
                Check::MinLen(3, "Login must have at least 3 characters"),
                Check::MaxLen(20, "Login must have at most 20 characters"),
                Check::Pattern(&LOGIN_RE, "Login may only contain letters, '-' and '_'"),
            ],
        ),
        FieldRule::required(
            "senha",
            vec![
                Check::MinLen(6, "Password must have at least 6 characters"),
                Check::MaxLen(50, "Password must have at most 50 characters"),
                Check::PasswordStrength(
                    "Password needs at least one lowercase letter, one uppercase letter and one digit",
                ),
            ],
        ),
        FieldRule::required("role", vec![Check::OneOf(ROLES, "Select a valid role")]),
        FieldRule::required(
            "cpf",
            vec![
                Check::MinLen(11, "CPF must have 11 digits"),
                Check::MaxLen(14, "Invalid CPF"),
                Check::Pattern(&CPF_RE, "Invalid CPF format"),
            ],
        ),
        email_rules(),
        FieldRule::required(
            "nome",
            vec![
                Check::MinLen(2, "Name must have at least 2 characters"),
                Check::MaxLen(100, "Name must have at most 100 characters"),
                Check::Pattern(&NAME_RE, "Name may only contain letters and spaces"),
            ],
        ),
        phone_rules(),
        FieldRule::required(
            "cargo",
            vec![
                Check::MinLen(2, "Position must have at least 2 characters"),
                Check::MaxLen(50, "Position must have at most 50 characters"),
            ],
        ),
        FieldRule::required(
            "departamento",
            vec![
                Check::MinLen(2, "Department must have at least 2 characters"),
                Check::MaxLen(50, "Department must have at most 50 characters"),
            ],
        ),
        FieldRule::required("empresaId", vec![Check::Required("Select a company")]),
    ];
    rules.extend(address_rules("estado"));
    Schema { rules }
});

static ADDRESS: Lazy<Schema> = Lazy::new(|| Schema {
    rules: address_rules("uf"),
});

#[cfg(test)]
mod tests {
    use super::*;

    fn company_values() -> FormValues {
        FormValues::from_pairs(&[
            ("razaoSocial", "Acme Ltda"),
            ("nomeFantasia", "Acme"),
            ("cnpj", "12.345.678/0001-99"),
            ("email", "a@acme.com"),
            ("telefone", "(11) 98888-7777"),
            ("cep", "01000-000"),
            ("logradouro", "Rua X"),
            ("numero", "10"),
            ("complemento", ""),
            ("bairro", "Centro"),
            ("cidade", "São Paulo"),
            ("uf", "SP"),
            ("latitude", "-23.5"),
            ("longitude", "-46.6"),
        ])
    }

    fn employee_values() -> FormValues {
        FormValues::from_pairs(&[
            ("login", "maria_s"),
            ("senha", "Abcdef1"),
            ("role", "USER"),
            ("cpf", "123.456.789-01"),
            ("email", "maria@acme.com"),
            ("nome", "Maria José"),
            ("telefone", "(11) 3333-4444"),
            ("cargo", "Analista"),
            ("departamento", "RH"),
            ("empresaId", "7"),
            ("cep", "01000000"),
            ("logradouro", "Avenida Brasil"),
            ("numero", "123"),
            ("bairro", "Centro"),
            ("cidade", "Recife"),
            ("estado", "PE"),
        ])
    }

    fn fields_of(err: Vec<FieldError>) -> Vec<String> {
        err.into_iter().filter_map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_company_passes() {
        assert!(Schema::for_kind(FormKind::Company)
            .validate(&company_values())
            .is_ok());
    }

    #[test]
    fn test_company_lowercase_uf_fails() {
        let mut values = company_values();
        values.set("uf", "sp");
        let err = Schema::for_kind(FormKind::Company)
            .validate(&values)
            .unwrap_err();
        assert_eq!(fields_of(err), vec!["uf"]);
    }

    #[test]
    fn test_company_raw_digits_accepted() {
        let mut values = company_values();
        values.set("cnpj", "12345678000199");
        values.set("cep", "01000000");
        values.set("telefone", "11988887777");
        assert!(Schema::for_kind(FormKind::Company).validate(&values).is_ok());
    }

    #[test]
    fn test_company_non_numeric_latitude_fails() {
        let mut values = company_values();
        values.set("latitude", "south");
        let err = Schema::for_kind(FormKind::Company)
            .validate(&values)
            .unwrap_err();
        assert_eq!(err[0].message, "Latitude must be a number");
    }

    #[test]
    fn test_company_out_of_range_longitude_fails() {
        let mut values = company_values();
        values.set("longitude", "200");
        let err = Schema::for_kind(FormKind::Company)
            .validate(&values)
            .unwrap_err();
        assert_eq!(fields_of(err), vec!["longitude"]);
    }

    #[test]
    fn test_empty_company_reports_every_required_field() {
        let err = Schema::for_kind(FormKind::Company)
            .validate(&FormValues::default())
            .unwrap_err();
        let fields = fields_of(err);
        assert!(!fields.contains(&"complemento".to_string()));
        assert_eq!(fields.len(), Schema::for_kind(FormKind::Company).rules.len() - 1);
    }

    #[test]
    fn test_employee_weak_password_fails() {
        let mut values = employee_values();
        values.set("senha", "abcdef");
        let err = Schema::for_kind(FormKind::Employee)
            .validate(&values)
            .unwrap_err();
        assert_eq!(fields_of(err), vec!["senha"]);
    }

    #[test]
    fn test_employee_strong_password_passes() {
        assert!(Schema::for_kind(FormKind::Employee)
            .validate(&employee_values())
            .is_ok());
    }

    #[test]
    fn test_employee_login_rejects_digits() {
        let schema = Schema::for_kind(FormKind::Employee);
        assert!(schema.validate_field("login", "joao-1").is_some());
        assert!(schema.validate_field("login", "joao_silva").is_none());
        assert!(schema.validate_field("login", "jo").is_some());
    }

    #[test]
    fn test_employee_role_must_be_known() {
        let schema = Schema::for_kind(FormKind::Employee);
        assert!(schema.validate_field("role", "ROOT").is_some());
        assert!(schema.validate_field("role", "ADMIN").is_none());
    }

    #[test]
    fn test_employee_name_accepts_accents_only_letters() {
        let schema = Schema::for_kind(FormKind::Employee);
        assert!(schema.validate_field("nome", "João Ângelo").is_none());
        assert!(schema.validate_field("nome", "R2D2").is_some());
    }

    #[test]
    fn test_employee_cpf_formats() {
        let schema = Schema::for_kind(FormKind::Employee);
        assert!(schema.validate_field("cpf", "12345678901").is_none());
        assert!(schema.validate_field("cpf", "123.456.789-01").is_none());
        assert!(schema.validate_field("cpf", "123456789-01").is_some());
    }

    #[test]
    fn test_document_patterns_reject_non_ascii_digits() {
        let schema = Schema::for_kind(FormKind::Company);
        // Arabic-Indic digits
        assert!(schema.validate_field("cnpj", "١٢٣٤٥٦٧٨٩٠١٢٣٤").is_some());
        assert!(schema.validate_field("cep", "٠١٠٠٠٠٠٠").is_some());
        assert!(schema.validate_field("telefone", "١١٩٨٨٨٨٧٧٧٧").is_some());
        let employee = Schema::for_kind(FormKind::Employee);
        assert!(employee.validate_field("cpf", "١٢٣٤٥٦٧٨٩٠١").is_some());
    }

    #[test]
    fn test_employee_requires_company() {
        let mut values = employee_values();
        values.set("empresaId", "");
        let err = Schema::for_kind(FormKind::Employee)
            .validate(&values)
            .unwrap_err();
        assert_eq!(err[0].message, "Select a company");
    }

    #[test]
    fn test_complemento_is_optional_but_bounded() {
        let schema = Schema::for_kind(FormKind::Address);
        assert!(schema.validate_field("complemento", "").is_none());
        assert!(schema.validate_field("complemento", "Apto 101").is_none());
        assert!(schema.validate_field("complemento", &"x".repeat(51)).is_some());
    }

    #[test]
    fn test_first_failing_check_wins() {
        let schema = Schema::for_kind(FormKind::Address);
        let err = schema.validate_field("cep", "12").unwrap();
        assert_eq!(err.message, "CEP must have 8 digits");
    }

    #[test]
    fn test_email_shape() {
        let schema = Schema::for_kind(FormKind::Company);
        assert!(schema.validate_field("email", "a@b.co").is_none());
        assert!(schema.validate_field("email", "not-an-email").is_some());
    }

    #[test]
    fn test_states_are_valid_uf_values() {
        let schema = Schema::for_kind(FormKind::Address);
        for uf in STATES {
            assert!(schema.validate_field("uf", uf).is_none(), "{uf}");
        }
    }
}
