//! Form domain layer
//!
//! Input masks, validation rules, the per-form controller and the mapping
//! from form values to API payloads.

mod errors;
mod field;
mod form_state;
mod format;
mod payload;
mod schema;

pub use errors::{dominant_kind, ErrorKind, FieldError};
pub use field::{ChoiceOption, FormField};
pub use form_state::{BeginSubmit, CancelRequest, Form, FormController, FormKind, FormPhase};
pub use payload::Payload;
