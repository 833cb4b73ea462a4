//! Input masks for Brazilian document numbers, postal codes and phones
//!
//! Masks are applied on every keystroke. They never reject input: partial
//! values are shown as bare digits, over-long values are left untouched so
//! validation can report them.

/// Mask applied to a field as the user types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mask {
    Cnpj,
    Cpf,
    Cep,
    Phone,
}

impl Mask {
    /// Apply this mask to raw input
    pub fn apply(self, input: &str) -> String {
        match self {
            Mask::Cnpj => format_cnpj(input),
            Mask::Cpf => format_cpf(input),
            Mask::Cep => format_cep(input),
            Mask::Phone => format_phone(input),
        }
    }
}

/// Keep only ASCII digits
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Insert `separators` before the given digit offsets.
///
/// `groups` are (offset, text) pairs sorted by offset.
fn interleave(digits: &str, groups: &[(usize, &str)]) -> String {
    let mut out = String::with_capacity(digits.len() + 6);
    let mut last = 0;
    for &(at, sep) in groups {
        out.push_str(&digits[last..at]);
        out.push_str(sep);
        last = at;
    }
    out.push_str(&digits[last..]);
    out
}

/// Format a CNPJ as `NN.NNN.NNN/NNNN-NN`
pub fn format_cnpj(input: &str) -> String {
    let digits = digits_only(input);
    match digits.len() {
        14 => interleave(&digits, &[(2, "."), (5, "."), (8, "/"), (12, "-")]),
        n if n < 14 => digits,
        _ => input.to_string(),
    }
}

/// Format a CPF as `NNN.NNN.NNN-NN`
pub fn format_cpf(input: &str) -> String {
    let digits = digits_only(input);
    match digits.len() {
        11 => interleave(&digits, &[(3, "."), (6, "."), (9, "-")]),
        n if n < 11 => digits,
        _ => input.to_string(),
    }
}

/// Format a CEP as `NNNNN-NNN`
pub fn format_cep(input: &str) -> String {
    let digits = digits_only(input);
    match digits.len() {
        8 => interleave(&digits, &[(5, "-")]),
        n if n < 8 => digits,
        _ => input.to_string(),
    }
}

/// Format a landline `(NN) NNNN-NNNN` or mobile `(NN) NNNNN-NNNN` number
pub fn format_phone(input: &str) -> String {
    let digits = digits_only(input);
    match digits.len() {
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        n if n < 10 => digits,
        _ => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("12.345.678/0001-99"), "12345678000199");
        assert_eq!(digits_only("abc"), "");
    }

    #[test]
    fn test_cnpj_full_is_formatted() {
        assert_eq!(format_cnpj("12345678000199"), "12.345.678/0001-99");
    }

    #[test]
    fn test_cnpj_partial_is_bare_digits() {
        for len in 0..14 {
            let raw: String = "12345678000199".chars().take(len).collect();
            assert_eq!(format_cnpj(&raw), raw);
        }
    }

    #[test]
    fn test_cnpj_over_length_is_unchanged() {
        assert_eq!(format_cnpj("12.345.678/0001-995"), "12.345.678/0001-995");
    }

    #[test]
    fn test_cnpj_is_stable_on_formatted_input() {
        let once = format_cnpj("12345678000199");
        assert_eq!(format_cnpj(&once), once);
    }

    #[test]
    fn test_cpf_formats_eleven_digits() {
        assert_eq!(format_cpf("12345678901"), "123.456.789-01");
        assert_eq!(format_cpf("123456"), "123456");
    }

    #[test]
    fn test_cep_inserts_dash_after_fifth_digit() {
        assert_eq!(format_cep("01000000"), "01000-000");
        assert_eq!(format_cep("0100000"), "0100000");
        assert_eq!(format_cep("01000-000"), "01000-000");
    }

    #[test]
    fn test_phone_mobile_and_landline() {
        assert_eq!(format_phone("11988887777"), "(11) 98888-7777");
        assert_eq!(format_phone("1133334444"), "(11) 3333-4444");
    }

    #[test]
    fn test_phone_partial_and_over_length() {
        assert_eq!(format_phone("(11) 9"), "119");
        assert_eq!(format_phone("119888877771"), "119888877771");
    }

    #[test]
    fn test_mask_dispatch() {
        assert_eq!(Mask::Cep.apply("12345678"), "12345-678");
        assert_eq!(Mask::Phone.apply("1133334444"), "(11) 3333-4444");
    }
}
