//! Form field value objects

use super::format::Mask;

/// A selectable option of a choice field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Value sent to the API
    pub value: String,
    /// Text shown to the user
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option whose label is its value
    pub fn plain(value: &str) -> Self {
        Self::new(value, value)
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Choice {
        options: Vec<ChoiceOption>,
        selected: Option<usize>,
    },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    /// Mask re-applied after every edit
    pub mask: Option<Mask>,
    /// Render the value as bullets
    pub is_secret: bool,
    /// Inline error shown under the field
    pub error: Option<String>,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            mask: None,
            is_secret: false,
            error: None,
        }
    }

    /// Create a text field formatted with `mask`
    pub fn masked(name: &str, label: &str, mask: Mask) -> Self {
        Self {
            mask: Some(mask),
            ..Self::text(name, label)
        }
    }

    /// Create a text field whose value is hidden
    pub fn secret(name: &str, label: &str) -> Self {
        Self {
            is_secret: true,
            ..Self::text(name, label)
        }
    }

    /// Create a choice field, optionally preselecting an option
    pub fn choice(
        name: &str,
        label: &str,
        options: Vec<ChoiceOption>,
        selected: Option<usize>,
    ) -> Self {
        let selected = selected.filter(|&i| i < options.len());
        Self {
            value: FieldValue::Choice { options, selected },
            ..Self::text(name, label)
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.value, FieldValue::Choice { .. })
    }

    /// Get the current value as text (the selected option's value for choices)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Choice { options, selected } => selected
                .and_then(|i| options.get(i))
                .map(|o| o.value.as_str())
                .unwrap_or(""),
        }
    }

    /// Set the text value, applying the mask. Choice fields select the
    /// option whose value matches, or clear the selection.
    pub fn set_text(&mut self, value: &str) {
        match &mut self.value {
            FieldValue::Text(s) => {
                *s = match self.mask {
                    Some(mask) => mask.apply(value),
                    None => value.to_string(),
                };
            }
            FieldValue::Choice { options, selected } => {
                *selected = options.iter().position(|o| o.value == value);
            }
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &self.value {
            let mut next = s.clone();
            next.push(c);
            self.set_text(&next);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &self.value {
            let mut next = s.clone();
            next.pop();
            self.set_text(&next);
        }
    }

    /// Select the next option (wraps around)
    pub fn next_choice(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = Some(match *selected {
                Some(i) => (i + 1) % options.len(),
                None => 0,
            });
        }
    }

    /// Select the previous option (wraps around)
    pub fn prev_choice(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = Some(match *selected {
                Some(0) | None => options.len() - 1,
                Some(i) => i - 1,
            });
        }
    }

    /// Replace the options of a choice field, keeping the selection if its
    /// value is still offered
    pub fn set_options(&mut self, new_options: Vec<ChoiceOption>) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            let current = selected
                .and_then(|i| options.get(i))
                .map(|o| o.value.clone());
            *selected = current.and_then(|v| new_options.iter().position(|o| o.value == v));
            *options = new_options;
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) if self.is_secret => "•".repeat(s.chars().count()),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice { options, selected } => match selected.and_then(|i| options.get(i)) {
                Some(option) => format!("◂ {} ▸", option.label),
                None if options.is_empty() => "(no options)".to_string(),
                None => "◂ select ▸".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> Vec<ChoiceOption> {
        vec![ChoiceOption::plain("ADMIN"), ChoiceOption::plain("USER")]
    }

    #[test]
    fn test_masked_field_formats_while_typing() {
        let mut field = FormField::masked("cep", "CEP", Mask::Cep);
        for c in "01000000".chars() {
            field.push_char(c);
        }
        assert_eq!(field.as_text(), "01000-000");
        field.pop_char();
        assert_eq!(field.as_text(), "0100000");
    }

    #[test]
    fn test_plain_field_keeps_input() {
        let mut field = FormField::text("nome", "Name");
        field.push_char('A');
        field.push_char('n');
        assert_eq!(field.as_text(), "An");
    }

    #[test]
    fn test_secret_display_hides_value() {
        let mut field = FormField::secret("senha", "Password");
        field.set_text("Abc1");
        assert_eq!(field.display_value(), "••••");
        assert_eq!(field.as_text(), "Abc1");
    }

    #[test]
    fn test_choice_cycles_and_wraps() {
        let mut field = FormField::choice("role", "Role", roles(), Some(1));
        assert_eq!(field.as_text(), "USER");
        field.next_choice();
        assert_eq!(field.as_text(), "ADMIN");
        field.prev_choice();
        assert_eq!(field.as_text(), "USER");
    }

    #[test]
    fn test_choice_without_selection_is_empty() {
        let mut field = FormField::choice("empresaId", "Company", vec![], None);
        assert_eq!(field.as_text(), "");
        field.next_choice();
        assert_eq!(field.as_text(), "");
        assert_eq!(field.display_value(), "(no options)");
    }

    #[test]
    fn test_choice_set_text_selects_matching_option() {
        let mut field = FormField::choice("role", "Role", roles(), None);
        field.set_text("ADMIN");
        assert_eq!(field.as_text(), "ADMIN");
        field.set_text("ROOT");
        assert_eq!(field.as_text(), "");
    }

    #[test]
    fn test_set_options_keeps_selection_by_value() {
        let mut field = FormField::choice(
            "empresaId",
            "Company",
            vec![ChoiceOption::new("1", "Acme")],
            Some(0),
        );
        field.set_options(vec![
            ChoiceOption::new("2", "Beta"),
            ChoiceOption::new("1", "Acme"),
        ]);
        assert_eq!(field.as_text(), "1");
    }
}
