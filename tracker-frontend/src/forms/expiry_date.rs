//! The `DD-MM-YYYY` expiry date field.

/// Longest value the field accepts (`DD-MM-YYYY`).
pub const MAX_INPUT_LEN: usize = 10;

/// Value of the expiry date text field, kept in display order.
///
/// Every change runs through [`ExpiryDateInput::input`], which drops
/// characters other than digits and `-` and inserts the separators after the
/// day and month.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpiryDateInput {
    value: String,
}

impl ExpiryDateInput {
    /// Build from a posted value. The browser already applied the keystroke
    /// formatting, so only the character filter runs; an over-long value is
    /// kept so it is forwarded rather than dropped.
    pub fn from_submitted(raw: &str) -> Self {
        Self {
            value: Self::filter(raw.trim()),
        }
    }

    fn filter(raw: &str) -> String {
        raw.chars()
            .filter(|c| c.is_ascii_digit() || *c == '-')
            .collect()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Apply the field's full new content after a change event.
    ///
    /// Content longer than [`MAX_INPUT_LEN`] is ignored and the previous
    /// value kept.
    pub fn input(&mut self, raw: &str) {
        let mut value = Self::filter(raw);

        if value.len() > MAX_INPUT_LEN {
            return;
        }
        if (value.len() == 2 || value.len() == 5) && !value.ends_with('-') {
            value.push('-');
        }
        self.value = value;
    }

    /// Type a single character at the end of the field.
    pub fn type_char(&mut self, c: char) {
        let mut raw = self.value.clone();
        raw.push(c);
        self.input(&raw);
    }

    /// The value to send to the documents API, or `None` when blank.
    pub fn to_api_date(&self) -> Option<String> {
        if self.value.is_empty() {
            None
        } else {
            Some(display_to_api(&self.value))
        }
    }
}

/// Reorder `DD-MM-YYYY` into `YYYY-MM-DD`.
///
/// Only the shape is checked: `31-02-2024` becomes `2024-02-31`. Values that
/// do not split into three parts are returned unchanged.
pub fn display_to_api(display: &str) -> String {
    let parts: Vec<&str> = display.split('-').collect();
    match parts.as_slice() {
        [day, month, year] => format!("{year}-{month}-{day}"),
        _ => display.to_string(),
    }
}
