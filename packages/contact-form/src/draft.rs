//! Editable form fields.

use contact_types::{is_plausible_email, Field};

use crate::SubmitError;

/// The user's in-progress message. Survives failed submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Draft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// All fields non-blank and the email shaped like one.
    pub fn validate(&self) -> Result<(), SubmitError> {
        if let Some(field) = Field::ALL
            .into_iter()
            .find(|f| self.get(*f).trim().is_empty())
        {
            return Err(SubmitError::EmptyField(field));
        }
        if !is_plausible_email(self.email.trim()) {
            return Err(SubmitError::InvalidEmail);
        }
        Ok(())
    }
}
