//! Contact form state and submission.
//!
//! A submission moves the form through `Idle -> Submitting -> Succeeded` (or
//! `Failed` when the message cannot be recorded). There is no remote endpoint:
//! after a configurable delay the message is appended to the [`ContactStore`]
//! message log and the fields are cleared. Dropping a submission before it
//! finishes puts the form back to `Idle` with its fields intact.

use log::{debug, info, warn};
use std::time::Duration;

use shared::{ContactFormData, FormField, FormFieldError, MessageId, SubmitStatus};

use super::contact_store::ContactStore;
use crate::error::FormError;

pub const SUCCESS_MESSAGE: &str = "Votre message a été envoyé avec succès !";
pub const FAILURE_MESSAGE: &str = "Une erreur est survenue. Veuillez réessayer.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    data: ContactFormData,
    status: SubmitStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &ContactFormData {
        &self.data
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.data.name,
            FormField::Email => &self.data.email,
            FormField::Phone => &self.data.phone,
            FormField::Subject => &self.data.subject,
            FormField::Message => &self.data.message,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.data.name = value,
            FormField::Email => self.data.email = value,
            FormField::Phone => self.data.phone = value,
            FormField::Subject => self.data.subject = value,
            FormField::Message => self.data.message = value,
        }
    }

    /// Every problem with the current fields, in field order
    pub fn validate(&self) -> Vec<FormFieldError> {
        let mut errors = Vec::new();
        for field in [
            FormField::Name,
            FormField::Email,
            FormField::Phone,
            FormField::Subject,
            FormField::Message,
        ] {
            if field.is_required() && self.field(field).trim().is_empty() {
                errors.push(FormFieldError::Missing(field));
            }
        }
        let email = self.data.email.trim();
        if !email.is_empty() && !email.contains('@') {
            errors.push(FormFieldError::InvalidEmail);
        }
        errors
    }

    /// Enter `Submitting` and hand out the data to send
    pub fn begin_submit(&mut self) -> Result<ContactFormData, FormError> {
        if self.is_submitting() {
            return Err(FormError::AlreadySubmitting);
        }
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }
        self.status = SubmitStatus::Submitting;
        Ok(self.data.clone())
    }

    /// Record the message, then reset the fields.
    /// A store failure leaves the fields in place and marks the form failed.
    pub fn finish_submit(
        &mut self,
        store: &mut ContactStore,
        data: ContactFormData,
    ) -> Result<MessageId, FormError> {
        match store.append_message(data) {
            Ok(id) => {
                self.data = ContactFormData::default();
                self.status = SubmitStatus::Succeeded;
                info!("Contact form submitted as message {}", id);
                Ok(id)
            }
            Err(e) => {
                warn!("Contact form submission failed: {}", e);
                self.fail_submit(FAILURE_MESSAGE);
                Err(e.into())
            }
        }
    }

    pub fn fail_submit(&mut self, reason: impl Into<String>) {
        self.status = SubmitStatus::Failed(reason.into());
    }

    /// Validate, wait `delay` to mimic a network round trip, then record the message
    pub async fn submit(
        &mut self,
        store: &mut ContactStore,
        delay: Duration,
    ) -> Result<MessageId, FormError> {
        let data = self.begin_submit()?;
        let pending = PendingSubmit { form: self };
        tokio::time::sleep(delay).await;
        pending.form.finish_submit(store, data)
    }

    /// Text shown under the form for the current status
    pub fn status_message(&self) -> Option<&str> {
        match &self.status {
            SubmitStatus::Succeeded => Some(SUCCESS_MESSAGE),
            SubmitStatus::Failed(reason) => Some(reason),
            SubmitStatus::Idle | SubmitStatus::Submitting => None,
        }
    }
}

/// Puts a form still marked `Submitting` back to `Idle` when dropped
struct PendingSubmit<'a> {
    form: &'a mut ContactForm,
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        if self.form.is_submitting() {
            debug!("Contact form submission cancelled");
            self.form.status = SubmitStatus::Idle;
        }
    }
}

/// French message for a field error
pub fn error_message(error: &FormFieldError) -> String {
    match error {
        FormFieldError::Missing(FormField::Name) => "Le nom est obligatoire.".to_string(),
        FormFieldError::Missing(FormField::Email) => "L'email est obligatoire.".to_string(),
        FormFieldError::Missing(FormField::Phone) => "Le téléphone est obligatoire.".to_string(),
        FormFieldError::Missing(FormField::Subject) => "Le sujet est obligatoire.".to_string(),
        FormFieldError::Missing(FormField::Message) => "Le message est obligatoire.".to_string(),
        FormFieldError::InvalidEmail => "L'adresse email n'est pas valide.".to_string(),
    }
}
