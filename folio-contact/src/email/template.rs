//! Email templates for Askama integration
//!
//! Templates live under `templates/emails/`. The HTML variant escapes every
//! interpolated value, so submitter input cannot inject markup into the
//! owner's inbox.

use askama::Template;

use super::EmailError;

/// Trait for email templates
///
/// Returns a tuple of `(html, text)` where either can be `None`.
pub trait EmailTemplate {
    /// Render the email template
    ///
    /// # Errors
    ///
    /// Returns `EmailError::TemplateError` if the template fails to render
    fn render_email(&self) -> Result<(Option<String>, Option<String>), EmailError>;
}

/// Notification sent to the site owner for one contact submission
#[derive(Debug, Clone, Template)]
#[template(path = "emails/contact.html")]
pub struct ContactEmail {
    /// Submitter's name
    pub name: String,
    /// Submitter's email address
    pub email: String,
    /// Message body
    pub message: String,
    /// Site name shown in the heading and footer
    pub site_name: String,
}

#[derive(Template)]
#[template(path = "emails/contact.txt")]
struct ContactEmailText<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    site_name: &'a str,
}

impl EmailTemplate for ContactEmail {
    fn render_email(&self) -> Result<(Option<String>, Option<String>), EmailError> {
        let html = self.render()?;
        let text = ContactEmailText {
            name: &self.name,
            email: &self.email,
            message: &self.message,
            site_name: &self.site_name,
        }
        .render()?;
        Ok((Some(html), Some(text)))
    }
}
