// Contact form bridge - compose a mailto: URI and hand off to the mail client
//
// No validation and no network I/O of our own; whatever the fields hold is
// percent-encoded into the URI and the user's mail client takes it from
// there. The form clears after every submit.

use crate::content::Contact;

/// Field values of the contact form
#[derive(Debug, Default, Clone)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed body template: sender details, a blank line, then the
    /// message under its own label.
    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        )
    }

    /// Compose the `mailto:` URI for the page's recipient address, with
    /// the subject and body percent-encoded.
    pub fn mailto_uri(&self, recipient: &str) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            recipient,
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body())
        )
    }

    /// Submit: compose the URI, clear the form, and hand the URI back for
    /// the caller to launch.
    pub fn submit(&mut self, recipient: &str) -> String {
        let uri = self.mailto_uri(recipient);
        self.reset();
        uri
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.subject.clear();
        self.message.clear();
    }
}

/// Open a composed URI with the system handler. Failure is logged and
/// otherwise ignored; there is nothing to retry.
pub fn launch(uri: &str) {
    if let Err(err) = open::that(uri) {
        tracing::warn!("failed to open mail client: {err}");
    }
}

/// The recipient for the page's contact section, if one is configured
pub fn recipient(contact: Option<&Contact>) -> Option<&str> {
    contact.map(|c| c.email.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "A".to_string(),
            email: "b@c.com".to_string(),
            subject: "S".to_string(),
            message: "M".to_string(),
        }
    }

    #[test]
    fn test_body_template_field_order() {
        assert_eq!(form().body(), "Name: A\nEmail: b@c.com\n\nMessage:\nM");
    }

    #[test]
    fn test_mailto_uri_percent_encodes_subject_and_body() {
        let uri = form().mailto_uri("hire@example.com");
        assert_eq!(
            uri,
            "mailto:hire@example.com?subject=S&body=Name%3A%20A%0AEmail%3A%20b%40c.com%0A%0AMessage%3A%0AM"
        );
    }

    #[test]
    fn test_spaces_encode_as_percent_twenty() {
        let mut form = form();
        form.subject = "Project inquiry".to_string();
        let uri = form.mailto_uri("hire@example.com");
        assert!(uri.contains("subject=Project%20inquiry"));
        assert!(!uri.contains('+'));
    }

    #[test]
    fn test_submit_returns_uri_and_clears_fields() {
        let mut form = form();
        let uri = form.submit("hire@example.com");
        assert!(uri.starts_with("mailto:hire@example.com?"));
        assert!(form.name.is_empty());
        assert!(form.email.is_empty());
        assert!(form.subject.is_empty());
        assert!(form.message.is_empty());
    }

    #[test]
    fn test_empty_fields_still_compose() {
        let uri = ContactForm::new().mailto_uri("hire@example.com");
        assert_eq!(
            uri,
            "mailto:hire@example.com?subject=&body=Name%3A%20%0AEmail%3A%20%0A%0AMessage%3A%0A"
        );
    }
}
