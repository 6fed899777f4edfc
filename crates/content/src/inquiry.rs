//! Acquisition inquiries.
//!
//! An inquiry is validated, rendered into a [`Notification`] and handed to
//! an [`EmailRelay`]. Nothing is persisted: if the relay fails the inquiry
//! is lost unless the caller retries.

use serde::{Deserialize, Serialize};
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{error, info};

use crate::relay::{EmailRelay, Notification, RelayError};

/// Errors returned by [`submit_inquiry`].
#[derive(Debug, Error)]
pub enum InquiryError {
    /// A required field is missing or blank. Nothing was sent.
    #[error("missing required field: {field}")]
    Validation {
        /// The payload key of the offending field.
        field: &'static str,
    },

    /// The relay did not accept the message.
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// The HTML body could not be rendered. Nothing was sent.
    #[error("failed to render inquiry: {0}")]
    Template(#[from] tera::Error),
}

/// An inquiry as submitted by the contact form.
///
/// Every field is optional at this level so a missing key is reported as a
/// validation error naming the field rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InquiryPayload {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub message: Option<String>,
    pub artwork_title: Option<String>,
    pub artist_name: Option<String>,
}

/// A validated inquiry. Required fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inquiry {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: String,
    pub city: String,
    pub message: Option<String>,
    pub artwork_title: String,
    pub artist_name: String,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, InquiryError> {
    optional(value).ok_or(InquiryError::Validation { field })
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl InquiryPayload {
    /// Checks required fields in form order and reports the first missing one.
    pub fn validate(self) -> Result<Inquiry, InquiryError> {
        Ok(Inquiry {
            full_name: required(self.full_name, "fullName")?,
            email: required(self.email, "email")?,
            country: required(self.country, "country")?,
            city: required(self.city, "city")?,
            artwork_title: required(self.artwork_title, "artworkTitle")?,
            artist_name: required(self.artist_name, "artistName")?,
            phone: optional(self.phone),
            message: optional(self.message),
        })
    }
}

/// Addressing for inquiry notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquirySettings {
    /// Sender address.
    pub from: String,
    /// The fixed set of staff recipients.
    pub recipients: Vec<String>,
}

/// Returned when an inquiry was accepted by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InquiryReceipt {
    /// The relay's message id, if any.
    pub message_id: Option<String>,
}

impl Inquiry {
    fn rows(&self) -> Vec<(&'static str, &str)> {
        let mut rows = vec![
            ("Full name", self.full_name.as_str()),
            ("Email", self.email.as_str()),
        ];
        if let Some(phone) = &self.phone {
            rows.push(("Phone", phone.as_str()));
        }
        rows.push(("Country", self.country.as_str()));
        rows.push(("City", self.city.as_str()));
        rows.push(("Artwork", self.artwork_title.as_str()));
        rows.push(("Artist", self.artist_name.as_str()));
        rows
    }

    /// Subject line for the staff notification.
    pub fn subject(&self) -> String {
        format!(
            "Acquisition inquiry: {} by {}",
            self.artwork_title, self.artist_name
        )
    }

    /// Plain-text rendering. Absent optional fields are left out.
    pub fn render_text(&self) -> String {
        let mut text = String::from("New acquisition inquiry\n\n");
        for (label, value) in self.rows() {
            text.push_str(&format!("{}: {}\n", label, value));
        }
        if let Some(message) = &self.message {
            text.push_str(&format!("\nMessage:\n{}\n", message));
        }
        text
    }

    /// HTML rendering of the same fields, with user input escaped.
    pub fn render_html(&self) -> Result<String, InquiryError> {
        let mut templates = Tera::default();
        templates.add_raw_template(INQUIRY_HTML, INQUIRY_HTML_TEMPLATE)?;

        let mut context = Context::new();
        context.insert("full_name", &self.full_name);
        context.insert("email", &self.email);
        context.insert("phone", &self.phone);
        context.insert("country", &self.country);
        context.insert("city", &self.city);
        context.insert("artwork_title", &self.artwork_title);
        context.insert("artist_name", &self.artist_name);
        context.insert(
            "message",
            &self
                .message
                .as_deref()
                .map(|message| message.lines().collect::<Vec<_>>()),
        );

        Ok(templates.render(INQUIRY_HTML, &context)?)
    }

    /// Builds the notification sent to staff, replying to the submitter.
    pub fn to_notification(
        &self,
        settings: &InquirySettings,
    ) -> Result<Notification, InquiryError> {
        Ok(Notification {
            from: settings.from.clone(),
            to: settings.recipients.clone(),
            subject: self.subject(),
            text: self.render_text(),
            html: self.render_html()?,
            reply_to: self.email.clone(),
        })
    }
}

// The `.html` suffix turns on autoescaping.
const INQUIRY_HTML: &str = "inquiry.html";

const INQUIRY_HTML_TEMPLATE: &str = r#"<h2>New acquisition inquiry</h2>
<ul>
  <li><strong>Full name:</strong> {{ full_name }}</li>
  <li><strong>Email:</strong> {{ email }}</li>
{%- if phone %}
  <li><strong>Phone:</strong> {{ phone }}</li>
{%- endif %}
  <li><strong>Country:</strong> {{ country }}</li>
  <li><strong>City:</strong> {{ city }}</li>
  <li><strong>Artwork:</strong> {{ artwork_title }}</li>
  <li><strong>Artist:</strong> {{ artist_name }}</li>
</ul>
{%- if message %}
<p><strong>Message:</strong></p>
<p>{% for line in message %}{{ line }}{% if not loop.last %}<br>{% endif %}{% endfor %}</p>
{%- endif %}
"#;

/// Validates an inquiry and relays it to staff.
///
/// Validation happens before any side effect; a validation error guarantees
/// the relay was not called.
pub async fn submit_inquiry<R: EmailRelay + ?Sized>(
    relay: &R,
    settings: &InquirySettings,
    payload: InquiryPayload,
) -> Result<InquiryReceipt, InquiryError> {
    let inquiry = payload.validate()?;
    let notification = inquiry.to_notification(settings)?;

    match relay.send(&notification).await {
        Ok(delivery) => {
            info!(
                relay = relay.name(),
                artwork = %inquiry.artwork_title,
                "Inquiry relayed"
            );
            Ok(InquiryReceipt {
                message_id: delivery.id,
            })
        }
        Err(e) => {
            error!(relay = relay.name(), error = %e, "Failed to relay inquiry");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> InquiryPayload {
        InquiryPayload {
            full_name: Some("Ana Ruiz".to_string()),
            email: Some("ana@example.com".to_string()),
            phone: None,
            country: Some("Spain".to_string()),
            city: Some("Madrid".to_string()),
            message: None,
            artwork_title: Some("Dune".to_string()),
            artist_name: Some("Lina Ayoub".to_string()),
        }
    }

    #[test]
    fn test_blank_required_field_is_missing() {
        let payload = InquiryPayload {
            city: Some("   ".to_string()),
            ..complete()
        };
        assert!(matches!(
            payload.validate(),
            Err(InquiryError::Validation { field: "city" })
        ));
    }

    #[test]
    fn test_first_missing_field_in_form_order() {
        let payload = InquiryPayload {
            email: None,
            artist_name: None,
            ..complete()
        };
        assert!(matches!(
            payload.validate(),
            Err(InquiryError::Validation { field: "email" })
        ));
    }

    #[test]
    fn test_payload_decodes_camel_case_with_missing_keys() {
        let payload: InquiryPayload =
            serde_json::from_str(r#"{"fullName": "Ana", "artworkTitle": "Dune"}"#).unwrap();
        assert_eq!(payload.full_name.as_deref(), Some("Ana"));
        assert_eq!(payload.artwork_title.as_deref(), Some("Dune"));
        assert!(payload.email.is_none());
    }

    #[test]
    fn test_optional_fields_are_omitted_when_absent() {
        let inquiry = complete().validate().unwrap();
        let text = inquiry.render_text();
        let html = inquiry.render_html().unwrap();
        for rendered in [&text, &html] {
            assert!(!rendered.contains("Phone"));
            assert!(!rendered.contains("Message"));
            assert!(!rendered.contains("undefined"));
            assert!(!rendered.contains("None"));
        }
        assert!(text.contains("Artist: Lina Ayoub"));
    }

    #[test]
    fn test_optional_fields_are_rendered_when_present() {
        let inquiry = InquiryPayload {
            phone: Some("+34 600 000 000".to_string()),
            message: Some("Is it framed?\nThanks".to_string()),
            ..complete()
        }
        .validate()
        .unwrap();
        assert!(inquiry.render_text().contains("Phone: +34 600 000 000"));
        let html = inquiry.render_html().unwrap();
        assert!(html.contains("<li><strong>Phone:</strong> +34 600 000 000</li>"));
        assert!(html.contains("<p>Is it framed?<br>Thanks</p>"));
    }

    #[test]
    fn test_html_escapes_user_input() {
        let inquiry = InquiryPayload {
            full_name: Some("<script>alert('x')</script>".to_string()),
            ..complete()
        }
        .validate()
        .unwrap();
        let html = inquiry.render_html().unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#x27;x&#x27;)&lt;&#x2F;script&gt;"));
    }

    #[test]
    fn test_html_escapes_each_message_line() {
        let inquiry = InquiryPayload {
            message: Some("<b>Hello</b>\r\nFish & chips".to_string()),
            ..complete()
        }
        .validate()
        .unwrap();
        let html = inquiry.render_html().unwrap();
        assert!(html.contains("<p>&lt;b&gt;Hello&lt;&#x2F;b&gt;<br>Fish &amp; chips</p>"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_notification_addressing() {
        let settings = InquirySettings {
            from: "gallery@example.com".to_string(),
            recipients: vec!["a@example.com".to_string(), "b@example.com".to_string()],
        };
        let notification = complete()
            .validate()
            .unwrap()
            .to_notification(&settings)
            .unwrap();
        assert_eq!(notification.reply_to, "ana@example.com");
        assert_eq!(notification.to.len(), 2);
        assert_eq!(notification.subject, "Acquisition inquiry: Dune by Lina Ayoub");
    }
}
