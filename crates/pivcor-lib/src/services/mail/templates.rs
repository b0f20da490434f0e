// Mail Templates
// HTML bodies for lead and contact notifications sent to the agency inbox

use chrono::{DateTime, Utc};

use super::OutboundEmail;

/// Escape text for interpolation into HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Fields of a captured chatbot lead
pub struct LeadEmailFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub mobile: &'a str,
    pub service: &'a str,
}

/// Notification for a new chatbot lead
pub fn lead_email(
    from: &str,
    to: &str,
    lead: &LeadEmailFields<'_>,
    at: DateTime<Utc>,
) -> OutboundEmail {
    let mobile = if lead.mobile.is_empty() {
        "Not provided"
    } else {
        lead.mobile
    };

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #FF0000; border-bottom: 2px solid #FF0000; padding-bottom: 10px;">🚀 New Lead Generated</h2>
  <div style="background-color: #f5f5f5; padding: 20px; border-radius: 8px; margin-top: 20px;">
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Mobile:</strong> {mobile}</p>
    <p><strong>Service Interest:</strong> {service}</p>
    <p><strong>Timestamp:</strong> {timestamp}</p>
  </div>
  <p style="margin-top: 20px; color: #666; font-size: 12px;">This lead was generated from the PIVCOR website chatbot.</p>
</div>"#,
        name = escape_html(lead.name),
        email = escape_html(lead.email),
        mobile = escape_html(mobile),
        service = escape_html(lead.service),
        timestamp = format_timestamp(at),
    );

    OutboundEmail {
        from: from.to_string(),
        to: to.to_string(),
        subject: format!("New Lead: {} - {}", lead.name, lead.service),
        html,
        reply_to: None,
    }
}

/// Fields of a contact form submission
pub struct ContactEmailFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub company: Option<&'a str>,
    pub message: &'a str,
}

/// Notification for a contact form submission; replies go to the visitor
pub fn contact_email(
    from: &str,
    to: &str,
    contact: &ContactEmailFields<'_>,
    at: DateTime<Utc>,
) -> OutboundEmail {
    let company = contact
        .company
        .filter(|c| !c.trim().is_empty())
        .unwrap_or("Not provided");

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #FF0000; border-bottom: 2px solid #FF0000; padding-bottom: 10px;">📧 New Contact Form Submission</h2>
  <div style="background-color: #f5f5f5; padding: 20px; border-radius: 8px; margin-top: 20px;">
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Company:</strong> {company}</p>
    <p><strong>Timestamp:</strong> {timestamp}</p>
  </div>
  <div style="margin-top: 20px; padding: 15px; background-color: #ffffff; border-left: 4px solid #FF0000;">
    <h3 style="margin-top: 0; color: #333;">Message:</h3>
    <p style="color: #666; line-height: 1.6; white-space: pre-wrap;">{message}</p>
  </div>
  <p style="margin-top: 20px; color: #666; font-size: 12px;">This message was submitted through the PIVCOR website contact form.</p>
</div>"#,
        name = escape_html(contact.name),
        email = escape_html(contact.email),
        company = escape_html(company),
        message = escape_html(contact.message),
        timestamp = format_timestamp(at),
    );

    OutboundEmail {
        from: from.to_string(),
        to: to.to_string(),
        subject: format!("New Contact Form Submission from {}", contact.name),
        html,
        reply_to: Some(contact.email.to_string()),
    }
}
