//! Reply envelope for the messaging platform
//!
//! Replies go back as a `TwiML` document holding one `<Message>`.

use axum::http::header;
use axum::response::{IntoResponse, Response};

const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// A single outbound message, rendered as `TwiML`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    body: String,
}

impl MessageResponse {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn render(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
            escape_xml(&self.body)
        )
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], self.render()).into_response()
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
