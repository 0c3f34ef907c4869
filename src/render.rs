//! Live lookup XML rendering.
//!
//! The helpdesk expects a `<livelookup>` root carrying a fixed `version` and
//! `columns` attribute, with one `<customer>` per match:
//!
//! ```xml
//! <livelookup version="1.0" columns="first_name,last_name,email">
//!   <customer>
//!     <customer_id>5</customer_id>
//!     <first_name>Ada</first_name>
//!     <email>a@b.com</email>
//!   </customer>
//! </livelookup>
//! ```
//!
//! `columns` is a static display hint for the helpdesk and does not track
//! which fields were emitted; `phone` may appear without being listed.

use crate::errors::AppError;
use crate::models::DirectoryUser;
use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;

pub const ROOT_ELEMENT: &str = "livelookup";
pub const CUSTOMER_ELEMENT: &str = "customer";
pub const VERSION: &str = "1.0";
pub const COLUMNS: &str = "first_name,last_name,email";
pub const CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// The document returned whenever anything goes wrong.
pub const EMPTY_DOCUMENT: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
    "<livelookup version=\"1.0\" columns=\"first_name,last_name,email\"/>\n"
);

/// Renders `users` into a live lookup document.
pub fn render(users: &[DirectoryUser]) -> Result<String, AppError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| AppError::RenderError(e.to_string()))?;

    let root =
        BytesStart::new(ROOT_ELEMENT).with_attributes([("version", VERSION), ("columns", COLUMNS)]);

    if users.is_empty() {
        writer
            .write_event(Event::Empty(root))
            .map_err(|e| AppError::RenderError(e.to_string()))?;
    } else {
        writer
            .write_event(Event::Start(root))
            .map_err(|e| AppError::RenderError(e.to_string()))?;
        for user in users {
            write_customer(&mut writer, user)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))
            .map_err(|e| AppError::RenderError(e.to_string()))?;
    }

    let mut xml = String::from_utf8(writer.into_inner())
        .map_err(|e| AppError::RenderError(format!("non UTF-8 output: {}", e)))?;
    xml.push('\n');
    Ok(xml)
}

/// Renders `users`, falling back to [`EMPTY_DOCUMENT`] on failure.
pub fn render_or_empty(users: &[DirectoryUser]) -> String {
    match render(users) {
        Ok(xml) => xml,
        Err(e) => {
            tracing::error!("Failed to render {} customer(s): {}", users.len(), e);
            empty_document()
        }
    }
}

pub fn empty_document() -> String {
    EMPTY_DOCUMENT.to_string()
}

fn write_customer(writer: &mut Writer<Vec<u8>>, user: &DirectoryUser) -> Result<(), AppError> {
    writer
        .write_event(Event::Start(BytesStart::new(CUSTOMER_ELEMENT)))
        .map_err(|e| AppError::RenderError(e.to_string()))?;

    write_field(writer, "customer_id", user.id.as_deref().unwrap_or(""))?;

    let optional = [
        ("first_name", &user.first_name),
        ("last_name", &user.last_name),
        ("email", &user.email),
        ("phone", &user.phone),
    ];
    for (name, value) in optional {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            write_field(writer, name, value)?;
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(CUSTOMER_ELEMENT)))
        .map_err(|e| AppError::RenderError(e.to_string()))
}

fn write_field(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<(), AppError> {
    let value = strip_invalid_chars(value);
    let events = [
        Event::Start(BytesStart::new(name)),
        Event::Text(BytesText::new(&value)),
        Event::End(BytesEnd::new(name)),
    ];
    for event in events {
        writer
            .write_event(event)
            .map_err(|e| AppError::RenderError(e.to_string()))?;
    }
    Ok(())
}

/// Drops characters XML 1.0 forbids outright (C0 controls other than tab,
/// LF and CR, plus U+FFFE/U+FFFF). Escaping cannot represent these.
fn strip_invalid_chars(value: &str) -> Cow<'_, str> {
    if value.chars().all(is_xml_char) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.chars().filter(|c| is_xml_char(*c)).collect())
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// A rendered live lookup document, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveLookupXml(pub String);

impl LiveLookupXml {
    pub fn empty() -> Self {
        Self(empty_document())
    }
}

impl IntoResponse for LiveLookupXml {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, CONTENT_TYPE)], self.0).into_response()
    }
}
