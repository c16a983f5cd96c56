//! Canonical XML serialization of a database.
//!
//! Canonical form: XML declaration, tab indentation, and per entry the
//! property order `name`, `description`, `updated`, `notes`, then
//! `field` elements in stored order, then child entries.  `name` is
//! always emitted; every other property is emitted only when present,
//! so an absent value never becomes an empty element.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::errors::{Result, StorePassError};
use crate::model::{Database, Entry};

use super::{DATA_VERSION, ROOT_TAG};

/// Serialize a database into its canonical markup text.
pub fn serialize(db: &Database) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);

    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;

    let mut root = BytesStart::new(ROOT_TAG);
    root.push_attribute(("dataversion", DATA_VERSION.to_string().as_str()));
    write_event(&mut writer, Event::Start(root))?;

    for entry in db.entries() {
        write_entry(&mut writer, entry)?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new(ROOT_TAG)))?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| StorePassError::Format(format!("serialized markup is not UTF-8: {e}")))
}

fn write_entry<W: Write>(writer: &mut Writer<W>, entry: &Entry) -> Result<()> {
    let mut start = BytesStart::new("entry");
    start.push_attribute(("type", entry.kind.type_attr()));
    write_event(writer, Event::Start(start))?;

    write_text_element(writer, "name", &entry.name)?;
    if let Some(description) = &entry.description {
        write_text_element(writer, "description", description)?;
    }
    if let Some(updated) = entry.updated {
        write_text_element(writer, "updated", &updated.to_string())?;
    }
    if let Some(notes) = &entry.notes {
        write_text_element(writer, "notes", notes)?;
    }

    for field in entry.fields() {
        let mut start = BytesStart::new("field");
        start.push_attribute(("id", field.id.as_str()));
        write_event(writer, Event::Start(start))?;
        write_event(writer, Event::Text(BytesText::new(&field.value)))?;
        write_event(writer, Event::End(BytesEnd::new("field")))?;
    }

    for child in entry.children() {
        write_entry(writer, child)?;
    }

    write_event(writer, Event::End(BytesEnd::new("entry")))
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    write_event(writer, Event::Start(BytesStart::new(tag)))?;
    write_event(writer, Event::Text(BytesText::new(text)))?;
    write_event(writer, Event::End(BytesEnd::new(tag)))
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| StorePassError::Format(format!("markup write failed: {e}")))
}
