//! Event-driven parser turning markup text back into a `Database`.
//!
//! The parser is forgiving exactly where forward compatibility needs it
//! to be: an unrecognized entry `type` becomes `EntryKind::Unknown` and
//! an unrecognized `field` id is stored opaquely, so a database written
//! by a newer producer survives a load → save cycle without data loss.
//! Everything else (wrong root tag, stray elements, stray text, broken
//! nesting) is a `Format` error carrying the element path and byte
//! offset.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::errors::{Result, StorePassError};
use crate::model::{Database, Entry, EntryKind};

use super::{DATA_VERSION, ROOT_TAG};

/// Parse markup text into a database.
pub fn parse(text: &str) -> Result<Database> {
    ParseState::new(text).run()
}

/// Property element currently being read inside an entry.
enum Prop {
    Name,
    Description,
    Updated,
    Notes,
    Field(String),
}

impl Prop {
    fn tag(&self) -> &str {
        match self {
            Prop::Name => "name",
            Prop::Description => "description",
            Prop::Updated => "updated",
            Prop::Notes => "notes",
            Prop::Field(_) => "field",
        }
    }
}

/// A partially parsed entry; becomes an `Entry` when its end tag closes.
struct EntryBuilder {
    kind: EntryKind,
    name: Option<String>,
    description: Option<String>,
    updated: Option<i64>,
    notes: Option<String>,
    fields: Vec<(String, String)>,
    children: Vec<Entry>,
}

impl EntryBuilder {
    fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            name: None,
            description: None,
            updated: None,
            notes: None,
            fields: Vec::new(),
            children: Vec::new(),
        }
    }

    fn build(self) -> Entry {
        let mut entry = Entry::new(self.kind, self.name.unwrap_or_default());
        entry.description = self.description;
        entry.updated = self.updated;
        entry.notes = self.notes;
        for (id, value) in self.fields {
            entry.set_field_unchecked(id, value);
        }
        *entry.children_mut() = self.children;
        entry
    }
}

struct ParseState<'a> {
    reader: Reader<&'a [u8]>,
    root_seen: bool,
    root_closed: bool,
    /// Open `entry` elements, outermost first.
    stack: Vec<EntryBuilder>,
    /// Completed top-level entries.
    top: Vec<Entry>,
    /// Property element currently open, with its accumulated text.
    prop: Option<Prop>,
    text: String,
}

impl<'a> ParseState<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            reader: Reader::from_str(text),
            root_seen: false,
            root_closed: false,
            stack: Vec::new(),
            top: Vec::new(),
            prop: None,
            text: String::new(),
        }
    }

    fn run(mut self) -> Result<Database> {
        loop {
            match self.reader.read_event() {
                Ok(Event::Decl(_)) | Ok(Event::Comment(_)) | Ok(Event::DocType(_)) => {}
                Ok(Event::PI(_)) => {}
                Ok(Event::Start(start)) => {
                    self.handle_start(&start)?;
                }
                Ok(Event::Empty(start)) => {
                    // A self-closing element behaves like an immediately
                    // closed one.
                    let name = start.name().as_ref().to_vec();
                    self.handle_start(&start)?;
                    self.handle_end(&name)?;
                }
                Ok(Event::Text(t)) => {
                    let unescaped = t
                        .unescape()
                        .map_err(|e| self.format_error(format!("bad character data: {e}")))?;
                    self.handle_text(&unescaped)?;
                }
                Ok(Event::CData(c)) => {
                    let raw = String::from_utf8_lossy(&c).into_owned();
                    self.handle_text(&raw)?;
                }
                Ok(Event::End(end)) => {
                    let name = end.name().as_ref().to_vec();
                    self.handle_end(&name)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(self.format_error(format!("malformed markup: {e}")));
                }
            }
        }

        if !self.root_seen {
            return Err(StorePassError::Format(format!(
                "missing root element <{ROOT_TAG}>"
            )));
        }
        if !self.root_closed || !self.stack.is_empty() || self.prop.is_some() {
            return Err(self.format_error("unclosed element at end of document".to_string()));
        }

        let mut db = Database::new();
        *db.entries_mut() = self.top;
        Ok(db)
    }

    fn handle_start(&mut self, start: &BytesStart<'_>) -> Result<()> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        if self.root_closed {
            return Err(self.format_error(format!("content after closed root: <{tag}>")));
        }
        if let Some(prop) = &self.prop {
            return Err(self.format_error(format!(
                "unexpected element <{tag}> inside <{}>",
                prop.tag()
            )));
        }

        if !self.root_seen {
            if tag != ROOT_TAG {
                return Err(StorePassError::Format(format!(
                    "invalid root element '{tag}', expected '{ROOT_TAG}'"
                )));
            }
            self.check_data_version(start)?;
            self.root_seen = true;
            return Ok(());
        }

        match tag.as_str() {
            "entry" => {
                let kind_attr = self.attribute(start, "type")?.ok_or_else(|| {
                    StorePassError::Format(format!(
                        "entry element without a type attribute{}",
                        self.path_context()
                    ))
                })?;
                self.stack
                    .push(EntryBuilder::new(EntryKind::from_type_attr(&kind_attr)));
            }
            "name" | "description" | "updated" | "notes" | "field" if self.stack.is_empty() => {
                return Err(
                    self.format_error(format!("property element <{tag}> outside of an entry"))
                );
            }
            "name" => self.open_prop(Prop::Name),
            "description" => self.open_prop(Prop::Description),
            "updated" => self.open_prop(Prop::Updated),
            "notes" => self.open_prop(Prop::Notes),
            "field" => {
                let id = self.attribute(start, "id")?.ok_or_else(|| {
                    StorePassError::Format(format!(
                        "field element without an id attribute{}",
                        self.path_context()
                    ))
                })?;
                self.open_prop(Prop::Field(id));
            }
            other => {
                return Err(self.format_error(format!("unrecognized element <{other}>")));
            }
        }
        Ok(())
    }

    fn handle_text(&mut self, text: &str) -> Result<()> {
        if self.prop.is_some() {
            self.text.push_str(text);
            return Ok(());
        }
        // Indentation between structural elements is meaningless.
        if text.trim().is_empty() {
            return Ok(());
        }
        Err(self.format_error(format!("unexpected text '{}'", text.trim())))
    }

    fn handle_end(&mut self, tag: &[u8]) -> Result<()> {
        if let Some(prop) = self.prop.take() {
            let value = std::mem::take(&mut self.text);
            let context = self.path_context();
            let entry = self
                .stack
                .last_mut()
                .expect("property elements only open inside an entry");
            match prop {
                Prop::Name => entry.name = Some(value),
                Prop::Description => entry.description = Some(value),
                Prop::Notes => entry.notes = Some(value),
                Prop::Updated => {
                    let seconds = value.trim().parse::<i64>().map_err(|_| {
                        StorePassError::Format(format!(
                            "invalid updated timestamp '{}'{context}",
                            value.trim()
                        ))
                    })?;
                    entry.updated = Some(seconds);
                }
                Prop::Field(id) => entry.fields.push((id, value)),
            }
            return Ok(());
        }

        match tag {
            b"entry" => {
                let builder = self
                    .stack
                    .pop()
                    .ok_or_else(|| self.format_error("unmatched </entry>".to_string()))?;
                let entry = builder.build();
                match self.stack.last_mut() {
                    Some(parent) => parent.children.push(entry),
                    None => self.top.push(entry),
                }
            }
            tag if tag == ROOT_TAG.as_bytes() => {
                self.root_closed = true;
            }
            other => {
                return Err(self.format_error(format!(
                    "unmatched end tag </{}>",
                    String::from_utf8_lossy(other)
                )));
            }
        }
        Ok(())
    }

    /// Reject documents declaring a newer data version than we speak.
    fn check_data_version(&mut self, start: &BytesStart<'_>) -> Result<()> {
        let Some(raw) = self.attribute(start, "dataversion")? else {
            // Absent in some historical producers; treated as current.
            return Ok(());
        };
        let version: u32 = raw.parse().map_err(|_| {
            StorePassError::Format(format!("invalid dataversion attribute '{raw}'"))
        })?;
        if version > DATA_VERSION {
            return Err(StorePassError::Version(format!(
                "markup dataversion {version}, only {DATA_VERSION} is supported"
            )));
        }
        Ok(())
    }

    fn open_prop(&mut self, prop: Prop) {
        self.prop = Some(prop);
        self.text.clear();
    }

    fn attribute(&self, start: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
        for attr in start.attributes() {
            let attr = attr.map_err(|e| {
                StorePassError::Format(format!("bad attribute: {e}{}", self.path_context()))
            })?;
            if attr.key.as_ref() == name.as_bytes() {
                let value = attr.unescape_value().map_err(|e| {
                    StorePassError::Format(format!("bad attribute value: {e}{}", self.path_context()))
                })?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    /// Element path of the entry being parsed, for error messages.
    fn path_context(&self) -> String {
        if self.stack.is_empty() {
            return String::new();
        }
        let path: Vec<&str> = self
            .stack
            .iter()
            .map(|b| b.name.as_deref().unwrap_or("?"))
            .collect();
        format!(" (in entry '{}')", path.join("/"))
    }

    fn format_error(&self, message: String) -> StorePassError {
        StorePassError::Format(format!(
            "{message} at byte {}{}",
            self.reader.buffer_position(),
            self.path_context()
        ))
    }
}
