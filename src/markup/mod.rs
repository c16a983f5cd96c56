//! Markup mapping between the entry model and the Revelation XML
//! document.
//!
//! This module provides:
//! - `parse` — XML text → `Database` (`reader`)
//! - `serialize` — `Database` → canonical XML text (`writer`)
//!
//! The document schema:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <revelationdata dataversion="1">
//!     <entry type="folder">
//!         <name>Work</name>
//!         <updated>1546300800</updated>
//!         <entry type="generic">
//!             <name>Mail</name>
//!             <field id="generic-username">alice</field>
//!         </entry>
//!     </entry>
//! </revelationdata>
//! ```
//!
//! Round-trip law: `parse(serialize(d)) == d` for every representable
//! database, including child order and the empty-vs-absent distinction
//! on properties and fields.  Unknown entry kinds and unknown field ids
//! are preserved rather than dropped.

pub mod reader;
pub mod writer;

pub use reader::parse;
pub use writer::serialize;

/// The `dataversion` this implementation reads and writes.  A document
/// declaring a higher version is rejected with `Version`.
pub const DATA_VERSION: u32 = 1;

/// The required root element tag.
pub const ROOT_TAG: &str = "revelationdata";
