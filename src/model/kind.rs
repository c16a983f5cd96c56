//! Entry kinds and their field schemas.
//!
//! Each kind corresponds to one value of the `type` attribute in the
//! Revelation XML format and defines the set of `field` ids that are
//! valid for entries of that kind.  Kinds produced by a newer tool are
//! carried as `Unknown` so a foreign database can be re-saved without
//! losing data.

/// The semantic type of an entry, as stored in the `type` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A container with no fields of its own.
    Folder,
    Generic,
    CreditCard,
    CryptoKey,
    Database,
    Door,
    Email,
    Ftp,
    Phone,
    RemoteDesktop,
    Shell,
    Vnc,
    Website,
    /// A kind this implementation does not understand, preserved verbatim.
    Unknown(String),
}

impl EntryKind {
    /// The value of the `type` attribute for this kind.
    pub fn type_attr(&self) -> &str {
        match self {
            EntryKind::Folder => "folder",
            EntryKind::Generic => "generic",
            EntryKind::CreditCard => "creditcard",
            EntryKind::CryptoKey => "cryptokey",
            EntryKind::Database => "database",
            EntryKind::Door => "door",
            EntryKind::Email => "email",
            EntryKind::Ftp => "ftp",
            EntryKind::Phone => "phone",
            EntryKind::RemoteDesktop => "remotedesktop",
            EntryKind::Shell => "shell",
            EntryKind::Vnc => "vnc",
            EntryKind::Website => "website",
            EntryKind::Unknown(raw) => raw,
        }
    }

    /// Map a `type` attribute value to a kind.  Unrecognized values
    /// become `Unknown` rather than an error (forward compatibility).
    pub fn from_type_attr(attr: &str) -> EntryKind {
        match attr {
            "folder" => EntryKind::Folder,
            "generic" => EntryKind::Generic,
            "creditcard" => EntryKind::CreditCard,
            "cryptokey" => EntryKind::CryptoKey,
            "database" => EntryKind::Database,
            "door" => EntryKind::Door,
            "email" => EntryKind::Email,
            "ftp" => EntryKind::Ftp,
            "phone" => EntryKind::Phone,
            "remotedesktop" => EntryKind::RemoteDesktop,
            "shell" => EntryKind::Shell,
            "vnc" => EntryKind::Vnc,
            "website" => EntryKind::Website,
            other => EntryKind::Unknown(other.to_string()),
        }
    }

    /// Field ids valid for this kind, in canonical display order.
    ///
    /// `Unknown` returns an empty slice; field validation treats unknown
    /// kinds specially (any id is accepted, see `Entry::set_field`).
    pub fn field_ids(&self) -> &'static [&'static str] {
        match self {
            EntryKind::Folder | EntryKind::Unknown(_) => &[],
            EntryKind::Generic => &["generic-hostname", "generic-username", "generic-password"],
            EntryKind::CreditCard => &[
                "creditcard-cardtype",
                "creditcard-cardnumber",
                "creditcard-expirydate",
                "creditcard-ccv",
                "generic-pin",
            ],
            EntryKind::CryptoKey => &[
                "generic-hostname",
                "generic-certificate",
                "generic-keyfile",
                "generic-password",
            ],
            EntryKind::Database => &[
                "generic-hostname",
                "generic-username",
                "generic-password",
                "generic-database",
            ],
            EntryKind::Door => &["generic-location", "generic-code"],
            EntryKind::Email => &[
                "generic-email",
                "generic-hostname",
                "generic-username",
                "generic-password",
            ],
            EntryKind::Ftp | EntryKind::RemoteDesktop | EntryKind::Vnc => &[
                "generic-hostname",
                "generic-port",
                "generic-username",
                "generic-password",
            ],
            EntryKind::Phone => &["phone-phonenumber", "generic-pin"],
            EntryKind::Shell => &[
                "generic-hostname",
                "generic-domain",
                "generic-username",
                "generic-password",
            ],
            EntryKind::Website => &[
                "generic-url",
                "generic-username",
                "generic-email",
                "generic-password",
            ],
        }
    }

    /// Whether `field_id` is valid for this kind.
    pub fn accepts_field(&self, field_id: &str) -> bool {
        match self {
            // The schema of an unknown kind is unknowable; accept anything
            // so loaded foreign entries are not read-only.
            EntryKind::Unknown(_) => true,
            _ => self.field_ids().contains(&field_id),
        }
    }

    /// Human-readable name for display in the CLI.
    pub fn display_name(&self) -> &str {
        match self {
            EntryKind::Folder => "Folder",
            EntryKind::Generic => "Generic",
            EntryKind::CreditCard => "Credit card",
            EntryKind::CryptoKey => "Crypto key",
            EntryKind::Database => "Database",
            EntryKind::Door => "Door",
            EntryKind::Email => "Email",
            EntryKind::Ftp => "FTP",
            EntryKind::Phone => "Phone",
            EntryKind::RemoteDesktop => "Remote desktop",
            EntryKind::Shell => "Shell",
            EntryKind::Vnc => "VNC",
            EntryKind::Website => "Website",
            EntryKind::Unknown(raw) => raw,
        }
    }

    /// All kinds with a known schema, for CLI help output.
    pub fn known_kinds() -> &'static [&'static str] {
        &[
            "folder",
            "generic",
            "creditcard",
            "cryptokey",
            "database",
            "door",
            "email",
            "ftp",
            "phone",
            "remotedesktop",
            "shell",
            "vnc",
            "website",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_attr_roundtrip_for_known_kinds() {
        for name in EntryKind::known_kinds() {
            let kind = EntryKind::from_type_attr(name);
            assert!(!matches!(kind, EntryKind::Unknown(_)), "{name}");
            assert_eq!(kind.type_attr(), *name);
        }
    }

    #[test]
    fn unknown_kind_preserves_raw_attr() {
        let kind = EntryKind::from_type_attr("fingerprint");
        assert_eq!(kind, EntryKind::Unknown("fingerprint".to_string()));
        assert_eq!(kind.type_attr(), "fingerprint");
    }

    #[test]
    fn folder_has_no_fields() {
        assert!(EntryKind::Folder.field_ids().is_empty());
        assert!(!EntryKind::Folder.accepts_field("generic-password"));
    }

    #[test]
    fn generic_accepts_its_schema_only() {
        assert!(EntryKind::Generic.accepts_field("generic-password"));
        assert!(!EntryKind::Generic.accepts_field("creditcard-cardnumber"));
    }

    #[test]
    fn unknown_kind_accepts_any_field() {
        let kind = EntryKind::Unknown("fingerprint".to_string());
        assert!(kind.accepts_field("fingerprint-hand"));
    }
}
