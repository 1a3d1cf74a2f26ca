use uuid::Uuid;

/// Create a UUID and return as a string
pub(crate) fn generate_uuid() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// Format a GUID using the lowercase hyphenated layout
pub(crate) fn format_guid(guid: &Uuid) -> String {
    guid.hyphenated().to_string()
}
