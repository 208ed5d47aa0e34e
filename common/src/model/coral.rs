/// Shown when a record has no readable description file.
pub const DEFAULT_DESCRIPTION: &str = "No description available till now.";

/// Shown when a record has no readable availability file.
pub const DEFAULT_AVAILABILITY: &str = "Unknown";

/// A single catalog entry, rebuilt from its directory on every read.
///
/// The `id` is the directory name and doubles as the URL segment of the detail page.
/// Nothing here is stored as a unit: each field comes from a separate file (or from the
/// directory name itself).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoralRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub availability: String,
    /// Public paths of the record's `.jpg` files, in listing order.
    pub images: Vec<String>,
}

impl CoralRecord {
    /// Builds a record, falling back to the documented defaults for missing text.
    pub fn new(
        id: &str,
        description: Option<String>,
        availability: Option<String>,
        images: Vec<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: display_name(id),
            description: description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            availability: availability
                .map(|a| a.trim().to_string())
                .unwrap_or_else(|| DEFAULT_AVAILABILITY.to_string()),
            images,
        }
    }
}

/// Turns `brain-coral` into `brain coral`.
pub fn display_name(id: &str) -> String {
    id.replace('-', " ")
}

/// Whether a file in a record directory should be listed as a photo.
pub fn is_listed_image(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(".jpg")
}
