/// Field used to resolve a bare identity value when no other field is configured.
pub const DEFAULT_IDENTITY_FIELD: &str = "id";
/// Separator between the segments of an embedded field path.
pub const DEFAULT_FIELD_SEPARATOR: &str = ".";

/// Direction keyword selecting descending order in a `{field: direction}` sort specification.
pub const SORT_DESC: &str = "DESC";
/// Direction keyword selecting ascending order in a `{field: direction}` sort specification.
pub const SORT_ASC: &str = "ASC";
