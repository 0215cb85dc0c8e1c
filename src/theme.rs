//! Application palette.

pub const PRIMARY: &str = "#577399";
pub const PRIMARY_DARK: &str = "#495867";
pub const PRIMARY_LIGHT: &str = "#BDD5EA";
pub const CONTRAST_TEXT: &str = "#F7F7FF";
