pub const IMAGE_ROOT: &str = "/static/images";
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.svg";

/// File extensions a player photo may be stored under, preferred first.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "svg"];

/// Filesystem-safe identifier for a player's photo.
///
/// Lowercases the name and collapses every run of characters outside
/// `[a-z0-9]` into a single `_`. Separators at either end are dropped, so
/// `"R Ashwin (C)"` becomes `r_ashwin_c`.
pub fn image_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_separator && !id.is_empty() {
                id.push('_');
            }
            pending_separator = false;
            id.push(ch);
        } else {
            pending_separator = true;
        }
    }

    id
}

pub fn image_file_name(name: &str, extension: &str) -> String {
    format!("{}.{extension}", image_id(name))
}

pub fn image_src(name: &str) -> String {
    format!("{IMAGE_ROOT}/{}", image_file_name(name, IMAGE_EXTENSIONS[0]))
}

/// Whether a failed image should fall back to the placeholder. `src` may be
/// the absolute URL the browser resolved, so only the suffix is compared.
pub fn needs_placeholder(src: &str) -> bool {
    !src.ends_with(PLACEHOLDER_IMAGE)
}
