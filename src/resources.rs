//! Resolution of bundled resource files (font, quote store).

use std::path::PathBuf;

/// Resolve `name` next to the running executable when it exists there,
/// otherwise fall back to the working directory. Mirrors how the bundled
/// font and quote files ship alongside the binary.
pub fn resource_path(name: &str) -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join(name);
            if candidate.exists() {
                return candidate;
            }
        }
    }
    PathBuf::from(name)
}

/// Default font file: a bundled SimHei face.
pub fn default_font_path() -> PathBuf {
    resource_path("simhei.ttf")
}

/// Default quote store location.
pub fn default_quotes_path() -> PathBuf {
    resource_path("quotes.json")
}

/// Default output image location.
pub fn default_output_path() -> PathBuf {
    PathBuf::from("output.jpg")
}
