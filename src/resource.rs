//! Paths resolved relative to the running executable, plus the form date
//! stamp. The logo and the output directory both live next to the binary so
//! the tool behaves the same from wherever it is launched.

use std::path::PathBuf;

use chrono::Local;

/// Directory of the running executable, falling back to the current
/// directory when the executable path cannot be resolved.
pub fn base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Location of the university logo. Its absence is not an error; the header
/// is simply drawn without the image.
pub fn logo_path() -> PathBuf {
    base_dir().join("resources").join("au-logo.png")
}

/// Default directory generated PDFs are written to.
pub fn output_dir() -> PathBuf {
    base_dir().join("output")
}

/// Current date as stamped on both forms.
pub fn form_date() -> String {
    Local::now().format("%d/%m/%Y").to_string()
}
