//! Output file naming: descriptive names built from form fields, scrubbed of
//! characters Windows rejects, and made unique with a " (#N)" counter when a
//! file of the same name already exists.
//!
//! The exists-probe and the later write are not one atomic step; two
//! processes generating the same name at the same instant can still collide.
//! Accepted limitation.

use std::path::{Path, PathBuf};

use crate::form::{AcknowledgmentForm, TransferForm};

const INVALID_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replace filesystem-hostile characters with underscores.
pub fn sanitize(field: &str) -> String {
    field
        .chars()
        .map(|c| if INVALID_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

fn or_unknown(field: &str) -> &str {
    if field.is_empty() { "Unknown" } else { field }
}

/// `{emp id} - {name} - acknowledgement form {first item description}.pdf`
pub fn acknowledgment_filename(form: &AcknowledgmentForm) -> String {
    let emp_id = sanitize(or_unknown(&form.emp_id));
    let name = sanitize(or_unknown(&form.custodian_name));

    let asset_name = match form.items.first() {
        Some(item) if !item.description.is_empty() => {
            let description: String = item.description.chars().take(30).collect();
            sanitize(&description)
        }
        _ => "Asset".to_string(),
    };

    format!("{emp_id} - {name} - acknowledgement form {asset_name}.pdf")
}

/// `Asset Transfer - From {emp id}-{name} to {emp id}-{name}.pdf`
pub fn transfer_filename(form: &TransferForm) -> String {
    let from_emp_id = sanitize(or_unknown(&form.from_emp_id));
    let from_name = sanitize(or_unknown(&form.from_name));
    let to_emp_id = sanitize(or_unknown(&form.to_emp_id));
    let to_name = sanitize(or_unknown(&form.to_name));

    format!("Asset Transfer - From {from_emp_id}-{from_name} to {to_emp_id}-{to_name}.pdf")
}

/// First unused path for `filename` inside `dir`, counting up through
/// `name (#2).pdf`, `name (#3).pdf`, ...
pub fn unique_path(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let base = filename.strip_suffix(".pdf").unwrap_or(filename);
    let mut counter = 2u32;
    loop {
        let candidate = dir.join(format!("{base} (#{counter}).pdf"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
