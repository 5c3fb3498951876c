//! Form records as consumed by the PDF generators. Manual TOML entry and
//! spreadsheet import both reduce to these shapes; the generators never see
//! where a record came from.

use std::path::Path;

use serde::Deserialize;

use crate::error::FormError;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Item {
    pub store_code: String,
    pub description: String,
    pub qty: String,
    pub purchase_date: String,
}

impl Item {
    pub fn is_empty(&self) -> bool {
        self.store_code.is_empty()
            && self.description.is_empty()
            && self.qty.is_empty()
            && self.purchase_date.is_empty()
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Asset {
    pub store_code: String,
    pub asset_name: String,
    pub description: String,
    pub old_asset_no: String,
}

impl Asset {
    pub fn is_empty(&self) -> bool {
        self.store_code.is_empty()
            && self.asset_name.is_empty()
            && self.description.is_empty()
            && self.old_asset_no.is_empty()
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AcknowledgmentForm {
    pub items: Vec<Item>,
    pub custodian_name: String,
    pub emp_id: String,
    pub department: String,
    /// One of "SZH", "J1", "J2", "Student Hub", "Hostel", "Others". Unknown
    /// values select no radio.
    pub building: String,
    pub building_other: String,
    /// One of "Ground", "1st", "2nd", "3rd", "Others".
    pub floor: String,
    pub floor_other: String,
    /// "Male" or "Female".
    pub section: String,
    /// "Office" or "Lab".
    pub device_type: String,
}

impl AcknowledgmentForm {
    pub fn from_toml_file(path: &Path) -> Result<Self, FormError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FormError::Config(format!("cannot read {}: {e}", path.display())))?;
        let mut form: AcknowledgmentForm = toml::from_str(&content)
            .map_err(|e| FormError::Config(format!("cannot parse {}: {e}", path.display())))?;
        form.normalize();
        Ok(form)
    }

    /// Trim every field and drop rows with no content, the same reduction the
    /// original applied when harvesting its entry widgets.
    pub fn normalize(&mut self) {
        for item in &mut self.items {
            trim_in_place(&mut item.store_code);
            trim_in_place(&mut item.description);
            trim_in_place(&mut item.qty);
            trim_in_place(&mut item.purchase_date);
        }
        self.items.retain(|item| !item.is_empty());
        trim_in_place(&mut self.custodian_name);
        trim_in_place(&mut self.emp_id);
        trim_in_place(&mut self.department);
        trim_in_place(&mut self.building);
        trim_in_place(&mut self.building_other);
        trim_in_place(&mut self.floor);
        trim_in_place(&mut self.floor_other);
        trim_in_place(&mut self.section);
        trim_in_place(&mut self.device_type);
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.items.is_empty() {
            return Err(FormError::NoRows);
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct TransferForm {
    pub assets: Vec<Asset>,
    pub from_name: String,
    pub from_department: String,
    pub from_emp_id: String,
    pub to_name: String,
    pub to_department: String,
    pub to_emp_id: String,
}

impl TransferForm {
    pub fn from_toml_file(path: &Path) -> Result<Self, FormError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FormError::Config(format!("cannot read {}: {e}", path.display())))?;
        let mut form: TransferForm = toml::from_str(&content)
            .map_err(|e| FormError::Config(format!("cannot parse {}: {e}", path.display())))?;
        form.normalize();
        Ok(form)
    }

    pub fn normalize(&mut self) {
        for asset in &mut self.assets {
            trim_in_place(&mut asset.store_code);
            trim_in_place(&mut asset.asset_name);
            trim_in_place(&mut asset.description);
            trim_in_place(&mut asset.old_asset_no);
        }
        self.assets.retain(|asset| !asset.is_empty());
        trim_in_place(&mut self.from_name);
        trim_in_place(&mut self.from_department);
        trim_in_place(&mut self.from_emp_id);
        trim_in_place(&mut self.to_name);
        trim_in_place(&mut self.to_department);
        trim_in_place(&mut self.to_emp_id);
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.assets.is_empty() {
            return Err(FormError::NoRows);
        }
        Ok(())
    }
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_defaults_missing_fields_to_empty() {
        let form: AcknowledgmentForm = toml::from_str(
            r#"
            custodian_name = "Sara Khan"

            [[items]]
            description = "Laptop"
            "#,
        )
        .unwrap();
        assert_eq!(form.custodian_name, "Sara Khan");
        assert_eq!(form.items.len(), 1);
        assert_eq!(form.items[0].description, "Laptop");
        assert_eq!(form.items[0].qty, "");
        assert_eq!(form.emp_id, "");
    }

    #[test]
    fn normalize_trims_and_drops_empty_rows() {
        let mut form = AcknowledgmentForm {
            items: vec![
                Item {
                    description: "  Monitor  ".into(),
                    ..Item::default()
                },
                Item::default(),
                Item {
                    qty: "   ".into(),
                    ..Item::default()
                },
            ],
            emp_id: " 1042 ".into(),
            ..AcknowledgmentForm::default()
        };
        form.normalize();
        assert_eq!(form.items.len(), 1);
        assert_eq!(form.items[0].description, "Monitor");
        assert_eq!(form.emp_id, "1042");
    }

    #[test]
    fn validate_rejects_empty_row_lists() {
        let form = TransferForm::default();
        assert!(matches!(form.validate(), Err(FormError::NoRows)));

        let form = TransferForm {
            assets: vec![Asset {
                asset_name: "Projector".into(),
                ..Asset::default()
            }],
            ..TransferForm::default()
        };
        assert!(form.validate().is_ok());
    }
}
