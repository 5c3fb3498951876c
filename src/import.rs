//! Spreadsheet import. The first row of the first sheet is read as headers
//! and matched case-insensitively against known substrings; data rows are
//! stringified, trimmed, and reduced to the same records manual entry
//! produces. Fully-empty rows are skipped. Unmapped fields fall back to the
//! conventional column order.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};

use crate::error::FormError;
use crate::form::{Asset, Item};

pub fn read_items(path: &Path) -> Result<Vec<Item>, FormError> {
    let (headers, rows) = load_sheet(path)?;
    let columns = item_columns(&headers);
    Ok(rows
        .iter()
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .map(|row| row_to_item(row, &columns))
        .collect())
}

pub fn read_assets(path: &Path) -> Result<Vec<Asset>, FormError> {
    let (headers, rows) = load_sheet(path)?;
    let columns = asset_columns(&headers);
    Ok(rows
        .iter()
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .map(|row| row_to_asset(row, &columns))
        .collect())
}

fn load_sheet(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>), FormError> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| FormError::Import(format!("cannot open {}: {e}", path.display())))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FormError::Import("workbook has no sheets".into()))?
        .map_err(|e| FormError::Import(format!("cannot read sheet: {e}")))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>());

    let headers: Vec<String> = rows
        .next()
        .unwrap_or_default()
        .into_iter()
        .filter(|header| !header.is_empty())
        .collect();
    if headers.is_empty() {
        return Err(FormError::Import("no headers found in the sheet".into()));
    }

    Ok((headers, rows.collect()))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ItemColumns {
    store_code: Option<usize>,
    description: Option<usize>,
    qty: Option<usize>,
    purchase_date: Option<usize>,
}

fn item_columns(headers: &[String]) -> ItemColumns {
    let mut columns = ItemColumns::default();
    for (i, header) in headers.iter().enumerate() {
        let h = header.to_lowercase();
        if h.contains("store") || h.contains("code") {
            columns.store_code = Some(i);
        } else if h.contains("description") || h.contains("item") {
            columns.description = Some(i);
        } else if h.contains("qty") || h.contains("quantity") {
            columns.qty = Some(i);
        } else if h.contains("date") || h.contains("lpo") || h.contains("purchase") {
            columns.purchase_date = Some(i);
        }
    }
    columns
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct AssetColumns {
    store_code: Option<usize>,
    asset_name: Option<usize>,
    description: Option<usize>,
    old_asset_no: Option<usize>,
}

fn asset_columns(headers: &[String]) -> AssetColumns {
    let mut columns = AssetColumns::default();
    for (i, header) in headers.iter().enumerate() {
        let h = header.to_lowercase();
        if h.contains("store") || h.contains("code") {
            columns.store_code = Some(i);
        } else if h.contains("asset") && h.contains("name") {
            columns.asset_name = Some(i);
        } else if h.contains("description") || h.contains("desc") {
            columns.description = Some(i);
        } else if h.contains("old") || h.contains("asset no") {
            columns.old_asset_no = Some(i);
        }
    }
    columns
}

fn cell_at(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

fn row_to_item(row: &[String], columns: &ItemColumns) -> Item {
    Item {
        store_code: cell_at(row, columns.store_code.unwrap_or(0)),
        description: cell_at(row, columns.description.unwrap_or(1)),
        qty: cell_at(row, columns.qty.unwrap_or(2)),
        purchase_date: cell_at(row, columns.purchase_date.unwrap_or(3)),
    }
}

fn row_to_asset(row: &[String], columns: &AssetColumns) -> Asset {
    Asset {
        store_code: cell_at(row, columns.store_code.unwrap_or(0)),
        asset_name: cell_at(row, columns.asset_name.unwrap_or(1)),
        description: cell_at(row, columns.description.unwrap_or(2)),
        old_asset_no: cell_at(row, columns.old_asset_no.unwrap_or(3)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn item_headers_match_on_substrings_case_insensitively() {
        let columns = item_columns(&headers(&[
            "Store Code",
            "Item Description",
            "QTY",
            "Purchase Date/LPO",
        ]));
        assert_eq!(
            columns,
            ItemColumns {
                store_code: Some(0),
                description: Some(1),
                qty: Some(2),
                purchase_date: Some(3),
            }
        );
    }

    #[test]
    fn item_headers_in_any_order_are_found() {
        let columns = item_columns(&headers(&["Quantity", "LPO", "code", "items"]));
        assert_eq!(columns.qty, Some(0));
        assert_eq!(columns.purchase_date, Some(1));
        assert_eq!(columns.store_code, Some(2));
        assert_eq!(columns.description, Some(3));
    }

    #[test]
    fn unrecognized_headers_leave_columns_unmapped() {
        let columns = item_columns(&headers(&["Alpha", "Beta"]));
        assert_eq!(columns, ItemColumns::default());
    }

    #[test]
    fn asset_name_needs_both_words() {
        let columns = asset_columns(&headers(&["Asset Name", "Old Asset No.", "Desc"]));
        assert_eq!(columns.asset_name, Some(0));
        assert_eq!(columns.old_asset_no, Some(1));
        assert_eq!(columns.description, Some(2));
    }

    #[test]
    fn unmapped_fields_fall_back_to_positional_columns() {
        let row = vec![
            "SC-1".to_string(),
            "Laptop".to_string(),
            "2".to_string(),
            "2024-01-05".to_string(),
        ];
        let item = row_to_item(&row, &ItemColumns::default());
        assert_eq!(item.store_code, "SC-1");
        assert_eq!(item.description, "Laptop");
        assert_eq!(item.qty, "2");
        assert_eq!(item.purchase_date, "2024-01-05");
    }

    #[test]
    fn short_rows_yield_empty_fields() {
        let row = vec!["SC-1".to_string()];
        let item = row_to_item(&row, &ItemColumns::default());
        assert_eq!(item.store_code, "SC-1");
        assert_eq!(item.description, "");
        assert_eq!(item.purchase_date, "");
    }

    #[test]
    fn mapped_columns_override_positions() {
        let columns = item_columns(&headers(&["Description", "Store Code"]));
        let row = vec!["Laptop".to_string(), "SC-9".to_string()];
        let item = row_to_item(&row, &columns);
        assert_eq!(item.store_code, "SC-9");
        assert_eq!(item.description, "Laptop");
    }
}
