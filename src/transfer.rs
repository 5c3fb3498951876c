//! Asset Transfer Form (ATF) generator. Same shape as the acknowledgment
//! generator, with its own coordinates, ellipsis-truncated party fields, and
//! a table that never paginates mid-flow.

use std::path::{Path, PathBuf};

use log::info;

use crate::canvas::{A4_HEIGHT, A4_WIDTH, BLACK, BLUE, Canvas, GRAY, INCH};
use crate::error::FormError;
use crate::form::{Asset, TransferForm};
use crate::metrics::Font;
use crate::signature::{self, SignatureField};
use crate::{canvas, naming, resource, text};

const DECLARATION_LINES: [&str; 4] = [
    "This device is a property of AU and to be returned back to AU store after usage, this device can't",
    "be shifted to any other user without a written approval from the stores.",
    "I confirm that this device will be used for work purpose only.",
    "I also understand that I will be responsible for any misuse or damages that may occur.",
];

const TABLE_HEADERS: [&str; 5] = [
    "No.",
    "Store Code",
    "Asset Name",
    "Description",
    "Old Asset No.",
];
const COL_WIDTHS: [f32; 5] = [
    0.35 * INCH,
    1.0 * INCH,
    1.3 * INCH,
    2.3 * INCH,
    1.15 * INCH,
];
const ROW_HEIGHT: f32 = 0.3 * INCH;
const HEADER_HEIGHT: f32 = 0.35 * INCH;

pub struct TransferPdf {
    width: f32,
    height: f32,
    margin: f32,
    sig_rect: Option<(f32, f32, f32, f32)>,
}

impl TransferPdf {
    pub fn new() -> TransferPdf {
        TransferPdf {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margin: 0.75 * INCH,
            sig_rect: None,
        }
    }

    /// Render `form` into the output directory and return the written path.
    pub fn generate(mut self, form: &TransferForm, output_dir: &Path) -> Result<PathBuf, FormError> {
        form.validate()?;
        std::fs::create_dir_all(output_dir)?;
        let path = naming::unique_path(output_dir, &naming::transfer_filename(form));

        let mut c = Canvas::new();
        self.draw_form(&mut c, form)?;
        let mut doc = c.finish()?;
        if let Some(rect) = self.sig_rect {
            signature::append_signature_field(
                &mut doc,
                &SignatureField {
                    rect,
                    field_name: "Signature",
                },
            )?;
        }
        canvas::save_document(&mut doc, &path)?;
        info!("asset transfer form written to {}", path.display());
        Ok(path)
    }

    fn draw_form(&mut self, c: &mut Canvas, form: &TransferForm) -> Result<(), FormError> {
        let mut y = self.height - self.margin;

        y = self.draw_header(c, y);
        y = self.draw_date(c, y);
        y = self.draw_party_section(
            c,
            y,
            "Transferred from:",
            1.2 * INCH,
            &form.from_name,
            &form.from_department,
            &form.from_emp_id,
        );
        y = self.draw_assets_table(c, y, &form.assets);
        y = self.draw_party_section(
            c,
            y,
            "Transferred to:",
            1.1 * INCH,
            &form.to_name,
            &form.to_department,
            &form.to_emp_id,
        );
        y = self.draw_declaration(c, y);
        self.draw_signature(c, y)
    }

    fn draw_header(&self, c: &mut Canvas, mut y: f32) -> f32 {
        let logo_height = 0.9 * INCH;
        let logo_width = 2.8 * INCH;
        c.draw_logo(
            (self.width - logo_width) / 2.0,
            y - logo_height,
            logo_width,
            logo_height,
        );

        y -= 1.1 * INCH;
        c.draw_text_centered(
            self.width / 2.0,
            y,
            "Main Store",
            Font::HelveticaBold,
            16.0,
            BLACK,
        );

        y -= 0.5 * INCH;
        c.draw_text_centered(self.width / 2.0, y, "ATF", Font::HelveticaBold, 18.0, BLUE);
        c.draw_line(
            self.width / 2.0 - 0.3 * INCH,
            y - 0.05 * INCH,
            self.width / 2.0 + 0.3 * INCH,
            y - 0.05 * INCH,
            1.0,
            BLUE,
        );

        y -= 0.3 * INCH;
        c.draw_text_centered(
            self.width / 2.0,
            y,
            "(Asset Transfer Form)",
            Font::Helvetica,
            12.0,
            BLACK,
        );
        // The subtitle underline is blue on the printed form as well.
        c.draw_line(
            self.width / 2.0 - 1.0 * INCH,
            y - 0.05 * INCH,
            self.width / 2.0 + 1.0 * INCH,
            y - 0.05 * INCH,
            1.0,
            BLUE,
        );

        y - 0.5 * INCH
    }

    fn draw_date(&self, c: &mut Canvas, y: f32) -> f32 {
        let date = resource::form_date();
        c.draw_text(
            self.width - 2.5 * INCH,
            y + 1.2 * INCH,
            "Date :",
            Font::Helvetica,
            11.0,
            BLACK,
        );
        c.draw_rect(
            self.width - 2.0 * INCH,
            y + 1.05 * INCH,
            1.3 * INCH,
            0.3 * INCH,
            1.0,
            BLACK,
        );
        c.draw_text(
            self.width - 1.9 * INCH,
            y + 1.15 * INCH,
            &date,
            Font::Helvetica,
            11.0,
            BLACK,
        );
        y
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_party_section(
        &self,
        c: &mut Canvas,
        mut y: f32,
        title: &str,
        title_underline: f32,
        name: &str,
        department: &str,
        emp_id: &str,
    ) -> f32 {
        c.draw_text(self.margin, y, title, Font::HelveticaBold, 10.0, BLACK);
        c.draw_line(
            self.margin,
            y - 0.05 * INCH,
            self.margin + title_underline,
            y - 0.05 * INCH,
            1.0,
            BLACK,
        );

        y -= 0.32 * INCH;
        c.draw_text(
            self.margin,
            y,
            "Custodian Name:",
            Font::Helvetica,
            10.0,
            BLACK,
        );
        let name_x = self.margin + 1.35 * INCH;
        let name_width = 3.5 * INCH;
        c.draw_line(
            name_x,
            y - 0.05 * INCH,
            name_x + name_width,
            y - 0.05 * INCH,
            1.0,
            BLACK,
        );
        let name_text =
            text::truncate_ellipsis(name, Font::Helvetica, 10.0, name_width - 0.1 * INCH);
        c.draw_text(
            name_x + 0.05 * INCH,
            y,
            &name_text,
            Font::Helvetica,
            10.0,
            BLACK,
        );

        y -= 0.35 * INCH;
        c.draw_text(self.margin, y, "Department:", Font::Helvetica, 10.0, BLACK);
        let dept_x = self.margin + 1.0 * INCH;
        let dept_width = 2.3 * INCH;
        c.draw_line(
            dept_x,
            y - 0.05 * INCH,
            dept_x + dept_width,
            y - 0.05 * INCH,
            1.0,
            BLACK,
        );
        let dept_text =
            text::truncate_ellipsis(department, Font::Helvetica, 10.0, dept_width - 0.1 * INCH);
        c.draw_text(
            dept_x + 0.05 * INCH,
            y,
            &dept_text,
            Font::Helvetica,
            10.0,
            BLACK,
        );

        let emp_label_x = 4.2 * INCH;
        c.draw_text(emp_label_x, y, "Emp. ID:", Font::Helvetica, 10.0, BLACK);
        let emp_x = emp_label_x + 0.65 * INCH;
        let emp_width = 1.0 * INCH;
        c.draw_rect(emp_x, y - 0.08 * INCH, emp_width, 0.28 * INCH, 1.0, BLACK);
        let emp_text =
            text::truncate_ellipsis(emp_id, Font::Helvetica, 10.0, emp_width - 0.1 * INCH);
        c.draw_text(
            emp_x + 0.05 * INCH,
            y,
            &emp_text,
            Font::Helvetica,
            10.0,
            BLACK,
        );

        y - 0.4 * INCH
    }

    fn draw_assets_table(&self, c: &mut Canvas, mut y: f32, assets: &[Asset]) -> f32 {
        let table_width: f32 = COL_WIDTHS.iter().sum();
        let x_start = (self.width - table_width) / 2.0;

        let mut x = x_start;
        for (header, &width) in TABLE_HEADERS.iter().zip(COL_WIDTHS.iter()) {
            c.draw_rect(x, y - HEADER_HEIGHT, width, HEADER_HEIGHT, 1.0, BLACK);
            c.draw_text_centered(
                x + width / 2.0,
                y - 0.22 * INCH,
                header,
                Font::HelveticaBold,
                9.0,
                BLACK,
            );
            x += width;
        }
        y -= HEADER_HEIGHT;

        // One empty bordered row when there is nothing to list.
        let num_rows = assets.len().max(1);

        for row_num in 0..num_rows {
            let mut x = x_start;
            for (col, &width) in COL_WIDTHS.iter().enumerate() {
                c.draw_rect(x, y - ROW_HEIGHT, width, ROW_HEIGHT, 1.0, BLACK);

                if row_num < assets.len() {
                    let asset = &assets[row_num];
                    let value = match col {
                        0 => (row_num + 1).to_string(),
                        1 => asset.store_code.clone(),
                        2 => asset.asset_name.clone(),
                        3 => asset.description.clone(),
                        _ => asset.old_asset_no.clone(),
                    };

                    if col == 0 {
                        c.draw_text_centered(
                            x + width / 2.0,
                            y - 0.19 * INCH,
                            &value,
                            Font::Helvetica,
                            9.0,
                            BLACK,
                        );
                    } else {
                        c.draw_text(
                            x + 0.04 * INCH,
                            y - 0.19 * INCH,
                            &text::clip_cell(&value, width),
                            Font::Helvetica,
                            9.0,
                            BLACK,
                        );
                    }
                }
                x += width;
            }
            y -= ROW_HEIGHT;
        }

        y - 0.3 * INCH
    }

    fn draw_declaration(&self, c: &mut Canvas, mut y: f32) -> f32 {
        c.draw_text(
            self.margin,
            y,
            "Declaration:",
            Font::HelveticaBold,
            10.0,
            BLACK,
        );
        c.draw_line(
            self.margin,
            y - 0.05 * INCH,
            self.margin + 0.9 * INCH,
            y - 0.05 * INCH,
            1.0,
            BLACK,
        );

        y -= 0.25 * INCH;
        for line in DECLARATION_LINES {
            c.draw_text(self.margin, y, line, Font::Helvetica, 9.0, BLACK);
            y -= 0.16 * INCH;
        }

        y - 0.2 * INCH
    }

    fn draw_signature(&mut self, c: &mut Canvas, mut y: f32) -> Result<(), FormError> {
        if y < 1.5 * INCH {
            c.show_page()?;
            y = self.height - self.margin;
        }

        c.draw_text(
            self.margin,
            y,
            "Signature :",
            Font::HelveticaBold,
            10.0,
            BLACK,
        );

        y -= 0.12 * INCH;
        let box_width = 2.2 * INCH;
        let box_height = 0.9 * INCH;
        let rect = (self.margin, y - box_height, self.margin + box_width, y);
        self.sig_rect = Some(rect);

        c.draw_rect(rect.0, rect.1, box_width, box_height, 0.5, BLACK);
        c.draw_text(
            self.margin,
            rect.1 - 0.12 * INCH,
            "Click here to sign in Adobe Acrobat",
            Font::HelveticaOblique,
            8.0,
            GRAY,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Document, Object};

    fn sample_form() -> TransferForm {
        TransferForm {
            assets: vec![
                Asset {
                    store_code: "SC-77".into(),
                    asset_name: "Projector".into(),
                    description: "Epson EB-2250U".into(),
                    old_asset_no: "A-1001".into(),
                },
                Asset {
                    store_code: "SC-78".into(),
                    asset_name: "Screen".into(),
                    description: "Motorized projection screen".into(),
                    old_asset_no: "A-1002".into(),
                },
            ],
            from_name: "Sara Khan".into(),
            from_department: "IT".into(),
            from_emp_id: "1042".into(),
            to_name: "Omar Hadid".into(),
            to_department: "Facilities".into(),
            to_emp_id: "2200".into(),
        }
    }

    #[test]
    fn generates_a_single_page_pdf_with_the_expected_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = TransferPdf::new().generate(&sample_form(), dir.path()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Asset Transfer - From 1042-Sara Khan to 2200-Omar Hadid.pdf"
        );

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn missing_source_party_becomes_unknown_in_the_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut form = sample_form();
        form.from_name = String::new();
        form.from_emp_id = String::new();

        let path = TransferPdf::new().generate(&form, dir.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Asset Transfer - From Unknown-Unknown to 2200-Omar Hadid.pdf"
        );
    }

    #[test]
    fn identical_submissions_get_a_counter_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let form = sample_form();

        let first = TransferPdf::new().generate(&form, dir.path()).unwrap();
        let second = TransferPdf::new().generate(&form, dir.path()).unwrap();
        let third = TransferPdf::new().generate(&form, dir.path()).unwrap();

        assert!(first.exists());
        assert!(
            second
                .file_name()
                .unwrap()
                .to_str()
                .unwrap()
                .ends_with(" (#2).pdf")
        );
        assert!(
            third
                .file_name()
                .unwrap()
                .to_str()
                .unwrap()
                .ends_with(" (#3).pdf")
        );
    }

    #[test]
    fn overlong_party_fields_do_not_widen_the_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut form = sample_form();
        form.from_name = "An improbably long custodian name that must be ellipsis-truncated \
            to stay inside its underline"
            .into();
        form.from_department = "Department of Extremely Verbose Administrative Naming".into();

        let path = TransferPdf::new().generate(&form, dir.path()).unwrap();
        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn signature_field_is_named_signature() {
        let dir = tempfile::tempdir().unwrap();
        let path = TransferPdf::new().generate(&sample_form(), dir.path()).unwrap();

        let doc = Document::load(&path).unwrap();
        let pages = doc.get_pages();
        let (_, &last_page) = pages.iter().next_back().unwrap();

        let annots = doc
            .get_object(last_page)
            .unwrap()
            .as_dict()
            .unwrap()
            .get(b"Annots")
            .unwrap()
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(annots.len(), 1);

        let annot = doc
            .get_object(annots[0].as_reference().unwrap())
            .unwrap()
            .as_dict()
            .unwrap();
        match annot.get(b"FT").unwrap() {
            Object::Name(name) => assert_eq!(name.as_slice(), b"Sig"),
            other => panic!("unexpected /FT object: {other:?}"),
        }
        match annot.get(b"T").unwrap() {
            Object::String(bytes, _) => assert_eq!(bytes.as_slice(), b"Signature"),
            other => panic!("unexpected /T object: {other:?}"),
        }
    }

    #[test]
    fn empty_asset_list_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let form = TransferForm {
            from_name: "Sara".into(),
            ..TransferForm::default()
        };
        let err = TransferPdf::new().generate(&form, dir.path()).unwrap_err();
        assert!(matches!(err, FormError::NoRows));
    }
}
