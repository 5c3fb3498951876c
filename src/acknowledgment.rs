//! Acknowledgment of Receipt form generator. One `generate` call renders the
//! whole form, appends the signature placeholder, and writes exactly one PDF.

use std::path::{Path, PathBuf};

use log::info;

use crate::canvas::{A4_HEIGHT, A4_WIDTH, BLACK, BLUE, Canvas, GRAY, INCH};
use crate::error::FormError;
use crate::form::{AcknowledgmentForm, Item};
use crate::metrics::Font;
use crate::signature::{self, SignatureField};
use crate::{canvas, naming, resource, text};

const DECLARATION: &str = "I confirm that this device(s) is a property of Ajman University \
and to be returned back to AU Store after usage. This device(s) can't be shifted to any \
other user/location without a written approval from the Store.";

const OFFICE_TEXT: &str = "I understand that I will be responsible for any misuse or damages \
that may occur. I confirm that this device(s) will be used for work purpose only.";

const LAB_TEXT: &str =
    "I understand that the lab supervisor shall monitor the lab devices to avoid any misuse or damage.";

const BUILDINGS: [&str; 6] = ["SZH", "J1", "J2", "Student Hub", "Hostel", "Others:"];
const FLOORS: [&str; 5] = ["Ground", "1st", "2nd", "3rd", "Others:"];
const SECTIONS: [&str; 2] = ["Male", "Female"];

const COL_WIDTHS: [f32; 5] = [
    0.35 * INCH,
    1.1 * INCH,
    3.2 * INCH,
    0.45 * INCH,
    1.1 * INCH,
];
const ROW_HEIGHT: f32 = 0.32 * INCH;
const HEADER_HEIGHT: f32 = 0.4 * INCH;

pub struct AcknowledgmentPdf {
    width: f32,
    height: f32,
    margin: f32,
    bottom_margin: f32,
    sig_rect: Option<(f32, f32, f32, f32)>,
}

impl AcknowledgmentPdf {
    pub fn new() -> AcknowledgmentPdf {
        AcknowledgmentPdf {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margin: 0.6 * INCH,
            bottom_margin: 0.5 * INCH,
            sig_rect: None,
        }
    }

    /// Render `form` into the output directory and return the written path.
    pub fn generate(
        mut self,
        form: &AcknowledgmentForm,
        output_dir: &Path,
    ) -> Result<PathBuf, FormError> {
        form.validate()?;
        std::fs::create_dir_all(output_dir)?;
        let path = naming::unique_path(output_dir, &naming::acknowledgment_filename(form));

        let mut c = Canvas::new();
        self.draw_form(&mut c, form)?;
        let mut doc = c.finish()?;
        if let Some(rect) = self.sig_rect {
            signature::append_signature_field(
                &mut doc,
                &SignatureField {
                    rect,
                    field_name: "EmployeeSignature",
                },
            )?;
        }
        canvas::save_document(&mut doc, &path)?;
        info!("acknowledgment form written to {}", path.display());
        Ok(path)
    }

    fn check_page_break(&self, c: &mut Canvas, y: f32, needed: f32) -> Result<f32, FormError> {
        if y - needed < self.bottom_margin {
            c.show_page()?;
            Ok(self.height - self.margin)
        } else {
            Ok(y)
        }
    }

    fn draw_form(&mut self, c: &mut Canvas, form: &AcknowledgmentForm) -> Result<(), FormError> {
        let mut y = self.height - self.margin;

        y = self.draw_header(c, y);
        y = self.draw_date(c, y);
        y = self.draw_items_table(c, y, &form.items)?;

        // One coarse check for the whole remaining block of sections.
        y = self.check_page_break(c, y, 4.5 * INCH)?;

        y = self.draw_custodian_details(c, y, form);
        y = self.draw_location_section(c, y, form);
        y = self.draw_declaration(c, y);
        y = self.draw_device_selection(c, y, form);
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
            BLUE,
        );

        y -= 0.35 * INCH;
        c.draw_text_centered(
            self.width / 2.0,
            y,
            "Acknowledgement of Receipt",
            Font::HelveticaBold,
            13.0,
            BLACK,
        );

        y - 0.4 * INCH
    }

    fn draw_date(&self, c: &mut Canvas, y: f32) -> f32 {
        let date = resource::form_date();
        c.draw_text(
            self.width - 2.3 * INCH,
            y + 0.25 * INCH,
            "Date:",
            Font::Helvetica,
            11.0,
            BLACK,
        );
        c.draw_rect(
            self.width - 1.8 * INCH,
            y + 0.1 * INCH,
            1.1 * INCH,
            0.28 * INCH,
            1.0,
            BLACK,
        );
        c.draw_text(
            self.width - 1.7 * INCH,
            y + 0.18 * INCH,
            &date,
            Font::Helvetica,
            11.0,
            BLACK,
        );
        y
    }

    fn draw_table_header(&self, c: &mut Canvas, y: f32, x_start: f32) {
        let headers: [(&str, Option<&str>); 5] = [
            ("No.", None),
            ("Store Code", None),
            ("Item Description", None),
            ("Qty.", None),
            ("Purchase Date", Some("/LPO")),
        ];

        let mut x = x_start;
        for ((line1, line2), &width) in headers.iter().zip(COL_WIDTHS.iter()) {
            c.draw_rect(x, y - HEADER_HEIGHT, width, HEADER_HEIGHT, 1.0, BLACK);
            match line2 {
                Some(second) => {
                    c.draw_text_centered(
                        x + width / 2.0,
                        y - 0.15 * INCH,
                        line1,
                        Font::HelveticaBold,
                        9.0,
                        BLACK,
                    );
                    c.draw_text_centered(
                        x + width / 2.0,
                        y - 0.28 * INCH,
                        second,
                        Font::HelveticaBold,
                        9.0,
                        BLACK,
                    );
                }
                None => c.draw_text_centered(
                    x + width / 2.0,
                    y - 0.25 * INCH,
                    line1,
                    Font::HelveticaBold,
                    9.0,
                    BLACK,
                ),
            }
            x += width;
        }
    }

    fn draw_items_table(
        &self,
        c: &mut Canvas,
        mut y: f32,
        items: &[Item],
    ) -> Result<f32, FormError> {
        let table_width: f32 = COL_WIDTHS.iter().sum();
        let x_start = (self.width - table_width) / 2.0;

        self.draw_table_header(c, y, x_start);
        y -= HEADER_HEIGHT;

        // One empty bordered row when there is nothing to list; callers have
        // already rejected genuinely empty submissions.
        let num_rows = items.len().max(1);

        for row_num in 0..num_rows {
            // Keep four inches clear above the bottom margin for the
            // sections that follow the table.
            if y - ROW_HEIGHT < self.bottom_margin + 4.0 * INCH {
                c.show_page()?;
                y = self.height - self.margin;
                self.draw_table_header(c, y, x_start);
                y -= HEADER_HEIGHT;
            }

            let mut x = x_start;
            for (col, &width) in COL_WIDTHS.iter().enumerate() {
                c.draw_rect(x, y - ROW_HEIGHT, width, ROW_HEIGHT, 1.0, BLACK);

                if row_num < items.len() {
                    let item = &items[row_num];
                    let value = match col {
                        0 => (row_num + 1).to_string(),
                        1 => item.store_code.clone(),
                        2 => item.description.clone(),
                        3 => item.qty.clone(),
                        _ => item.purchase_date.clone(),
                    };

                    if col == 0 {
                        c.draw_text_centered(
                            x + width / 2.0,
                            y - 0.2 * INCH,
                            &value,
                            Font::Helvetica,
                            9.0,
                            BLACK,
                        );
                    } else {
                        c.draw_text(
                            x + 0.04 * INCH,
                            y - 0.2 * INCH,
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

        Ok(y - 0.25 * INCH)
    }

    fn draw_custodian_details(
        &self,
        c: &mut Canvas,
        mut y: f32,
        form: &AcknowledgmentForm,
    ) -> f32 {
        c.draw_text(
            self.margin,
            y,
            "Custodian Details:",
            Font::HelveticaBold,
            10.0,
            BLUE,
        );

        y -= 0.28 * INCH;
        c.draw_text(self.margin, y, "Name:", Font::HelveticaBold, 9.0, BLACK);
        c.draw_line(
            self.margin + 0.45 * INCH,
            y - 0.04 * INCH,
            4.0 * INCH,
            y - 0.04 * INCH,
            1.0,
            BLACK,
        );
        c.draw_text(
            self.margin + 0.5 * INCH,
            y,
            &form.custodian_name,
            Font::Helvetica,
            9.0,
            BLACK,
        );

        c.draw_text(4.3 * INCH, y, "Emp. ID:", Font::HelveticaBold, 9.0, BLACK);
        c.draw_rect(
            4.9 * INCH,
            y - 0.08 * INCH,
            0.9 * INCH,
            0.26 * INCH,
            1.0,
            BLACK,
        );
        c.draw_text(4.95 * INCH, y, &form.emp_id, Font::Helvetica, 9.0, BLACK);

        y -= 0.35 * INCH;
        c.draw_text(
            self.margin,
            y,
            "College / Department:",
            Font::HelveticaBold,
            9.0,
            BLACK,
        );
        c.draw_line(
            self.margin + 1.35 * INCH,
            y - 0.04 * INCH,
            5.0 * INCH,
            y - 0.04 * INCH,
            1.0,
            BLACK,
        );
        c.draw_text(
            self.margin + 1.4 * INCH,
            y,
            &form.department,
            Font::Helvetica,
            9.0,
            BLACK,
        );

        y - 0.4 * INCH
    }

    fn draw_location_section(&self, c: &mut Canvas, mut y: f32, form: &AcknowledgmentForm) -> f32 {
        let col1_x = self.margin;
        let col2_x = 2.6 * INCH;
        let col3_x = 4.2 * INCH;

        c.draw_text(
            col1_x,
            y,
            "Location: Building",
            Font::HelveticaBold,
            11.0,
            BLUE,
        );
        c.draw_text(col2_x, y, "Floor", Font::HelveticaBold, 11.0, BLUE);
        c.draw_text(col3_x, y, "Section", Font::HelveticaBold, 11.0, BLUE);

        c.draw_line(
            col1_x,
            y - 0.04 * INCH,
            col1_x + 1.35 * INCH,
            y - 0.04 * INCH,
            1.0,
            BLUE,
        );
        c.draw_line(
            col2_x,
            y - 0.04 * INCH,
            col2_x + 0.42 * INCH,
            y - 0.04 * INCH,
            1.0,
            BLUE,
        );
        c.draw_line(
            col3_x,
            y - 0.04 * INCH,
            col3_x + 0.55 * INCH,
            y - 0.04 * INCH,
            1.0,
            BLUE,
        );

        y -= 0.32 * INCH;
        let line_height = 0.24 * INCH;

        for (i, building) in BUILDINGS.iter().enumerate() {
            let by = y - i as f32 * line_height;
            let selected =
                *building == form.building || (*building == "Others:" && form.building == "Others");
            self.draw_radio(c, col1_x, by, selected);
            c.draw_text(
                col1_x + 0.22 * INCH,
                by,
                building,
                Font::Helvetica,
                9.0,
                BLACK,
            );
            if *building == "Others:" && form.building == "Others" {
                c.draw_line(
                    col1_x + 0.7 * INCH,
                    by - 0.04 * INCH,
                    col1_x + 1.6 * INCH,
                    by - 0.04 * INCH,
                    1.0,
                    BLACK,
                );
                c.draw_text(
                    col1_x + 0.72 * INCH,
                    by,
                    &form.building_other,
                    Font::Helvetica,
                    9.0,
                    BLACK,
                );
            }
        }

        for (i, floor) in FLOORS.iter().enumerate() {
            let fy = y - i as f32 * line_height;
            let selected = *floor == form.floor || (*floor == "Others:" && form.floor == "Others");
            self.draw_radio(c, col2_x, fy, selected);
            if matches!(*floor, "1st" | "2nd" | "3rd") {
                // Ordinal digit with a small raised suffix, as on the form.
                c.draw_text(
                    col2_x + 0.22 * INCH,
                    fy,
                    &floor[..1],
                    Font::Helvetica,
                    9.0,
                    BLACK,
                );
                c.draw_text(
                    col2_x + 0.3 * INCH,
                    fy + 0.06 * INCH,
                    &floor[1..],
                    Font::Helvetica,
                    6.0,
                    BLACK,
                );
            } else {
                c.draw_text(col2_x + 0.22 * INCH, fy, floor, Font::Helvetica, 9.0, BLACK);
            }
            if *floor == "Others:" && form.floor == "Others" {
                c.draw_line(
                    col2_x + 0.65 * INCH,
                    fy - 0.04 * INCH,
                    col2_x + 1.3 * INCH,
                    fy - 0.04 * INCH,
                    1.0,
                    BLACK,
                );
                c.draw_text(
                    col2_x + 0.67 * INCH,
                    fy,
                    &form.floor_other,
                    Font::Helvetica,
                    9.0,
                    BLACK,
                );
            }
        }

        for (i, section) in SECTIONS.iter().enumerate() {
            let sy = y - i as f32 * line_height;
            self.draw_radio(c, col3_x, sy, *section == form.section);
            c.draw_text(
                col3_x + 0.22 * INCH,
                sy,
                section,
                Font::Helvetica,
                9.0,
                BLACK,
            );
        }

        y - BUILDINGS.len() as f32 * line_height - 0.15 * INCH
    }

    fn draw_radio(&self, c: &mut Canvas, x: f32, y: f32, selected: bool) {
        c.draw_circle(x + 0.08 * INCH, y + 0.04 * INCH, 0.065 * INCH, false);
        if selected {
            c.draw_circle(x + 0.08 * INCH, y + 0.04 * INCH, 0.035 * INCH, true);
        }
    }

    fn draw_declaration(&self, c: &mut Canvas, mut y: f32) -> f32 {
        let max_width = self.width - 2.0 * self.margin;
        for line in text::wrap_words(DECLARATION, Font::HelveticaBoldOblique, 9.0, max_width) {
            c.draw_text(self.margin, y, &line, Font::HelveticaBoldOblique, 9.0, BLACK);
            y -= 0.16 * INCH;
        }
        y - 0.12 * INCH
    }

    fn draw_device_selection(&self, c: &mut Canvas, mut y: f32, form: &AcknowledgmentForm) -> f32 {
        c.draw_text(
            self.margin,
            y,
            "Please select one of the following:",
            Font::HelveticaBoldOblique,
            9.0,
            BLACK,
        );

        y -= 0.28 * INCH;
        self.draw_radio(c, self.margin + 0.15 * INCH, y, form.device_type == "Office");
        c.draw_text(
            self.margin + 0.4 * INCH,
            y,
            "Office Device",
            Font::HelveticaBold,
            9.0,
            BLACK,
        );

        y -= 0.18 * INCH;
        let max_width = self.width - 2.0 * self.margin - 0.4 * INCH;
        for line in text::wrap_words(OFFICE_TEXT, Font::Helvetica, 8.0, max_width) {
            c.draw_text(
                self.margin + 0.4 * INCH,
                y,
                &line,
                Font::Helvetica,
                8.0,
                BLACK,
            );
            y -= 0.13 * INCH;
        }

        y -= 0.12 * INCH;
        self.draw_radio(c, self.margin + 0.15 * INCH, y, form.device_type == "Lab");
        c.draw_text(
            self.margin + 0.4 * INCH,
            y,
            "Lab Device",
            Font::HelveticaBold,
            9.0,
            BLACK,
        );

        y -= 0.18 * INCH;
        c.draw_text(
            self.margin + 0.4 * INCH,
            y,
            LAB_TEXT,
            Font::Helvetica,
            8.0,
            BLACK,
        );

        y - 0.3 * INCH
    }

    fn draw_signature(&mut self, c: &mut Canvas, mut y: f32) -> Result<(), FormError> {
        if y < 1.3 * INCH {
            c.show_page()?;
            y = self.height - self.margin;
        }

        c.draw_text(
            self.margin,
            y,
            "Employee Signature:",
            Font::HelveticaBold,
            10.0,
            BLACK,
        );

        y -= 0.12 * INCH;
        let box_width = 2.2 * INCH;
        let box_height = 1.0 * INCH;
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
