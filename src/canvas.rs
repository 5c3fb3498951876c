//! Page canvas over `lopdf`: sequential drawing operations, page
//! finalization, and the optional logo XObject. Coordinates are PDF points
//! with the origin at the bottom-left of an A4 page.

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use log::warn;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use crate::error::FormError;
use crate::metrics::{self, Font};
use crate::resource;

pub const INCH: f32 = 72.0;
pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32);

pub const BLACK: Color = Color(0.0, 0.0, 0.0);
pub const BLUE: Color = Color(0.0, 0.596, 0.855);
pub const GRAY: Color = Color(0.4, 0.4, 0.4);

// Kappa for approximating a quarter circle with one cubic Bezier segment.
const CIRCLE_K: f32 = 0.552_284_8;

pub struct Canvas {
    doc: Document,
    pages_id: ObjectId,
    ops: Vec<Operation>,
    logo: Option<(ObjectId, u32, u32)>,
    page_count: usize,
}

impl Canvas {
    pub fn new() -> Canvas {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Object::Array(Vec::new()),
            "Count" => 0_i64,
        });
        let logo = load_logo(&mut doc);
        Canvas {
            doc,
            pages_id,
            ops: Vec::new(),
            logo,
            page_count: 0,
        }
    }

    pub fn draw_text(&mut self, x: f32, y: f32, text: &str, font: Font, size: f32, color: Color) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "rg",
            vec![color.0.into(), color.1.into(), color.2.into()],
        ));
        self.ops.push(Operation::new(
            "Tf",
            vec![font.resource_name().into(), size.into()],
        ));
        self.ops
            .push(Operation::new("Td", vec![x.into(), y.into()]));
        self.ops
            .push(Operation::new("Tj", vec![Object::string_literal(text)]));
        self.ops.push(Operation::new("ET", vec![]));
    }

    pub fn draw_text_centered(
        &mut self,
        center_x: f32,
        y: f32,
        text: &str,
        font: Font,
        size: f32,
        color: Color,
    ) {
        let width = metrics::text_width(text, font, size);
        self.draw_text(center_x - width / 2.0, y, text, font, size, color);
    }

    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color) {
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "RG",
            vec![color.0.into(), color.1.into(), color.2.into()],
        ));
        self.ops.push(Operation::new("w", vec![width.into()]));
        self.ops
            .push(Operation::new("m", vec![x1.into(), y1.into()]));
        self.ops
            .push(Operation::new("l", vec![x2.into(), y2.into()]));
        self.ops.push(Operation::new("S", vec![]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    /// Stroked rectangle; `(x, y)` is the lower-left corner.
    pub fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Color) {
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "RG",
            vec![color.0.into(), color.1.into(), color.2.into()],
        ));
        self.ops.push(Operation::new("w", vec![line_width.into()]));
        self.ops.push(Operation::new(
            "re",
            vec![x.into(), y.into(), w.into(), h.into()],
        ));
        self.ops.push(Operation::new("S", vec![]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    /// Circle around `(cx, cy)`, stroked or filled in black.
    pub fn draw_circle(&mut self, cx: f32, cy: f32, r: f32, filled: bool) {
        let k = CIRCLE_K * r;
        self.ops.push(Operation::new("q", vec![]));
        if filled {
            self.ops
                .push(Operation::new("rg", vec![0.0.into(), 0.0.into(), 0.0.into()]));
        } else {
            self.ops
                .push(Operation::new("RG", vec![0.0.into(), 0.0.into(), 0.0.into()]));
            self.ops.push(Operation::new("w", vec![1.0.into()]));
        }
        self.ops
            .push(Operation::new("m", vec![(cx + r).into(), cy.into()]));
        self.ops.push(Operation::new(
            "c",
            vec![
                (cx + r).into(),
                (cy + k).into(),
                (cx + k).into(),
                (cy + r).into(),
                cx.into(),
                (cy + r).into(),
            ],
        ));
        self.ops.push(Operation::new(
            "c",
            vec![
                (cx - k).into(),
                (cy + r).into(),
                (cx - r).into(),
                (cy + k).into(),
                (cx - r).into(),
                cy.into(),
            ],
        ));
        self.ops.push(Operation::new(
            "c",
            vec![
                (cx - r).into(),
                (cy - k).into(),
                (cx - k).into(),
                (cy - r).into(),
                cx.into(),
                (cy - r).into(),
            ],
        ));
        self.ops.push(Operation::new(
            "c",
            vec![
                (cx + k).into(),
                (cy - r).into(),
                (cx + r).into(),
                (cy - k).into(),
                (cx + r).into(),
                cy.into(),
            ],
        ));
        self.ops
            .push(Operation::new(if filled { "f" } else { "S" }, vec![]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    /// Draw the logo fitted inside the given box, preserving aspect ratio and
    /// centering. Does nothing when no logo was loaded.
    pub fn draw_logo(&mut self, box_x: f32, box_y: f32, box_w: f32, box_h: f32) {
        let Some((_, px_w, px_h)) = self.logo else {
            return;
        };
        let scale = (box_w / px_w as f32).min(box_h / px_h as f32);
        let w = px_w as f32 * scale;
        let h = px_h as f32 * scale;
        let x = box_x + (box_w - w) / 2.0;
        let y = box_y + (box_h - h) / 2.0;

        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "cm",
            vec![
                w.into(),
                0.0.into(),
                0.0.into(),
                h.into(),
                x.into(),
                y.into(),
            ],
        ));
        self.ops.push(Operation::new("Do", vec!["Im1".into()]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    /// Finalize the current page and start a fresh one at the next drawing
    /// operation. A page with nothing on it yet is left alone.
    pub fn show_page(&mut self) -> Result<(), FormError> {
        if self.ops.is_empty() {
            return Ok(());
        }
        self.flush_page()
    }

    /// Flush any pending operations and close the document structure.
    pub fn finish(mut self) -> Result<Document, FormError> {
        if !self.ops.is_empty() || self.page_count == 0 {
            self.flush_page()?;
        }

        let count = self.page_count as i64;
        let pages = self.doc.get_object_mut(self.pages_id)?.as_dict_mut()?;
        pages.set("Count", count);

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        Ok(self.doc)
    }

    fn flush_page(&mut self) -> Result<(), FormError> {
        let content = Content {
            operations: std::mem::take(&mut self.ops),
        };
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut resources = dictionary! { "Font" => font_resources() };
        if let Some((logo_id, _, _)) = self.logo {
            resources.set("XObject", dictionary! { "Im1" => logo_id });
        }

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Resources" => resources,
            "MediaBox" => vec![0.0.into(), 0.0.into(), A4_WIDTH.into(), A4_HEIGHT.into()],
            "Contents" => content_id,
        });

        let pages = self.doc.get_object_mut(self.pages_id)?.as_dict_mut()?;
        pages
            .get_mut(b"Kids")?
            .as_array_mut()?
            .push(Object::Reference(page_id));
        self.page_count += 1;
        Ok(())
    }
}

fn font_resources() -> Dictionary {
    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        fonts.set(
            font.resource_name(),
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            },
        );
    }
    fonts
}

/// The logo is optional: a missing or undecodable file logs a warning and
/// the header is drawn without an image.
fn load_logo(doc: &mut Document) -> Option<(ObjectId, u32, u32)> {
    let path = resource::logo_path();
    if !path.exists() {
        warn!(
            "logo not found at {}, generating without it",
            path.display()
        );
        return None;
    }
    match embed_png(doc, &path) {
        Ok(logo) => Some(logo),
        Err(err) => {
            warn!("failed to embed logo {}: {err}", path.display());
            None
        }
    }
}

fn embed_png(doc: &mut Document, path: &Path) -> Result<(ObjectId, u32, u32), FormError> {
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();

    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    let mut alpha = Vec::with_capacity((width * height) as usize);
    for pixel in img.pixels() {
        let [r, g, b, a] = pixel.0;
        rgb.extend_from_slice(&[r, g, b]);
        alpha.push(a);
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&alpha)?;
    let alpha_compressed = encoder.finish()?;
    let smask_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        alpha_compressed,
    ));

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&rgb)?;
    let rgb_compressed = encoder.finish()?;

    let mut image_dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width as i64,
        "Height" => height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };
    image_dict.set("SMask", Object::Reference(smask_id));

    let image_id = doc.add_object(Stream::new(image_dict, rgb_compressed));
    Ok((image_id, width, height))
}

/// Write the finished document to `path` through a temporary sibling, so a
/// failed write never leaves a partial file under the final name.
pub fn save_document(doc: &mut Document, path: &Path) -> Result<(), FormError> {
    doc.compress();
    let tmp = path.with_extension("pdf.tmp");
    let mut file = fs::File::create(&tmp)?;
    doc.save_to(&mut file)?;
    file.sync_all()?;
    drop(file);
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_always_yields_at_least_one_page() {
        let canvas = Canvas::new();
        let doc = canvas.finish().unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn show_page_splits_content_across_pages() {
        let mut canvas = Canvas::new();
        canvas.draw_text(72.0, 700.0, "first", Font::Helvetica, 9.0, BLACK);
        canvas.show_page().unwrap();
        canvas.draw_text(72.0, 700.0, "second", Font::Helvetica, 9.0, BLACK);
        let doc = canvas.finish().unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn show_page_on_a_blank_page_is_a_no_op() {
        let mut canvas = Canvas::new();
        canvas.show_page().unwrap();
        canvas.show_page().unwrap();
        canvas.draw_text(72.0, 700.0, "only", Font::Helvetica, 9.0, BLACK);
        let doc = canvas.finish().unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
