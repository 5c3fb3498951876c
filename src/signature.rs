//! Placeholder digital-signature field. After the page tree is complete,
//! exactly one unsigned `/Sig` widget annotation is attached to the last
//! page and linked into the document's AcroForm, ready for an external
//! certificate-based signing tool. No cryptography happens here.

use lopdf::{Document, Object, dictionary};

use crate::error::FormError;

pub struct SignatureField {
    /// `(x1, y1, x2, y2)` in page coordinates, recorded when the signature
    /// box was drawn.
    pub rect: (f32, f32, f32, f32),
    pub field_name: &'static str,
}

/// Append the signature widget to the document's last page. The rectangle is
/// written with integer coordinates and the print flag set; the AcroForm
/// carries `/SigFlags 3` (SignaturesExist | AppendOnly) so viewers treat the
/// document as sign-and-append-only.
pub fn append_signature_field(doc: &mut Document, field: &SignatureField) -> Result<(), FormError> {
    let pages = doc.get_pages();
    let Some((_, &page_id)) = pages.iter().next_back() else {
        return Ok(());
    };

    let (x1, y1, x2, y2) = field.rect;
    let sig_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Sig",
        "T" => Object::string_literal(field.field_name),
        "F" => Object::Integer(4),
        "Rect" => vec![
            Object::Integer(x1 as i64),
            Object::Integer(y1 as i64),
            Object::Integer(x2 as i64),
            Object::Integer(y2 as i64),
        ],
        "P" => page_id,
    });

    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    if page.get(b"Annots").map_or(true, |obj| obj.as_array().is_err()) {
        page.set("Annots", Object::Array(Vec::new()));
    }
    page.get_mut(b"Annots")?
        .as_array_mut()?
        .push(Object::Reference(sig_id));

    let catalog_id = doc.trailer.get(b"Root")?.as_reference()?;
    let catalog = doc.get_object_mut(catalog_id)?.as_dict_mut()?;
    if catalog
        .get(b"AcroForm")
        .map_or(true, |obj| obj.as_dict().is_err())
    {
        catalog.set(
            "AcroForm",
            dictionary! {
                "Fields" => Object::Array(Vec::new()),
                "SigFlags" => Object::Integer(3),
            },
        );
    }
    catalog
        .get_mut(b"AcroForm")?
        .as_dict_mut()?
        .get_mut(b"Fields")?
        .as_array_mut()?
        .push(Object::Reference(sig_id));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BLACK, Canvas};
    use crate::metrics::Font;

    #[test]
    fn field_lands_on_the_last_page_with_an_acroform() {
        let mut c = Canvas::new();
        c.draw_text(72.0, 700.0, "page one", Font::Helvetica, 9.0, BLACK);
        c.show_page().unwrap();
        c.draw_text(72.0, 700.0, "page two", Font::Helvetica, 9.0, BLACK);
        let mut doc = c.finish().unwrap();

        append_signature_field(
            &mut doc,
            &SignatureField {
                rect: (43.2, 100.0, 201.6, 172.0),
                field_name: "EmployeeSignature",
            },
        )
        .unwrap();

        let pages = doc.get_pages();
        assert_eq!(pages.len(), 2);
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

        let annot_id = annots[0].as_reference().unwrap();
        let annot = doc.get_object(annot_id).unwrap().as_dict().unwrap();
        match annot.get(b"FT").unwrap() {
            Object::Name(name) => assert_eq!(name.as_slice(), b"Sig"),
            other => panic!("unexpected /FT object: {other:?}"),
        }
        assert_eq!(annot.get(b"F").unwrap().as_i64().unwrap(), 4);
        match annot.get(b"T").unwrap() {
            Object::String(bytes, _) => assert_eq!(bytes.as_slice(), b"EmployeeSignature"),
            other => panic!("unexpected /T object: {other:?}"),
        }
        let rect = annot.get(b"Rect").unwrap().as_array().unwrap();
        assert_eq!(rect.len(), 4);
        assert_eq!(rect[0].as_i64().unwrap(), 43);

        let catalog_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
        let catalog = doc.get_object(catalog_id).unwrap().as_dict().unwrap();
        let acro_form = catalog.get(b"AcroForm").unwrap().as_dict().unwrap();
        assert_eq!(acro_form.get(b"SigFlags").unwrap().as_i64().unwrap(), 3);
        assert_eq!(acro_form.get(b"Fields").unwrap().as_array().unwrap().len(), 1);

        // Only the last page carries the annotation.
        let (_, &first_page) = pages.iter().next().unwrap();
        assert!(
            doc.get_object(first_page)
                .unwrap()
                .as_dict()
                .unwrap()
                .get(b"Annots")
                .is_err()
        );
    }
}
