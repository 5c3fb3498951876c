use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("no data rows: add at least one item with a non-empty field")]
    NoRows,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF error (lopdf): {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("import failed: {0}")]
    Import(String),
    #[error("form file error: {0}")]
    Config(String),
}
