//! Document rasterizer — converts the first page of an uploaded PDF into a
//! base64-encoded JPEG for transmission to the model.
//!
//! PDFium is not async-safe, so async callers go through [`rasterize_pdf`],
//! which moves the whole render onto a blocking thread.

use std::io::Cursor;

use base64::Engine;
use image::ImageFormat;
use pdfium_render::prelude::*;
use thiserror::Error;

/// MIME type of every rasterized payload. The codec is fixed; no quality
/// negotiation happens downstream.
pub const RASTER_MIME_TYPE: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("no PDF file provided")]
    Empty,

    #[error("failed to load the PDF rendering engine: {0}")]
    Engine(String),

    #[error("unreadable PDF: {0}")]
    Unreadable(String),

    #[error("failed to encode page image: {0}")]
    Encode(#[from] image::ImageError),
}

/// First page of a PDF, rasterized for one model invocation.
/// Built fresh per request and discarded afterwards; never cached.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RasterizedDocument {
    pub mime_type: &'static str,
    /// Base64-encoded JPEG bytes.
    pub payload: String,
}

/// Rasterizes the first page of `pdf_bytes` to a base64-encoded JPEG.
///
/// Later pages are never considered. The page renders at the default
/// configuration; no resizing, cropping, or quality tuning is applied.
pub fn rasterize(pdf_bytes: &[u8]) -> Result<RasterizedDocument, DocumentError> {
    if pdf_bytes.is_empty() {
        return Err(DocumentError::Empty);
    }

    let pdfium = create_pdfium()?;

    let document = pdfium
        .load_pdf_from_byte_slice(pdf_bytes, None)
        .map_err(|e| DocumentError::Unreadable(e.to_string()))?;

    let page = document
        .pages()
        .first()
        .map_err(|e| DocumentError::Unreadable(format!("no readable first page: {e}")))?;

    // JPEG carries no alpha channel, so drop it before encoding
    let image = page
        .render_with_config(&PdfRenderConfig::new())
        .map_err(|e| DocumentError::Unreadable(format!("failed to render page: {e}")))?
        .as_image()
        .to_rgb8();

    let mut jpeg = Vec::new();
    image.write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)?;

    Ok(RasterizedDocument {
        mime_type: RASTER_MIME_TYPE,
        payload: base64::engine::general_purpose::STANDARD.encode(&jpeg),
    })
}

/// Async wrapper around [`rasterize`]. PDFium work must stay off the async
/// executor.
pub async fn rasterize_pdf(pdf_bytes: bytes::Bytes) -> Result<RasterizedDocument, DocumentError> {
    tokio::task::spawn_blocking(move || rasterize(&pdf_bytes))
        .await
        .map_err(|e| DocumentError::Engine(format!("rasterizer task failed: {e}")))?
}

/// Binds PDFium dynamically.
///
/// Searches for libpdfium in:
/// 1. Current directory (./libpdfium.so)
/// 2. vendor/pdfium/lib/
/// 3. System library paths
fn create_pdfium() -> Result<Pdfium, DocumentError> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "./vendor/pdfium/lib/",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| DocumentError::Engine(format!("{e:?}")))?;

    Ok(Pdfium::new(bindings))
}
