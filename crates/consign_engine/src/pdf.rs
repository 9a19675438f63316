use lopdf::Document;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to parse pdf: {0}")]
    Parse(String),
    #[error("pdf has no pages")]
    NoPages,
    #[error("page {page} out of range (1..={page_count})")]
    PageOutOfRange { page: u32, page_count: u32 },
    #[error("failed to extract page text: {0}")]
    Text(String),
}

/// Page count plus page-1 text, taken in one pass over the bytes. The
/// parsed document is dropped on return; nothing is cached across commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfOverview {
    pub page_count: u32,
    pub first_page_text: String,
}

pub fn pdf_overview(bytes: &[u8]) -> Result<PdfOverview, PdfError> {
    let doc = load(bytes)?;
    let page_count = doc.get_pages().len() as u32;
    if page_count == 0 {
        return Err(PdfError::NoPages);
    }
    let first_page_text = extract_page(&doc, 1)?;
    Ok(PdfOverview {
        page_count,
        first_page_text,
    })
}

/// Text of one page, 1-based.
pub fn pdf_page_text(bytes: &[u8], page: u32) -> Result<String, PdfError> {
    let doc = load(bytes)?;
    let page_count = doc.get_pages().len() as u32;
    if page == 0 || page > page_count {
        return Err(PdfError::PageOutOfRange { page, page_count });
    }
    extract_page(&doc, page)
}

fn load(bytes: &[u8]) -> Result<Document, PdfError> {
    Document::load_mem(bytes).map_err(|err| PdfError::Parse(err.to_string()))
}

fn extract_page(doc: &Document, page: u32) -> Result<String, PdfError> {
    doc.extract_text(&[page])
        .map_err(|err| PdfError::Text(err.to_string()))
}
