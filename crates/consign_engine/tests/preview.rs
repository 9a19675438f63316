use consign_engine::{pdf_overview, pdf_page_text, PdfError};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Minimal single-font PDF with one page per entry of `pages`.
fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize pdf");
    bytes
}

#[test]
fn overview_reports_page_count_and_first_page_text() {
    let bytes = pdf_with_pages(&["Bill of Lading BOL123", "Terms and conditions"]);

    let overview = pdf_overview(&bytes).expect("overview");
    assert_eq!(overview.page_count, 2);
    assert!(overview.first_page_text.contains("BOL123"));
}

#[test]
fn page_text_is_per_page() {
    let bytes = pdf_with_pages(&["First page here", "Second page here"]);

    let second = pdf_page_text(&bytes, 2).expect("page 2");
    assert!(second.contains("Second page"));
    assert!(!second.contains("First page"));
}

#[test]
fn page_text_rejects_out_of_range_pages() {
    let bytes = pdf_with_pages(&["Only page"]);

    assert!(matches!(
        pdf_page_text(&bytes, 0),
        Err(PdfError::PageOutOfRange { page: 0, page_count: 1 })
    ));
    assert!(matches!(
        pdf_page_text(&bytes, 2),
        Err(PdfError::PageOutOfRange { page: 2, page_count: 1 })
    ));
}

#[test]
fn garbage_bytes_are_a_parse_error() {
    assert!(matches!(
        pdf_overview(b"this is not a pdf"),
        Err(PdfError::Parse(_))
    ));
}
