//! Whole-file output: framing, offsets, determinism and writer options

use folio_pdf::objects::{Dictionary, Object, ObjectId, Stream};
use folio_pdf::writer::XrefEntry;
use folio_pdf::{DanglingReferencePolicy, Document, PdfError, RealPrecision, WriterConfig};
use pretty_assertions::assert_eq;

fn sample_document() -> Document {
    let mut doc = Document::new();
    doc.set_title("Sample");
    doc.set_author("Tests");
    let page = doc.add_page(612.0, 792.0).unwrap();

    let content = Stream::new(b"BT /F1 12 Tf 72 712 Td (Hello) Tj ET".to_vec());
    let content_id = doc.objects_mut().register(content);

    let page_dict = doc
        .objects_mut()
        .resolve_mut(page)
        .and_then(Object::as_dict_mut)
        .unwrap();
    page_dict.set("Contents", content_id);
    page_dict.set("UserUnit", 1.0 / 3.0);
    doc
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[test]
fn test_xref_offsets_point_at_objects() {
    let mut doc = sample_document();
    let mut bytes = Vec::new();
    let xref = doc.write(&mut bytes, &WriterConfig::default()).unwrap();

    assert_eq!(xref.len(), doc.objects().max_object_number() as usize + 1);
    for (number, entry) in xref.entries().skip(1) {
        let offset = entry.offset().unwrap() as usize;
        let header = format!("{number} {} obj\n", entry.generation());
        assert_eq!(&bytes[offset..offset + header.len()], header.as_bytes());
    }
}

#[test]
fn test_same_graph_same_bytes() {
    let first = sample_document()
        .to_bytes(&WriterConfig::default())
        .unwrap();
    let second = sample_document()
        .to_bytes(&WriterConfig::default())
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_file_structure() {
    let bytes = sample_document()
        .to_bytes(&WriterConfig::default())
        .unwrap();
    let text = String::from_utf8_lossy(&bytes);

    assert!(bytes.starts_with(b"%PDF-1.7\n%"));
    assert!(text.contains("/Title (Sample)"));
    assert!(text.contains("/UserUnit .33333\n"));
    assert!(text.contains("stream\nBT /F1 12 Tf 72 712 Td (Hello) Tj ET\nendstream"));

    let xref_at = find(&bytes, b"\nxref\n").unwrap() + 1;
    let trailer = &text[text.rfind("startxref\n").unwrap()..];
    assert_eq!(trailer, format!("startxref\n{xref_at}\n%%EOF\n"));
}

#[test]
fn test_compact_and_fixed_precision() {
    let config = WriterConfig::new()
        .with_compact(true)
        .with_real_precision(RealPrecision::Fixed(4));
    let bytes = sample_document().to_bytes(&config).unwrap();
    let text = String::from_utf8_lossy(&bytes);

    assert!(text.contains("<</Type /Catalog /Pages 1 0 R>>"));
    assert!(text.contains("/UserUnit .3333"));
}

#[test]
fn test_freed_objects_become_free_entries() {
    let mut doc = sample_document();
    let scratch = doc.objects_mut().register(Dictionary::new());
    doc.objects_mut().free(scratch).unwrap();

    let mut bytes = Vec::new();
    let xref = doc.write(&mut bytes, &WriterConfig::default()).unwrap();
    assert_eq!(
        xref.get(scratch.number()),
        Some(&XrefEntry::Free {
            next_free: 0,
            generation: 1
        })
    );
    assert_eq!(
        xref.get(0),
        Some(&XrefEntry::Free {
            next_free: scratch.number(),
            generation: 65535
        })
    );
    let header = format!("\n{} 0 obj", scratch.number());
    assert!(find(&bytes, header.as_bytes()).is_none());
}

#[test]
fn test_dangling_reference_policies() {
    let mut doc = sample_document();
    let page = doc.page_ids()[0];
    doc.objects_mut()
        .resolve_mut(page)
        .and_then(Object::as_dict_mut)
        .unwrap()
        .set("Thumb", ObjectId::new(500, 0));

    let lenient = doc.to_bytes(&WriterConfig::default()).unwrap();
    assert!(String::from_utf8_lossy(&lenient).contains("/Thumb null"));

    let strict = WriterConfig::new().with_dangling_references(DanglingReferencePolicy::Error);
    assert!(matches!(
        doc.to_bytes(&strict),
        Err(PdfError::DanglingReference(500, 0))
    ));
}

#[test]
fn test_cycles_are_written_through_references() {
    let mut doc = Document::new();
    let page = doc.add_page(100.0, 100.0).unwrap();
    let text = String::from_utf8_lossy(&doc.to_bytes(&WriterConfig::default()).unwrap()).into_owned();

    assert!(text.contains("/Parent 1 0 R"));
    assert!(text.contains(&format!("/Kids [{} 0 R]", page.number())));
}

#[test]
fn test_save_round_trip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.pdf");

    let mut doc = sample_document();
    doc.save_with_config(&path, &WriterConfig::new().with_document_id([7; 16], [7; 16]))
        .unwrap();

    let on_disk = std::fs::read(&path).unwrap();
    let in_memory = doc
        .to_bytes(&WriterConfig::new().with_document_id([7; 16], [7; 16]))
        .unwrap();
    assert_eq!(on_disk, in_memory);
    assert!(String::from_utf8_lossy(&on_disk).contains("/ID [<07070707"));
}
