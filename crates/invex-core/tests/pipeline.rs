//! End-to-end pipeline tests over real PDF byte streams.

use std::str::FromStr;
use std::time::{Duration, Instant};

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use rust_decimal::Decimal;

use invex_core::error::{DocumentError, PipelineError};
use invex_core::pdf::{PdfTextExtractor, TextExtractor};
use invex_core::{FieldKind, MemoryStore, Pipeline, Stage, SubmitOutcome};

/// Build a PDF with the given text lines on each page.
fn pdf_with_pages(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        let mut y = 780;
        for line in *lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new("Td", vec![50.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
            y -= 18;
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
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
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn acme_invoice() -> Vec<u8> {
    pdf_with_pages(&[&[
        "Acme Corp",
        "Invoice # INV-2024-001",
        "Invoice Date: 2024-01-15",
        "Widget x10 @ $123.456",
        "Total: $1,234.56",
    ]])
}

#[test]
fn acme_invoice_is_stored_with_exact_fields() {
    let pipeline = Pipeline::new(MemoryStore::new());
    let outcome = pipeline
        .submit(&acme_invoice(), Some("acme.pdf"), None)
        .unwrap();

    let SubmitOutcome::Stored(invoice) = outcome else {
        panic!("expected Stored, got {outcome:?}");
    };
    assert_eq!(invoice.vendor, "Acme Corp");
    assert_eq!(invoice.total, Decimal::from_str("1234.56").unwrap());
    assert_eq!(invoice.id, "INV-2024-001");
    assert_eq!(invoice.currency, "USD");
    assert_eq!(invoice.line_items.len(), 1);
    assert_eq!(invoice.line_items[0].description, "Widget");
    assert_eq!(
        invoice.line_items[0].quantity,
        Decimal::from_str("10").unwrap()
    );
    assert!(!invoice.total_mismatch);
    assert!(invoice.confidence >= 0.9);
    assert_eq!(invoice.source.filename.as_deref(), Some("acme.pdf"));
}

#[test]
fn stored_invoice_is_readable_by_id_and_vendor() {
    let pipeline = Pipeline::new(MemoryStore::new());
    let outcome = pipeline.submit(&acme_invoice(), None, None).unwrap();
    let SubmitOutcome::Stored(stored) = outcome else {
        panic!("expected Stored");
    };

    let by_id = pipeline.find_by_id(&stored.id).unwrap();
    assert_eq!(by_id, Some(stored.clone()));

    let by_vendor = pipeline.find_by_vendor("Acme Corp").unwrap();
    assert_eq!(by_vendor, vec![stored]);
}

#[test]
fn lookup_misses_are_valid_negative_results() {
    let pipeline = Pipeline::new(MemoryStore::new());
    assert_eq!(pipeline.find_by_id("nonexistent-id").unwrap(), None);
    assert!(pipeline.find_by_vendor("Acme Corp").unwrap().is_empty());
}

#[test]
fn wrong_magic_bytes_yield_unsupported_format() {
    let pipeline = Pipeline::new(MemoryStore::new());
    let result = pipeline.submit(b"just text renamed to .pdf", Some("fake.pdf"), None);
    assert!(matches!(
        result,
        Err(PipelineError::Document(DocumentError::UnsupportedFormat))
    ));
    assert!(pipeline.store().is_empty());
}

#[test]
fn invoice_without_amounts_is_rejected() {
    let pipeline = Pipeline::new(MemoryStore::new());
    let pdf = pdf_with_pages(&[&["Hello there", "this document has no amounts in it"]]);
    let outcome = pipeline.submit(&pdf, None, None).unwrap();
    assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));
    assert!(pipeline.store().is_empty());
}

#[test]
fn sparse_invoice_yields_partial_failure_and_is_not_stored() {
    let pipeline = Pipeline::new(MemoryStore::new());
    let pdf = pdf_with_pages(&[&["Acme Corp", "Total: $50.00"]]);
    let outcome = pipeline.submit(&pdf, None, None).unwrap();

    let SubmitOutcome::PartialFailure { draft, missing } = outcome else {
        panic!("expected PartialFailure, got {outcome:?}");
    };
    assert_eq!(draft.vendor, "Acme Corp");
    assert_eq!(draft.total, Decimal::from_str("50.00").unwrap());
    assert!(missing.contains(&FieldKind::InvoiceNumber));
    assert!(missing.contains(&FieldKind::IssueDate));
    assert!(missing.contains(&FieldKind::LineItems));
    assert!(pipeline.store().is_empty());
}

#[test]
fn total_mismatch_is_flagged_and_lowers_confidence() {
    let pipeline = Pipeline::new(MemoryStore::new());

    let consistent = pdf_with_pages(&[&[
        "Acme Corp",
        "Invoice # INV-1",
        "Invoice Date: 2024-01-15",
        "Widget x10 @ $10.00",
        "Total: $100.00",
    ]]);
    let SubmitOutcome::Stored(good) = pipeline.submit(&consistent, None, None).unwrap() else {
        panic!("expected Stored");
    };
    assert!(!good.total_mismatch);
    assert!(good.confidence >= 0.9);

    let mismatched = pdf_with_pages(&[&[
        "Acme Corp",
        "Invoice # INV-2",
        "Invoice Date: 2024-01-15",
        "Widget x10 @ $10.00",
        "Total: $150.00",
    ]]);
    let SubmitOutcome::Stored(bad) = pipeline.submit(&mismatched, None, None).unwrap() else {
        panic!("expected Stored");
    };
    assert!(bad.total_mismatch);
    assert!(bad.confidence < good.confidence);
}

#[test]
fn elapsed_deadline_times_out_without_store_write() {
    let pipeline = Pipeline::new(MemoryStore::new());
    let deadline = Instant::now() - Duration::from_millis(1);
    let result = pipeline.submit(&acme_invoice(), None, Some(deadline));
    assert!(matches!(
        result,
        Err(PipelineError::Timeout {
            stage: Stage::Received
        })
    ));
    assert!(pipeline.store().is_empty());
}

#[test]
fn extractor_produces_tokens_in_page_order() {
    let pdf = pdf_with_pages(&[
        &["first page heading", "alpha beta"],
        &["second page heading", "gamma delta"],
    ]);
    let layer = PdfTextExtractor::new().extract_tokens(&pdf).unwrap();

    assert_eq!(layer.pages, 2);
    assert!(!layer.tokens.is_empty());
    let pages: Vec<u32> = layer.tokens.iter().map(|t| t.page).collect();
    let mut sorted = pages.clone();
    sorted.sort_unstable();
    assert_eq!(pages, sorted, "pages must be ascending");
    assert_eq!(layer.tokens.first().unwrap().page, 1);
    assert_eq!(layer.tokens.last().unwrap().page, 2);
}

#[test]
fn resubmission_creates_a_new_lookup_result_not_a_patch() {
    let pipeline = Pipeline::new(MemoryStore::new());
    let SubmitOutcome::Stored(first) = pipeline.submit(&acme_invoice(), None, None).unwrap() else {
        panic!("expected Stored");
    };
    // Same document resubmitted: same recognized identifier, fresh record.
    let SubmitOutcome::Stored(second) = pipeline.submit(&acme_invoice(), None, None).unwrap()
    else {
        panic!("expected Stored");
    };
    assert_eq!(first.id, second.id);
    assert_eq!(pipeline.find_by_id(&first.id).unwrap(), Some(second));
}
