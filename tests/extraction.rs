//! PDF extraction and document discovery over real files on disk.

use std::fs;
use tempfile::TempDir;

use maoni::config::{CacheConfig, DocumentsConfig};
use maoni::documents::{DocumentStore, NO_SELECTION};
use maoni::extract;

/// Minimal valid PDF containing `phrase`. Builds the body then an xref
/// table with correct byte offsets so pdf-extract can parse it.
fn minimal_pdf_with_phrase(phrase: &str) -> Vec<u8> {
    let content = format!("BT /F1 12 Tf 100 700 Td ({}) Tj ET\n", phrase);
    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");
    let o1 = out.len();
    out.extend_from_slice(b"1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n");
    let o2 = out.len();
    out.extend_from_slice(b"2 0 obj << /Type /Pages /Kids [3 0 R] /Count 1 >> endobj\n");
    let o3 = out.len();
    out.extend_from_slice(b"3 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >> endobj\n");
    let o4 = out.len();
    out.extend_from_slice(
        format!("4 0 obj << /Length {} >> stream\n{}endstream endobj\n", content.len(), content)
            .as_bytes(),
    );
    let o5 = out.len();
    out.extend_from_slice(
        b"5 0 obj << /Type /Font /Subtype /Type1 /BaseFont /Helvetica >> endobj\n",
    );
    let xref_start = out.len();
    out.extend_from_slice(b"xref\n0 6\n");
    out.extend_from_slice(format!("{:010} 65535 f \n", 0).as_bytes());
    for offset in [o1, o2, o3, o4, o5] {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(b"trailer << /Size 6 /Root 1 0 R >>\nstartxref\n");
    out.extend_from_slice(format!("{}\n", xref_start).as_bytes());
    out.extend_from_slice(b"%%EOF\n");
    out
}

#[test]
fn extracts_text_from_a_generated_pdf() {
    let bytes = minimal_pdf_with_phrase("public participation");
    let text = extract::extract_pdf(&bytes).unwrap();
    assert!(
        text.contains("public participation"),
        "extracted text was: {:?}",
        text
    );
}

#[test]
fn store_lists_and_reads_pdfs_for_extraction() {
    let tmp = TempDir::new().unwrap();
    let documents = DocumentsConfig {
        dir: tmp.path().join("documents"),
        include_globs: vec!["*.pdf".to_string()],
    };
    let cache = CacheConfig {
        dir: tmp.path().join("summaries"),
    };
    fs::create_dir_all(&documents.dir).unwrap();
    fs::write(
        documents.dir.join("agri-bill.pdf"),
        minimal_pdf_with_phrase("support for smallholder farms"),
    )
    .unwrap();
    fs::write(documents.dir.join("readme.txt"), b"not a document").unwrap();

    let store = DocumentStore::open(&documents, &cache).unwrap();

    assert_eq!(store.list().unwrap(), vec!["agri-bill.pdf"]);
    assert_eq!(
        store.selection_list().unwrap(),
        vec![NO_SELECTION.to_string(), "agri-bill.pdf".to_string()]
    );

    let bytes = store.read_bytes("agri-bill.pdf").unwrap();
    let text = extract::extract_text(&bytes, extract::MIME_PDF).unwrap();
    assert!(text.contains("support for smallholder farms"));
}

#[test]
fn reading_an_unknown_document_is_a_storage_error() {
    let tmp = TempDir::new().unwrap();
    let documents = DocumentsConfig {
        dir: tmp.path().join("documents"),
        include_globs: vec!["*.pdf".to_string()],
    };
    let cache = CacheConfig {
        dir: tmp.path().join("summaries"),
    };
    fs::create_dir_all(&documents.dir).unwrap();

    let store = DocumentStore::open(&documents, &cache).unwrap();
    assert!(matches!(
        store.read_bytes("missing.pdf"),
        Err(maoni::error::Error::Storage(_))
    ));
}
