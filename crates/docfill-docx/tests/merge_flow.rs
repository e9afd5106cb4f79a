//! End-to-end merge tests over in-memory document fixtures.

use std::io::{Cursor, Read};

use docfill_docx::{
    apply_replacements, compile_batch, document_text, extract_tokens, fill_document, write_zip,
    BatchRow, Container,
};
use docfill_engine::{AuthoringLog, ValueSet};
use docfill_token::TokenTable;

/// Builds a minimal document container with the given body and header XML.
fn fixture(body_xml: &str, header_xml: Option<&str>) -> Vec<u8> {
    let document = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document><w:body>{}</w:body></w:document>",
        body_xml
    );
    let mut members: Vec<(String, Vec<u8>)> = vec![
        (
            "[Content_Types].xml".to_string(),
            b"<Types/>".to_vec(),
        ),
        ("word/document.xml".to_string(), document.into_bytes()),
        ("word/styles.xml".to_string(), b"<w:styles/>".to_vec()),
    ];
    if let Some(header) = header_xml {
        members.push((
            "word/header1.xml".to_string(),
            format!("<w:hdr>{}</w:hdr>", header).into_bytes(),
        ));
    }
    write_zip(members.iter().map(|(n, b)| (n.as_str(), &b[..]))).unwrap()
}

fn paragraph(text: &str) -> String {
    format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", text)
}

#[test]
fn tokens_detected_from_converted_text() {
    let bytes = fixture(&paragraph("{client|Full name} agrees to {amount}."), None);
    let table = extract_tokens(&bytes).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("client").unwrap().comment, "Full name");
    assert!(table.contains_key("amount"));
}

#[test]
fn tokens_detected_across_split_runs() {
    let body = r#"<w:p><w:r><w:t>{cli</w:t></w:r><w:proofErr w:type="spellStart"/><w:r><w:t>ent}</w:t></w:r></w:p>"#;
    let bytes = fixture(body, None);
    let table = extract_tokens(&bytes).unwrap();
    assert!(table.contains_key("client"));
}

#[test]
fn fill_roundtrip_replaces_every_literal() {
    let bytes = fixture(&paragraph("{client|Full name} agrees to {amount}."), None);
    let table = extract_tokens(&bytes).unwrap();
    let values = ValueSet::from_pairs([("client", "Acme"), ("amount", "$500")]);

    let merged = fill_document(&bytes, &table, &values).unwrap();
    let text = document_text(&Container::open(&merged).unwrap()).unwrap();

    assert!(text.contains("Acme agrees to $500."));
    assert!(TokenTable::parse(&text).is_empty());
}

#[test]
fn fill_replaces_fragmented_token_in_raw_part() {
    let body = r#"<w:p><w:r><w:t>{na</w:t></w:r><w:proofErr w:type="x"/><w:r><w:t>me}</w:t></w:r></w:p>"#;
    let bytes = fixture(body, None);
    let table = extract_tokens(&bytes).unwrap();
    let merged =
        fill_document(&bytes, &table, &ValueSet::from_pairs([("name", "Alice")])).unwrap();

    let raw = Container::open(&merged)
        .unwrap()
        .read_part("word/document.xml")
        .unwrap();
    assert!(raw.contains(">Alice<"));
    assert!(!raw.contains("{na"));
}

#[test]
fn empty_values_leave_template_text_intact() {
    let bytes = fixture(&paragraph("Dear {name}, re: {subject}"), None);
    let table = extract_tokens(&bytes).unwrap();
    let merged = fill_document(&bytes, &table, &ValueSet::new()).unwrap();
    let text = document_text(&Container::open(&merged).unwrap()).unwrap();
    assert!(text.contains("Dear {name}, re: {subject}"));
}

#[test]
fn headers_substituted_with_the_same_table() {
    let bytes = fixture(
        &paragraph("Body for {client}."),
        Some(&paragraph("Header for {client}.")),
    );
    let table = extract_tokens(&bytes).unwrap();
    let merged =
        fill_document(&bytes, &table, &ValueSet::from_pairs([("client", "Acme")])).unwrap();

    let container = Container::open(&merged).unwrap();
    assert!(container
        .read_part("word/header1.xml")
        .unwrap()
        .contains("Header for Acme."));
}

#[test]
fn untouched_entries_survive_the_merge() {
    let bytes = fixture(&paragraph("{x}"), None);
    let table = extract_tokens(&bytes).unwrap();
    let merged = fill_document(&bytes, &table, &ValueSet::from_pairs([("x", "1")])).unwrap();
    let container = Container::open(&merged).unwrap();
    assert_eq!(
        container.read_part("word/styles.xml").unwrap(),
        "<w:styles/>"
    );
}

#[test]
fn malformed_container_produces_no_output() {
    let table = TokenTable::parse("{x}");
    assert!(fill_document(b"garbage", &table, &ValueSet::new()).is_err());
}

// ==================== Batch Tests ====================

fn archive_members(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut members = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut content = Vec::new();
        file.read_to_end(&mut content).unwrap();
        members.push((file.name().to_string(), content));
    }
    members
}

#[test]
fn batch_produces_one_member_per_row() {
    let bytes = fixture(&paragraph("{client} owes {amount}."), None);
    let table = extract_tokens(&bytes).unwrap();
    let rows = vec![
        BatchRow::new(1, ValueSet::from_pairs([("client", "Acme"), ("amount", "$1")])),
        BatchRow::new(2, ValueSet::from_pairs([("client", "Borg"), ("amount", "$2")])),
        BatchRow::new(3, ValueSet::from_pairs([("client", "Cyan"), ("amount", "$3")])),
    ];

    let archive = compile_batch(&bytes, &table, &rows).unwrap();
    let members = archive_members(&archive);
    assert_eq!(members.len(), 3);
    assert_eq!(members[0].0, "Acme_1.docx");
    assert_eq!(members[1].0, "Borg_2.docx");
    assert_eq!(members[2].0, "Cyan_3.docx");

    for (member, client, amount) in [
        (&members[0], "Acme", "$1"),
        (&members[1], "Borg", "$2"),
        (&members[2], "Cyan", "$3"),
    ] {
        let text = document_text(&Container::open(&member.1).unwrap()).unwrap();
        assert!(text.contains(&format!("{} owes {}.", client, amount)));
    }
}

#[test]
fn batch_rows_are_independent() {
    let bytes = fixture(&paragraph("{client}"), None);
    let table = extract_tokens(&bytes).unwrap();
    let mut rows = vec![
        BatchRow::new(1, ValueSet::from_pairs([("client", "First")])),
        BatchRow::new(2, ValueSet::from_pairs([("client", "Second")])),
    ];
    let before = compile_batch(&bytes, &table, &rows).unwrap();

    // Mutating row 2 must not affect document 1's output.
    rows[1].values.set("client", "Changed");
    let after = compile_batch(&bytes, &table, &rows).unwrap();

    let first_before = &archive_members(&before)[0];
    let first_after = &archive_members(&after)[0];
    assert_eq!(first_before, first_after);
}

#[test]
fn batch_member_with_empty_first_value_gets_fallback_name() {
    let bytes = fixture(&paragraph("{client} owes {amount}."), None);
    let table = extract_tokens(&bytes).unwrap();
    let rows = vec![BatchRow::new(
        1,
        ValueSet::from_pairs([("amount", "$9")]),
    )];
    let archive = compile_batch(&bytes, &table, &rows).unwrap();
    assert_eq!(archive_members(&archive)[0].0, "document_1.docx");
}

// ==================== Authoring Tests ====================

#[test]
fn authoring_rewrites_selection_into_token() {
    let bytes = fixture(&paragraph("Acme Corp agrees. Acme Corp signs."), None);
    let mut log = AuthoringLog::new();
    log.create("Acme Corp", "client", "Full name", true).unwrap();

    let (out, replaced) = apply_replacements(&bytes, &log).unwrap();
    assert_eq!(replaced, 2);

    let table = extract_tokens(&out).unwrap();
    let token = table.get("client").unwrap();
    assert_eq!(token.comment, "Full name");

    let text = document_text(&Container::open(&out).unwrap()).unwrap();
    assert!(text.contains("{client|Full name} agrees. {client|Full name} signs."));
}

#[test]
fn authoring_single_mode_rewrites_first_occurrence_only() {
    let bytes = fixture(&paragraph("Acme, Acme, Acme"), None);
    let mut log = AuthoringLog::new();
    log.create("Acme", "client", "", false).unwrap();

    let (out, replaced) = apply_replacements(&bytes, &log).unwrap();
    assert_eq!(replaced, 1);
    let text = document_text(&Container::open(&out).unwrap()).unwrap();
    assert!(text.contains("{client}, Acme, Acme"));
}

#[test]
fn authored_template_fills_like_any_other() {
    let bytes = fixture(&paragraph("Acme Corp agrees."), None);
    let mut log = AuthoringLog::new();
    log.create("Acme Corp", "client", "", true).unwrap();
    let (template, _) = apply_replacements(&bytes, &log).unwrap();

    let table = extract_tokens(&template).unwrap();
    let merged = fill_document(
        &template,
        &table,
        &ValueSet::from_pairs([("client", "Borg Ltd")]),
    )
    .unwrap();
    let text = document_text(&Container::open(&merged).unwrap()).unwrap();
    assert!(text.contains("Borg Ltd agrees."));
}
