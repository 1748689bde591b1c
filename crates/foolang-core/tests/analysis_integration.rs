//! End-to-end tests for the analysis pipeline: context -> unit -> tree

use std::io::Write;

use foolang_core::{
    count_examples, AnalysisContext, ContextConfig, NodeKind, SourceLocation, TokenKind,
};

#[test]
fn clean_buffer_parses_without_diagnostics() {
    let mut ctx = AnalysisContext::default();
    let unit = ctx.get_from_buffer("foo.txt", b"example null example");

    assert!(!unit.has_diagnostics());
    let root = unit.root().expect("a clean parse has a root");
    assert_eq!(root.kind(), NodeKind::ItemList);

    let kinds: Vec<_> = root.children().map(|child| child.kind()).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::Example, NodeKind::NullItem, NodeKind::Example]
    );
}

#[test]
fn item_queries_match_original_behavior() {
    let mut ctx = AnalysisContext::default();
    let unit = ctx.get_from_buffer("foo.txt", b"example null example");
    let root = unit.root().unwrap();

    let all_items = root.all_items().unwrap();
    let example_items = root.example_items().unwrap();

    assert_eq!(all_items.len(), 3);
    assert_eq!(example_items.len(), 2);
    assert_eq!(count_examples(&example_items).unwrap(), 2);
    assert!(count_examples(&all_items).is_err());
    assert_eq!(count_examples(&[]).unwrap(), 0);
}

#[test]
fn diagnostics_carry_positions() {
    let mut ctx = AnalysisContext::default();
    let unit = ctx.get_from_buffer("foo.txt", b"example\nfrobnicate null");

    assert!(unit.has_diagnostics());
    let diag = &unit.diagnostics()[0];
    assert!(diag.message.contains("\"frobnicate\""));
    assert_eq!(diag.sloc_range.start, SourceLocation::new(2, 1));

    // Recovery: both valid items are still in the tree
    assert_eq!(unit.root().unwrap().children_count(), 2);
}

#[test]
fn unit_is_reparsed_for_same_filename() {
    let mut ctx = AnalysisContext::default();
    ctx.get_from_buffer("foo.txt", b"example");
    ctx.get_from_buffer("foo.txt", b"null null null");

    assert_eq!(ctx.unit_count(), 1);
    let unit = ctx.unit("foo.txt").unwrap();
    assert_eq!(unit.root().unwrap().children_count(), 3);
    assert!(!unit.has_diagnostics());
}

#[test]
fn get_from_file_reads_and_parses() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "example # comment\nnull").unwrap();

    let mut ctx = AnalysisContext::default();
    let unit = ctx.get_from_file(file.path());

    assert!(!unit.has_diagnostics());
    assert_eq!(unit.root().unwrap().children_count(), 2);
    assert_eq!(unit.filename(), file.path().display().to_string());
}

#[test]
fn missing_file_yields_unit_with_diagnostic() {
    let mut ctx = AnalysisContext::default();
    let unit = ctx.get_from_file("/nonexistent/never/here.txt");

    assert!(unit.root().is_none());
    assert_eq!(unit.diagnostics().len(), 1);
    assert!(unit.diagnostics()[0].message.contains("Cannot read"));
}

#[test]
fn trivia_configuration_controls_token_stream() {
    let config = ContextConfig::builder().with_trivia(false).build().unwrap();
    let mut ctx = AnalysisContext::new(config);
    let unit = ctx.get_from_buffer("foo.txt", b"example  # note\nnull");

    let kinds: Vec<_> = unit.tokens().iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Example, TokenKind::Null, TokenKind::Termination]
    );
}

#[test]
fn latin1_context_decodes_high_bytes() {
    let config = ContextConfig::builder()
        .charset("iso-8859-1")
        .build()
        .unwrap();
    let mut ctx = AnalysisContext::new(config);
    // "example" followed by a Latin-1 comment with an accented character
    let unit = ctx.get_from_buffer("foo.txt", b"example # caf\xe9");

    assert!(!unit.has_diagnostics());
    assert_eq!(unit.root().unwrap().children_count(), 1);
    assert!(unit.text().contains('\u{e9}'));
}

#[test]
fn node_image_is_stable() {
    let mut ctx = AnalysisContext::default();
    let unit = ctx.get_from_buffer("foo.txt", b"example null");
    let root = unit.root().unwrap();

    assert_eq!(root.image(), "<ItemList foo.txt:1:1-1:13>");
    assert_eq!(root.child(0).unwrap().image(), "<Example foo.txt:1:1-1:8>");
    assert_eq!(
        root.child(1).unwrap().image(),
        "<NullItem foo.txt:1:9-1:13>"
    );
}
