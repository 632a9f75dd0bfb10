use markdown_ir::{Block, IncrementalParser, ParseOptions, Span, parse};

fn spans_to_text(spans: &[Span], source: &[u8]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text(tc) | Span::Code(tc) | Span::Html(tc) => out.push_str(&tc.string(source)),
            Span::Emphasis(children)
            | Span::Strong(children)
            | Span::Strikethrough(children)
            | Span::Underline(children) => out.push_str(&spans_to_text(children, source)),
            Span::Link { children, .. } | Span::Image { alt: children, .. } => {
                out.push_str(&spans_to_text(children, source))
            }
            Span::WikiLink { children, .. } => out.push_str(&spans_to_text(children, source)),
            Span::LineBreak | Span::SoftBreak => out.push(' '),
            Span::LatexInline(tc) | Span::LatexDisplay(tc) => out.push_str(&tc.string(source)),
        }
    }
    out
}

fn type_sequence(blocks: &[Block]) -> Vec<&'static str> {
    blocks.iter().map(Block::type_tag).collect()
}

#[test]
fn heading_with_emphasis() {
    let doc = parse("# Hello *world*", ParseOptions::default()).unwrap();
    assert_eq!(doc.blocks.len(), 1);
    match &doc.blocks[0] {
        Block::Heading { level, spans, .. } => {
            assert_eq!(*level, 1);
            assert_eq!(spans_to_text(spans, doc.source()), "Hello world");
        }
        other => panic!("expected heading, got {other:?}"),
    }
}

#[test]
fn tight_task_list_synthesizes_paragraphs_per_item() {
    let doc = parse("- [x] Done\n- [ ] Todo", ParseOptions::default()).unwrap();
    assert_eq!(doc.blocks.len(), 1);
    match &doc.blocks[0] {
        Block::List { ordered, tight, items, .. } => {
            assert!(!ordered);
            assert!(*tight);
            assert_eq!(items.len(), 2);
            assert!(items[0].is_task && items[0].is_checked);
            assert!(items[1].is_task && !items[1].is_checked);
            assert_eq!(items[0].children.len(), 1);
            assert!(matches!(items[0].children[0], Block::Paragraph { .. }));
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn fenced_code_block_captures_language_and_content() {
    let doc = parse("```swift\nlet value = 1\n```", ParseOptions::default()).unwrap();
    assert_eq!(doc.blocks.len(), 1);
    match &doc.blocks[0] {
        Block::CodeBlock { language, content, .. } => {
            assert_eq!(language.as_ref().unwrap().string(doc.source()), "swift");
            assert!(content.string(doc.source()).contains("let value = 1"));
        }
        other => panic!("expected code block, got {other:?}"),
    }
}

#[test]
fn entity_decoding_in_paragraph_text() {
    let doc = parse("Fish &amp; Chips", ParseOptions::default()).unwrap();
    assert_eq!(doc.blocks.len(), 1);
    match &doc.blocks[0] {
        Block::Paragraph { spans, .. } => {
            assert_eq!(spans_to_text(spans, doc.source()), "Fish & Chips");
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn incremental_heading_and_paragraph_split_across_chunks_matches_one_shot() {
    let engine = IncrementalParser::new(ParseOptions::default());
    engine.append("# Hel").unwrap();
    engine.append("lo\n\nWor").unwrap();
    engine.append("ld\n").unwrap();
    let incremental = engine.finalize().unwrap();

    let one_shot = parse("# Hello\n\nWorld\n", ParseOptions::default()).unwrap();

    assert_eq!(incremental.blocks.len(), 2);
    assert_eq!(type_sequence(&incremental.blocks), type_sequence(&one_shot.blocks));

    match (&incremental.blocks[0], &one_shot.blocks[0]) {
        (Block::Heading { spans: a, .. }, Block::Heading { spans: b, .. }) => {
            assert_eq!(spans_to_text(a, incremental.source()), spans_to_text(b, one_shot.source()));
        }
        _ => panic!("expected headings"),
    }
    match (&incremental.blocks[1], &one_shot.blocks[1]) {
        (Block::Paragraph { spans: a, .. }, Block::Paragraph { spans: b, .. }) => {
            assert_eq!(spans_to_text(a, incremental.source()), spans_to_text(b, one_shot.source()));
        }
        _ => panic!("expected paragraphs"),
    }
}

#[test]
fn incremental_fenced_code_split_across_chunks_freezes_only_once_closed() {
    let engine = IncrementalParser::new(ParseOptions::default());
    engine.append("```swift\n").unwrap();
    assert_eq!(engine.stable_block_count(), 0);
    engine.append("let x = 1\n").unwrap();
    assert_eq!(engine.stable_block_count(), 0);
    engine.append("let y = 2\n").unwrap();
    assert_eq!(engine.stable_block_count(), 0);
    engine.append("```\n").unwrap();

    let doc = engine.finalize().unwrap();
    assert_eq!(doc.blocks.len(), 1);
    match &doc.blocks[0] {
        Block::CodeBlock { content, .. } => {
            let text = content.string(doc.source());
            let x_pos = text.find("let x = 1").unwrap();
            let y_pos = text.find("let y = 2").unwrap();
            assert!(x_pos < y_pos);
        }
        other => panic!("expected code block, got {other:?}"),
    }
}

#[test]
fn every_stored_range_is_within_source_bounds() {
    let doc = parse(
        "# Title\n\n- item\n  - nested\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n> quote\n",
        ParseOptions::default(),
    )
    .unwrap();

    fn check_blocks(blocks: &[Block], len: usize) {
        for block in blocks {
            match block {
                Block::Paragraph { range, .. } | Block::Heading { range, .. } | Block::ThematicBreak { range, .. } => {
                    assert!(range.start as usize <= range.end as usize);
                    assert!(range.end as usize <= len);
                }
                Block::BlockQuote { children, .. } => check_blocks(children, len),
                Block::List { items, .. } => {
                    for item in items {
                        check_blocks(&item.children, len);
                    }
                }
                Block::Table { header_rows, body_rows, .. } => {
                    for row in header_rows.iter().chain(body_rows.iter()) {
                        for _cell in &row.cells {}
                    }
                }
                Block::CodeBlock { .. } | Block::HtmlBlock { .. } => {}
            }
        }
    }
    check_blocks(&doc.blocks, doc.source().len());
}

#[test]
fn parse_is_byte_exact_source_retention() {
    let src = "# Hello\n\nworld with *emphasis* and `code`\n";
    let doc = parse(src, ParseOptions::default()).unwrap();
    assert_eq!(doc.source(), src.as_bytes());
}

#[test]
fn incremental_append_of_empty_bytes_does_not_change_observable_state() {
    let engine = IncrementalParser::new(ParseOptions::default());
    engine.append("# Hello\n\n").unwrap();
    let before = engine.stable_block_count();
    engine.append("").unwrap();
    assert_eq!(engine.stable_block_count(), before);
}
