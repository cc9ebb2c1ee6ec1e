//! End-to-end command runs against the in-memory document host.
//!
//! Documents are written with the carets inline: `|` is an empty selection,
//! `«` and `»` bound a selection whose caret is at `»`.

use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use rstest::rstest;
use typst_companion_engine::editing::{
    Cmd, Document, EditorHost, Outcome, Position, Selection, execute,
};

/// Build a document from text with inline caret marks
fn doc(marked: &str) -> Document {
    let mut text = String::new();
    let mut selections = Vec::new();
    let mut anchor = None;

    for (line_no, line) in marked.split('\n').enumerate() {
        if line_no > 0 {
            text.push('\n');
        }
        let mut col = 0;
        for ch in line.chars() {
            let here = Position::new(line_no, col);
            match ch {
                '|' => selections.push(Selection::cursor(here)),
                '«' => anchor = Some(here),
                '»' => {
                    selections.push(Selection::new(anchor.take().unwrap_or(here), here));
                }
                _ => {
                    text.push(ch);
                    col += 1;
                }
            }
        }
    }

    let mut doc = Document::from_text(&text);
    doc.set_selections(selections);
    doc
}

/// Render the document with its selections marked the way `doc` reads them
fn render(doc: &Document) -> String {
    let text = doc.text();
    let mut lines: Vec<Vec<char>> = text.split('\n').map(|l| l.chars().collect()).collect();

    let mut marks: Vec<(Position, char)> = Vec::new();
    for sel in doc.selections() {
        if sel.is_empty() {
            marks.push((sel.active, '|'));
        } else {
            marks.push((sel.start(), '«'));
            marks.push((sel.end(), '»'));
        }
    }
    // Insert right to left so earlier columns stay valid
    marks.sort_by(|a, b| b.0.cmp(&a.0));
    for (pos, mark) in marks {
        let line = &mut lines[pos.line];
        let col = pos.character.min(line.len());
        line.insert(col, mark);
    }

    lines
        .into_iter()
        .map(|l| l.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn run(marked: &str, cmd: Cmd) -> String {
    let mut document = doc(marked);
    execute(&mut document, cmd).unwrap();
    render(&document)
}

#[test]
fn test_doc_helper_round_trips() {
    let marked = "a |b «cd»\nline two|";
    assert_eq!(render(&doc(marked)), marked);
}

// ============ Inline styles ============

#[test]
fn test_bold_word_under_caret() {
    assert_snapshot!(run("say hel|lo now", Cmd::ToggleBold), @"say *hel|lo* now");
}

#[test]
fn test_bold_caret_between_markers_jumps_out() {
    assert_snapshot!(run("text *|* more", Cmd::ToggleBold), @"text **| more");
}

#[test]
fn test_bold_caret_before_end_marker_jumps_out() {
    assert_snapshot!(run("*strong|* more", Cmd::ToggleBold), @"*strong*| more");
}

#[test]
fn test_italic_on_blank_inserts_pair() {
    assert_snapshot!(run("a | b", Cmd::ToggleItalic), @"a _|_ b");
}

#[test]
fn test_underline_selection() {
    assert_snapshot!(
        run("see «the docs» here", Cmd::ToggleUnderline),
        @"see «#underline[the docs]» here"
    );
}

#[test]
fn test_underline_selection_unwraps() {
    assert_snapshot!(
        run("see «#underline[the docs]» here", Cmd::ToggleUnderline),
        @"see «the docs» here"
    );
}

#[test]
fn test_underline_caret_between_markers() {
    assert_snapshot!(run("#underline[|]", Cmd::ToggleUnderline), @"#underline[]|");
}

#[test]
fn test_strikethrough_task_item() {
    assert_snapshot!(
        run("- [x] wa|sh dishes", Cmd::ToggleStrikethrough),
        @"- [x] #strike[wa|sh dishes]"
    );
}

#[test]
fn test_several_carets_on_one_line() {
    assert_snapshot!(
        run("one| two| three|", Cmd::ToggleBold),
        @"*one*| *two*| *three*|"
    );
}

#[test]
fn test_mixed_selection_and_caret_on_one_line() {
    assert_snapshot!(
        run("«ab» cd|", Cmd::ToggleItalic),
        @"«_ab_» _cd_|"
    );
}

#[rstest]
#[case("plain «text» here")]
#[case("«whole line»")]
#[case("«multi\nline» span")]
#[case("a «größe» b")]
fn test_selection_wrap_unwrap_restores_text(#[case] marked: &str) {
    for cmd in [Cmd::ToggleBold, Cmd::ToggleItalic, Cmd::ToggleUnderline] {
        let mut document = doc(marked);
        let original = document.clone();

        execute(&mut document, cmd).unwrap();
        assert_ne!(document.text(), original.text());
        execute(&mut document, cmd).unwrap();

        assert_eq!(document.text(), original.text(), "{cmd}");
        assert_eq!(render(&document), marked, "{cmd}");
    }
}

// ============ Headings ============

#[rstest]
#[case("Intro|", "= Intro|")]
#[case("= Intro|", "== Intro|")]
#[case("===== Deep|", "====== Deep|")]
#[case("====== Deepest|", "====== Deepest|")]
fn test_heading_increase(#[case] before: &str, #[case] after: &str) {
    assert_eq!(run(before, Cmd::HeadingIncrease), after);
}

#[rstest]
#[case("= Intro|", "Intro|")]
#[case("=== Intro|", "== Intro|")]
#[case("Intro|", "Intro|")]
fn test_heading_decrease(#[case] before: &str, #[case] after: &str) {
    assert_eq!(run(before, Cmd::HeadingDecrease), after);
}

// ============ Lists ============

#[rstest]
#[case("- item|", "* item|")]
#[case("item|", "- item|")]
#[case("1) item|", "item|")]
#[case("12. item|", "1) item|")]
fn test_list_marker_cycle(#[case] before: &str, #[case] after: &str) {
    assert_eq!(run(before, Cmd::ToggleListMarker), after);
}

#[test]
fn test_list_cycle_returns_to_start() {
    let mut document = doc("task|");
    let mut seen = Vec::new();
    for _ in 0..6 {
        execute(&mut document, Cmd::ToggleListMarker).unwrap();
        seen.push(document.text());
    }

    assert_eq!(
        seen,
        vec!["- task", "* task", "+ task", "1. task", "1) task", "task"]
    );
}

#[test]
fn test_list_multiline_selection_is_one_batch() {
    let mut document = doc("«- a\n  - b\nc»\nd");
    let outcome = execute(&mut document, Cmd::ToggleListMarker).unwrap();

    assert_eq!(outcome, Outcome::Applied { edits: 3 });
    assert_eq!(document.version(), 1);
    assert_eq!(document.text(), "* a\n  * b\n- c\nd");
}

#[test]
fn test_list_uses_configured_candidates() {
    let mut document = doc("item|").with_candidate_markers(vec!["1.".into(), "-".into()]);

    execute(&mut document, Cmd::ToggleListMarker).unwrap();
    assert_eq!(document.text(), "1. item");
    execute(&mut document, Cmd::ToggleListMarker).unwrap();
    assert_eq!(document.text(), "- item");
    execute(&mut document, Cmd::ToggleListMarker).unwrap();
    assert_eq!(document.text(), "item");
}

#[test]
fn test_host_line_count_matches_document() {
    let document = doc("a\nb\n|");
    assert_eq!(document.line_count(), 3);
}

// ============ Line endings ============

#[test]
fn test_crlf_document_keeps_its_line_endings() {
    let mut document = Document::from_text("- a\r\n- b\r\nplain");
    document.set_selections(vec![Selection::new(Position::new(0, 0), Position::new(2, 5))]);

    execute(&mut document, Cmd::ToggleListMarker).unwrap();
    assert_eq!(document.to_bytes(), b"* a\r\n* b\r\n- plain");

    // Whole first line plus one word on the second
    let selections = vec![
        Selection::new(Position::new(0, 0), Position::new(0, 3)),
        Selection::new(Position::new(1, 2), Position::new(1, 3)),
    ];
    document.set_selections(selections.clone());

    execute(&mut document, Cmd::ToggleItalic).unwrap();
    assert_eq!(document.to_bytes(), b"_* a_\r\n* _b_\r\n- plain");
    assert_eq!(
        document.selections(),
        vec![
            Selection::new(Position::new(0, 0), Position::new(0, 5)),
            Selection::new(Position::new(1, 2), Position::new(1, 5)),
        ]
    );

    execute(&mut document, Cmd::ToggleItalic).unwrap();
    assert_eq!(document.to_bytes(), b"* a\r\n* b\r\n- plain");
    assert_eq!(document.selections(), selections);
}
