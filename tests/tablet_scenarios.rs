//! タブレット統合テスト
//!
//! 公開APIのみでグリフ変換、編集、翻訳、ファイル入出力を通しで確認する

use std::sync::Arc;
use tempfile::TempDir;
use yautja_tablet::error::{DocumentError, FileError};
use yautja_tablet::file::TabletStorage;
use yautja_tablet::glyph::{GlyphEntry, SEGMENT_COUNT};
use yautja_tablet::input::Action;
use yautja_tablet::translate::{parse_pattern_dump, pattern_dump};
use yautja_tablet::{
    translate, Decoded, Document, EditEngine, EditEvent, EditOutcome, GlyphCodec, Pattern,
    RowLayout, Tablet, TabletConfig, TabletError,
};

fn engine(text: &str) -> EditEngine {
    EditEngine::with_text(Arc::new(GlyphCodec::standard()), RowLayout::default(), text)
}

fn text(engine: &EditEngine) -> String {
    translate(engine.document(), engine.codec())
}

#[test]
fn hello_round_trips_through_glyphs() {
    let engine = engine("HELLO");
    assert_eq!(engine.document().len(), 5);
    assert_eq!(text(&engine), "HELLO");
}

#[test]
fn line_break_slot_is_preserved() {
    let engine = engine("A\nB");
    assert_eq!(engine.document().len(), 3);
    assert!(engine.document().get(1).unwrap().is_line_break());
    assert_eq!(text(&engine), "A\nB");
}

#[test]
fn lowercase_input_is_uppercased() {
    assert_eq!(text(&engine("hello")), "HELLO");
}

#[test]
fn toggling_zero_segments() {
    let codec = GlyphCodec::standard();
    let decode_after = |segment: usize| {
        let mut pattern = codec.encode('0');
        pattern.toggle(segment).unwrap();
        codec.decode(&pattern)
    };

    assert_eq!(decode_after(2), Decoded::Unknown);
    assert_eq!(decode_after(1), Decoded::Char('P'));
    assert_eq!(decode_after(9), Decoded::Char('E'));
}

#[test]
fn edited_glyph_translates_to_question_mark() {
    let mut engine = engine("0");
    assert_eq!(
        engine.apply(EditEvent::ToggleSegment { slot: 0, segment: 2 }),
        EditOutcome::Changed
    );
    assert_eq!(text(&engine), "?");
}

#[test]
fn typing_at_origin_replaces_and_advances() {
    let mut engine = engine("HELLO");
    engine.apply(EditEvent::Type('Z'));
    assert_eq!(engine.cursor().position(), 1);
    assert_eq!(engine.document().len(), 5);
    assert_eq!(text(&engine), "ZELLO");
}

#[test]
fn boundary_moves_are_noops() {
    let mut engine = engine("AB");
    assert_eq!(engine.apply(EditEvent::Backspace), EditOutcome::Unchanged);
    assert_eq!(engine.apply(EditEvent::MoveLeft), EditOutcome::Unchanged);
    assert_eq!(engine.apply(EditEvent::MoveRight), EditOutcome::Moved);
    assert_eq!(engine.apply(EditEvent::MoveRight), EditOutcome::Unchanged);
    assert_eq!(engine.cursor().position(), 1);
}

#[test]
fn toggling_line_break_is_rejected_without_change() {
    let mut engine = engine("A\nB");
    let before = engine.document().clone();
    let outcome = engine.apply(EditEvent::ToggleSegment { slot: 1, segment: 0 });
    assert_eq!(outcome, EditOutcome::Rejected(DocumentError::LineBreakSlot { index: 1 }));
    assert_eq!(engine.document(), &before);

    let outcome = engine.apply(EditEvent::ToggleSegment { slot: 0, segment: SEGMENT_COUNT });
    assert_eq!(
        outcome,
        EditOutcome::Rejected(DocumentError::SegmentOutOfRange { segment: SEGMENT_COUNT })
    );
}

#[test]
fn empty_document_accepts_first_character() {
    let mut engine = engine("");
    assert_eq!(engine.apply(EditEvent::MoveDown), EditOutcome::Unchanged);
    assert_eq!(engine.apply(EditEvent::Type('A')), EditOutcome::Changed);
    assert_eq!(text(&engine), "A");
    assert_eq!(engine.cursor().position(), 0);
}

#[test]
fn unmapped_characters_become_blank() {
    let codec = GlyphCodec::standard();
    assert_eq!(codec.encode('!'), Pattern::blank());
    assert_eq!(text(&engine("A!B")), "A B");
}

#[test]
fn custom_table_last_registration_wins() {
    let shared = [1u8; SEGMENT_COUNT];
    let codec =
        GlyphCodec::from_entries([GlyphEntry::new('X', shared), GlyphEntry::new('Y', shared)]);
    assert_eq!(codec.decode(&Pattern::from_bits(shared)), Decoded::Char('Y'));
    assert_eq!(codec.encode('X'), Pattern::from_bits(shared));
}

#[test]
fn pattern_dump_survives_reload() {
    let mut engine = engine("YAUTJA\nPREY");
    engine.apply(EditEvent::ToggleSegment { slot: 2, segment: 7 });
    let dump = pattern_dump(engine.document());
    assert_eq!(dump.lines().count(), engine.document().len());

    let restored: Document = parse_pattern_dump(&dump).unwrap();
    assert_eq!(translate(&restored, engine.codec()), text(&engine));
}

#[test]
fn storage_writes_translation_and_patterns() {
    let dir = TempDir::new().unwrap();
    let codec = GlyphCodec::standard();
    let storage = TabletStorage::new();
    let document = Document::from_text("A\nB", &codec);

    let output = dir.path().join("out").join("output.txt");
    let patterns = dir.path().join("patterns.txt");
    storage.save_translation(&document, &codec, &output).unwrap();
    storage.save_patterns(&document, &patterns).unwrap();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "A\nB");
    let dump = std::fs::read_to_string(&patterns).unwrap();
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "");
    assert_eq!(lines[0], codec.encode('A').to_bit_string());
}

#[test]
fn missing_file_load_is_reported() {
    let dir = TempDir::new().unwrap();
    let storage = TabletStorage::new();
    let err = storage.load_text(&dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, TabletError::File(FileError::NotFound { .. })));
}

#[test]
fn tablet_session_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.txt");
    std::fs::write(&input, "\u{feff}HUNT\r\n").unwrap();

    let config = TabletConfig {
        translation_path: dir.path().join("output.txt"),
        patterns_path: dir.path().join("patterns.txt"),
        default_input: input.clone(),
        ..TabletConfig::default()
    };
    let mut tablet = Tablet::start(config, None).unwrap();
    let now = std::time::Instant::now();

    tablet.handle_action(Action::Edit(EditEvent::MoveRight), now);
    tablet.handle_action(Action::Edit(EditEvent::Type('A')), now);
    tablet.handle_action(Action::SaveTranslation, now);

    assert_eq!(
        std::fs::read_to_string(dir.path().join("output.txt")).unwrap(),
        "HANT\n"
    );
}

#[test]
fn lone_carriage_return_is_dropped_on_load() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("story.txt");
    std::fs::write(&input, "C\rD").unwrap();

    let config = TabletConfig {
        default_input: dir.path().join("input.txt"),
        ..TabletConfig::default()
    };
    let tablet = Tablet::start(config, Some(&input)).unwrap();
    let document = tablet.engine().document();

    assert_eq!(document.len(), 2);
    assert!(document.iter().all(|slot| slot.pattern().is_some()));
    assert_eq!(text(tablet.engine()), "CD");
}
