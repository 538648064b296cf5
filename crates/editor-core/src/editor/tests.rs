use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use strata_primitives::{Data, NodeValue};

use super::*;

fn data(value: Value) -> Data {
	match value {
		Value::Object(map) => map,
		other => panic!("expected object, got {other}"),
	}
}

fn editor_with_text(text: &str) -> (Editor, Key) {
	let document = Document::from_values([NodeValue::element("paragraph", [NodeValue::text(text)])]);
	let paragraph = document.children(document.root()).unwrap()[0];
	let leaf = document.children(paragraph).unwrap()[0];
	(Editor::new(document), leaf)
}

#[test]
fn initial_selection_is_root_start() {
	let (editor, _) = editor_with_text("abc");
	assert_eq!(editor.selection(), Selection::caret(editor.document().root(), 0));
	assert!(editor.log().is_empty());
}

#[test]
fn apply_replaces_selection_and_records() {
	let (mut editor, leaf) = editor_with_text("Hello");
	let range = editor.apply(Operation::insert_text(leaf, 5, "!")).unwrap();

	assert_eq!(range, Some(Range::caret(leaf, 6)));
	assert_eq!(editor.selection().range(), Range::caret(leaf, 6));
	assert_eq!(editor.log().len(), 1);
}

#[test]
fn no_op_range_keeps_selection() {
	let (mut editor, leaf) = editor_with_text("Hello");
	editor.apply(Operation::insert_text(leaf, 2, "y")).unwrap();
	let before = editor.selection();

	let range = editor.apply(Operation::update_data(leaf, data(json!({ "lang": "en" })))).unwrap();
	assert_eq!(range, None);
	assert_eq!(editor.selection(), before);
	assert_eq!(editor.log().len(), 2);
}

#[test]
fn rejected_operation_changes_nothing() {
	let (mut editor, leaf) = editor_with_text("abc");
	editor.apply(Operation::insert_text(leaf, 1, "x")).unwrap();
	let selection = editor.selection();

	let err = editor.apply(Operation::delete_text(leaf, 3, 5)).unwrap_err();
	assert_eq!(err, EditError::OutOfBounds { key: leaf, offset: 8, len: 4 });
	assert_eq!(editor.document().text(leaf).unwrap().text(), "axbc");
	assert_eq!(editor.selection(), selection);
	assert_eq!(editor.log().len(), 1);
}

#[test]
fn recording_can_be_disabled() {
	let document = Document::from_values([NodeValue::text("a")]);
	let leaf = document.children(document.root()).unwrap()[0];
	let config = EditorConfig {
		record_operations: false,
		..EditorConfig::default()
	};
	let mut editor = Editor::with_config(document, config);
	editor.apply(Operation::insert_text(leaf, 1, "b")).unwrap();
	assert!(editor.log().is_empty());
}

#[test]
fn replay_stops_at_first_error() {
	let (mut editor, leaf) = editor_with_text("abc");
	let missing = Key::next();
	let err = editor
		.replay([
			Operation::insert_text(leaf, 3, "d"),
			Operation::insert_text(missing, 0, "x"),
			Operation::insert_text(leaf, 0, "never"),
		])
		.unwrap_err();

	assert_eq!(err, EditError::NodeNotFound(missing));
	assert_eq!(editor.document().text(leaf).unwrap().text(), "abcd");
	assert_eq!(editor.log().len(), 1);
}

#[test]
fn set_selection_validates_points() {
	let (mut editor, leaf) = editor_with_text("abc");
	editor.set_selection(Range::span(leaf, 0, 3)).unwrap();
	assert_eq!(editor.selection().range(), Range::span(leaf, 0, 3));

	assert_eq!(
		editor.set_selection(Range::caret(leaf, 4)).unwrap_err(),
		EditError::OutOfBounds { key: leaf, offset: 4, len: 3 }
	);
	let missing = Key::next();
	assert_eq!(
		editor.set_selection(Range::caret(missing, 0)).unwrap_err(),
		EditError::NodeNotFound(missing)
	);
	assert_eq!(editor.selection().range(), Range::span(leaf, 0, 3));
}

#[test]
fn composition_lifecycle_commits_text() {
	let (mut editor, leaf) = editor_with_text("abc");

	assert_eq!(editor.start_composition(leaf, 3).unwrap(), Range::caret(leaf, 3));
	assert_eq!(editor.composing(), Some(leaf));

	assert_eq!(editor.update_composition("n").unwrap(), Range::caret(leaf, 4));
	assert_eq!(editor.update_composition("ni").unwrap(), Range::caret(leaf, 5));
	assert_eq!(editor.selection().range(), Range::caret(leaf, 5));
	assert_eq!(editor.document().text(leaf).unwrap().text(), "abc");

	assert_eq!(
		editor.apply(Operation::insert_text(leaf, 0, "x")).unwrap_err(),
		EditError::CompositionActive(leaf)
	);

	let range = editor.commit_composition().unwrap();
	assert_eq!(range, Range::caret(leaf, 5));
	assert_eq!(editor.composing(), None);

	let text = editor.document().text(leaf).unwrap();
	assert_eq!(text.text(), "abcni");
	assert_eq!(text.composition(), None);
}

#[test]
fn composition_cancel_emits_nothing() {
	let (mut editor, leaf) = editor_with_text("abc");
	editor.start_composition(leaf, 1).unwrap();
	editor.update_composition("zh").unwrap();
	let logged = editor.log().len();

	assert_eq!(editor.cancel_composition().unwrap(), Range::caret(leaf, 1));
	assert_eq!(editor.log().len(), logged);
	assert_eq!(editor.composing(), None);
	assert_eq!(editor.document().text(leaf).unwrap().composition(), None);
	assert_eq!(editor.document().text(leaf).unwrap().text(), "abc");

	editor.apply(Operation::insert_text(leaf, 0, "ok")).unwrap();
}

#[test]
fn composition_misuse_is_rejected() {
	let (mut editor, leaf) = editor_with_text("abc");
	assert_eq!(editor.update_composition("x").unwrap_err(), EditError::NoComposition);
	assert_eq!(editor.commit_composition().unwrap_err(), EditError::NoComposition);
	assert_eq!(editor.cancel_composition().unwrap_err(), EditError::NoComposition);

	editor.start_composition(leaf, 0).unwrap();
	assert_eq!(editor.start_composition(leaf, 0).unwrap_err(), EditError::CompositionActive(leaf));
}

#[test]
fn single_composing_node_per_session() {
	let document = Document::from_values([NodeValue::text("a"), NodeValue::text("b")]);
	let keys = document.children(document.root()).unwrap().to_vec();
	let mut editor = Editor::new(document);

	editor.start_composition(keys[0], 0).unwrap();
	let err = editor
		.apply(Operation::set_composition(keys[1], &Composition::new("x", 0)))
		.unwrap_err();
	assert_eq!(err, EditError::CompositionActive(keys[0]));
	assert_eq!(editor.document().text(keys[1]).unwrap().composition(), None);
}

#[test]
fn empty_commit_returns_to_anchor() {
	let (mut editor, leaf) = editor_with_text("abc");
	editor.start_composition(leaf, 2).unwrap();
	assert_eq!(editor.commit_composition().unwrap(), Range::caret(leaf, 2));
	assert_eq!(editor.document().text(leaf).unwrap().text(), "abc");
}

#[test]
fn composition_field_on_element_is_plain_data() {
	let (mut editor, leaf) = editor_with_text("abc");
	let paragraph = editor.document().parent(leaf).unwrap().unwrap();
	editor.start_composition(leaf, 0).unwrap();

	let patch = data(json!({ "composition": { "text": "x", "offset": 0 } }));
	let range = editor.apply(Operation::update_data(paragraph, patch)).unwrap();
	assert_eq!(range, Some(Range::caret(paragraph, 0)));
	assert_eq!(editor.composing(), Some(leaf));
	assert_eq!(
		editor.document().element(paragraph).unwrap().data().get("composition"),
		Some(&json!({ "text": "x", "offset": 0 }))
	);
}

#[test]
fn logged_insert_node_carries_created_keys() {
	let (mut editor, leaf) = editor_with_text("abc");
	let paragraph = editor.document().parent(leaf).unwrap().unwrap();
	editor.apply(Operation::insert_node(paragraph, 1, NodeValue::text("d"))).unwrap();

	let created = editor.document().children(paragraph).unwrap()[1];
	let Some(Operation::InsertNode { keys, .. }) = editor.log().iter().last() else {
		panic!("expected a logged insert_node");
	};
	assert_eq!(keys, &vec![created]);
}
