use serde_json::json;

use super::*;

#[test]
fn text_node_edits_by_char_offset() {
	let mut text = TextNode::new("héllo", Data::new());
	assert_eq!(text.len_chars(), 5);
	text.insert(2, "ÿ");
	assert_eq!(text.text(), "héÿllo");
	text.remove(1, 2);
	assert_eq!(text.text(), "hllo");
}

#[test]
fn composition_is_replaced_wholesale() {
	let mut text = TextNode::new("abc", Data::new());
	assert_eq!(text.set_composition(Some(Composition::new("n", 1))), None);
	let previous = text.set_composition(Some(Composition::new("ni", 1)));
	assert_eq!(previous, Some(Composition::new("n", 1)));
	assert_eq!(text.composition(), Some(&Composition::new("ni", 1)));
}

#[test]
fn element_node_children() {
	let mut data = Data::new();
	data.insert("type".to_owned(), json!("paragraph"));
	let mut element = ElementNode::new(data);
	assert_eq!(element.last_child(), None);

	let (a, b, c) = (Key::next(), Key::next(), Key::next());
	element.push_child(a);
	element.push_child(c);
	element.insert_child(1, b);

	assert_eq!(element.children(), &[a, b, c]);
	assert_eq!(element.children_size(), 3);
	assert_eq!(element.child(1), Some(b));
	assert_eq!(element.child(3), None);
	assert_eq!(element.last_child(), Some(c));
	assert_eq!(element.element_type(), Some("paragraph"));
}

#[test]
fn node_discrimination() {
	let node = Node::new(Key::next(), NodeData::Text(TextNode::new("x", Data::new())));
	assert!(node.is_text());
	assert!(!node.is_element());
	assert_eq!(node.kind(), NodeKind::Text);
	assert!(node.as_element().is_none());
	assert_eq!(node.as_text().map(TextNode::text), Some("x".to_owned()));
}
