use markdown::mdast::Emphasis;
use markdown::mdast::Heading;
use markdown::mdast::Node;
use markdown::mdast::Paragraph;
use markdown::mdast::Root;
use markdown::mdast::Strong;
use markdown::mdast::Text;
use markdown::unist::Point;
use markdown::unist::Position;

use crate::EffectiveOptions;
use crate::MathEnvOptions;
use crate::ResolvedBlock;
use crate::resolve_options;

pub fn effective() -> EffectiveOptions {
	resolve_options(&MathEnvOptions::default())
}

pub fn position(line: usize) -> Position {
	Position {
		start: Point {
			line,
			column: 1,
			offset: 0,
		},
		end: Point {
			line,
			column: 1,
			offset: 0,
		},
	}
}

pub fn text(value: &str) -> Node {
	Node::Text(Text {
		value: String::from(value),
		position: None,
	})
}

pub fn strong(value: &str) -> Node {
	Node::Strong(Strong {
		children: vec![text(value)],
		position: None,
	})
}

pub fn emphasis(value: &str) -> Node {
	Node::Emphasis(Emphasis {
		children: vec![text(value)],
		position: None,
	})
}

pub fn paragraph(children: Vec<Node>) -> Node {
	Node::Paragraph(Paragraph {
		children,
		position: None,
	})
}

pub fn text_paragraph(value: &str) -> Node {
	paragraph(vec![text(value)])
}

pub fn heading(value: &str) -> Node {
	Node::Heading(Heading {
		children: vec![text(value)],
		position: None,
		depth: 3,
	})
}

/// A marker paragraph without position metadata.
pub fn marker(value: &str) -> Node {
	paragraph(vec![text(value)])
}

/// A marker paragraph carrying a source line.
pub fn marker_at(value: &str, line: usize) -> Node {
	Node::Paragraph(Paragraph {
		children: vec![Node::Text(Text {
			value: String::from(value),
			position: Some(position(line)),
		})],
		position: Some(position(line)),
	})
}

pub fn root(children: Vec<Node>) -> Root {
	Root {
		children,
		position: None,
	}
}

pub fn proof_block() -> ResolvedBlock {
	ResolvedBlock {
		env_name: String::from("proof"),
		start_line: Some(1),
		end_line: Some(3),
		start_text: String::from("Proof:"),
		end_text: String::from("■"),
		add_numbering: false,
		numbering: Some(1),
		custom_name: None,
		is_proof: true,
	}
}

pub fn theorem_block(numbering: u32) -> ResolvedBlock {
	ResolvedBlock {
		env_name: String::from("theorem"),
		start_line: Some(1),
		end_line: Some(3),
		start_text: String::from("Theorem"),
		end_text: String::new(),
		add_numbering: true,
		numbering: Some(numbering),
		custom_name: None,
		is_proof: false,
	}
}
