use markdown::mdast::Node;
use markdown::mdast::Paragraph;
use markdown::mdast::Strong;
use markdown::mdast::Text;

use crate::MathEnvError;
use crate::MathEnvResult;
use crate::error::display_line;
use crate::markers::ResolvedBlock;

/// Render a finalized environment block: splice the bold start decoration
/// into the first buffered node and the end decoration after the last one,
/// returning the replacement node sequence.
pub fn render_environment(block: &ResolvedBlock, mut buffer: Vec<Node>) -> MathEnvResult<Vec<Node>> {
	if buffer.is_empty() {
		return Err(MathEnvError::EmptyBlock {
			name: block.env_name.clone(),
			start_line: display_line(block.start_line),
			end_line: display_line(block.end_line),
		});
	}

	let numbering = if block.add_numbering {
		let numbering = block
			.numbering
			.ok_or_else(|| MathEnvError::MissingNumbering {
				name: block.env_name.clone(),
				line: display_line(block.start_line),
			})?;
		Some(numbering)
	} else {
		None
	};

	splice_start(&mut buffer, start_decoration(block, numbering));
	if !block.end_text.is_empty() {
		splice_end(&mut buffer, &block.end_text);
	}

	Ok(buffer)
}

/// Build the start decoration text: the label, the numbering when enabled,
/// the custom name when present, then the lead-in separator — `. ` for
/// theorem-like environments, a bare space for proofs.
fn start_decoration(block: &ResolvedBlock, numbering: Option<u32>) -> String {
	let mut decoration = block.start_text.clone();
	if let Some(numbering) = numbering {
		decoration.push(' ');
		decoration.push_str(&numbering.to_string());
	}
	if let Some(name) = &block.custom_name {
		decoration.push_str(" (");
		decoration.push_str(name);
		decoration.push(')');
	}
	decoration.push_str(if block.is_proof { " " } else { ". " });
	decoration
}

/// Splice the bold decoration into the first element of the buffer.
///
/// - Paragraph: prepend the decoration as its new first child.
/// - Bare inline (text, emphasis, strong): wrap it together with the
///   decoration inside a fresh paragraph, decoration first.
/// - Anything else: insert a standalone decoration paragraph before it.
fn splice_start(buffer: &mut Vec<Node>, decoration: String) {
	let strong = bold(decoration);

	if let Some(Node::Paragraph(paragraph)) = buffer.first_mut() {
		paragraph.children.insert(0, strong);
		return;
	}

	if matches!(
		buffer.first(),
		Some(Node::Text(_) | Node::Emphasis(_) | Node::Strong(_))
	) {
		let inline = buffer.remove(0);
		buffer.insert(0, paragraph(vec![strong, inline]));
		return;
	}

	buffer.insert(0, paragraph(vec![strong]));
}

/// Splice the end text after the last element of the buffer.
///
/// - Paragraph, emphasis, or strong: append a trailing text child.
/// - Bare text: wrap it together with the trailing text in a fresh
///   paragraph.
/// - Anything else: append a standalone end-text paragraph.
fn splice_end(buffer: &mut Vec<Node>, end_text: &str) {
	let trailing = text(end_text);

	match buffer.last_mut() {
		Some(Node::Paragraph(node)) => {
			node.children.push(trailing);
			return;
		}
		Some(Node::Emphasis(node)) => {
			node.children.push(trailing);
			return;
		}
		Some(Node::Strong(node)) => {
			node.children.push(trailing);
			return;
		}
		_ => {}
	}

	if matches!(buffer.last(), Some(Node::Text(_))) {
		if let Some(inline) = buffer.pop() {
			buffer.push(paragraph(vec![inline, trailing]));
		}
		return;
	}

	buffer.push(paragraph(vec![trailing]));
}

fn text(value: &str) -> Node {
	Node::Text(Text {
		value: String::from(value),
		position: None,
	})
}

fn bold(value: String) -> Node {
	Node::Strong(Strong {
		children: vec![Node::Text(Text {
			value,
			position: None,
		})],
		position: None,
	})
}

fn paragraph(children: Vec<Node>) -> Node {
	Node::Paragraph(Paragraph {
		children,
		position: None,
	})
}
