use std::collections::BTreeMap;

use markdown::ParseOptions;
use markdown::mdast::Node;
use markdown::mdast::Root;
use markdown::to_mdast;
use tracing::debug;
use tracing::trace;

use crate::MathEnvError;
use crate::MathEnvResult;
use crate::error::display_line;
use crate::markers::BlockDescriptor;
use crate::markers::marker_text;
use crate::markers::parse_end_marker;
use crate::markers::parse_start_marker;
use crate::options::MathEnvOptions;
use crate::options::resolve_options;
use crate::render::render_environment;

/// Numbering state for one transform invocation. One counter per distinct
/// counter label, initialized lazily to zero and advanced exactly once per
/// recognized start marker.
#[derive(Debug, Default)]
pub struct CounterTable {
	counts: BTreeMap<String, u32>,
}

impl CounterTable {
	/// Increment the counter for a label and return the new value. The first
	/// advance of a label yields `1`.
	pub fn advance(&mut self, label: &str) -> u32 {
		let count = self.counts.entry(String::from(label)).or_insert(0);
		*count += 1;
		*count
	}

	/// The current value of a label's counter, if it has ever advanced.
	pub fn current(&self, label: &str) -> Option<u32> {
		self.counts.get(label).copied()
	}
}

enum NodeKind {
	StartMarker,
	EndMarker,
	Ordinary,
}

/// Rewrite every well-formed environment block in the tree into its rendered
/// form, leaving all other content untouched and in original order.
///
/// The tree's top-level children are consumed exactly once, left to right,
/// with an explicit stack of open blocks and a parallel stack of content
/// buffers. Malformed input fails the whole transform; no partial output is
/// produced. All numbering state is local to this call, so concurrent
/// invocations are independent.
pub fn transform(tree: Root, options: &MathEnvOptions) -> MathEnvResult<Root> {
	let effective = resolve_options(options);
	let mut counters = CounterTable::default();
	let mut output: Vec<Node> = Vec::with_capacity(tree.children.len());
	let mut open_blocks: Vec<BlockDescriptor> = Vec::new();
	let mut buffers: Vec<Vec<Node>> = Vec::new();
	let mut rendered = 0usize;

	for node in tree.children {
		let kind = match marker_text(&node) {
			Some(value) if value.starts_with(effective.start_marker.as_str()) => {
				NodeKind::StartMarker
			}
			Some(value) if value.starts_with(effective.end_marker.as_str()) => NodeKind::EndMarker,
			_ => NodeKind::Ordinary,
		};

		match kind {
			NodeKind::StartMarker => {
				let descriptor = parse_start_marker(&node, &effective, &mut counters)?;
				trace!(
					env = %descriptor.env_name,
					line = ?descriptor.start_line,
					numbering = descriptor.numbering,
					"opened environment block"
				);
				open_blocks.push(descriptor);
				buffers.push(Vec::new());
			}
			NodeKind::EndMarker => {
				parse_end_marker(&node, &effective, &mut open_blocks, &buffers)?;

				// Validation guarantees a matching open block on both stacks.
				if let (Some(descriptor), Some(buffer)) = (open_blocks.pop(), buffers.pop()) {
					trace!(env = %descriptor.env_name, "closed environment block");
					let resolved = descriptor.resolve(&effective)?;
					let nodes = render_environment(&resolved, buffer)?;
					rendered += 1;

					// An inner block's rendering belongs to the enclosing
					// buffer while nesting remains.
					match buffers.last_mut() {
						Some(enclosing) => enclosing.extend(nodes),
						None => output.extend(nodes),
					}
				}
			}
			NodeKind::Ordinary => {
				match buffers.last_mut() {
					Some(buffer) => buffer.push(node),
					None => output.push(node),
				}
			}
		}
	}

	if let Some(open) = open_blocks.first() {
		return Err(MathEnvError::UnclosedBlock {
			name: open.env_name.clone(),
			line: display_line(open.start_line),
		});
	}

	debug!(blocks = rendered, nodes = output.len(), "math environment transform complete");

	Ok(Root {
		children: output,
		position: tree.position,
	})
}

/// Parse markdown content (GFM) and transform it in one step.
pub fn process(content: impl AsRef<str>, options: &MathEnvOptions) -> MathEnvResult<Root> {
	let parse_options = ParseOptions::gfm();
	let mdast = to_mdast(content.as_ref(), &parse_options)
		.map_err(|e| MathEnvError::Markdown(e.to_string()))?;
	let Node::Root(root) = mdast else {
		return Err(MathEnvError::Markdown(String::from(
			"expected a root node from the markdown parser",
		)));
	};

	transform(root, options)
}
