use markdown::mdast::Node;

use crate::MathEnvError;
use crate::MathEnvResult;
use crate::error::display_line;
use crate::options::EffectiveOptions;
use crate::params::parse_params;
use crate::scanner::CounterTable;

/// One currently-open environment block. Created when a valid start marker
/// is scanned, finalized when the matching end marker is seen, and consumed
/// by the renderer immediately afterwards.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BlockDescriptor {
	/// The environment name from the start marker.
	pub env_name: String,
	/// 1-indexed line of the start marker, when position metadata exists.
	pub start_line: Option<usize>,
	/// 1-indexed line of the end marker, set when the block is closed.
	pub end_line: Option<usize>,
	/// Raw inline parameter text from the start marker (without brackets).
	pub raw_params: String,
	/// Post-increment counter value assigned when the block was opened.
	pub numbering: u32,
}

/// A descriptor with all options merged, ready for rendering. Precedence:
/// inline parameters, then the environment's resolved options (which already
/// layer user configuration over the built-in defaults).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ResolvedBlock {
	pub env_name: String,
	pub start_line: Option<usize>,
	pub end_line: Option<usize>,
	/// The start label. Rendered bold, followed by the numbering when
	/// enabled and the custom name when present.
	pub start_text: String,
	/// The end label. Empty suppresses end decoration entirely.
	pub end_text: String,
	/// Whether the numbering is rendered.
	pub add_numbering: bool,
	/// The numbering value to render.
	pub numbering: Option<u32>,
	/// Custom display name rendered as ` (name)`.
	pub custom_name: Option<String>,
	/// Proof blocks use a bare space after the label instead of the
	/// sentence-style `. ` lead-in.
	pub is_proof: bool,
}

impl BlockDescriptor {
	/// Merge the environment's resolved options and the block's inline
	/// parameter overrides into a [`ResolvedBlock`].
	pub fn resolve(self, options: &EffectiveOptions) -> MathEnvResult<ResolvedBlock> {
		let params = parse_params(&self.raw_params, self.start_line)?;
		let base = options
			.env_options(&self.env_name)
			.ok_or_else(|| MathEnvError::UnknownEnvironment {
				name: self.env_name.clone(),
				line: display_line(self.start_line),
			})?;

		Ok(ResolvedBlock {
			start_text: params.env_start_text.unwrap_or(base.start_text),
			end_text: params.env_end_text.unwrap_or(base.end_text),
			add_numbering: params.add_numbering.unwrap_or(base.add_numbering),
			numbering: params.numbering.or(Some(self.numbering)),
			custom_name: params.name,
			is_proof: base.is_proof,
			env_name: self.env_name,
			start_line: self.start_line,
			end_line: self.end_line,
		})
	}
}

/// Extract the trimmed text of a candidate marker node. Markers are only
/// ever recognized on paragraph nodes whose first inline child is text; any
/// other node shape returns `None` even if it contains the marker string
/// elsewhere.
pub(crate) fn marker_text(node: &Node) -> Option<&str> {
	let Node::Paragraph(paragraph) = node else {
		return None;
	};

	match paragraph.children.first() {
		Some(Node::Text(text)) => Some(text.value.trim()),
		_ => None,
	}
}

pub(crate) fn node_line(node: &Node) -> Option<usize> {
	node.position().map(|position| position.start.line)
}

/// Parse a start marker node of the form `STARTMARKER{name}[params]` (the
/// bracket group is optional). Advances the counter shared by the
/// environment's counter label — even when numbering display is disabled —
/// and returns the new open-block descriptor.
pub fn parse_start_marker(
	node: &Node,
	options: &EffectiveOptions,
	counters: &mut CounterTable,
) -> MathEnvResult<BlockDescriptor> {
	let value = marker_text(node).unwrap_or_default();
	let line = node_line(node);

	let rest = value
		.strip_prefix(options.start_marker.as_str())
		.ok_or_else(|| MathEnvError::StartMarkerFormat {
			line: display_line(line),
		})?;
	let (env_name, rest) = read_braced(rest).ok_or_else(|| MathEnvError::StartMarkerFormat {
		line: display_line(line),
	})?;
	let raw_params = if rest.starts_with('[') {
		let (params, _) = read_bracketed(rest).ok_or_else(|| MathEnvError::StartMarkerFormat {
			line: display_line(line),
		})?;
		String::from(params)
	} else {
		String::new()
	};

	let base = options
		.env_options(env_name)
		.ok_or_else(|| MathEnvError::UnknownEnvironment {
			name: String::from(env_name),
			line: display_line(line),
		})?;
	let numbering = counters.advance(&base.counter_label);

	Ok(BlockDescriptor {
		env_name: String::from(env_name),
		start_line: line,
		end_line: None,
		raw_params,
		numbering,
	})
}

/// Validate an end marker node of the form `ENDMARKER{name}` against the
/// open-block stack and record the end position on the innermost
/// descriptor. Popping the stack is owned by the scanner, not done here.
pub fn parse_end_marker(
	node: &Node,
	options: &EffectiveOptions,
	open_blocks: &mut [BlockDescriptor],
	buffers: &[Vec<Node>],
) -> MathEnvResult<()> {
	let value = marker_text(node).unwrap_or_default();
	let line = node_line(node);

	let rest = value
		.strip_prefix(options.end_marker.as_str())
		.ok_or_else(|| MathEnvError::EndMarkerFormat {
			line: display_line(line),
		})?;
	let (env_name, _) = read_braced(rest).ok_or_else(|| MathEnvError::EndMarkerFormat {
		line: display_line(line),
	})?;

	if !options.is_known_env(env_name) {
		return Err(MathEnvError::UnknownEnvironment {
			name: String::from(env_name),
			line: display_line(line),
		});
	}

	let Some(open) = open_blocks.last_mut() else {
		return Err(MathEnvError::UnexpectedEndMarker {
			name: String::from(env_name),
			line: display_line(line),
		});
	};

	if open.env_name != env_name {
		return Err(MathEnvError::Nesting {
			open_name: open.env_name.clone(),
			open_line: display_line(open.start_line),
			end_name: String::from(env_name),
			end_line: display_line(line),
		});
	}

	if buffers.last().is_none_or(Vec::is_empty) {
		return Err(MathEnvError::EmptyBlock {
			name: String::from(env_name),
			start_line: display_line(open.start_line),
			end_line: display_line(line),
		});
	}

	open.end_line = line;
	Ok(())
}

/// Read a `{name}` group at the start of the input, returning the name and
/// the remaining text after the closing brace.
fn read_braced(input: &str) -> Option<(&str, &str)> {
	let inner = input.strip_prefix('{')?;
	let end = inner.find('}')?;
	Some((&inner[..end], &inner[end + 1..]))
}

/// Read a `[params]` group at the start of the input. The group extends to
/// the last closing bracket so quoted values may contain `]`.
fn read_bracketed(input: &str) -> Option<(&str, &str)> {
	let inner = input.strip_prefix('[')?;
	let end = inner.rfind(']')?;
	Some((&inner[..end], &inner[end + 1..]))
}
