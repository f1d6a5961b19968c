use crate::MathEnvError;
use crate::MathEnvResult;
use crate::error::display_line;

/// Inline per-block overrides parsed from the optional `[key="value" ...]`
/// group on a start marker. Present fields override the environment's
/// resolved options for that single block instance only.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct EnvParams {
	/// Overrides the start label.
	pub env_start_text: Option<String>,
	/// Overrides the end label. An empty string suppresses end decoration.
	pub env_end_text: Option<String>,
	/// Sets the displayed numbering, bypassing the counter value.
	pub numbering: Option<u32>,
	/// Toggles numbering display for this block.
	pub add_numbering: Option<bool>,
	/// Custom display name rendered as ` (name)` after the label.
	pub name: Option<String>,
}

/// Parse the inline parameters of a start marker.
///
/// Parameters are `key="value"` pairs separated by spaces. Text that does
/// not form a pair is skipped, but a recognized-looking pair with an unknown
/// key or a malformed value is an error naming the key and source line.
pub fn parse_params(raw: &str, line: Option<usize>) -> MathEnvResult<EnvParams> {
	let mut params = EnvParams::default();
	let mut rest = raw;

	while let Some(start) = rest.find(is_ident_char) {
		rest = &rest[start..];
		let key_end = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
		let key = &rest[..key_end];
		rest = &rest[key_end..];

		let Some(after_quote) = rest.strip_prefix("=\"") else {
			continue;
		};
		let Some(value_end) = after_quote.find('"') else {
			// Unterminated value: nothing further can form a pair.
			break;
		};
		let value = &after_quote[..value_end];
		rest = &after_quote[value_end + 1..];

		match key {
			"envStartText" => params.env_start_text = Some(String::from(value)),
			"envEndText" => params.env_end_text = Some(String::from(value)),
			"numbering" => {
				let numbering =
					value
						.parse::<u32>()
						.map_err(|_| MathEnvError::InvalidParameterValue {
							key: String::from(key),
							value: String::from(value),
							line: display_line(line),
						})?;
				params.numbering = Some(numbering);
			}
			"addNumbering" => {
				params.add_numbering = Some(match value {
					"true" => true,
					"false" => false,
					_ => {
						return Err(MathEnvError::InvalidParameterValue {
							key: String::from(key),
							value: String::from(value),
							line: display_line(line),
						});
					}
				});
			}
			"name" => params.name = Some(String::from(value)),
			_ => {
				return Err(MathEnvError::UnknownParameter {
					key: String::from(key),
					line: display_line(line),
				});
			}
		}
	}

	Ok(params)
}

fn is_ident_char(c: char) -> bool {
	c.is_alphanumeric() || c == '_'
}
