use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MathEnvError {
	#[error(transparent)]
	#[diagnostic(code(mathenv::io_error))]
	Io(#[from] std::io::Error),

	#[error("failure to parse markdown: {0}")]
	#[diagnostic(code(mathenv::markdown))]
	Markdown(String),

	#[error("failed to parse config: {0}")]
	#[diagnostic(
		code(mathenv::config_parse),
		help("check that the configuration is valid TOML")
	)]
	ConfigParse(String),

	#[error("incorrect format for the start block marker at line {line}")]
	#[diagnostic(
		code(mathenv::start_marker_format),
		help("start markers look like `::math-env-start{{theorem}}` with an optional trailing `[key=\"value\"]` group")
	)]
	StartMarkerFormat { line: String },

	#[error("incorrect format for the end block marker at line {line}")]
	#[diagnostic(
		code(mathenv::end_marker_format),
		help("end markers look like `::math-env-end{{theorem}}`")
	)]
	EndMarkerFormat { line: String },

	#[error("unknown environment name `{name}` at line {line}")]
	#[diagnostic(
		code(mathenv::unknown_environment),
		help("add the environment to `theorem_envs` or use one of the configured names")
	)]
	UnknownEnvironment { name: String, line: String },

	#[error(
		"incorrect nesting of environments with `{open_name}` start at line {open_line} and \
		 `{end_name}` end at line {end_line}"
	)]
	#[diagnostic(
		code(mathenv::nesting),
		help("end markers must close the innermost open environment")
	)]
	Nesting {
		open_name: String,
		open_line: String,
		end_name: String,
		end_line: String,
	},

	#[error("end marker for `{name}` at line {line} has no matching open environment")]
	#[diagnostic(code(mathenv::nesting))]
	UnexpectedEndMarker { name: String, line: String },

	#[error("empty `{name}` environment block at lines {start_line}-{end_line}")]
	#[diagnostic(code(mathenv::empty_block))]
	EmptyBlock {
		name: String,
		start_line: String,
		end_line: String,
	},

	#[error("missing end marker for `{name}` environment starting at line {line}")]
	#[diagnostic(code(mathenv::unclosed_block))]
	UnclosedBlock { name: String, line: String },

	#[error("numbering requested for `{name}` block at line {line} but no numbering value resolved")]
	#[diagnostic(code(mathenv::missing_numbering))]
	MissingNumbering { name: String, line: String },

	#[error("unknown parameter `{key}` at line {line}")]
	#[diagnostic(
		code(mathenv::unknown_parameter),
		help("recognized parameters: envStartText, envEndText, numbering, addNumbering, name")
	)]
	UnknownParameter { key: String, line: String },

	#[error("invalid value `{value}` for parameter `{key}` at line {line}")]
	#[diagnostic(code(mathenv::invalid_parameter_value))]
	InvalidParameterValue {
		key: String,
		value: String,
		line: String,
	},
}

pub type MathEnvResult<T> = Result<T, MathEnvError>;

/// Render an optional 1-indexed source line for error messages. Position
/// metadata is not guaranteed to exist on hand-built trees.
pub(crate) fn display_line(line: Option<usize>) -> String {
	line.map_or_else(|| String::from("unknown position"), |line| line.to_string())
}
