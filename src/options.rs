use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::MathEnvError;
use crate::MathEnvResult;

/// Marker text opening an environment block.
pub const DEFAULT_START_MARKER: &str = "::math-env-start";
/// Marker text closing an environment block.
pub const DEFAULT_END_MARKER: &str = "::math-env-end";
/// Class name reserved for generated container markup.
pub const DEFAULT_CLASS_NAME: &str = "custom-div";
/// The distinguished proof environment name.
pub const PROOF_ENV: &str = "proof";

/// Theorem-like environments recognized out of the box.
pub const DEFAULT_THEOREM_ENVS: [&str; 6] = [
	"theorem",
	"lemma",
	"corollary",
	"proposition",
	"definition",
	"example",
];

/// Options for a single theorem-like environment.
///
/// ```toml
/// [theorem_envs.claim]
/// start_text = "Claim"
/// counter_label = "theorem"
/// add_numbering = true
/// ```
///
/// Environments sharing a `counter_label` share one numbering sequence.
/// Empty `start_text`/`counter_label` are derived from the environment name
/// during resolution (capitalized and lowercased respectively).
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct TheoremOptions {
	/// The label rendered at the start of the block (e.g., "Theorem").
	pub start_text: String,
	/// The label grouping environments into one numbering sequence.
	pub counter_label: String,
	/// Whether the numbering is rendered. The counter advances either way.
	pub add_numbering: bool,
}

impl Default for TheoremOptions {
	fn default() -> Self {
		Self {
			start_text: String::new(),
			counter_label: String::new(),
			add_numbering: true,
		}
	}
}

/// Options for the proof environment. Extends [`TheoremOptions`] with an end
/// label appended after the block content.
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ProofOptions {
	/// The label rendered at the start of the block (e.g., "Proof:").
	pub start_text: String,
	/// The label grouping environments into one numbering sequence.
	pub counter_label: String,
	/// Whether the numbering is rendered. The counter advances either way.
	pub add_numbering: bool,
	/// The label rendered at the end of the block (e.g., "■"). An empty
	/// string suppresses end decoration.
	pub end_text: String,
}

impl Default for ProofOptions {
	fn default() -> Self {
		Self {
			start_text: String::from("Proof:"),
			counter_label: String::from(PROOF_ENV),
			add_numbering: false,
			end_text: String::from("■"),
		}
	}
}

/// User-facing options for the math environment transform.
///
/// Every field is optional: `None` falls back to the built-in default, while
/// explicitly supplied values are preserved as-is — an empty `theorem_envs`
/// map means "no theorem environments", not "use the defaults".
///
/// ```toml
/// start_marker = "::thm-start"
/// end_marker = "::thm-end"
///
/// [theorem_envs.theorem]
/// start_text = "Theorem"
///
/// [proof_options]
/// end_text = "∎"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct MathEnvOptions {
	/// Map of environment name to its options.
	pub theorem_envs: Option<BTreeMap<String, TheoremOptions>>,
	/// Options for the proof environment.
	pub proof_options: Option<ProofOptions>,
	/// Default class name for generated container markup.
	pub default_class_name: Option<String>,
	/// Marker text opening an environment block.
	pub start_marker: Option<String>,
	/// Marker text closing an environment block.
	pub end_marker: Option<String>,
}

impl MathEnvOptions {
	/// Parse options from a TOML document.
	pub fn from_toml_str(content: &str) -> MathEnvResult<Self> {
		toml::from_str(content).map_err(|e| MathEnvError::ConfigParse(e.to_string()))
	}

	/// Load options from a TOML file.
	pub fn load(path: impl AsRef<Path>) -> MathEnvResult<Self> {
		let content = std::fs::read_to_string(path)?;
		Self::from_toml_str(&content)
	}
}

/// Fully resolved configuration: every recognized environment name has
/// populated options and all top-level fields carry concrete values.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EffectiveOptions {
	pub theorem_envs: BTreeMap<String, TheoremOptions>,
	pub proof_options: ProofOptions,
	pub default_class_name: String,
	pub start_marker: String,
	pub end_marker: String,
}

/// Per-environment options after resolution, with the proof-only `end_text`
/// defaulted to empty for theorem-like environments.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ResolvedEnvOptions {
	pub start_text: String,
	pub counter_label: String,
	pub add_numbering: bool,
	pub end_text: String,
	pub is_proof: bool,
}

impl EffectiveOptions {
	/// Look up the resolved options for an environment name. Returns `None`
	/// for unrecognized names. A `theorem_envs` entry named `proof` takes
	/// precedence over the built-in proof environment.
	pub fn env_options(&self, name: &str) -> Option<ResolvedEnvOptions> {
		if let Some(theorem) = self.theorem_envs.get(name) {
			return Some(ResolvedEnvOptions {
				start_text: theorem.start_text.clone(),
				counter_label: theorem.counter_label.clone(),
				add_numbering: theorem.add_numbering,
				end_text: String::new(),
				is_proof: false,
			});
		}

		if name == PROOF_ENV {
			return Some(ResolvedEnvOptions {
				start_text: self.proof_options.start_text.clone(),
				counter_label: self.proof_options.counter_label.clone(),
				add_numbering: self.proof_options.add_numbering,
				end_text: self.proof_options.end_text.clone(),
				is_proof: true,
			});
		}

		None
	}

	/// Returns `true` if the name refers to a configured environment.
	pub fn is_known_env(&self, name: &str) -> bool {
		self.theorem_envs.contains_key(name) || name == PROOF_ENV
	}
}

/// Merge user options with the documented defaults into a fully populated
/// configuration. This is a pure layered merge: unset (`None`) fields fall
/// back to defaults, explicitly empty values are kept.
pub fn resolve_options(options: &MathEnvOptions) -> EffectiveOptions {
	let theorem_envs = options.theorem_envs.as_ref().map_or_else(
		default_theorem_envs,
		|envs| {
			envs.iter()
				.map(|(name, theorem)| (name.clone(), fill_theorem_options(name, theorem)))
				.collect()
		},
	);

	let proof_options = options
		.proof_options
		.clone()
		.map_or_else(ProofOptions::default, fill_proof_options);

	EffectiveOptions {
		theorem_envs,
		proof_options,
		default_class_name: options
			.default_class_name
			.clone()
			.unwrap_or_else(|| String::from(DEFAULT_CLASS_NAME)),
		start_marker: options
			.start_marker
			.clone()
			.unwrap_or_else(|| String::from(DEFAULT_START_MARKER)),
		end_marker: options
			.end_marker
			.clone()
			.unwrap_or_else(|| String::from(DEFAULT_END_MARKER)),
	}
}

/// Default options for a theorem-like environment derived from its name.
pub fn default_theorem_options(name: &str) -> TheoremOptions {
	TheoremOptions {
		start_text: capitalize(name),
		counter_label: name.to_lowercase(),
		add_numbering: true,
	}
}

fn default_theorem_envs() -> BTreeMap<String, TheoremOptions> {
	DEFAULT_THEOREM_ENVS
		.iter()
		.map(|name| (String::from(*name), default_theorem_options(name)))
		.collect()
}

/// Derive missing per-environment fields from the environment name. The
/// `add_numbering` flag has no derivable default and keeps its value.
fn fill_theorem_options(name: &str, theorem: &TheoremOptions) -> TheoremOptions {
	TheoremOptions {
		start_text: if theorem.start_text.is_empty() {
			capitalize(name)
		} else {
			theorem.start_text.clone()
		},
		counter_label: if theorem.counter_label.is_empty() {
			name.to_lowercase()
		} else {
			theorem.counter_label.clone()
		},
		add_numbering: theorem.add_numbering,
	}
}

/// Derive a missing proof counter label. The start and end labels are kept
/// even when empty: an explicitly empty `end_text` suppresses the end mark.
fn fill_proof_options(proof: ProofOptions) -> ProofOptions {
	ProofOptions {
		counter_label: if proof.counter_label.is_empty() {
			String::from(PROOF_ENV)
		} else {
			proof.counter_label
		},
		..proof
	}
}

fn capitalize(name: &str) -> String {
	let mut chars = name.chars();
	chars.next().map_or_else(String::new, |first| {
		first.to_uppercase().collect::<String>() + chars.as_str()
	})
}
