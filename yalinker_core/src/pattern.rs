/// A single asset glob pattern, optionally negated.
///
/// A leading `!` in the raw string marks the pattern as an exclusion and is
/// stripped from [`PatternSpec::pattern`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PatternSpec {
	pub pattern: String,
	pub negated: bool,
}

impl PatternSpec {
	pub fn new(pattern: impl Into<String>, negated: bool) -> Self {
		Self {
			pattern: pattern.into(),
			negated,
		}
	}

	/// Parse a raw pattern string. Surrounding whitespace is trimmed before
	/// the `!` prefix is checked.
	pub fn parse(raw: &str) -> Self {
		let trimmed = raw.trim();
		match trimmed.strip_prefix('!') {
			Some(rest) => Self::new(rest, true),
			None => Self::new(trimmed, false),
		}
	}

	/// Parse every raw pattern, keeping the input order.
	pub fn parse_all<S: AsRef<str>>(raw: &[S]) -> Vec<Self> {
		raw.iter().map(|item| Self::parse(item.as_ref())).collect()
	}
}

impl std::fmt::Display for PatternSpec {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.negated {
			write!(f, "!{}", self.pattern)
		} else {
			f.write_str(&self.pattern)
		}
	}
}
