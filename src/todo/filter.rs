use core::{convert::Infallible, fmt, str::FromStr};

/// Which to-do items are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
	All,
	Active,
	Completed,
}

impl Default for Filter {
	fn default() -> Self {
		Filter::All
	}
}

impl Filter {
	/// Parses a URL fragment token like `#/active` or `/completed`.
	///
	/// The leading `#` is optional. Anything unrecognised, including the empty token, selects [`Filter::All`].
	#[must_use]
	pub fn parse_token(token: &str) -> Self {
		match token.strip_prefix('#').unwrap_or(token) {
			"/active" => Filter::Active,
			"/completed" => Filter::Completed,
			_ => Filter::All,
		}
	}

	/// The URL fragment (including `#`) that selects this filter.
	#[must_use]
	pub fn fragment(self) -> &'static str {
		match self {
			Filter::All => "#/",
			Filter::Active => "#/active",
			Filter::Completed => "#/completed",
		}
	}

	/// Whether an item with the given completion state is shown.
	#[must_use]
	pub fn shows(self, completed: bool) -> bool {
		match self {
			Filter::All => true,
			Filter::Active => !completed,
			Filter::Completed => completed,
		}
	}
}

impl FromStr for Filter {
	type Err = Infallible;

	fn from_str(token: &str) -> Result<Self, Self::Err> {
		Ok(Self::parse_token(token))
	}
}

impl fmt::Display for Filter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.fragment())
	}
}

#[cfg(test)]
mod tests {
	use super::Filter;

	#[test]
	fn parses_fragments_with_and_without_hash() {
		assert_eq!(Filter::parse_token("#/active"), Filter::Active);
		assert_eq!(Filter::parse_token("/active"), Filter::Active);
		assert_eq!(Filter::parse_token("#/completed"), Filter::Completed);
		assert_eq!(Filter::parse_token("/completed"), Filter::Completed);
		assert_eq!(Filter::parse_token("#/"), Filter::All);
	}

	#[test]
	fn unknown_tokens_select_all() {
		for token in &["", "#", "/", "active", "#/Active", "#/completed/", "garbage"] {
			assert_eq!(Filter::parse_token(token), Filter::All, "{:?}", token);
		}
	}

	#[test]
	fn fragments_parse_back() {
		for &filter in &[Filter::All, Filter::Active, Filter::Completed] {
			assert_eq!(filter.fragment().parse::<Filter>(), Ok(filter));
		}
	}

	#[test]
	fn shows() {
		assert!(Filter::All.shows(true) && Filter::All.shows(false));
		assert!(Filter::Active.shows(false) && !Filter::Active.shows(true));
		assert!(Filter::Completed.shows(true) && !Filter::Completed.shows(false));
	}
}
