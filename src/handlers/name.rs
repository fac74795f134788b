//! Event names.
//!
//! A handler's trigger-name specification is either a list of fixed names,
//! known completely at registration, or a dynamic pattern that carries
//! variable substitutions and can only be matched at dispatch time.
//!
//! Fixed names are filed under their standardized form, so equivalent
//! spellings of one event share a bucket:
//!
//! ```
//! use game_events::handlers::standardize_name;
//!
//! assert_eq!(standardize_name("Turn 3"), "turn_3");
//! assert_eq!(standardize_name("  turn__3 "), "turn_3");
//! assert_eq!(standardize_name(&standardize_name("Turn 3")), "turn_3");
//! ```

use smallvec::SmallVec;

/// Marks a variable substitution; any specification containing it is dynamic.
pub const DYNAMIC_MARKER: char = '$';

/// Separates the names of a multi-name specification.
pub const NAME_SEPARATOR: char = ',';

/// Normalize an event name into its bucket key.
///
/// Surrounding whitespace is trimmed, ASCII letters are lowercased, and every
/// run of whitespace and underscores becomes a single `_`. Separators at
/// either end are dropped. The function is total and idempotent.
#[must_use]
pub fn standardize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_whitespace() || ch == '_' {
            pending_separator = true;
            continue;
        }
        if pending_separator && !out.is_empty() {
            out.push('_');
        }
        pending_separator = false;
        out.push(ch.to_ascii_lowercase());
    }

    out
}

/// Parsed trigger-name specification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TriggerName {
    /// One or more standardized fixed names, deduplicated, in listed order.
    Fixed(SmallVec<[String; 1]>),

    /// A raw pattern containing variable segments.
    Dynamic(String),
}

impl TriggerName {
    /// Classify and normalize a raw specification.
    ///
    /// A specification that lists no usable name is filed under the empty name.
    pub fn parse(raw: &str) -> Self {
        if raw.contains(DYNAMIC_MARKER) {
            return Self::Dynamic(raw.to_owned());
        }

        let mut names: SmallVec<[String; 1]> = SmallVec::new();
        for part in raw.split(NAME_SEPARATOR) {
            let name = standardize_name(part);
            if name.is_empty() || names.contains(&name) {
                continue;
            }
            names.push(name);
        }

        if names.is_empty() {
            names.push(String::new());
        }

        Self::Fixed(names)
    }

    /// Check if this specification must be pattern-matched at dispatch time.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }

    /// The standardized fixed names; empty for a dynamic specification.
    #[must_use]
    pub fn fixed_names(&self) -> &[String] {
        match self {
            Self::Fixed(names) => names,
            Self::Dynamic(_) => &[],
        }
    }

    /// The raw pattern of a dynamic specification.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::Fixed(_) => None,
            Self::Dynamic(pattern) => Some(pattern),
        }
    }

    /// Check if a fixed specification lists `name` (after standardization).
    ///
    /// Always `false` for dynamic specifications.
    #[must_use]
    pub fn lists(&self, name: &str) -> bool {
        let name = standardize_name(name);
        self.fixed_names().iter().any(|n| *n == name)
    }
}

impl std::fmt::Display for TriggerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(names) => f.write_str(&names.join(",")),
            Self::Dynamic(pattern) => f.write_str(pattern),
        }
    }
}
