//! Alias table: static rewrites from a specifier prefix to a filesystem path.
//!
//! ## Pattern forms
//!
//! - `mylib`: matches `mylib` exactly, or `mylib/<rest>`.
//! - `@/`: trailing slash, matches any specifier starting with `@/`.
//! - `@app/*`: trailing wildcard, matches `@app/<rest>` with a non-empty rest.
//!   A `*` in the replacement is substituted with the rest; otherwise the
//!   rest is joined onto the replacement.
//!
//! The longest literal prefix wins. Two different patterns matching a
//! specifier with the same literal length are rejected as ambiguous instead of
//! being resolved by registration order.

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternKind {
    /// `name` or `name/...`
    Exact,
    /// Ends with `/`.
    Prefix,
    /// Ends with `*`.
    Wildcard,
}

/// A single rewrite rule.
#[derive(Debug, Clone)]
pub struct AliasRule {
    pattern: String,
    replacement: PathBuf,
    kind: PatternKind,
}

impl AliasRule {
    /// The pattern as registered.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The absolute replacement path.
    #[must_use]
    pub fn replacement(&self) -> &Path {
        &self.replacement
    }

    /// The part of the pattern that must literally prefix a specifier.
    fn literal(&self) -> &str {
        match self.kind {
            PatternKind::Wildcard => &self.pattern[..self.pattern.len() - 1],
            PatternKind::Exact | PatternKind::Prefix => &self.pattern,
        }
    }

    /// Returns the remainder of `specifier` past the pattern when it matches.
    fn strip<'s>(&self, specifier: &'s str) -> Option<&'s str> {
        let rest = specifier.strip_prefix(self.literal())?;
        match self.kind {
            PatternKind::Exact if rest.is_empty() => Some(rest),
            PatternKind::Exact => rest.strip_prefix('/'),
            PatternKind::Prefix => Some(rest),
            PatternKind::Wildcard if rest.is_empty() => None,
            PatternKind::Wildcard => Some(rest),
        }
    }

    fn target(&self, rest: &str) -> PathBuf {
        if self.kind == PatternKind::Wildcard {
            let replacement = self.replacement.to_string_lossy();
            if replacement.contains('*') {
                return PathBuf::from(replacement.replacen('*', rest, 1));
            }
        }
        if rest.is_empty() {
            self.replacement.clone()
        } else {
            self.replacement.join(rest.trim_start_matches('/'))
        }
    }
}

/// Result of a successful alias lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasMatch<'a> {
    /// The pattern that matched.
    pub pattern: &'a str,
    /// Replacement adjusted for the remainder of the specifier.
    pub target: PathBuf,
}

/// Ordered set of alias rules.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    rules: Vec<AliasRule>,
}

impl AliasTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule.
    ///
    /// Fails if the pattern is empty, already registered, uses `*` anywhere
    /// but at the end, or if the replacement is not absolute.
    pub fn register(
        &mut self,
        pattern: impl Into<String>,
        replacement: impl Into<PathBuf>,
    ) -> Result<(), ConfigError> {
        let pattern = pattern.into();
        let replacement = replacement.into();

        if pattern.is_empty() {
            return Err(ConfigError::EmptyPattern);
        }
        if self.rules.iter().any(|r| r.pattern == pattern) {
            return Err(ConfigError::DuplicatePattern(pattern));
        }

        let kind = if let Some(head) = pattern.strip_suffix('*') {
            if head.contains('*') {
                return Err(ConfigError::InvalidWildcard(pattern));
            }
            PatternKind::Wildcard
        } else if pattern.contains('*') {
            return Err(ConfigError::InvalidWildcard(pattern));
        } else if pattern.ends_with('/') {
            PatternKind::Prefix
        } else {
            PatternKind::Exact
        };

        if !replacement.is_absolute() {
            return Err(ConfigError::RelativeReplacement {
                pattern,
                replacement,
            });
        }

        self.rules.push(AliasRule {
            pattern,
            replacement,
            kind,
        });
        Ok(())
    }

    /// Find the rule for `specifier`.
    ///
    /// Returns the longest matching pattern, or `ConfigError::AmbiguousAlias`
    /// when two patterns tie for longest.
    pub fn lookup(&self, specifier: &str) -> Result<Option<AliasMatch<'_>>, ConfigError> {
        let mut best: Option<(&AliasRule, &str)> = None;
        // Another rule matching at the same length as `best`.
        let mut tied: Option<&AliasRule> = None;

        for rule in &self.rules {
            let Some(rest) = rule.strip(specifier) else {
                continue;
            };
            match best {
                Some((current, _)) if current.literal().len() > rule.literal().len() => {}
                Some((current, _)) if current.literal().len() == rule.literal().len() => {
                    tied.get_or_insert(rule);
                }
                _ => {
                    best = Some((rule, rest));
                    tied = None;
                }
            }
        }

        if let (Some((first, _)), Some(second)) = (best, tied) {
            return Err(ConfigError::AmbiguousAlias {
                specifier: specifier.to_string(),
                first: first.pattern.clone(),
                second: second.pattern.clone(),
            });
        }

        Ok(best.map(|(rule, rest)| AliasMatch {
            pattern: &rule.pattern,
            target: rule.target(rest),
        }))
    }

    /// Iterate rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &AliasRule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
