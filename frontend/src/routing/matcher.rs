//! Path matching.
//!
//! # Rules
//! - Query string and fragment are ignored; an empty path is `/`
//! - Comparison is case-insensitive
//! - `Exact` patterns tolerate a single trailing slash
//! - `Prefix` patterns only match on segment boundaries, so `/admin`
//!   matches `/admin/users` but not `/administrator`

/// Strip query and fragment from a location and make sure it is rooted.
pub fn normalize_path(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Prefix,
}

/// Result of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// Portion of the path covered by the pattern, as written in the URL.
    pub matched: String,
    /// Remaining sub-path. Empty or starting with `/`.
    pub rest: String,
}

/// A single route pattern such as `/admin` (prefix) or `/` (exact).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    pattern: String,
    kind: MatchKind,
}

impl PathPattern {
    pub fn exact(pattern: impl Into<String>) -> Self {
        Self::new(pattern, MatchKind::Exact)
    }

    pub fn prefix(pattern: impl Into<String>) -> Self {
        Self::new(pattern, MatchKind::Prefix)
    }

    fn new(pattern: impl Into<String>, kind: MatchKind) -> Self {
        let mut pattern = pattern.into().to_lowercase();
        // "/admin/" and "/admin" are the same pattern; "/" stays "/".
        while pattern.len() > 1 && pattern.ends_with('/') {
            pattern.pop();
        }
        Self { pattern, kind }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// Match a location (path with optional query/fragment).
    pub fn match_path(&self, location: &str) -> Option<PathMatch> {
        let path = normalize_path(location);
        let plen = self.pattern.len();

        if path.len() < plen || !path.is_char_boundary(plen) {
            return None;
        }
        let (head, tail) = path.split_at(plen);
        if !head.eq_ignore_ascii_case(&self.pattern) {
            return None;
        }

        // Root pattern: everything after it is the tail itself.
        if self.pattern == "/" {
            return match self.kind {
                MatchKind::Exact if tail.is_empty() => Some(PathMatch {
                    matched: "/".to_string(),
                    rest: String::new(),
                }),
                MatchKind::Exact => None,
                MatchKind::Prefix => Some(PathMatch {
                    matched: "/".to_string(),
                    rest: if tail.is_empty() {
                        String::new()
                    } else {
                        format!("/{}", tail)
                    },
                }),
            };
        }

        match self.kind {
            MatchKind::Exact if tail.is_empty() || tail == "/" => Some(PathMatch {
                matched: head.to_string(),
                rest: String::new(),
            }),
            MatchKind::Exact => None,
            MatchKind::Prefix if tail.is_empty() || tail.starts_with('/') => Some(PathMatch {
                matched: head.to_string(),
                rest: tail.to_string(),
            }),
            MatchKind::Prefix => None,
        }
    }

    pub fn matches(&self, location: &str) -> bool {
        self.match_path(location).is_some()
    }
}
