//! Route Domain Model
//!
//! A route registration: the verb, path and name a handler is bound to.

use serde::Serialize;
use thiserror::Error;

/// Errors raised while registering routes at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route {verb} {path} is already registered")]
    Duplicate { verb: Verb, path: String },

    #[error("Route {path} conflicts with the registered route {existing}")]
    Conflict { path: String, existing: String },

    #[error("Invalid route path '{0}': paths must start with '/'")]
    InvalidPath(String),
}

/// HTTP verb a route answers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    /// Lowercase name, as used for OpenAPI operation keys
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// A registered route
///
/// Created once at startup and immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRegistration {
    name: String,
    path: String,
    verb: Verb,
    accepts_model: bool,
}

impl RouteRegistration {
    /// Create a new route registration
    ///
    /// # Errors
    ///
    /// Returns `RouteError::InvalidPath` if `path` does not start with `/`.
    pub fn new(
        verb: Verb,
        path: impl Into<String>,
        name: impl Into<String>,
        accepts_model: bool,
    ) -> Result<Self, RouteError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(RouteError::InvalidPath(path));
        }

        Ok(Self {
            name: name.into(),
            path,
            verb,
            accepts_model,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// Whether the handler behind this route binds an input model
    #[must_use]
    pub fn accepts_model(&self) -> bool {
        self.accepts_model
    }

    /// Whether the router could not tell this route's path from `other`'s
    ///
    /// Two paths conflict when they match the same requests but spell a
    /// capture differently, such as `/items/:id` and `/items/:name`, or put a
    /// `:param` where the other has a `*wildcard`. Verbs do not matter: the
    /// router keys handlers by path first.
    #[must_use]
    pub fn conflicts_with(&self, other: &RouteRegistration) -> bool {
        if self.path == other.path {
            return false;
        }

        let mut ours = self.path.split('/');
        let mut theirs = other.path.split('/');
        loop {
            match (ours.next(), theirs.next()) {
                (Some(a), Some(b)) => match (capture(a), capture(b)) {
                    (None, None) if a == b => {}
                    (None, _) | (_, None) => return false,
                    (Some((kind_a, name_a)), Some((kind_b, name_b))) => {
                        if kind_a != kind_b || name_a != name_b {
                            return true;
                        }
                        if kind_a == '*' {
                            return false;
                        }
                    }
                },
                _ => return false,
            }
        }
    }

    /// Same route rebased under `base`
    #[must_use]
    pub fn under(&self, base: &str) -> Self {
        Self {
            path: join_path(base, &self.path),
            ..self.clone()
        }
    }
}

/// Split a `:param` or `*wildcard` segment into its marker and name
fn capture(segment: &str) -> Option<(char, &str)> {
    let mut chars = segment.chars();
    match chars.next() {
        Some(marker @ (':' | '*')) => Some((marker, chars.as_str())),
        _ => None,
    }
}

/// Join a module base path and a route path
///
/// `join_path("/docs", "/")` is `/docs` and `join_path("/", "/health")` is
/// `/health`. The result never ends with `/` unless it is the root.
#[must_use]
pub fn join_path(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    let joined = match (base.is_empty(), path.is_empty()) {
        (true, true) => return "/".to_string(),
        (true, false) => format!("/{path}"),
        (false, true) => base.to_string(),
        (false, false) => format!("{base}/{path}"),
    };

    let joined = if joined.starts_with('/') {
        joined
    } else {
        format!("/{joined}")
    };

    if joined.len() > 1 {
        joined.trim_end_matches('/').to_string()
    } else {
        joined
    }
}
