//! The route table: registered patterns and their per-method handlers.

use std::collections::HashMap;
use std::fmt;

use crate::parser::Method;
use crate::router::handler::HandlerFn;
use crate::router::params::Params;
use crate::router::pattern::Pattern;

#[derive(Clone)]
struct RouteEntry {
    pattern: Pattern,
    handlers: HashMap<Method, HandlerFn>,
}

/// Result of looking a request up in the [`RouteTable`].
pub enum Lookup {
    /// A pattern matched the path and has a handler for the method.
    Found { handler: HandlerFn, params: Params },
    /// At least one pattern matched the path, but none of them for this method.
    MethodNotAllowed { allowed: Vec<Method> },
    NotFound,
}

/// Patterns in registration order, each with a handler per method.
///
/// Lookup is a linear scan, so the first registered pattern that matches a
/// path (and has a handler for the method) wins.
#[derive(Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handler` under `(pattern, method)`, replacing any handler already
    /// registered for that pair. Patterns are compared by their source text.
    pub fn register(&mut self, method: Method, pattern: &str, handler: HandlerFn) {
        let index = match self.entries.iter().position(|entry| entry.pattern.as_str() == pattern) {
            Some(index) => index,
            None => {
                self.entries.push(RouteEntry {
                    pattern: Pattern::parse(pattern),
                    handlers: HashMap::new(),
                });
                self.entries.len() - 1
            }
        };
        self.entries[index].handlers.insert(method, handler);
    }

    /// Find the handler for `method` and `path`.
    ///
    /// A pattern that matches the path but lacks the method does not end the
    /// search; a later pattern may match both.
    pub fn lookup(&self, method: Method, path: &str) -> Lookup {
        let mut allowed: Vec<Method> = Vec::new();

        for entry in &self.entries {
            let Some(params) = entry.pattern.matches(path) else {
                continue;
            };

            if let Some(handler) = entry.handlers.get(&method) {
                return Lookup::Found {
                    handler: handler.clone(),
                    params,
                };
            }

            allowed.extend(entry.handlers.keys().copied());
        }

        if allowed.is_empty() {
            return Lookup::NotFound;
        }

        let allowed = Method::ALL.into_iter().filter(|m| allowed.contains(m)).collect();
        Lookup::MethodNotAllowed { allowed }
    }

    /// Registered `(method, pattern)` pairs, patterns in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (Method, &str)> {
        self.entries.iter().flat_map(|entry| {
            Method::ALL
                .into_iter()
                .filter(|method| entry.handlers.contains_key(method))
                .map(|method| (method, entry.pattern.as_str()))
        })
    }

    /// Number of registered `(method, pattern)` pairs.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|entry| entry.handlers.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.routes().map(|(method, pattern)| format!("{method} {pattern}")))
            .finish()
    }
}
