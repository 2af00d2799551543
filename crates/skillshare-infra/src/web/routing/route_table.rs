use super::{PathPattern, PatternError, RouteHandler, RouteParams};
use axum::http::Method;
use std::{fmt, sync::Arc};

pub struct Route<S> {
    method: Method,
    pattern: PathPattern,
    handler: Arc<dyn RouteHandler<S>>,
}

impl<S> Route<S> {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn handler(&self) -> Arc<dyn RouteHandler<S>> {
        self.handler.clone()
    }
}

impl<S> fmt::Debug for Route<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// Ordered list of (method, pattern, handler) rules.
///
/// Rules are tested in registration order and the first one matching both the method and the
/// full path wins. Requests without a matching rule are not handled by the table.
pub struct RouteTable<S> {
    routes: Vec<Route<S>>,
}

impl<S> Default for RouteTable<S> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<S> fmt::Debug for RouteTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.routes.iter()).finish()
    }
}

impl<S> RouteTable<S>
where
    S: Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route<H>(mut self, method: Method, pattern: &str, handler: H) -> Result<Self, PatternError>
    where
        H: RouteHandler<S>,
    {
        let pattern = PathPattern::parse(pattern)?;
        log::debug!("Adding route {} {}", method, pattern);
        self.routes.push(Route {
            method,
            pattern,
            handler: Arc::new(handler),
        });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the first route for the method and path. The path must not contain the query part.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<(&Route<S>, RouteParams)> {
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| route.pattern.match_path(path).map(|params| (route, params)))
    }
}

#[cfg(test)]
#[path = "./route_table_test.rs"]
mod route_table_test;
