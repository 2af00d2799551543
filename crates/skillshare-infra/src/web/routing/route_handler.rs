use super::RouteParams;
use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use futures::future::BoxFuture;
use std::future::Future;

/// Handler of a route table entry.
///
/// Handlers receive the shared state, the decoded path captures and the request and
/// produce a response value.
pub trait RouteHandler<S>: Send + Sync + 'static {
    fn call(&self, state: S, params: RouteParams, request: Request) -> BoxFuture<'static, Response>;
}

impl<S, F, Fut, R> RouteHandler<S> for F
where
    S: Send + 'static,
    F: Fn(S, RouteParams, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn call(&self, state: S, params: RouteParams, request: Request) -> BoxFuture<'static, Response> {
        let future = (self)(state, params, request);
        Box::pin(async move { future.await.into_response() })
    }
}
