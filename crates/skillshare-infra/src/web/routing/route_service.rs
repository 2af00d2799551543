use super::RouteTable;
use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use futures::future::BoxFuture;
use std::{
    convert::Infallible,
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};

/// Layer dispatching requests through a [`RouteTable`] and passing the unmatched ones to the
/// wrapped (fallback) service.
pub struct RouteLayer<S> {
    table: Arc<RouteTable<S>>,
    state: S,
}

impl<S> Clone for RouteLayer<S>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            state: self.state.clone(),
        }
    }
}

impl<S> RouteLayer<S> {
    pub fn new(table: RouteTable<S>, state: S) -> Self {
        Self {
            table: Arc::new(table),
            state,
        }
    }
}

impl<S, F> Layer<F> for RouteLayer<S>
where
    S: Clone,
{
    type Service = RouteService<S, F>;

    fn layer(&self, fallback: F) -> Self::Service {
        RouteService {
            layer: self.clone(),
            fallback,
        }
    }
}

#[must_use]
pub struct RouteService<S, F> {
    layer: RouteLayer<S>,
    fallback: F,
}

impl<S, F> Clone for RouteService<S, F>
where
    S: Clone,
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            layer: self.layer.clone(),
            fallback: self.fallback.clone(),
        }
    }
}

impl<S, F> Service<Request> for RouteService<S, F>
where
    S: Clone + Send + Sync + 'static,
    F: Service<Request, Error = Infallible> + Clone + Send + 'static,
    F::Response: IntoResponse,
    F::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.fallback.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let resolved = self
            .layer
            .table
            .resolve(request.method(), request.uri().path())
            .map(|(route, params)| (route.handler(), params));

        match resolved {
            Some((handler, params)) => {
                log::trace!("Route found for {} {}", request.method(), request.uri().path());
                let state = self.layer.state.clone();
                Box::pin(async move { Ok(handler.call(state, params, request).await) })
            }
            None => {
                log::trace!("No route for {} {}, falling back", request.method(), request.uri().path());
                let clone = self.fallback.clone();
                let mut fallback = std::mem::replace(&mut self.fallback, clone);
                Box::pin(async move { fallback.call(request).await.map(IntoResponse::into_response) })
            }
        }
    }
}

#[cfg(test)]
#[path = "./route_service_test.rs"]
mod route_service_test;
