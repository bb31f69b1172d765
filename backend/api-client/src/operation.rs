//! Operation descriptors: what to call and how its input and output are shaped.
//!
//! The input schema is the `Serialize` impl of `I`, the output schema is the
//! `Deserialize` impl of `O`. A descriptor is immutable and cheap to copy.

use crate::error::EnvelopeError;
use crate::transport::TransportRequest;

use common::RedactedToken;

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Methods whose requests carry no body.
    pub fn is_bodyless(&self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// GraphQL query, POSTed to the GraphQL endpoint.
    Query,
    /// GraphQL mutation, POSTed to the GraphQL endpoint.
    Mutation,
    /// Plain JSON endpoint; the operation name is the path.
    Rest(HttpMethod),
}

pub struct Operation<I, O> {
    name: &'static str,
    kind: OperationKind,
    document: &'static str,
    schema: PhantomData<fn(&I) -> O>,
}

impl<I, O> Operation<I, O> {
    pub const fn query(name: &'static str, document: &'static str) -> Self {
        Self::new(name, OperationKind::Query, document)
    }

    pub const fn mutation(name: &'static str, document: &'static str) -> Self {
        Self::new(name, OperationKind::Mutation, document)
    }

    pub const fn rest(method: HttpMethod, path: &'static str) -> Self {
        Self::new(path, OperationKind::Rest(method), "")
    }

    const fn new(name: &'static str, kind: OperationKind, document: &'static str) -> Self {
        Self {
            name,
            kind,
            document,
            schema: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }
}

impl<I: Serialize, O> Operation<I, O> {
    /// Encode `input` and build the outgoing request.
    ///
    /// # Errors
    /// Returns [`EnvelopeError::Encode`] if the input cannot be represented as JSON.
    pub(crate) fn build_request(
        &self,
        input: &I,
        graphql_path: &str,
        bearer: Option<RedactedToken>,
    ) -> Result<TransportRequest, EnvelopeError> {
        let variables = serde_json::to_value(input).map_err(|e| EnvelopeError::encode(&e))?;

        let (method, path, body) = match self.kind {
            OperationKind::Query | OperationKind::Mutation => {
                let body = json!({
                    "operationName": self.name,
                    "query": self.document,
                    "variables": variables,
                });
                (HttpMethod::Post, graphql_path.to_string(), Some(body))
            }
            OperationKind::Rest(method) => {
                let body = (!method.is_bodyless()).then_some(variables);
                (method, self.name.to_string(), body)
            }
        };

        Ok(TransportRequest {
            method,
            path,
            body,
            bearer,
            request_id: Uuid::new_v4(),
        })
    }
}

impl<I, O> Clone for Operation<I, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, O> Copy for Operation<I, O> {}

impl<I, O> fmt::Debug for Operation<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Input for operations that take no arguments.
pub type NoInput = ();
