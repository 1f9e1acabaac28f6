//! Turns raw API responses into domain objects.

use std::future::Future;

use serde_json::Value;
use tracing::debug;

use crate::domain::errors::ResponseError;
use crate::domain::ports::{FromResponse, RawObject};

/// Which constructor builds each object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Construction {
    /// `FromResponse::create`, which may return a canonical cached instance.
    #[default]
    Create,
    /// `FromResponse::new`, always a fresh instance.
    New,
}

/// Shape of a resolved response, classified once.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    Object(RawObject),
    List(Vec<Value>),
    Other(Value),
}

impl From<Value> for RawResponse {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(object) => Self::Object(object),
            Value::Array(items) => Self::List(items),
            other => Self::Other(other),
        }
    }
}

/// Result of wrapping a response.
#[derive(Debug, Clone, PartialEq)]
pub enum Wrapped<T> {
    One(T),
    Many(Vec<T>),
    /// The response was neither an object nor a list and is returned as is.
    PassThrough(Value),
}

impl<T> Wrapped<T> {
    #[must_use]
    pub fn into_one(self) -> Option<T> {
        match self {
            Self::One(item) => Some(item),
            _ => None,
        }
    }

    /// All constructed objects; a single object becomes a one-element list.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
            Self::PassThrough(_) => Vec::new(),
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn construct<T, C>(
    client: Option<&C>,
    raw: RawObject,
    construction: Construction,
    args: &T::Args,
) -> Result<T, ResponseError>
where
    T: FromResponse<C>,
{
    match construction {
        Construction::Create => T::create(client, raw, args),
        Construction::New => T::new(client, raw, args),
    }
}

/// Awaits `response` and builds `T` from it.
///
/// An object yields one instance, a list yields one instance per item in
/// order, and any other value is passed through untouched.
///
/// # Errors
///
/// Propagates the error of `response`, returns `ResponseError::UnexpectedItem`
/// for list items that are not objects, and propagates constructor failures.
pub async fn wrap_to_async<T, C, F>(
    client: Option<&C>,
    response: F,
    construction: Construction,
    args: &T::Args,
) -> Result<Wrapped<T>, ResponseError>
where
    T: FromResponse<C>,
    F: Future<Output = Result<Value, ResponseError>>,
{
    let raw = RawResponse::from(response.await?);

    match raw {
        RawResponse::Object(object) => {
            construct::<T, C>(client, object, construction, args).map(Wrapped::One)
        }
        RawResponse::List(items) => {
            debug!(
                count = items.len(),
                target = std::any::type_name::<T>(),
                "Wrapping response list"
            );
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Object(object) => construct::<T, C>(client, object, construction, args),
                    other => Err(ResponseError::UnexpectedItem {
                        index,
                        found: json_kind(&other),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Wrapped::Many)
        }
        RawResponse::Other(value) => Ok(Wrapped::PassThrough(value)),
    }
}
