//! Construction contract for domain objects built from raw API data.

use serde_json::{Map, Value};

use crate::domain::errors::ResponseError;

/// Raw decoded JSON object as received from the API.
pub type RawObject = Map<String, Value>;

/// Domain types that can be built from a raw API object.
///
/// `C` is the client handle threaded through to constructors; it is `None`
/// for objects built outside of a client.
pub trait FromResponse<C>: Sized {
    /// Extra construction arguments.
    type Args;

    /// Builds a fresh instance.
    ///
    /// # Errors
    ///
    /// Returns `ResponseError` if the raw object does not describe a valid instance.
    fn new(client: Option<&C>, raw: RawObject, args: &Self::Args) -> Result<Self, ResponseError>;

    /// Factory entry point. Types keeping a canonical instance per ID
    /// override this; by default it builds a fresh instance.
    ///
    /// # Errors
    ///
    /// Returns `ResponseError` if construction fails.
    fn create(
        client: Option<&C>,
        raw: RawObject,
        args: &Self::Args,
    ) -> Result<Self, ResponseError> {
        Self::new(client, raw, args)
    }
}
