//! Seam to the service that actually runs paginated list queries.

use std::future::Future;
use std::sync::Arc;

use crate::dto::remote::{RemotePage, RemoteQueryInput};

pub mod errors;

pub use errors::{RemoteError, RemoteResult};

/// Fetches one page of rows for a list view.
///
/// Implementations own transport, caching and retry policy; list controllers
/// call `query` once per load and never retry.
pub trait RemoteQuery {
    type Item;

    fn query(
        &self,
        input: &RemoteQueryInput,
    ) -> impl Future<Output = RemoteResult<RemotePage<Self::Item>>>;
}

impl<R: RemoteQuery> RemoteQuery for Arc<R> {
    type Item = R::Item;

    fn query(
        &self,
        input: &RemoteQueryInput,
    ) -> impl Future<Output = RemoteResult<RemotePage<Self::Item>>> {
        (**self).query(input)
    }
}
