use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_graphql::{Data, Executor, Request, Response, ServerError};
use futures::StreamExt;
use futures::stream::BoxStream;

use crate::graphql::Schema;

/// Field errors raised while one subscription delivery is resolved.
///
/// The subscription executor drops errors of nested fields and ends the
/// stream on errors it does see. Resolvers record delivery errors here
/// instead, and [`ApiExecutor`] attaches them to the response of that
/// delivery, leaving the stream open.
#[derive(Clone, Default)]
pub struct DeliveryErrors(Arc<Mutex<Vec<ServerError>>>);

impl DeliveryErrors {
    pub fn push(&self, error: ServerError) {
        self.lock().push(error);
    }

    pub fn take(&self) -> Vec<ServerError> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ServerError>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs operations against the API schema.
#[derive(Clone)]
pub struct ApiExecutor {
    schema: Schema,
}

impl ApiExecutor {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Executor for ApiExecutor {
    async fn execute(&self, request: Request) -> Response {
        self.schema.execute(request).await
    }

    fn execute_stream(
        &self,
        request: Request,
        session_data: Option<Arc<Data>>,
    ) -> BoxStream<'static, Response> {
        let delivery_errors = DeliveryErrors::default();

        self.schema
            .execute_stream_with_session_data(
                request.data(delivery_errors.clone()),
                session_data.unwrap_or_default(),
            )
            .map(move |mut response| {
                // Deliveries are resolved one at a time, so everything recorded
                // belongs to this response
                response.errors.extend(delivery_errors.take());
                response
            })
            .boxed()
    }
}
