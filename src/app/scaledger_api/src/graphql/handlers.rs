use async_graphql_axum::GraphQLSubscription;

use crate::graphql;

pub fn router(
    endpoint: &'static str,
    subscription_endpoint: &'static str,
    schema: graphql::Schema,
    graphiql: bool,
) -> axum::Router {
    let graphql_route = if graphiql {
        axum::routing::get(move || async move {
            graphql_playground_handler_builder(endpoint, subscription_endpoint)
        })
        .post(graphql_handler)
    } else {
        axum::routing::post(graphql_handler)
    };

    axum::Router::new()
        .route(endpoint, graphql_route)
        .route_service(
            subscription_endpoint,
            GraphQLSubscription::new(graphql::ApiExecutor::new(schema)),
        )
}

async fn graphql_handler(
    axum::extract::Extension(schema): axum::extract::Extension<graphql::Schema>,
    req: async_graphql_axum::GraphQLRequest,
) -> async_graphql_axum::GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

fn graphql_playground_handler_builder(
    endpoint: &'static str,
    subscription_endpoint: &'static str,
) -> axum::response::Html<String> {
    axum::response::Html(
        async_graphql::http::GraphiQLSource::build()
            .endpoint(endpoint)
            .subscription_endpoint(subscription_endpoint)
            .finish(),
    )
}
