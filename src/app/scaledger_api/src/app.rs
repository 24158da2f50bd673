use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre;
use color_eyre::eyre::WrapErr as _;
use live_events::NotificationHub;
use pg_store::{PgCatalog, PgNotificationListener, PgScopedRowReader, retry_on_init_fail};
use schema_build::{ForceBigIntHook, RelationDescriptor, SchemaBuild, SchemaBuildPipeline};
use sqlx::PgPool;

use crate::config::Config;
use crate::graphql::{self, SchemaDeps, SubscriptionTopic};
use crate::http_server;
use crate::http_server::HttpServeFuture;
use crate::metrics::ApiMetrics;

const TARGET_RELATION_NAME: &str = "postings";

pub struct App {
    config: Config,
    pool: PgPool,

    metrics: Arc<ApiMetrics>,
    metrics_registry: prometheus::Registry,

    notification_hub: Arc<NotificationHub>,
    topic: SubscriptionTopic,
}

impl App {
    pub fn new(config: Config, pool: PgPool) -> eyre::Result<Self> {
        let metrics = Arc::new(ApiMetrics::new());
        let metrics_registry = prometheus::Registry::new();
        metrics.register(&metrics_registry)?;

        let notification_hub = Arc::new(NotificationHub::new(config.notification_buffer_size));

        Ok(Self {
            config,
            pool,
            metrics,
            metrics_registry,
            notification_hub,
            topic: SubscriptionTopic::posting_created(),
        })
    }

    pub fn schema_build_pipeline() -> SchemaBuildPipeline {
        SchemaBuildPipeline::new().with_hook(Arc::new(ForceBigIntHook))
    }

    pub async fn run<F>(&self, shutdown_requested: F) -> eyre::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Initialization: everything that can fail the schema happens before
        // the server starts accepting traffic
        let graphql_schema = self.build_schema().await?;

        if self.config.build_schema {
            self.export_schema(&graphql_schema)?;
        }

        let http_serve_future = self.build_http_server(graphql_schema).await?;
        let http_server = http_serve_future
            .with_graceful_shutdown(shutdown_requested)
            .into_future();

        let listener = PgNotificationListener::new(
            self.pool.clone(),
            self.config.pubsub_channel_prefix.clone(),
            vec![self.topic.topic.clone()],
            self.notification_hub.clone(),
            Duration::from_secs(self.config.database_connect_retry_delay_in_secs),
        );

        // Asynchronous execution: HTTP server and notification forwarding
        tokio::select! {
            res = http_server => { res.map_err(Into::into) },
            () = listener.run() => Ok(()),
        }
    }

    async fn build_schema(&self) -> eyre::Result<graphql::Schema> {
        let relation = self.load_relation().await?;

        let build = Self::schema_build_pipeline().run(SchemaBuild::default())?;

        let graphql_schema = graphql::build_schema(
            &relation,
            &build,
            &self.topic,
            SchemaDeps {
                row_reader: Arc::new(PgScopedRowReader::new(self.pool.clone())),
                notification_hub: self.notification_hub.clone(),
                metrics: self.metrics.clone(),
            },
        )?;

        Ok(graphql_schema)
    }

    async fn load_relation(&self) -> eyre::Result<RelationDescriptor> {
        let catalog = PgCatalog::new(self.pool.clone());
        let schema = self.config.database_schema.as_str();

        let relation = retry_on_init_fail(
            &self.config.pg_connection_options(),
            "load_relation",
            || catalog.load_relation(schema, TARGET_RELATION_NAME),
        )
        .await?;

        Ok(relation)
    }

    fn export_schema(&self, graphql_schema: &graphql::Schema) -> eyre::Result<()> {
        let path = &self.config.export_schema_path;

        std::fs::write(path, graphql::export_sdl(graphql_schema))
            .wrap_err_with(|| format!("Failed to export schema to '{}'", path.display()))?;

        tracing::info!(path = %path.display(), "GraphQL schema exported");

        Ok(())
    }

    async fn build_http_server(
        &self,
        graphql_schema: graphql::Schema,
    ) -> eyre::Result<HttpServeFuture> {
        let (http_server, local_addr) = http_server::build(
            self.config.http_address,
            self.config.http_port,
            self.metrics_registry.clone(),
            graphql_schema,
            self.config.graphiql,
        )
        .await?;

        tracing::info!(
            "GraphQL API is listening on http://{local_addr}{}",
            http_server::HTTP_GRAPHQL_ENDPOINT
        );

        Ok(http_server)
    }
}
