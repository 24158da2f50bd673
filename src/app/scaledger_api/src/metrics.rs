use live_events::SubscriptionPayload;

pub struct ApiMetrics {
    pub subscription_deliveries_num: prometheus::IntCounter,
    pub payload_resolution_errors_num: prometheus::IntCounter,
    pub entity_lookups_num: prometheus::IntCounter,
}

impl ApiMetrics {
    pub fn new() -> Self {
        use prometheus::*;

        Self {
            subscription_deliveries_num: IntCounter::with_opts(Opts::new(
                "subscription_deliveries_num",
                "Subscription payloads delivered to clients",
            ))
            .unwrap(),
            payload_resolution_errors_num: IntCounter::with_opts(Opts::new(
                "payload_resolution_errors_num",
                "Subscription payloads whose entity could not be read",
            ))
            .unwrap(),
            entity_lookups_num: IntCounter::with_opts(Opts::new(
                "entity_lookups_num",
                "Entity lookups performed by queries",
            ))
            .unwrap(),
        }
    }

    pub fn register(&self, reg: &prometheus::Registry) -> Result<(), prometheus::Error> {
        reg.register(Box::new(self.subscription_deliveries_num.clone()))?;
        reg.register(Box::new(self.payload_resolution_errors_num.clone()))?;
        reg.register(Box::new(self.entity_lookups_num.clone()))?;
        Ok(())
    }

    pub fn record_delivery(&self, payload: &SubscriptionPayload) {
        self.subscription_deliveries_num.inc();

        if payload.entity.is_err() {
            self.payload_resolution_errors_num.inc();
        }
    }
}
