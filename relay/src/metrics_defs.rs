//! Metric definitions for the relay.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub description: &'static str,
}

pub const STARTUP_LOGS_RECORDED: MetricDef = MetricDef {
    name: "startup_logs.recorded",
    metric_type: MetricType::Counter,
    description: "First-time startup notifications published and recorded",
};

pub const STARTUP_LOGS_DUPLICATE: MetricDef = MetricDef {
    name: "startup_logs.duplicate",
    metric_type: MetricType::Counter,
    description: "Requests short-circuited because the dedup key already existed",
};

pub const STARTUP_LOGS_ABORTED: MetricDef = MetricDef {
    name: "startup_logs.aborted",
    metric_type: MetricType::Counter,
    description: "Requests aborted before a record was written",
};

pub const REQUEST_DURATION: MetricDef = MetricDef {
    name: "request.duration",
    metric_type: MetricType::Histogram,
    description: "Startup-log request duration in seconds",
};

pub const ALL_METRICS: &[MetricDef] = &[
    STARTUP_LOGS_RECORDED,
    STARTUP_LOGS_DUPLICATE,
    STARTUP_LOGS_ABORTED,
    REQUEST_DURATION,
];

#[macro_export]
macro_rules! counter {
    ($def:expr) => {
        metrics::counter!($def.name)
    };
}

#[macro_export]
macro_rules! histogram {
    ($def:expr) => {
        metrics::histogram!($def.name)
    };
}
