use chrono::{NaiveDateTime, Timelike};
use derive_more::Display;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[display("debug")]
    Debug,
    #[display("info")]
    Info,
    #[display("warn")]
    Warn,
    #[display("error")]
    Error,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Service {
    #[display("api-gateway")]
    ApiGateway,
    #[display("api-users")]
    ApiUsers,
    #[display("api-orders")]
    ApiOrders,
    #[display("api-payments")]
    ApiPayments,
    #[display("api-inventory")]
    ApiInventory,
    #[display("worker-email")]
    WorkerEmail,
    #[display("worker-notifications")]
    WorkerNotifications,
    #[display("worker-analytics")]
    WorkerAnalytics,
    #[display("cache-redis")]
    CacheRedis,
    #[display("db-postgres")]
    DbPostgres,
}

/// Which family of contextual fields a service emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Api,
    Worker,
    Store,
}

impl Service {
    pub const ALL: [Service; 10] = [
        Service::ApiGateway,
        Service::ApiUsers,
        Service::ApiOrders,
        Service::ApiPayments,
        Service::ApiInventory,
        Service::WorkerEmail,
        Service::WorkerNotifications,
        Service::WorkerAnalytics,
        Service::CacheRedis,
        Service::DbPostgres,
    ];

    pub fn kind(self) -> ServiceKind {
        match self {
            Self::ApiGateway
            | Self::ApiUsers
            | Self::ApiOrders
            | Self::ApiPayments
            | Self::ApiInventory => ServiceKind::Api,
            Self::WorkerEmail | Self::WorkerNotifications | Self::WorkerAnalytics => {
                ServiceKind::Worker
            }
            Self::CacheRedis | Self::DbPostgres => ServiceKind::Store,
        }
    }
}

/// A naive date-time rendered ISO-8601 style with a trailing `Z`.
///
/// The `Z` is appended even though no timezone is attached; downstream
/// fixtures depend on that exact shape. Sub-second digits are written as
/// microseconds and only when non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    #[cfg(test)]
    pub fn into_naive(self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))?;
        let micros = self.0.nanosecond() / 1_000;
        if micros != 0 {
            write!(f, ".{micros:06}")?;
        }
        f.write_str("Z")
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiContext {
    pub path: &'static str,
    pub method: &'static str,
    pub latency: u32,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerContext {
    pub batch_size: u32,
    pub processed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreContext {
    pub connections: u32,
    pub queries_per_sec: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_depth: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServiceContext {
    Api(ApiContext),
    Worker(WorkerContext),
    Store(StoreContext),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestInfo {
    pub id: String,
    pub client_ip: String,
    pub user_agent: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceContext {
    pub trace_id: String,
    pub span_id: String,
}

/// One line of the generated file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub timestamp: Timestamp,
    pub level: Level,
    pub service: Service,
    pub msg: String,
    #[serde(flatten)]
    pub context: ServiceContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestInfo>,
    #[serde(flatten)]
    pub trace: Option<TraceContext>,
}
