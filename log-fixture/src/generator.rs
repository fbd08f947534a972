use crate::record::{
    ApiContext, Level, LogRecord, RequestInfo, Service, ServiceContext, ServiceKind, StoreContext,
    Timestamp, TraceContext, WorkerContext,
};
use rand::{Rng, seq::IndexedRandom};

const LEVELS: [(Level, u8); 4] = [
    (Level::Debug, 30),
    (Level::Info, 50),
    (Level::Warn, 15),
    (Level::Error, 5),
];
const METHODS: [(&str, u8); 5] = [
    ("GET", 60),
    ("POST", 20),
    ("PUT", 10),
    ("DELETE", 5),
    ("PATCH", 5),
];
const PATHS: [&str; 10] = [
    "/api/v1/users",
    "/api/v1/users/{id}",
    "/api/v1/orders",
    "/api/v1/orders/{id}",
    "/api/v1/payments",
    "/api/v1/inventory",
    "/api/v1/health",
    "/api/v1/metrics",
    "/api/v2/users",
    "/api/v2/orders",
];

const DEBUG_MESSAGES: [&str; 8] = [
    "Cache lookup for key: {key}",
    "Query executed in {latency}ms",
    "Processing batch item {idx} of {total}",
    "Loading configuration from {source}",
    "Connection pool stats: active={active}, idle={idle}",
    "Parsing request body",
    "Validating input parameters",
    "Serializing response",
];
const INFO_MESSAGES: [&str; 10] = [
    "Request processed",
    "User login successful",
    "Order created",
    "Payment processed",
    "Email sent to {email}",
    "Cache updated for key: {key}",
    "Health check passed",
    "Service started",
    "Batch job completed",
    "New user registered",
];
const WARN_MESSAGES: [&str; 8] = [
    "Rate limit approaching: {count}/1000",
    "Slow query detected: {latency}ms",
    "Retry attempt {attempt} of 3",
    "Connection pool near capacity: {pct}%",
    "Deprecated API version used",
    "High memory usage: {pct}%",
    "Queue size growing: {count}",
    "Certificate expires in {days} days",
];
const ERROR_MESSAGES: [&str; 10] = [
    "Failed to connect to database",
    "Authentication failed for user {user_id}",
    "Payment processing failed",
    "Timeout waiting for response",
    "Invalid request format",
    "Service unavailable",
    "Rate limit exceeded",
    "Out of memory",
    "Disk space critical",
    "Connection refused",
];

const KEY_PREFIXES: [&str; 5] = ["user", "session", "cache", "config", "token"];
const CONFIG_SOURCES: [&str; 4] = ["env", "file", "consul", "vault"];
const EMAIL_DOMAINS: [&str; 4] = ["gmail.com", "example.com", "company.org", "mail.io"];
const EMAIL_TEMPLATES: [&str; 4] = ["welcome", "reset", "newsletter", "receipt"];
const CHANNELS: [&str; 3] = ["push", "sms", "webhook"];
const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0",
    "curl/7.68.0",
    "Python/3.9",
    "Go-http-client/1.1",
];

const REQUEST_PROBABILITY: f64 = 0.2;
const TRACE_PROBABILITY: f64 = 0.3;

pub fn status_codes(level: Level) -> &'static [u16] {
    match level {
        Level::Debug => &[200],
        Level::Info => &[200, 201, 204],
        Level::Warn => &[400, 401, 403, 404, 429],
        Level::Error => &[500, 502, 503, 504, 400, 401, 403],
    }
}

fn messages(level: Level) -> &'static [&'static str] {
    match level {
        Level::Debug => &DEBUG_MESSAGES,
        Level::Info => &INFO_MESSAGES,
        Level::Warn => &WARN_MESSAGES,
        Level::Error => &ERROR_MESSAGES,
    }
}

/// Uniform choice over a non-empty constant table.
fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> T {
    *items.choose(rng).expect("non-empty table")
}

fn random_user_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("u{}", rng.random_range(1000..=9999))
}

fn random_order_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("ord-{}", rng.random_range(10000..=99999))
}

fn random_email<R: Rng + ?Sized>(rng: &mut R) -> String {
    let n = rng.random_range(1..=1000);
    format!("user{n}@{}", pick(rng, &EMAIL_DOMAINS))
}

fn random_key<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = pick(rng, &KEY_PREFIXES);
    format!("{prefix}:{}", rng.random_range(1..=10000))
}

fn placeholder_value<R: Rng + ?Sized>(rng: &mut R, name: &str) -> Option<String> {
    let value = match name {
        "key" => random_key(rng),
        "latency" => rng.random_range(1..=5000).to_string(),
        "idx" => rng.random_range(1..=100).to_string(),
        "total" => rng.random_range(100..=1000).to_string(),
        "source" => pick(rng, &CONFIG_SOURCES).to_string(),
        "active" => rng.random_range(1..=50).to_string(),
        "idle" => rng.random_range(0..=20).to_string(),
        "email" => random_email(rng),
        "count" => rng.random_range(1..=1000).to_string(),
        "attempt" => rng.random_range(1..=3).to_string(),
        "pct" => rng.random_range(70..=99).to_string(),
        "days" => rng.random_range(1..=30).to_string(),
        "user_id" => random_user_id(rng),
        _ => return None,
    };
    Some(value)
}

/// Replaces each `{name}` token with a fresh random value. Unknown tokens
/// and unmatched braces are copied through untouched.
pub fn render_message<R: Rng + ?Sized>(rng: &mut R, template: &str) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        match placeholder_value(rng, name) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

fn api_context<R: Rng + ?Sized>(rng: &mut R, service: Service, level: Level) -> ApiContext {
    let path = pick(rng, &PATHS);
    let method = METHODS
        .choose_weighted(rng, |(_, w)| *w)
        .expect("nonzero weights")
        .0;
    let latency = match level {
        Level::Warn => rng.random_range(500..=5000),
        _ => rng.random_range(1..=500),
    };
    let status = pick(rng, status_codes(level));

    let user_id = (service == Service::ApiUsers).then(|| random_user_id(rng));
    let (order_id, amount) = if service == Service::ApiOrders {
        let order_id = random_order_id(rng);
        let amount = (level == Level::Info).then(|| {
            let raw: f64 = rng.random_range(10.0..=500.0);
            (raw * 100.0).round() / 100.0
        });
        (Some(order_id), amount)
    } else {
        (None, None)
    };

    ApiContext {
        path,
        method,
        latency,
        status,
        user_id,
        order_id,
        amount,
    }
}

fn worker_context<R: Rng + ?Sized>(rng: &mut R, service: Service) -> WorkerContext {
    WorkerContext {
        batch_size: rng.random_range(10..=1000),
        processed: rng.random_range(0..=1000),
        template: (service == Service::WorkerEmail).then(|| pick(rng, &EMAIL_TEMPLATES)),
        channel: (service == Service::WorkerNotifications).then(|| pick(rng, &CHANNELS)),
    }
}

fn store_context<R: Rng + ?Sized>(rng: &mut R, level: Level) -> StoreContext {
    StoreContext {
        connections: rng.random_range(1..=100),
        queries_per_sec: rng.random_range(100..=10000),
        queue_depth: matches!(level, Level::Warn | Level::Error)
            .then(|| rng.random_range(100..=1000)),
    }
}

fn request_info<R: Rng + ?Sized>(rng: &mut R) -> RequestInfo {
    RequestInfo {
        id: format!("req-{}", rng.random_range(100000..=999999)),
        client_ip: format!(
            "192.168.{}.{}",
            rng.random_range(1..=255),
            rng.random_range(1..=255)
        ),
        user_agent: pick(rng, &USER_AGENTS),
    }
}

fn trace_context<R: Rng + ?Sized>(rng: &mut R) -> TraceContext {
    TraceContext {
        trace_id: format!("{:08x}{:08x}", rng.random::<u32>(), rng.random::<u32>()),
        span_id: format!("{:08x}", rng.random::<u32>()),
    }
}

pub fn generate_record<R: Rng + ?Sized>(rng: &mut R, timestamp: Timestamp) -> LogRecord {
    let level = LEVELS
        .choose_weighted(rng, |(_, w)| *w)
        .expect("nonzero weights")
        .0;
    let service = pick(rng, &Service::ALL);
    let template = pick(rng, messages(level));
    let msg = render_message(rng, template);

    let context = match service.kind() {
        ServiceKind::Api => ServiceContext::Api(api_context(rng, service, level)),
        ServiceKind::Worker => ServiceContext::Worker(worker_context(rng, service)),
        ServiceKind::Store => ServiceContext::Store(store_context(rng, level)),
    };
    let request = rng
        .random_bool(REQUEST_PROBABILITY)
        .then(|| request_info(rng));
    let trace = rng
        .random_bool(TRACE_PROBABILITY)
        .then(|| trace_context(rng));

    LogRecord {
        timestamp,
        level,
        service,
        msg,
        context,
        request,
        trace,
    }
}
