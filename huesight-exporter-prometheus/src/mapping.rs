//! Mapping from bridge lights to metric records.
//!
//! The metric catalogue is a static table; every per-light metric carries the
//! same identifying label set so series of one light can be joined.

use huesight_common::Light;

/// Label names attached to every per-light metric, in output order.
pub const LIGHT_LABELS: &[&str] = &["name", "id", "unique_id"];

/// Number of metrics emitted per light.
pub const METRICS_PER_LIGHT: usize = 5;

/// Static definition of a metric this exporter can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub name: &'static str,
    pub help: &'static str,
    pub labels: &'static [&'static str],
}

pub const UP: MetricDescriptor = MetricDescriptor {
    name: "up",
    help: "Was the last query successful?",
    labels: &[],
};

pub const LIGHT_STATUS: MetricDescriptor = MetricDescriptor {
    name: "light_status",
    help: "Status of light (on/off)",
    labels: LIGHT_LABELS,
};

pub const LIGHT_BRIGHTNESS: MetricDescriptor = MetricDescriptor {
    name: "light_brightness",
    help: "Brightness of light",
    labels: LIGHT_LABELS,
};

pub const LIGHT_HUE: MetricDescriptor = MetricDescriptor {
    name: "light_hue",
    help: "Hue of light",
    labels: LIGHT_LABELS,
};

pub const LIGHT_SATURATION: MetricDescriptor = MetricDescriptor {
    name: "light_saturation",
    help: "Saturation of light",
    labels: LIGHT_LABELS,
};

pub const LIGHT_REACHABLE: MetricDescriptor = MetricDescriptor {
    name: "light_reachable",
    help: "Reachability of light",
    labels: LIGHT_LABELS,
};

/// Every metric the collector may emit, liveness first.
pub const DESCRIPTORS: [MetricDescriptor; 1 + METRICS_PER_LIGHT] = [
    UP,
    LIGHT_STATUS,
    LIGHT_BRIGHTNESS,
    LIGHT_HUE,
    LIGHT_SATURATION,
    LIGHT_REACHABLE,
];

/// One sample produced by a scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRecord {
    /// Metric name, one of [`DESCRIPTORS`].
    pub name: &'static str,
    /// Label pairs in the order declared by the descriptor.
    pub labels: Vec<(String, String)>,
    /// Sample value.
    pub value: i64,
}

impl MetricRecord {
    /// Look up a label value by name.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Format a light id as a label value.
///
/// Plain decimal: no leading zeros, no digit grouping, locale independent.
pub fn format_light_id(id: u32) -> String {
    id.to_string()
}

/// Map a flag to a sample value (1 = true, 0 = false).
pub fn bool_value(flag: bool) -> i64 {
    i64::from(flag)
}

/// Identifying labels of a light: `name`, `id`, `unique_id`.
pub fn light_labels(light: &Light) -> Vec<(String, String)> {
    vec![
        ("name".to_string(), light.name.clone()),
        ("id".to_string(), format_light_id(light.id)),
        ("unique_id".to_string(), light.unique_id.clone()),
    ]
}

/// The liveness record.
pub fn up_record(up: bool) -> MetricRecord {
    MetricRecord {
        name: UP.name,
        labels: Vec::new(),
        value: bool_value(up),
    }
}

/// The per-light records, raw device values without scaling or clamping.
pub fn light_records(light: &Light) -> Vec<MetricRecord> {
    let labels = light_labels(light);
    let state = &light.state;

    [
        (LIGHT_STATUS, bool_value(state.on)),
        (LIGHT_BRIGHTNESS, i64::from(state.bri)),
        (LIGHT_HUE, i64::from(state.hue)),
        (LIGHT_SATURATION, i64::from(state.sat)),
        (LIGHT_REACHABLE, bool_value(state.reachable)),
    ]
    .into_iter()
    .map(|(descriptor, value)| MetricRecord {
        name: descriptor.name,
        labels: labels.clone(),
        value,
    })
    .collect()
}
