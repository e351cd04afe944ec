//! Exposition of scrape records through `prometheus-client`.

use prometheus_client::collector::Collector;
use prometheus_client::encoding::{DescriptorEncoder, EncodeMetric};
use prometheus_client::metrics::MetricType;
use prometheus_client::metrics::gauge::ConstGauge;
use prometheus_client::registry::Registry;

use crate::mapping::{MetricDescriptor, MetricRecord};

/// Content type of the rendered exposition.
pub const CONTENT_TYPE: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// Records of a single scrape, exposed as a `prometheus-client` collector.
#[derive(Debug)]
struct ScrapeSnapshot {
    descriptors: &'static [MetricDescriptor],
    records: Vec<MetricRecord>,
}

impl Collector for ScrapeSnapshot {
    fn encode(&self, mut encoder: DescriptorEncoder) -> Result<(), std::fmt::Error> {
        // Descriptors without samples still get HELP/TYPE lines.
        for descriptor in self.descriptors {
            let mut family = encoder.encode_descriptor(
                descriptor.name,
                descriptor.help,
                None,
                MetricType::Gauge,
            )?;

            let mut samples = self.records.iter().filter(|r| r.name == descriptor.name);

            if descriptor.labels.is_empty() {
                if let Some(record) = samples.next() {
                    ConstGauge::new(record.value).encode(family)?;
                }
                continue;
            }

            for record in samples {
                // prometheus-client writes label values verbatim
                let labels: Vec<(&str, String)> = record
                    .labels
                    .iter()
                    .map(|(key, value)| (key.as_str(), escape_label_value(value)))
                    .collect();

                let metric = family.encode_family(&labels)?;
                ConstGauge::new(record.value).encode(metric)?;
            }
        }

        Ok(())
    }
}

/// Escape special characters in label values.
fn escape_label_value(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

/// Render the records of one scrape in the OpenMetrics text format.
///
/// Every entry of `descriptors` is declared, in order, whether or not it has
/// samples.
pub fn render(
    descriptors: &'static [MetricDescriptor],
    records: Vec<MetricRecord>,
) -> Result<String, std::fmt::Error> {
    let mut registry = Registry::default();
    registry.register_collector(Box::new(ScrapeSnapshot {
        descriptors,
        records,
    }));

    let mut body = String::new();
    prometheus_client::encoding::text::encode(&mut body, &registry)?;
    Ok(body)
}
