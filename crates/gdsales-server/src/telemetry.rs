// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

/// Per-route request counters and latency samples, rendered as plain text at
/// `/metrics`.
#[derive(Default)]
pub struct RequestMetrics {
    counts: Mutex<HashMap<(String, String, u16), u64>>,
    latency_ns: Mutex<HashMap<String, Vec<u64>>>,
}

impl RequestMetrics {
    pub(crate) async fn observe_request(
        &self,
        route: &str,
        method: &str,
        status: StatusCode,
        latency: Duration,
    ) {
        let mut counts = self.counts.lock().await;
        *counts
            .entry((route.to_string(), method.to_string(), status.as_u16()))
            .or_insert(0) += 1;
        drop(counts);
        let mut latency_map = self.latency_ns.lock().await;
        latency_map
            .entry(route.to_string())
            .or_default()
            .push(latency.as_nanos() as u64);
    }

    pub(crate) async fn render(&self) -> String {
        let mut body = String::new();
        let mut counts: Vec<_> = self
            .counts
            .lock()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        counts.sort();
        for ((route, method, status), count) in counts {
            body.push_str(&format!(
                "http_requests_total{{route=\"{route}\",method=\"{method}\",status=\"{status}\"}} {count}\n"
            ));
        }
        let mut latencies: Vec<_> = self
            .latency_ns
            .lock()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        latencies.sort_by(|a, b| a.0.cmp(&b.0));
        for (route, samples) in latencies {
            body.push_str(&format!(
                "http_request_latency_p95_seconds{{route=\"{route}\"}} {:.6}\n",
                percentile_ns(&samples, 0.95) as f64 / 1_000_000_000.0
            ));
        }
        body
    }
}

fn percentile_ns(samples: &[u64], percentile: f64) -> u64 {
    if samples.is_empty() {
        return 0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    let idx = ((sorted.len() as f64) * percentile).ceil() as usize;
    sorted[idx.saturating_sub(1).min(sorted.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn render_lists_counts_and_latency() {
        let metrics = RequestMetrics::default();
        metrics
            .observe_request("/products", "GET", StatusCode::OK, Duration::from_millis(3))
            .await;
        metrics
            .observe_request("/products", "GET", StatusCode::OK, Duration::from_millis(5))
            .await;
        metrics
            .observe_request(
                "/auth/login",
                "POST",
                StatusCode::UNAUTHORIZED,
                Duration::from_millis(1),
            )
            .await;

        let body = metrics.render().await;
        assert!(body
            .contains("http_requests_total{route=\"/products\",method=\"GET\",status=\"200\"} 2"));
        assert!(body.contains(
            "http_requests_total{route=\"/auth/login\",method=\"POST\",status=\"401\"} 1"
        ));
        assert!(body.contains("http_request_latency_p95_seconds{route=\"/products\"}"));
    }

    #[test]
    fn percentile_handles_small_samples() {
        assert_eq!(percentile_ns(&[], 0.95), 0);
        assert_eq!(percentile_ns(&[7], 0.95), 7);
        assert_eq!(percentile_ns(&[1, 2, 100], 0.5), 2);
    }
}
