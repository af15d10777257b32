use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use chrono::Utc;
use log::{debug, error};
use reqwest::Client;

use crate::State;
use crate::types::config::Config;

pub fn spawn(config: &Config, state: Arc<State>) {
    let influx = match &config.influx {
        Some(i) => i,
        None => return,
    };

    let mut url = match influx.url.join("/api/v2/write") {
        Ok(url) => url,
        Err(e) => {
            error!("Failed to parse influxdb url: {}", e);
            return;
        }
    };

    url.query_pairs_mut()
        .append_pair("org", &influx.org)
        .append_pair("bucket", &influx.bucket);

    let influx_token = influx.token.clone();

    tokio::task::spawn(async move {
        let mut last_requests = 0;

        let client = Client::new();

        loop {
            let requests = state.requests_served.load(Ordering::SeqCst);
            let diff = requests - last_requests;
            last_requests = requests;

            let timestamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();

            let line_format = format!(
                "requests_served value={requests}u {timestamp}\nrequests_new value={requests_new}u {timestamp}\n",
                requests = requests,
                requests_new = diff,
                timestamp = timestamp,
            );

            debug!("line_format: {}", line_format);

            let res = client.post(url.clone())
                .header("Authorization", format!("Token {}", influx_token))
                .body(line_format)
                .send()
                .await
                .and_then(|resp| resp.error_for_status());

            if let Err(e) = res {
                error!("failed to send to influxdb: {}", e);
            } else {
                debug!("sent to influxdb");
            }

            tokio::time::sleep(Duration::from_secs(60)).await;
        }
    });
}
