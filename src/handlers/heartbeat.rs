pub async fn heartbeat() -> &'static str {
    "alive"
}
