use serde::Serialize;

/// Body posted to the log endpoint: `{what, chart, err}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientEvent {
    pub what: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

impl ClientEvent {
    pub fn chart_error(chart: &str, err: impl Into<String>) -> Self {
        Self {
            what: "chart_error".to_string(),
            chart: Some(chart.to_string()),
            err: Some(err.into()),
        }
    }
}

/// Best-effort diagnostics channel. Reporting never fails from the caller's
/// point of view; delivery problems stay inside the sink.
pub trait TelemetrySink {
    fn report(&self, event: ClientEvent);
}

#[cfg(test)]
mod tests {
    use super::ClientEvent;

    #[test]
    fn chart_error_serializes_to_log_body() {
        let event = ClientEvent::chart_error("barRuns", "canvas #barRuns not found");
        let body = serde_json::to_value(&event).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "what": "chart_error",
                "chart": "barRuns",
                "err": "canvas #barRuns not found"
            })
        );
    }
}
