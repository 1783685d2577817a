use async_trait::async_trait;
use t20_core::record::parse_records;
use t20_core::{ApiError, ClientEvent, Endpoint, PlayerRecord, RecordSource, TelemetrySink};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Same-origin client for the stats API.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpClient;

impl HttpClient {
    pub async fn fetch_json(&self, path: &str) -> Result<Vec<PlayerRecord>, ApiError> {
        let window = web_sys::window().ok_or_else(|| ApiError::network(path, "no window"))?;

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::SameOrigin);

        let request = Request::new_with_str_and_init(path, &opts)
            .map_err(|error| ApiError::network(path, describe(&error)))?;

        let response_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|error| ApiError::network(path, describe(&error)))?;

        let response = response_value
            .dyn_into::<Response>()
            .map_err(|_| ApiError::network(path, "fetch did not yield a Response"))?;

        if !response.ok() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: response.status(),
            });
        }

        let text = response
            .text()
            .map_err(|error| ApiError::network(path, describe(&error)))?;
        let body = JsFuture::from(text)
            .await
            .map_err(|error| ApiError::network(path, describe(&error)))?
            .as_string()
            .ok_or_else(|| ApiError::parse(path, "response body is not text"))?;

        parse_records(path, &body)
    }
}

#[async_trait(?Send)]
impl RecordSource for HttpClient {
    async fn fetch_records(&self, endpoint: Endpoint) -> Result<Vec<PlayerRecord>, ApiError> {
        self.fetch_json(&endpoint.path()).await
    }
}

/// Posts client events to the log endpoint and forgets about them.
#[derive(Debug, Default, Clone, Copy)]
pub struct BeaconSink;

impl TelemetrySink for BeaconSink {
    fn report(&self, event: ClientEvent) {
        spawn_local(async move {
            if let Err(error) = post_event(&event).await {
                log::debug!("dropped client event {}: {}", event.what, describe(&error));
            }
        });
    }
}

async fn post_event(event: &ClientEvent) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let body =
        serde_json::to_string(event).map_err(|error| JsValue::from_str(&error.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::SameOrigin);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&Endpoint::Log.path(), &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    JsFuture::from(window.fetch_with_request(&request)).await?;
    Ok(())
}

/// Best human-readable text for a thrown JS value.
pub fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
