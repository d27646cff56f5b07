//! Typed client for the detection API.
//!
//! One async method per endpoint. The base URL is injected once at
//! construction; nothing in here touches the DOM.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, Response};

/// Classified failure at the client boundary.
///
/// `Validation` is raised before any request is built; `Server` carries the
/// backend's own `error` message when it sent one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Invalid input: {0}")]
    Validation(String),
}

// -- Wire types --

/// Response from `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthResponse {
    /// The service counts as online only when it reports itself healthy
    /// AND has a model loaded. Anything else renders as degraded.
    pub fn is_online(&self) -> bool {
        self.status == "healthy" && self.model_loaded
    }
}

/// A verdict as the backend variants actually encode it: a class label,
/// a numeric class id (0 = benign), or a plain flag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PredictionValue {
    Flag(bool),
    Class(f64),
    Label(String),
}

impl PredictionValue {
    /// One normalization rule for all encodings: nonzero classes and raised
    /// flags are attacks, and any label other than BENIGN/NORMAL is an
    /// attack (multi-class backends return the attack name itself).
    pub fn is_attack(&self) -> bool {
        match self {
            PredictionValue::Flag(flag) => *flag,
            PredictionValue::Class(class) => *class != 0.0,
            PredictionValue::Label(label) => {
                !label.eq_ignore_ascii_case("benign") && !label.eq_ignore_ascii_case("normal")
            }
        }
    }

    /// The raw class as the backend sent it, for detail rows.
    pub fn raw(&self) -> String {
        match self {
            PredictionValue::Flag(flag) => flag.to_string(),
            PredictionValue::Class(class) => {
                if class.fract() == 0.0 {
                    format!("{}", *class as i64)
                } else {
                    class.to_string()
                }
            }
            PredictionValue::Label(label) => label.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    prediction: Option<PredictionValue>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    probability_attack: Option<f64>,
    #[serde(default)]
    probability_normal: Option<f64>,
    #[serde(default)]
    error: Option<String>,
}

/// Canonical single-prediction result after boundary normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub verdict: PredictionValue,
    pub confidence: Option<f64>,
    pub probability_attack: Option<f64>,
    pub probability_normal: Option<f64>,
}

impl PredictResponse {
    fn into_prediction(self) -> Result<Prediction, ApiError> {
        if let Some(message) = self.error {
            return Err(ApiError::Server(message));
        }
        let verdict = self
            .prediction
            .ok_or_else(|| ApiError::Server("response carried no prediction".to_string()))?;
        Ok(Prediction {
            verdict,
            confidence: self.confidence,
            probability_attack: self.probability_attack,
            probability_normal: self.probability_normal,
        })
    }
}

/// One row of a batch response. Older backends send bare class ids,
/// newer ones send enriched objects; both decode here.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum BatchRow {
    Detailed {
        #[serde(default)]
        index: Option<u32>,
        prediction: PredictionValue,
        #[serde(default)]
        confidence: Option<f64>,
    },
    Bare(PredictionValue),
}

#[derive(Debug, Clone, Deserialize)]
struct BatchResponse {
    #[serde(default)]
    predictions: Vec<BatchRow>,
    #[serde(default)]
    total: Option<u32>,
    #[serde(default)]
    attacks: Option<u32>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    accuracy: Option<f64>,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Per-row verdict with a stable 1-based index for display.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRowVerdict {
    pub index: u32,
    pub verdict: PredictionValue,
    pub confidence: Option<f64>,
}

/// Canonical batch outcome. `attacks <= total` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    pub filename: String,
    pub total: u32,
    pub attacks: u32,
    pub rows: Vec<BatchRowVerdict>,
    pub accuracy: Option<f64>,
    pub note: Option<String>,
}

impl BatchResult {
    pub fn normal(&self) -> u32 {
        self.total - self.attacks
    }
}

impl BatchResponse {
    /// Reconcile the two counting conventions: trust top-level counts when
    /// the server sent them, otherwise derive from the rows.
    fn into_result(self, fallback_filename: String) -> Result<BatchResult, ApiError> {
        if let Some(message) = self.error {
            return Err(ApiError::Server(message));
        }
        let rows: Vec<BatchRowVerdict> = self
            .predictions
            .into_iter()
            .enumerate()
            .map(|(i, row)| match row {
                BatchRow::Detailed {
                    index,
                    prediction,
                    confidence,
                } => BatchRowVerdict {
                    index: index.unwrap_or(i as u32 + 1),
                    verdict: prediction,
                    confidence,
                },
                BatchRow::Bare(verdict) => BatchRowVerdict {
                    index: i as u32 + 1,
                    verdict,
                    confidence: None,
                },
            })
            .collect();

        let derived_attacks = rows.iter().filter(|r| r.verdict.is_attack()).count() as u32;
        let total = self.total.unwrap_or(rows.len() as u32);
        let attacks = self.attacks.unwrap_or(derived_attacks).min(total);

        Ok(BatchResult {
            filename: self.filename.unwrap_or(fallback_filename),
            total,
            attacks,
            rows,
            accuracy: self.accuracy,
            note: self.note,
        })
    }
}

/// One persisted record of a past batch submission.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryEntry {
    pub date: String,
    pub filename: String,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub attacks: u32,
}

/// Descriptive model info from `GET /api/stats`. Every field is optional;
/// backend variants differ in what they report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub model_architecture: Option<String>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub dataset: Option<String>,
    #[serde(default)]
    pub cloud_platform: Option<String>,
    #[serde(default)]
    pub layers: Option<Vec<u32>>,
    #[serde(default)]
    pub training_method: Option<String>,
    #[serde(default)]
    pub attack_types: Option<Vec<String>>,
}

// -- Input validation --

#[derive(Deserialize)]
#[serde(untagged)]
enum FeatureInput {
    Wrapped { features: Vec<f64> },
    Bare(Vec<f64>),
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    features: &'a [f64],
}

/// Parse the feature-vector textarea before any request is built.
/// Accepts `{"features": [..]}` or a bare JSON array.
pub fn parse_feature_input(raw: &str) -> Result<Vec<f64>, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(
            "enter a feature vector first".to_string(),
        ));
    }
    let parsed: FeatureInput = serde_json::from_str(trimmed).map_err(|_| {
        ApiError::Validation(
            "expected JSON, either {\"features\": [..]} or a bare array of numbers".to_string(),
        )
    })?;
    let features = match parsed {
        FeatureInput::Wrapped { features } => features,
        FeatureInput::Bare(features) => features,
    };
    if features.is_empty() {
        return Err(ApiError::Validation("the feature vector is empty".to_string()));
    }
    Ok(features)
}

// -- Client --

/// HTTP client for the detection API. Cheap to clone; holds only the
/// base URL it was constructed with.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Client pointed at the origin the page was served from.
    pub fn from_window_origin() -> Self {
        let base_url = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        Self::new(base_url)
    }

    pub async fn get_health(&self) -> Result<HealthResponse, ApiError> {
        let request = self.get_request("/api/health")?;
        decode(self.fetch_json(request).await?)
    }

    pub async fn predict_single(&self, features: &[f64]) -> Result<Prediction, ApiError> {
        let body = serde_json::to_string(&PredictRequest { features })
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        let request = self.post_json_request("/api/predict", &body)?;
        let response: PredictResponse = decode(self.fetch_json(request).await?)?;
        response.into_prediction()
    }

    pub async fn predict_batch(&self, file: &web_sys::File) -> Result<BatchResult, ApiError> {
        let form = FormData::new().map_err(|e| ApiError::Network(js_error_message(&e)))?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(|e| ApiError::Network(js_error_message(&e)))?;
        let request = self.post_form_request("/api/predict_batch", &form)?;
        let response: BatchResponse = decode(self.fetch_json(request).await?)?;
        response.into_result(file.name())
    }

    /// Fetch the scan history. Callers fail open: an `Err` here renders as
    /// an empty history, never as a dialog.
    pub async fn get_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let request = self.get_request("/api/history")?;
        decode(self.fetch_json(request).await?)
    }

    pub async fn get_stats(&self) -> Result<StatsSnapshot, ApiError> {
        let request = self.get_request("/api/stats")?;
        decode(self.fetch_json(request).await?)
    }

    // -- Request construction --

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_request(&self, path: &str) -> Result<Request, ApiError> {
        Request::new_with_str(&self.url(path)).map_err(|e| ApiError::Network(js_error_message(&e)))
    }

    fn post_json_request(&self, path: &str, body: &str) -> Result<Request, ApiError> {
        let headers = Headers::new().map_err(|e| ApiError::Network(js_error_message(&e)))?;
        headers
            .set("Content-Type", "application/json")
            .map_err(|e| ApiError::Network(js_error_message(&e)))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(body));

        Request::new_with_str_and_init(&self.url(path), &init)
            .map_err(|e| ApiError::Network(js_error_message(&e)))
    }

    fn post_form_request(&self, path: &str, form: &FormData) -> Result<Request, ApiError> {
        // No Content-Type header: the browser sets the multipart boundary.
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(form);

        Request::new_with_str_and_init(&self.url(path), &init)
            .map_err(|e| ApiError::Network(js_error_message(&e)))
    }

    /// One network round trip: send, await, decode the body as JSON.
    /// Non-OK statuses surface as `Server` with the body's `error` message
    /// when the backend provided one.
    async fn fetch_json(&self, request: Request) -> Result<JsValue, ApiError> {
        let window =
            web_sys::window().ok_or_else(|| ApiError::Network("no window available".to_string()))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ApiError::Network(js_error_message(&e)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| ApiError::Network("fetch returned a non-Response value".to_string()))?;

        let status = response.status();
        let body = match response.json() {
            Ok(promise) => JsFuture::from(promise).await.ok(),
            Err(_) => None,
        };

        if !response.ok() {
            let detail = body
                .as_ref()
                .and_then(|b| js_sys::Reflect::get(b, &JsValue::from_str("error")).ok())
                .and_then(|v| v.as_string())
                .unwrap_or_else(|| format!("request failed with HTTP {status}"));
            return Err(ApiError::Server(detail));
        }

        body.ok_or_else(|| ApiError::Network("response body was not valid JSON".to_string()))
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, ApiError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| ApiError::Network(format!("failed to decode response: {e}")))
}

fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_from_json(json: &str) -> BatchResult {
        let response: BatchResponse = serde_json::from_str(json).unwrap();
        response.into_result("upload.csv".to_string()).unwrap()
    }

    #[test]
    fn health_online_requires_both_fields() {
        let healthy: HealthResponse =
            serde_json::from_str(r#"{"status": "healthy", "model_loaded": true}"#).unwrap();
        assert!(healthy.is_online());

        let no_model: HealthResponse = serde_json::from_str(r#"{"status": "healthy"}"#).unwrap();
        assert!(!no_model.is_online());

        let degraded: HealthResponse =
            serde_json::from_str(r#"{"status": "starting", "model_loaded": true}"#).unwrap();
        assert!(!degraded.is_online());
    }

    #[test]
    fn health_tolerates_version_field() {
        let response: HealthResponse = serde_json::from_str(
            r#"{"status": "healthy", "model_loaded": true, "version": "1.0.0"}"#,
        )
        .unwrap();
        assert!(response.is_online());
        assert_eq!(response.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn verdict_encodings_agree() {
        let label: PredictionValue = serde_json::from_str(r#""ATTACK""#).unwrap();
        let class: PredictionValue = serde_json::from_str("1").unwrap();
        let flag: PredictionValue = serde_json::from_str("true").unwrap();
        assert!(label.is_attack());
        assert!(class.is_attack());
        assert!(flag.is_attack());

        let benign: PredictionValue = serde_json::from_str(r#""BENIGN""#).unwrap();
        let normal: PredictionValue = serde_json::from_str(r#""normal""#).unwrap();
        let zero: PredictionValue = serde_json::from_str("0").unwrap();
        let lowered: PredictionValue = serde_json::from_str("false").unwrap();
        assert!(!benign.is_attack());
        assert!(!normal.is_attack());
        assert!(!zero.is_attack());
        assert!(!lowered.is_attack());
    }

    #[test]
    fn named_attack_classes_are_attacks() {
        let portscan: PredictionValue = serde_json::from_str(r#""PortScan""#).unwrap();
        assert!(portscan.is_attack());
        assert_eq!(portscan.raw(), "PortScan");
    }

    #[test]
    fn predict_response_error_field_wins() {
        let response: PredictResponse =
            serde_json::from_str(r#"{"error": "Missing features key"}"#).unwrap();
        assert_eq!(
            response.into_prediction(),
            Err(ApiError::Server("Missing features key".to_string()))
        );
    }

    #[test]
    fn predict_response_without_verdict_is_a_server_error() {
        let response: PredictResponse = serde_json::from_str(r#"{"confidence": 0.9}"#).unwrap();
        assert!(matches!(
            response.into_prediction(),
            Err(ApiError::Server(_))
        ));
    }

    #[test]
    fn predict_response_optional_fields() {
        let response: PredictResponse = serde_json::from_str(
            r#"{"prediction": "ATTACK", "confidence": 97.5, "probability_attack": 97.5, "probability_normal": 2.5}"#,
        )
        .unwrap();
        let prediction = response.into_prediction().unwrap();
        assert!(prediction.verdict.is_attack());
        assert_eq!(prediction.confidence, Some(97.5));

        let bare: PredictResponse = serde_json::from_str(r#"{"prediction": 0}"#).unwrap();
        let prediction = bare.into_prediction().unwrap();
        assert!(!prediction.verdict.is_attack());
        assert_eq!(prediction.confidence, None);
    }

    #[test]
    fn batch_accepts_bare_class_ids_with_top_level_counts() {
        let result = batch_from_json(r#"{"predictions": [0, 1, 1, 0], "total": 4, "attacks": 2}"#);
        assert_eq!(result.total, 4);
        assert_eq!(result.attacks, 2);
        assert_eq!(result.normal(), 2);
        assert_eq!(result.rows.len(), 4);
        assert_eq!(result.rows[0].index, 1);
        assert!(!result.rows[0].verdict.is_attack());
        assert!(result.rows[1].verdict.is_attack());
    }

    #[test]
    fn batch_derives_counts_when_server_omits_them() {
        let result = batch_from_json(r#"{"predictions": [1, 0, 1]}"#);
        assert_eq!(result.total, 3);
        assert_eq!(result.attacks, 2);
        assert_eq!(result.normal(), 1);
        assert_eq!(result.filename, "upload.csv");
    }

    #[test]
    fn batch_accepts_enriched_rows() {
        let result = batch_from_json(
            r#"{"predictions": [
                {"index": 1, "prediction": "BENIGN", "confidence": 99.1},
                {"index": 2, "prediction": "DDoS", "confidence": 88.0}
            ], "filename": "flows.csv"}"#,
        );
        assert_eq!(result.total, 2);
        assert_eq!(result.attacks, 1);
        assert_eq!(result.filename, "flows.csv");
        assert_eq!(result.rows[1].index, 2);
        assert_eq!(result.rows[1].confidence, Some(88.0));
    }

    #[test]
    fn batch_attack_count_is_clamped_to_total() {
        let result = batch_from_json(r#"{"predictions": [1], "total": 1, "attacks": 5}"#);
        assert_eq!(result.attacks, 1);
        assert_eq!(result.normal(), 0);
    }

    #[test]
    fn batch_passes_accuracy_and_note_through() {
        let result = batch_from_json(
            r#"{"predictions": [0], "accuracy": 99.36, "note": "model retrained weekly"}"#,
        );
        assert_eq!(result.accuracy, Some(99.36));
        assert_eq!(result.note.as_deref(), Some("model retrained weekly"));
    }

    #[test]
    fn batch_error_field_wins() {
        let response: BatchResponse =
            serde_json::from_str(r#"{"error": "Format invalide. Utilisez CSV"}"#).unwrap();
        assert!(matches!(
            response.into_result("x.csv".to_string()),
            Err(ApiError::Server(_))
        ));
    }

    #[test]
    fn stats_fields_are_all_optional() {
        let full: StatsSnapshot = serde_json::from_str(
            r#"{
                "model_architecture": "MLP (Multi-Layer Perceptron)",
                "accuracy": 99.36,
                "dataset": "CICIDS2017",
                "cloud_platform": "Render (PaaS)",
                "layers": [78, 64, 32, 2],
                "training_method": "Supervised",
                "attack_types": ["DDoS", "PortScan"]
            }"#,
        )
        .unwrap();
        assert_eq!(full.accuracy, Some(99.36));
        assert_eq!(full.layers.as_deref(), Some(&[78, 64, 32, 2][..]));

        let sparse: StatsSnapshot = serde_json::from_str(r#"{"dataset": "CICIDS2017"}"#).unwrap();
        assert_eq!(sparse.model_architecture, None);
        assert_eq!(sparse.attack_types, None);
    }

    #[test]
    fn history_entries_decode_in_server_order() {
        let entries: Vec<HistoryEntry> = serde_json::from_str(
            r#"[
                {"date": "2024-06-02 10:15", "filename": "b.csv", "total": 10, "attacks": 3},
                {"date": "2024-06-01 09:00", "filename": "a.csv", "total": 5, "attacks": 0}
            ]"#,
        )
        .unwrap();
        assert_eq!(entries[0].filename, "b.csv");
        assert_eq!(entries[1].attacks, 0);
    }

    #[test]
    fn feature_input_accepts_both_forms() {
        let wrapped = parse_feature_input(r#"{"features": [0.1, 0.2, 0.3]}"#).unwrap();
        let bare = parse_feature_input("[0.1, 0.2, 0.3]").unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn feature_input_rejects_garbage_before_any_request() {
        assert!(matches!(
            parse_feature_input("not json"),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            parse_feature_input(""),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            parse_feature_input(r#"{"features": []}"#),
            Err(ApiError::Validation(_))
        ));
    }
}
