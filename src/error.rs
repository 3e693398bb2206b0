use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures of the outer surfaces. Binding itself never fails; see [`apply`](`crate::apply`).
#[derive(Error, Debug)]
pub enum Error {
	#[error("no `window.document` available to create the template wrapper in")]
	NoDocument,

	#[error("DOM operation failed: {0}")]
	Dom(String),

	#[error("data is not representable as JSON: {0}")]
	Data(#[from] serde_json::Error),

	#[error("configuration was already installed or read")]
	ConfigAlreadyInstalled,
}

impl From<JsValue> for Error {
	fn from(value: JsValue) -> Self {
		Self::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}

impl From<Error> for JsValue {
	fn from(error: Error) -> Self {
		JsValue::from_str(&error.to_string())
	}
}
