//! Fetch-based transport

use async_trait::async_trait;
use gloo_net::http::Request;
use wasm_bindgen::JsValue;

use ghostcheck::api::{ApiRequest, ApiResponse, Method, RequestBody, Transport, TransportError};
use ghostcheck::UploadFile;

/// Sends requests with the browser's `fetch`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

fn js_error(value: JsValue) -> TransportError {
    TransportError(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

/// Wrap the upload in a `FormData`; the browser sets the multipart boundary
fn form_data(field: &str, file: &UploadFile) -> Result<web_sys::FormData, TransportError> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);

    let mut options = web_sys::BlobPropertyBag::new();
    if let Some(content_type) = &file.content_type {
        options.type_(content_type);
    }
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(js_error)?;

    let form = web_sys::FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(field, &blob, &file.filename)
        .map_err(js_error)?;
    Ok(form)
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let prepared = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart { field, file } => builder.body(form_data(field, file)?),
        }
        .map_err(|e| TransportError(format!("Request build error: {}", e)))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(ApiResponse::new(status, body))
    }
}
