//! Thin wrappers around the browser APIs the factors view needs.
//!
//! Every call returns an error string instead of panicking; the callers show
//! or log it.

use clima_core::config::ApiConfig;
use clima_core::prefill::{Prefill, DATE_KEY, MARKER_KEY};
use gloo_timers::callback::Timeout;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

pub const PNG_MIME: &str = "image/png";
pub const CSV_MIME: &str = "text/csv";

fn js_error(context: &str, e: JsValue) -> String {
    format!("{}: {:?}", context, e)
}

/// A `blob:` URL that is revoked when dropped.
#[derive(Debug, PartialEq, Eq)]
pub struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    pub fn from_bytes(bytes: &[u8], mime: &str) -> Result<Self, String> {
        let parts = Array::new();
        parts.push(&Uint8Array::from(bytes));
        let options = BlobPropertyBag::new();
        options.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| js_error("failed to create blob", e))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|e| js_error("failed to create object URL", e))?;
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        log::debug!("revoking {}", self.url);
        if let Err(e) = Url::revoke_object_url(&self.url) {
            log::warn!("{}", js_error("failed to revoke object URL", e));
        }
    }
}

/// Save `bytes` as a file named `filename` through a temporary link. The URL
/// is revoked on the next tick, after the browser has picked up the click.
pub fn download_bytes(bytes: &[u8], filename: &str, mime: &str) -> Result<(), String> {
    let url = ObjectUrl::from_bytes(bytes, mime)?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_string())?;
    let body = document.body().ok_or_else(|| "no document body".to_string())?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| js_error("failed to create link", e))?
        .dyn_into()
        .map_err(|_| "created element is not a link".to_string())?;
    anchor.set_href(url.as_str());
    anchor.set_download(filename);
    body.append_child(&anchor)
        .map_err(|e| js_error("failed to attach link", e))?;
    anchor.click();
    anchor.remove();

    Timeout::new(0, move || drop(url)).forget();
    log::info!("downloaded {}", filename);
    Ok(())
}

fn storage_item(storage: &web_sys::Storage, key: &str) -> Option<String> {
    match storage.get_item(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("{}", js_error(&format!("failed to read '{}'", key), e));
            None
        }
    }
}

/// The last map and date selection, read from `localStorage`.
pub fn read_prefill() -> Prefill {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
    let Some(storage) = storage else {
        log::warn!("localStorage unavailable, starting with an empty form");
        return Prefill::default();
    };
    let marker = storage_item(&storage, MARKER_KEY);
    let date = storage_item(&storage, DATE_KEY);
    Prefill::parse(marker.as_deref(), date.as_deref())
}

/// Endpoint configuration for the page. An empty `configured` base means the
/// service shares the page's origin.
pub fn api_config(configured: Option<&str>) -> ApiConfig {
    let config = ApiConfig::from_base(configured);
    if !config.base_url().is_empty() {
        return config;
    }
    let origin = web_sys::window().and_then(|w| w.location().origin().ok());
    ApiConfig::from_base(origin.as_deref())
}
