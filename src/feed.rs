use crate::dom::js_err;
use orbit_core::{ContentFeed, ContentItem, FeedError, JsonFeed};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let request: js_sys::Promise = window.fetch_with_str(url);
    let resp_value = JsFuture::from(request).await.map_err(js_err)?;
    let resp: web::Response = resp_value.dyn_into().map_err(js_err)?;
    if !resp.ok() {
        anyhow::bail!("GET {} returned {}", url, resp.status());
    }
    let body = JsFuture::from(resp.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    body.as_string()
        .ok_or_else(|| anyhow::anyhow!("GET {} returned a non-text body", url))
}

async fn fetch_feed(url: &str) -> Result<Vec<ContentItem>, FeedError> {
    let text = fetch_text(url)
        .await
        .map_err(|e| FeedError::Unavailable(format!("GET {url}: {e:#}")))?;
    JsonFeed::from_json(&text)?.list_items()
}

/// Items from `url`, or the bundled sample if the fetch or parse fails.
pub async fn load_items(url: &str) -> Vec<ContentItem> {
    match fetch_feed(url).await {
        Ok(items) => {
            log::info!("[feed] {} items from {}", items.len(), url);
            items
        }
        Err(e) => {
            log::warn!("[feed] {}; using bundled sample", e);
            JsonFeed::sample()
                .and_then(|f| f.list_items())
                .unwrap_or_else(|e| {
                    log::error!("[feed] bundled sample invalid: {}", e);
                    Vec::new()
                })
        }
    }
}
