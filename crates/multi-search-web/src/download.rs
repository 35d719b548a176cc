//! Offer a generated file to the user as a download

use gloo_file::{Blob, ObjectUrl};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlAnchorElement;

pub fn offer_download(file_name: &str, contents: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    let url = ObjectUrl::from(Blob::new_with_options(contents, Some("application/json")));

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();

    // `url` is revoked here
    Ok(())
}
