use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, RequestInit, Response, Window, window};
use model::UserData;

use crate::{
    abort::{until_settled, Abort},
    error::FetchError,
};

pub async fn get_user(url: &str) -> Result<UserData, FetchError> {

    match fetch_json_api(url, "GET", None).await? {
        (response, true) => {
            serde_wasm_bindgen::from_value(response)
                .map_err(|e| FetchError::Parse(e.to_string()))
        }
        (app_error, false) => {
            Err(FetchError::Server(app_error.as_string().unwrap_or(String::from("server error"))))
        }
    }
}

/// JSON body with `true` on 2xx, text body with `false` otherwise
pub async fn fetch_json_api(
    url: &str,
    method: &str,
    body: Option<&JsValue>,
) -> Result<(JsValue, bool), FetchError> {
    let abort = Abort::new(url)?;

    let headers = Headers::new()?;
    headers.set("Accept", "application/json")?;
    headers.set("Content-Type", "application/json")?;

    let w = window().ok_or_else(|| FetchError::Network(String::from("no global window")))?;
    let init = RequestInit::new();
    init.set_method(method);
    init.set_headers(&headers);
    if let Some(b) = body {
        init.set_body(b);
    }
    init.set_signal(Some(&abort.signal()));

    // dropping this future before it settles drops `abort` and aborts the request
    let (value, ok) = until_settled(abort, send(&w, url, &init)).await?;
    if !ok {
        log::debug!("{} {} responded with error", method, url);
    }

    Ok((value, ok))
}

async fn send(w: &Window, url: &str, init: &RequestInit) -> Result<(JsValue, bool), JsValue> {
    let future = w.fetch_with_str_and_init(url, init);
    let response = JsFuture::from(future).await?.unchecked_into::<Response>();

    if response.ok() {
        let value = JsFuture::from(response.json()?).await?;
        Ok((value, true))
    } else {
        let value = JsFuture::from(response.text()?).await?;
        Ok((value, false))
    }
}
