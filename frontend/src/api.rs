use serde::de::DeserializeOwned;
use todo_shared::{CreateTaskRequest, ErrorBody, Task, UpdateTaskRequest};
use uuid::Uuid;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{console, window, Request, RequestInit, Response};

const TASKS_URL: &str = "/api/tasks";

pub async fn fetch_tasks() -> Result<Vec<Task>, String> {
    send("GET", TASKS_URL, None).await
}

pub async fn create_task(request: &CreateTaskRequest) -> Result<Task, String> {
    let body = serde_json::to_string(request).map_err(|_| "Failed to serialize request")?;
    send("POST", TASKS_URL, Some(body)).await
}

pub async fn update_task(id: Uuid, patch: &UpdateTaskRequest) -> Result<Task, String> {
    let body = serde_json::to_string(patch).map_err(|_| "Failed to serialize request")?;
    send("PUT", &format!("{TASKS_URL}/{id}"), Some(body)).await
}

pub async fn delete_task(id: Uuid) -> Result<Task, String> {
    send("PATCH", &format!("{TASKS_URL}/{id}/delete"), None).await
}

async fn send<T: DeserializeOwned>(method: &str, url: &str, body: Option<String>) -> Result<T, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| "Failed to create request")?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|_| "Failed to set header")?;
    }

    let promise = window()
        .ok_or("No window available")?
        .fetch_with_request(&request);
    let response: Response = JsFuture::from(promise)
        .await
        .map_err(|_| "Failed to send request")?
        .into();

    let text_promise = response.text().map_err(|_| "Failed to read response")?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|_| "Failed to get text")?
        .as_string()
        .ok_or("Failed to convert to string")?;

    if !response.ok() {
        console::log_1(&format!("{method} {url} failed with {}: {text}", response.status()).into());
        let reason = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::into_text)
            .unwrap_or_else(|| format!("Request failed with status {}", response.status()));
        return Err(reason);
    }

    serde_json::from_str(&text).map_err(|e| format!("Failed to parse JSON: {}", e))
}
