//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现核心库的 `HttpClient`，
//! 负责把 `RequestBody` 转换为浏览器可发送的 JSON 字符串或 `FormData`。

use async_trait::async_trait;
use travel_admin::request::{FormPart, RequestBody};
use travel_admin::{HttpClient, HttpRequest, HttpResponse, TransportError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};

fn js_err(context: &str, e: JsValue) -> TransportError {
    TransportError(format!("{}: {:?}", context, e))
}

/// 基于 fetch 的 HTTP 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

impl FetchClient {
    fn build(req: &HttpRequest) -> Result<Request, TransportError> {
        let headers = Headers::new().map_err(|e| js_err("创建 Headers 失败", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| js_err("设置 Header 失败", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match &req.body {
            RequestBody::Empty => {}
            RequestBody::Json(value) => {
                let text = serde_json::to_string(value)
                    .map_err(|e| TransportError(format!("序列化请求体失败: {}", e)))?;
                opts.set_body(&JsValue::from_str(&text));
            }
            RequestBody::Multipart(parts) => {
                // 不设置 Content-Type，由浏览器补上 boundary
                opts.set_body(&form_data(parts)?.into());
            }
        }

        Request::new_with_str_and_init(&req.url, &opts).map_err(|e| js_err("构建请求失败", e))
    }
}

fn form_data(parts: &[FormPart]) -> Result<FormData, TransportError> {
    let form = FormData::new().map_err(|e| js_err("创建 FormData 失败", e))?;
    for part in parts {
        match part {
            FormPart::Text { name, value } => form
                .append_with_str(name, value)
                .map_err(|e| js_err("追加表单字段失败", e))?,
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let blob = to_blob(bytes, content_type)?;
                form.append_with_blob_and_filename(name, &blob, file_name)
                    .map_err(|e| js_err("追加文件失败", e))?
            }
        }
    }
    Ok(form)
}

fn to_blob(bytes: &[u8], content_type: &str) -> Result<Blob, TransportError> {
    let array = js_sys::Uint8Array::from(bytes);
    let sequence = js_sys::Array::of1(&array);
    let props = BlobPropertyBag::new();
    props.set_type(content_type);
    Blob::new_with_u8_array_sequence_and_options(&sequence, &props)
        .map_err(|e| js_err("创建 Blob 失败", e))
}

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let request = Self::build(&req)?;

        let window =
            web_sys::window().ok_or_else(|| TransportError("无法获取 window 对象".into()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_err("网络错误", e))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| js_err("Response 类型转换失败", e))?;

        let promise = response
            .text()
            .map_err(|e| js_err("读取响应体失败", e))?;
        let body = JsFuture::from(promise)
            .await
            .map_err(|e| js_err("读取响应体失败", e))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse {
            status: response.status(),
            body,
        })
    }
}

/// 读取 `<input type="file">` 当前选中的文件
///
/// 没有选择文件时返回 `Ok(None)`。
pub async fn read_selected_file(
    input: &web_sys::HtmlInputElement,
) -> Result<Option<travel_admin_shared::protocol::Upload>, TransportError> {
    let Some(file) = input.files().and_then(|list| list.get(0)) else {
        return Ok(None);
    };
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| js_err("读取文件失败", e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    Ok(Some(travel_admin_shared::protocol::Upload {
        file_name: file.name(),
        content_type,
        bytes,
    }))
}
