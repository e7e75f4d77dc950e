//! Replayable request descriptor.
//!
//! Requests are described as plain data and only turned into a
//! `reqwest::Request` at send time, so the response interceptor can resubmit
//! the exact same request with a new bearer token.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File {
        file_name: String,
        mime: Option<String>,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

impl FormPart {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: FormValue::Text(value.into()),
        }
    }

    pub fn file(name: &str, file_name: &str, mime: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            value: FormValue::File {
                file_name: file_name.to_string(),
                mime: mime.map(str::to_string),
                bytes,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    /// Build a fresh multipart form. `Form` is consumed by every send.
    pub(crate) fn to_form(parts: &[FormPart]) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for part in parts {
            form = match &part.value {
                FormValue::Text(text) => form.text(part.name.clone(), text.clone()),
                FormValue::File {
                    file_name,
                    mime,
                    bytes,
                } => {
                    let mut file = Part::bytes(bytes.clone()).file_name(file_name.clone());
                    if let Some(m) = mime {
                        file = file.mime_str(m)?;
                    }
                    form.part(part.name.clone(), file)
                }
            };
        }
        Ok(form)
    }
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, e.g. `/user/data`.
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Extra headers, e.g. `x-reset-token`.
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    /// Bearer token, filled in by the request interceptor.
    pub bearer: Option<String>,
    /// Set once the request has been replayed after a refresh.
    pub retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
            retried: false,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Path plus percent-encoded query string.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_and_query() {
        let req = ApiRequest::get("/user/cars").query("page", 2).query("limit", 6);
        assert_eq!(req.path_and_query(), "/user/cars?page=2&limit=6");

        let req = ApiRequest::get("/search").query("q", "BMW X5");
        assert_eq!(req.path_and_query(), "/search?q=BMW%20X5");

        assert_eq!(ApiRequest::get("/user/data").path_and_query(), "/user/data");
    }

    #[test]
    fn test_new_request_is_not_retried() {
        let req = ApiRequest::post("/bookings/create");
        assert!(!req.retried);
        assert!(req.bearer.is_none());
        assert_eq!(req.body, RequestBody::Empty);
    }

    #[test]
    fn test_json_body() {
        let req = ApiRequest::post("/owner/toggle-car")
            .json(&serde_json::json!({ "carId": "c1" }))
            .unwrap();
        assert_eq!(req.body, RequestBody::Json(serde_json::json!({ "carId": "c1" })));
    }

    #[test]
    fn test_form_builds_with_file_part() {
        let parts = vec![
            FormPart::file("image", "car.png", Some("image/png"), vec![0x89, 0x50]),
            FormPart::text("carData", "{}"),
        ];
        assert!(RequestBody::to_form(&parts).is_ok());
    }
}
