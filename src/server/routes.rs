use tracing::warn;

use crate::server::api::{self, ApiError};
use crate::server::AppState;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

pub fn route_request(state: &AppState, method: &str, path: &str, body: &str) -> HttpResponse {
    let path = path.split('?').next().unwrap_or(path);
    let result = match (method, path) {
        ("GET", "/api/health") => api::health_payload(),
        ("GET", "/api/tiers") => api::tiers_payload(),
        ("GET", "/api/progression") => api::progression_payload(state),
        ("POST", "/api/orders/complete") => api::complete_order_payload(state),
        ("PUT", "/api/orders") => api::set_orders_payload(state, body),
        ("POST", "/api/debug/cycle") => api::debug_cycle_payload(state),
        ("POST", "/api/shops/availability") => api::availability_payload(body),
        ("GET", "/theme.css") => {
            return match api::theme_css(state) {
                Ok(css) => HttpResponse {
                    status_code: 200,
                    status_text: "OK",
                    content_type: "text/css; charset=utf-8",
                    body: css,
                },
                Err(err) => api_error_response(err),
            };
        }
        _ => Err(ApiError::NotFound("Route not found")),
    };

    match result {
        Ok(payload) => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body: payload,
        },
        Err(err) => api_error_response(err),
    }
}

fn api_error_response(err: ApiError) -> HttpResponse {
    match err {
        ApiError::Parse(err) => {
            error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
        }
        ApiError::Validation(msg) => error_response(400, "Bad Request", &msg),
        ApiError::NotFound(msg) => error_response(404, "Not Found", msg),
        ApiError::Internal(msg) => {
            warn!("internal error: {msg}");
            error_response(500, "Internal Server Error", &msg)
        }
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
