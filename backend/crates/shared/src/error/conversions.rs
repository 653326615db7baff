//! Error conversions
//!
//! Rendering of [`AppError`] as an HTTP response (feature `axum`).

#[cfg(feature = "axum")]
use super::app_error::AppError;

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let mut body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
        });
        if let Some(action) = self.action() {
            body["action"] = serde_json::Value::from(action);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_status_from_kind() {
        let response = AppError::conflict("Email already registered").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::authentication("Invalid credentials").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
