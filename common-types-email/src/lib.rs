use common_types;

mod routes;
mod middleware;

#[allow(non_snake_case)]
pub mod Routes {
    pub use crate::routes::*;
}

#[allow(non_snake_case)]
pub mod Middleware {
    pub use crate::middleware::*;
}

#[allow(non_snake_case)]
pub mod Response {
    use aws_lambda_events::{
        apigw::ApiGatewayProxyResponse,
        encodings::Body,
        http::{
            StatusCode,
            header::{HeaderValue, CONTENT_TYPE},
        },
    };
    use crate::common_types::SendEmail;

    pub type ServerResponse = ApiGatewayProxyResponse;

    pub const CONTENT_TYPE_JSON: &str = "application/json";

    // Only reachable if serde_json refuses a plain struct of strings
    const FALLBACK_BODY: &str = r#"{"message":"An internal server error occurred."}"#;

    pub fn status_response(status: StatusCode, body: &SendEmail::Response) -> ServerResponse {
        let text = serde_json::to_string(body).unwrap_or_else(|err| {
            tracing::error!("Failed to serialize response body, {err}");
            FALLBACK_BODY.to_string()
        });
        let mut response = ServerResponse {
            status_code: status.as_u16() as i64,
            body: Some(Body::Text(text)),
            ..Default::default()
        };
        response.headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        response
    }

    pub fn ok(body: &SendEmail::Response) -> ServerResponse {
        status_response(StatusCode::OK, body)
    }

    pub fn bad_request(body: &SendEmail::Response) -> ServerResponse {
        status_response(StatusCode::BAD_REQUEST, body)
    }

    pub fn internal_server_error(body: &SendEmail::Response) -> ServerResponse {
        status_response(StatusCode::INTERNAL_SERVER_ERROR, body)
    }
}

#[allow(non_snake_case)]
pub mod Email {
    use async_trait::async_trait;
    use thiserror::Error;

    /// An email that passed validation and is ready to hand to a transport.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct OutgoingEmail {
        pub receiver_email: String,
        pub subject: String,
        pub body_text: String,
    }

    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    #[error("{0}")]
    pub struct DispatchError(pub String);

    /// Hands an accepted email to whatever actually delivers it. Returning
    /// `Err` turns the request into a server error carrying the message.
    #[async_trait]
    pub trait EmailDispatcher: Send + Sync {
        async fn dispatch(&self, email: &OutgoingEmail) -> Result<(), DispatchError>;
    }

    /// Records the send in the logs and nothing else.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SimulatedDispatcher;

    #[async_trait]
    impl EmailDispatcher for SimulatedDispatcher {
        async fn dispatch(&self, email: &OutgoingEmail) -> Result<(), DispatchError> {
            tracing::info!("--- Simulating Email Send ---");
            tracing::info!("To: {}", email.receiver_email);
            tracing::info!("Subject: {}", email.subject);
            tracing::info!("Body: \n{}", email.body_text);
            tracing::info!("-----------------------------");
            Ok(())
        }
    }

}

#[allow(non_snake_case)]
pub mod Constants {
    use lazy_static::lazy_static;

    pub const ALLOW_ORIGIN: &str = "*";

    // WARNING: These are global variables that get
    // initialised at the entry point, and should not
    // be written to after
    lazy_static!{
        pub static ref DEVELOPMENT_MODE: bool = {
            dotenvy::var("DEVELOPMENT_MODE").unwrap_or("false".to_owned()).parse().expect("Failed to parse DEVELOPMENT_MODE")
        };
    }
}
