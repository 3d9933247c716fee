use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use thiserror::Error;

use crate::{
    common_types::SendEmail::{Details, Response},
    Response::{ServerResponse, ok, bad_request, internal_server_error},
    Email::{EmailDispatcher, DispatchError, OutgoingEmail},
    Middleware::{request_describer, set_cors_headers},
};

pub mod payload;
use payload::{parse, ParseError, RequestPayload, ValidationError};

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON in request body.";
pub const MISSING_FIELDS_MESSAGE: &str = "Missing one or more required fields: receiver_email, subject, body_text.";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid receiver_email format.";
pub const SUCCESS_MESSAGE: &str = "Email request received and processed successfully.";
pub const DISPATCH_FAILURE_MESSAGE: &str = "An internal server error occurred while attempting to send the email.";

#[derive(Error, Debug)]
pub enum SendEmailError {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Dispatch(#[from] DispatchError),
}

impl SendEmailError {
    pub fn into_response(self) -> ServerResponse {
        match self {
            SendEmailError::Parse(err) => bad_request(&Response::new(INVALID_JSON_MESSAGE).with_error(err)),
            SendEmailError::Validation(ValidationError::MissingFields) => bad_request(&Response::new(MISSING_FIELDS_MESSAGE)),
            SendEmailError::Validation(ValidationError::InvalidEmailFormat) => bad_request(&Response::new(INVALID_EMAIL_MESSAGE)),
            SendEmailError::Dispatch(err) => internal_server_error(&Response::new(DISPATCH_FAILURE_MESSAGE).with_error(err)),
        }
    }
}

async fn send<D>(dispatcher: &D, body: Option<&str>, is_base64_encoded: bool) -> Result<OutgoingEmail, SendEmailError>
where
    D: EmailDispatcher + ?Sized,
{
    let request = parse(body, is_base64_encoded).map_err(|err| {
        tracing::error!("Failed to parse request body: {err}");
        err
    })?;
    let email = RequestPayload::from(request).validate()?;
    tracing::info!(receiver_email = %email.receiver_email, "Dispatching email");
    dispatcher.dispatch(&email).await.map_err(|err| {
        tracing::error!("Error during email sending process: {err}");
        err
    })?;
    tracing::info!(receiver_email = %email.receiver_email, "Email dispatched");
    Ok(email)
}

/// Runs one raw body through the pipeline. Never fails: every outcome,
/// including a dispatcher error, is turned into a response.
#[tracing::instrument(skip(dispatcher, body), fields(request="/send-email"))]
pub async fn process<D>(dispatcher: &D, body: Option<&str>, is_base64_encoded: bool) -> ServerResponse
where
    D: EmailDispatcher + ?Sized,
{
    match send(dispatcher, body, is_base64_encoded).await {
        Ok(email) => ok(&Response::new(SUCCESS_MESSAGE).with_details(Details {
            receiver_email: email.receiver_email,
            subject: email.subject,
        })),
        Err(err) => err.into_response(),
    }
}

// API Gateway proxy entry point
pub async fn request<D>(dispatcher: &D, event: &ApiGatewayProxyRequest) -> ServerResponse
where
    D: EmailDispatcher + ?Sized,
{
    let next = process(dispatcher, event.body.as_deref(), event.is_base64_encoded);
    set_cors_headers::middleware(request_describer::middleware(event, next)).await
}
