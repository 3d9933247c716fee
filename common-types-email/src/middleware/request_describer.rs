use ::std::future::Future;
use aws_lambda_events::apigw::ApiGatewayProxyRequest;

use crate::{
    Response::ServerResponse,
    Constants,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestDescription {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub body_length: usize,
}

impl RequestDescription {
    pub fn from_request(req: &ApiGatewayProxyRequest) -> Self {
        RequestDescription {
            request_id: req.request_context.request_id.clone().unwrap_or_default(),
            method: req.http_method.as_str().to_string(),
            path: req.path.clone().unwrap_or_default(),
            body_length: req.body.as_ref().map_or(0, String::len),
        }
    }
}

#[tracing::instrument(skip(req, next))]
pub async fn middleware<F>(req: &ApiGatewayProxyRequest, next: F) -> ServerResponse
where
    F: Future<Output = ServerResponse>,
{
    let description = RequestDescription::from_request(req);
    tracing::debug!(
        request_id = %description.request_id,
        method = %description.method,
        path = %description.path,
        body_length = description.body_length,
        "Received event"
    );
    // Full events can carry addresses and message bodies, keep them out of production logs
    if *Constants::DEVELOPMENT_MODE {
        match serde_json::to_string_pretty(req) {
            Ok(event) => tracing::debug!("Received event: {event}"),
            Err(err) => tracing::warn!("Failed to serialize event, {err}"),
        }
    }
    let response = next.await;
    tracing::info!(status = response.status_code, "Request handled");
    response
}
