use ::std::future::Future;
use aws_lambda_events::http::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN};

use crate::{
    Response::ServerResponse,
    Constants,
};

pub async fn middleware<F>(next: F) -> ServerResponse
where
    F: Future<Output = ServerResponse>,
{
    let mut response = next.await;
    response.headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(Constants::ALLOW_ORIGIN));
    response
}
