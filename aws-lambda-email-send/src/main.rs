use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{service_fn, Error as LambdaError, LambdaEvent};
use common_types_email::{
    Constants,
    Email::{EmailDispatcher, SimulatedDispatcher},
    Routes,
};

#[tracing::instrument(skip(dispatcher, event), fields(req_id = %event.context.request_id))]
async fn handler<D: EmailDispatcher>(
    dispatcher: &D,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, LambdaError> {
    Ok(Routes::send_email::request(dispatcher, &event.payload).await)
}

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    let max_level = match *Constants::DEVELOPMENT_MODE {
        true => tracing::Level::DEBUG,
        false => tracing::Level::INFO,
    };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_target(false)
        .without_time()
        .init();

    let dispatcher = SimulatedDispatcher;

    lambda_runtime::run(service_fn(|event: LambdaEvent<ApiGatewayProxyRequest>| async {
        handler(&dispatcher, event).await
    }))
    .await
}
