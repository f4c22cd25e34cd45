#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use firm_site::config::lambda::{LambdaConfig, S3Storage};
#[cfg(feature = "lambda")]
use firm_site::core::intake::ConsultationIntake;
#[cfg(feature = "lambda")]
use firm_site::core::{ConsultationRequest, SubmissionResponse};
#[cfg(feature = "lambda")]
use firm_site::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[cfg(feature = "lambda")]
async fn function_handler(
    intake: &ConsultationIntake<S3Storage>,
    event: LambdaEvent<ConsultationRequest>,
) -> Result<SubmissionResponse, Error> {
    tracing::info!(
        "Consultation request received (request id {})",
        event.context.request_id
    );
    Ok(intake.handle(event.payload).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let lambda_config = LambdaConfig::from_env()?;
    lambda_config.validate()?;

    // 創建AWS配置和S3客戶端
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let region = Region::new(lambda_config.s3_region.clone());
    let config = aws_sdk_s3::config::Builder::from(&config)
        .region(region)
        .force_path_style(true)
        .build();
    let s3_client = S3Client::from_conf(config);

    let storage = S3Storage::new(s3_client, lambda_config.s3_bucket.clone());
    let intake = ConsultationIntake::new(storage, lambda_config.s3_prefix.clone());
    let intake = &intake;

    run(service_fn(move |event: LambdaEvent<ConsultationRequest>| async move {
        function_handler(intake, event).await
    }))
    .await
}
