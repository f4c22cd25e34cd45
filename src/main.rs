use clap::Parser;
use firm_site::adapters::server::{create_router, AppState};
use firm_site::config::{Command, OutputFormat};
use firm_site::core::audit::{audit_pages, load_page_definitions, AuditFinding};
use firm_site::core::render::{render_related_links, LinkStyle};
use firm_site::core::{ConfigProvider, ConsultationRequest, Region, SubmitStatus};
use firm_site::utils::error::{ErrorSeverity, SiteError};
use firm_site::utils::{logger, validation::Validate};
use firm_site::{
    CliConfig, ConsultationFormController, ConsultationIntake, HttpSubmissionTransport,
    LocalStorage, RelatedLinksSelector, SiteConfig,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI args: {:?}", cli);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            SiteConfig::from_file(path)
        }
        None => Ok(SiteConfig::default()),
    }
    .and_then(|config| config.validate().map(|_| config));

    let config = match config {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    if let Err(e) = run(cli.command, config).await {
        exit_with(&e);
    }
    Ok(())
}

fn exit_with(e: &SiteError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 2,
        ErrorSeverity::Medium => 3,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 4,
    };
    std::process::exit(exit_code);
}

async fn run(command: Command, config: SiteConfig) -> firm_site::Result<()> {
    match command {
        Command::Links {
            city,
            region,
            format,
            path_links,
        } => {
            let region: Region = region.parse()?;
            let selector = RelatedLinksSelector::new(Arc::new(config.load_catalog()?));
            let links = selector.select(&city, region);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&links)?),
                OutputFormat::Html => {
                    let style = if path_links {
                        LinkStyle::Path
                    } else {
                        LinkStyle::Hash
                    };
                    print!("{}", render_related_links(&links, style));
                }
            }
        }

        Command::Catalog { output } => {
            let catalog = config.load_catalog()?;
            match output {
                Some(path) => {
                    catalog.write_csv(std::fs::File::create(&path)?)?;
                    tracing::info!("📁 Catalog exported to: {}", path);
                }
                None => catalog.write_csv(std::io::stdout().lock())?,
            }
        }

        Command::Audit { pages } => {
            let catalog = config.load_catalog()?;
            let definitions = load_page_definitions(&pages)?;
            let findings = audit_pages(&catalog, &definitions);

            for finding in &findings {
                match finding {
                    AuditFinding::UnknownRegion { page, slug } => {
                        println!("❌ {}: unknown region '{}'", page, slug)
                    }
                    AuditFinding::EmptyRegion { page, region } => {
                        println!("⚠️ {}: region '{}' has no catalog pages", page, region)
                    }
                }
            }

            if !findings.is_empty() {
                return Err(SiteError::validation(format!(
                    "{} of {} page definitions reference missing regions",
                    findings.len(),
                    definitions.len()
                )));
            }
            println!("✅ All {} page definitions use known regions", definitions.len());
        }

        Command::Submit {
            form,
            fields,
            endpoint,
        } => {
            let transport = match endpoint {
                Some(url) => HttpSubmissionTransport::new(url),
                None => HttpSubmissionTransport::from_config(&config),
            };
            tracing::info!("🚀 Submitting to {}", transport.endpoint());

            let mut controller = ConsultationFormController::from_config(transport, &config);
            if let Some(path) = form {
                controller.set_form(load_form(&path)?);
            }
            for (name, value) in fields {
                controller.form_mut().set_field(&name, value)?;
            }

            let status = controller.submit().await?;
            for notification in controller.notifications().visible() {
                println!("{}", notification.message);
            }
            if status == SubmitStatus::Error {
                return Err(SiteError::SubmissionFailed {
                    message: format!("call {} to book directly", config.fallback_phone()),
                });
            }
        }

        Command::Serve { addr } => {
            let state = Arc::new(AppState {
                selector: RelatedLinksSelector::new(Arc::new(config.load_catalog()?)),
                intake: ConsultationIntake::new(
                    LocalStorage::new(config.storage.output_path.clone()),
                    config.output_prefix(),
                ),
            });
            let app = create_router(state, &config.submission.function_path);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("🚀 {} dev server on http://{}", config.site.name, addr);
            tracing::info!("  GET  /health");
            tracing::info!("  GET  /api/related-links?city=..&region=..");
            tracing::info!("  POST {}", config.submission.function_path);

            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = tokio::signal::ctrl_c().await;
                })
                .await?;
            tracing::info!("👋 Server stopped");
        }
    }

    Ok(())
}

/// 讀取表單檔案 (JSON 或 TOML，欄位名稱皆為 camelCase)
fn load_form(path: &str) -> firm_site::Result<ConsultationRequest> {
    let content = std::fs::read_to_string(path)?;
    let mut form: ConsultationRequest = if path.ends_with(".toml") {
        toml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    if form.timezone.trim().is_empty() {
        form.timezone = ConsultationRequest::with_defaults().timezone;
    }
    Ok(form)
}
