use civic_ml_backend::adapters::server;
use civic_ml_backend::utils::error::{ErrorSeverity, InferenceError};
use civic_ml_backend::utils::monitor::SystemMonitor;
use civic_ml_backend::utils::{logger, validation::Validate};
use civic_ml_backend::{CliArgs, InferenceService, StartupLoader};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting civic-ml-backend");
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Service failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }
}

async fn run(config: civic_ml_backend::ServerConfig) -> civic_ml_backend::Result<()> {
    config.validate()?;

    let monitor = SystemMonitor::new(config.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 模型必須在開始接受請求前載入完成
    let loaded = StartupLoader::load(&config)?;
    monitor.log_stats("Model loaded");

    let service = Arc::new(InferenceService::from(loaded));
    let listener = server::bind(&config.host, config.port).await?;
    server::serve(listener, service, server::shutdown_signal()).await?;

    monitor.log_final_stats();
    Ok(())
}

// 根據錯誤嚴重程度決定退出碼
fn exit_code(e: &InferenceError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    }
}
