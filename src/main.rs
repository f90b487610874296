use clap::Parser;
use secret_santa::adapters::load_roster;
use secret_santa::core::MailSettings;
use secret_santa::utils::error::{ErrorSeverity, SantaError};
use secret_santa::utils::{logger, validation::Validate};
use secret_santa::{CliConfig, ExchangeConfig, ExchangeResponse, ExchangeService, OutboxMailer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting secret-santa");
    tracing::info!("📁 Loading configuration from: {}", cli.config);

    // 載入 TOML 配置
    let mut config = match ExchangeConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };
    cli.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let mut request = match config.to_request() {
        Ok(request) => request,
        Err(e) => fail(&e),
    };
    if let Some(path) = &cli.participants {
        match load_roster(path) {
            Ok(extra) => request.participants.extend(extra),
            Err(e) => fail(&e),
        }
    }

    tracing::info!(
        "✅ Exchange '{}' loaded with {} participants",
        config.display_name(),
        request.participants.len()
    );

    let mailer = OutboxMailer::new(config.outbox_dir());
    let service = ExchangeService::new(mailer, config.sender())
        .with_seed(config.seed())
        .with_dry_run(cli.dry_run);

    let result = service.run(&request).await;

    if cli.json {
        let response = ExchangeResponse::from_result(&result, request.language);
        println!("{}", response.to_json()?);
    }

    match result {
        Ok(outcome) => {
            tracing::info!("✅ {}", outcome.message);
            if !cli.json {
                println!("✅ {}", outcome.message);
                if !cli.dry_run {
                    println!(
                        "📁 Notifications written to: {}",
                        service.mailer().run_dir().display()
                    );
                }
            }
            Ok(())
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &SantaError) -> ! {
    tracing::error!(
        "❌ secret-santa failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
