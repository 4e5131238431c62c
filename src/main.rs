use birthday_mms::config::cli::{Cli, Command, MessagePart};
use birthday_mms::config::registry_file::load_registry;
use birthday_mms::utils::error::ErrorSeverity;
use birthday_mms::utils::logger;
use birthday_mms::{BirthdayError, BirthdayService, CategoryRegistry, GenerationResult, ServiceConfig};
use clap::Parser;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
    // .env is optional
    let dotenv_path = dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 130,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 3,
            ErrorSeverity::Critical => 1,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: &Cli) -> Result<(), BirthdayError> {
    let registry = match &cli.registry {
        Some(path) => load_registry(path)?,
        None => CategoryRegistry::builtin(),
    };

    match &cli.command {
        Command::List => {
            for category in registry.list() {
                println!("{}\t{}", category.id, category.age_range);
            }
            Ok(())
        }
        Command::Show { id } => {
            let attrs = registry.lookup(id)?;
            println!("연령대: {} ({})", attrs.label, attrs.age_range);
            println!("특성: {}", attrs.characteristics);
            println!("메시지 톤: {}", attrs.desired_tone);
            Ok(())
        }
        Command::Generate { id, json, part } => {
            let config = cli.apply_overrides(ServiceConfig::from_env()?);
            tracing::debug!("Service config: {:?}", config);

            let service = BirthdayService::from_config(&config, registry)?;
            let attrs = service.lookup(id)?;
            tracing::info!("📊 Selected age group: {} ({})", attrs.label, attrs.age_range);

            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_interrupt.cancel();
                }
            });

            let result = service.generate_cancellable(id, &cancel).await?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", select_part(&result, *part));
            }
            Ok(())
        }
    }
}

fn select_part(result: &GenerationResult, part: MessagePart) -> &str {
    match part {
        MessagePart::Full => result.full_message(),
        MessagePart::Title => result.title(),
        MessagePart::Body => result.body(),
        MessagePart::Value => result.value_statement(),
        MessagePart::Closing => result.closing(),
    }
}
