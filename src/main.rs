use clap::Parser;
use job_board::core::render;
use job_board::core::{ConfigProvider, QueryBackend};
use job_board::utils::error::ErrorSeverity;
use job_board::utils::{logger, validation::Validate};
use job_board::{
    CliConfig, FilterPanelView, FilterState, JobBoardError, JobListView, JobQueryService,
    OutputFormat, PostgrestBackend, TomlConfig,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

fn exit_with(e: &JobBoardError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn print_jobs(view: &JobListView, format: OutputFormat) -> anyhow::Result<()> {
    let jobs = view.visible_jobs();
    match format {
        OutputFormat::Text => {
            let today = chrono::Local::now().date_naive();
            println!("{}", render::render_job_list(&jobs, today));
        }
        OutputFormat::Json => println!("{}", render::render_json(&jobs)?),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入 TOML 配置（若有指定）
    let toml_config = match cli.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let json_logs = cli.json_logs || toml_config.as_ref().is_some_and(|c| c.log_format_is_json());
    if json_logs {
        logger::init_json_logger(toml_config.as_ref().and_then(|c| c.log_level()));
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting job-board");

    let provider: Box<dyn ConfigProvider> = match toml_config {
        Some(config) => {
            tracing::info!("📁 Backend settings loaded from {:?}", cli.config);
            if let Err(e) = config.validate() {
                exit_with(&e);
            }
            Box::new(config)
        }
        None => {
            if let Err(e) = cli.validate() {
                exit_with(&e);
            }
            Box::new(cli.clone())
        }
    };

    let backend: Arc<dyn QueryBackend> = match PostgrestBackend::from_config(provider.as_ref()) {
        Ok(backend) => Arc::new(backend),
        Err(e) => exit_with(&e),
    };
    let service = JobQueryService::new(Arc::clone(&backend)).with_text_search(
        provider.text_search_type(),
        provider.text_search_config().map(str::to_string),
    );

    let view = JobListView::new(Arc::new(service), cli.filter_state());
    if let Some(load) = view.mount() {
        load.await?;
    }

    if cli.show_filters {
        let mut panel = FilterPanelView::new(backend);
        panel.load().await;
        let options = FilterPanelView::job_type_options(&view.filter_state());
        println!("{}", render::render_filter_panel(&options, panel.countries()));
    }

    print_jobs(&view, cli.format)?;

    if cli.interactive {
        tracing::info!("Reading query strings from stdin (e.g. q=rust&types=contract)");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let filter = FilterState::from_query_string(line.trim());
            if let Some(load) = view.apply_filter_state(filter) {
                load.await?;
            }
            print_jobs(&view, cli.format)?;
        }
    }

    Ok(())
}
