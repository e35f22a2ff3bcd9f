use camp_landing::ui::{Step, parse_command, run_command};
use camp_landing::{Config, HttpBackend, Landing, MemoryPage};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

const PRESETS: [&str; 4] = ["100", "500", "1000", "5000"];
const ANCHORS: [&str; 3] = ["about", "contribute", "schedule"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let backend = HttpBackend::new(&config.base_url, config.csrf_token.clone(), config.request_timeout)?;
    info!(stats = backend.stats_url(), contribute = backend.contribute_url(), "using backend");

    let page = ANCHORS
        .iter()
        .fold(MemoryPage::new(&PRESETS), |page, id| page.with_anchor(id));
    let landing = Landing::mount(page, backend, config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                warn!("{message}");
                continue;
            }
        };

        match run_command(&landing, command).await {
            Step::Continue => {}
            Step::Render(out) => println!("{out}"),
            Step::Quit => break,
        }
    }

    landing.unmount();
    Ok(())
}
