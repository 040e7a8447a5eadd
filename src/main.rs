use anyhow::Context;

use signup::configuration::get_configuration;
use signup::{setup_logger, Application};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let conf = get_configuration().context("fail to read configuration")?;
    setup_logger(conf.log_level.as_deref().unwrap_or("INFO"));

    let app = Application::build(&conf)
        .await
        .with_context(|| format!("fail to bind {}", conf.address()))?;
    app.run_until_stopped().await?;
    Ok(())
}
