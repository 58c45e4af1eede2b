use coursebook::configuration::get_configuration;
use coursebook::startup::build;
use coursebook::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("coursebook".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = get_configuration()?;
    let app = build(config).await?;
    app.run().await?;

    Ok(())
}
