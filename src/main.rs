use std::net::TcpListener;

use anyhow::Context;

use sqlx::PgPool;

use seva::app;
use seva::client::EmailClient;
use seva::settings::Settings;
use seva::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init("info")?;

    let settings = Settings::load().context("Failed to load settings")?;

    let pool = PgPool::connect_with(settings.database.with_db()).await?;

    let email_client = EmailClient::new(
        settings.email.sender(),
        settings.email.api_timeout(),
        settings.email.api_base_url(),
        settings.email.api_auth_token(),
    )?;

    let listener = TcpListener::bind(settings.app.addr())?;

    app::run(listener, pool, email_client, settings.organization)?
        .await
        .context("Failed to run app")
}
