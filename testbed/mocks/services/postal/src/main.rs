use postal_mock::{MockServer, PincodeFixture};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Check for a fixtures directory
    let fixtures_path =
        env::var("FIXTURES_PATH").unwrap_or_else(|_| "testbed/fixtures".to_string());

    let server = if let Ok(fixture_file) =
        fs::read_to_string(format!("{}/pincode-fixture.yaml", fixtures_path))
    {
        tracing::info!(
            "Loading fixtures from {}/pincode-fixture.yaml",
            fixtures_path
        );
        let fixture = PincodeFixture::from_yaml(&fixture_file)?;
        MockServer::with_fixture(fixture)
    } else {
        tracing::info!("No fixture file found, using the built-in fixture");
        MockServer::new()
    };

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:9111".to_string());
    server.serve(&bind_addr).await
}
