use rawpost_core::RequestSender;
use tracing_subscriber::EnvFilter;

const HOST: &str = "localhost";
const PORT: u16 = 8000;

const BODY: &str = r#"{
  "name": "Jane Doe",
  "email": "jane@example.com"
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let sender = RequestSender::new(HOST, PORT);
    let response = sender.send(
        "/api/users",
        &[("Host", "example.com"), ("Content-Type", "application/json")],
        BODY,
    )?;
    println!("{}", response.to_string_lossy());
    Ok(())
}
