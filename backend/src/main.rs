#[tokio::main]
async fn main() -> anyhow::Result<()> {
  spinlog_lib::run().await
}
