#[tokio::main]
async fn main() -> anyhow::Result<()> {
    worldbuilder_lib::run().await
}
