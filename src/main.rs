#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    cycle_studio::run().await
}
