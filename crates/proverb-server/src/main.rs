#[tokio::main]
async fn main() {
    proverb_server::start_server().await;
}
