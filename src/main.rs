#[tokio::main]
async fn main() {
    if let Err(e) = labdesk_lib::run().await {
        eprintln!("labdesk: {e}");
        std::process::exit(1);
    }
}
