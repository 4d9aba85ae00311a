use bureau_of_magical_things::rocket_initialize;

#[rocket::main]
async fn main() {
    if let Err(e) = rocket_initialize().launch().await {
        log::error!("server stopped: {}", e);
        std::process::exit(1);
    }
}
