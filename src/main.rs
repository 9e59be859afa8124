#[actix_web::main]
async fn main() {
    if let Err(err) = tablepeek_lib::run().await {
        eprintln!("tablepeek: {err}");
        std::process::exit(1);
    }
}
