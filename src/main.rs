#[actix_web::main]
async fn main() -> std::io::Result<()> {
    grade_report_server::run().await
}
