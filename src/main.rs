use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{error, info};

use pow_ledger::api::{self, AppState};
use pow_ledger::blockchain::Blockchain;
use pow_ledger::config::Config;
use pow_ledger::demo;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::from_env();
    info!(
        "creating chain (difficulty={}, max_seal_attempts={:?})",
        config.difficulty, config.max_seal_attempts
    );
    let state = web::Data::new(AppState::new(Blockchain::with_limits(
        config.difficulty,
        config.seal_limits(),
    )));

    if config.seed_demo {
        if let Err(e) = demo::seed(&state.blockchain) {
            error!("demo seeding failed: {e}");
        }
        println!("{}", state.blockchain.read(demo::report));
    }

    if !config.serve {
        return Ok(());
    }

    let (host, port) = (config.host.clone(), config.port);
    println!("⛓️ Starting ledger API at http://{host}:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
