use sea_orm_migration::MigratorTrait;
use tracing_subscriber::EnvFilter;

use todo_server::database::{DatabaseConfig, DbConnection};
use todo_server::migrations::Migrator;
use todo_server::routes;
use todo_server::server::Server;
use todo_server::store::TodoStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db = DbConnection::connect(&DatabaseConfig::from_env())
        .await
        .expect("Failed to connect to database");

    Migrator::up(db.inner(), None)
        .await
        .expect("Failed to run migrations");

    let store = TodoStore::new(db);

    Server::from_config(routes::router(store))
        .run()
        .await
        .expect("Failed to start server");
}
