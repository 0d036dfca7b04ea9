use std::sync::Arc;

use tienda_infra::PgProductStore;

#[tokio::main]
async fn main() {
    tienda_api::telemetry::init();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set (postgres connection string)");

    let pool = sqlx::PgPool::connect(&database_url)
        .await
        .expect("failed to connect to postgres");

    let store = PgProductStore::new(pool);
    store.migrate().await.expect("failed to run schema bootstrap");

    let app = tienda_api::app::build_app(Arc::new(store));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
