use migration::MigratorTrait;
use serde_json::{json, Value};
use server::{serve, ServerState};
use tokio::net::TcpListener;

#[tokio::test]
async fn e2e_over_tcp() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let cfg = configs::DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = models::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    let owner = models::client::create(&db, "E2E client").await?;

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let handle = tokio::spawn(serve(listener, ServerState { db }, async move { let _ = rx.await; }));

    let base = format!("http://{addr}");
    let http = reqwest::Client::new();

    let health: Value = http.get(format!("{base}/health")).send().await?.json().await?;
    assert_eq!(health["status"], "ok");

    let res = http
        .post(format!("{base}/vehicles"))
        .json(&json!({"client_id": owner.client_id, "license_plate": "E2E-42", "brand": "Dacia", "model": "Sandero", "year": 2021}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let vehicle: Value = res.json().await?;

    let res = http
        .post(format!("{base}/works"))
        .json(&json!({"vehicle_id": vehicle["vehicle_id"], "description": "Timing belt"}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);

    let works: Value = http.get(format!("{base}/works")).send().await?.json().await?;
    assert_eq!(works[0]["description"], "Timing belt");

    let _ = tx.send(());
    handle.await??;
    Ok(())
}
