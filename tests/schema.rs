mod common;

use centro_api::db::{self, Group, GroupPayload, Person, PersonPayload, Storage};
use common::{empty_db, ready_db};

#[tokio::test]
async fn schema_init_is_idempotent() {
    let db = ready_db("schema-twice").await;

    let storage = Storage::<Group>::new(db.pool.clone(), db.dialect);
    let id = storage
        .create(GroupPayload {
            nombre: Some("Cuarto".into()),
        })
        .await
        .unwrap();

    db::init_schema(&db.pool, db.dialect).await.unwrap();

    let kept = storage.get(id).await.unwrap().expect("row survives re-init");
    assert_eq!(kept.nombre, "Cuarto");
}

#[tokio::test]
async fn storage_reports_affected_rows() {
    let db = ready_db("schema-storage").await;
    let people = Storage::<Person>::new(db.pool.clone(), db.dialect);

    let payload = PersonPayload {
        nombre: Some("Ana".into()),
        apellidos: Some("Gomez".into()),
        sexo: Some("F".into()),
        edad: Some("30".into()),
        telefono: Some("555".into()),
    };
    let id = people.create(payload.clone()).await.unwrap();

    assert_eq!(people.update(id, payload).await.unwrap(), 1);
    assert_eq!(people.delete(id).await.unwrap(), 1);
    assert_eq!(people.delete(id).await.unwrap(), 0);
    assert!(people.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn connections_are_returned_after_failures() {
    let db = empty_db("schema-release").await;
    let groups = Storage::<Group>::new(db.pool.clone(), db.dialect);

    // More failing calls than the pool has connections.
    for _ in 0..(db::pool::CONNECTION_LIMIT * 3) {
        assert!(groups.list().await.is_err());
    }
    assert!(db.pool.num_idle() <= db::pool::CONNECTION_LIMIT as usize);

    db::init_schema(&db.pool, db.dialect).await.unwrap();
    assert_eq!(groups.list().await.unwrap().len(), 0);
}

#[tokio::test]
async fn sqlite_create_reports_generated_ids() {
    let db = ready_db("schema-insert-id").await;
    let groups = Storage::<Group>::new(db.pool.clone(), db.dialect);

    let first = groups
        .create(GroupPayload {
            nombre: Some("Quinto".into()),
        })
        .await
        .expect("create should return the new id");
    let second = groups
        .create(GroupPayload {
            nombre: Some("Sexto".into()),
        })
        .await
        .expect("create should return the new id");

    assert!(second > first);
    assert_eq!(groups.get(first).await.unwrap().unwrap().nombre, "Quinto");
    assert_eq!(groups.get(second).await.unwrap().unwrap().nombre, "Sexto");
}
