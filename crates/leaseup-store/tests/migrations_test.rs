// Integration tests for the migration framework

use leaseup_store::{db, migrations, schema};
use rusqlite::Connection;

fn setup_test_db() -> Connection {
    db::open_in_memory().expect("Failed to create in-memory database")
}

#[test]
fn test_apply_migrations_on_empty_db() {
    let mut conn = setup_test_db();

    let result = migrations::apply_migrations(&mut conn);
    assert!(result.is_ok(), "Migrations should succeed: {:?}", result.err());

    // Ten domain tables plus schema_version
    let tables = schema::table_names(&conn).unwrap();
    assert_eq!(tables.len(), 11, "Unexpected tables: {:?}", tables);
    for table in schema::TABLES {
        assert!(tables.contains(&table.to_string()), "Missing table: {}", table);
    }
    assert!(tables.contains(&"schema_version".to_string()));
}

#[test]
fn test_migrations_are_idempotent() {
    let mut conn = setup_test_db();

    let first = migrations::apply_migrations(&mut conn).unwrap();
    let second = migrations::apply_migrations(&mut conn).unwrap();

    assert_eq!(first, migrations::get_migrations().len());
    assert_eq!(second, 0);

    let version_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version_count as usize, migrations::get_migrations().len());
}

#[test]
fn test_reapplying_schema_sql_keeps_data() {
    let mut conn = setup_test_db();
    migrations::apply_migrations(&mut conn).unwrap();
    conn.execute("INSERT INTO property (name) VALUES ('Greenfield Heights')", [])
        .unwrap();

    // Every statement is guarded, so raw re-execution is harmless too
    for migration in migrations::get_migrations() {
        conn.execute_batch(migration.sql).unwrap();
    }

    assert_eq!(schema::row_count(&conn, "property").unwrap(), 1);
}

#[test]
fn test_checksums_recorded() {
    let mut conn = setup_test_db();
    migrations::apply_migrations(&mut conn).unwrap();

    let applied = migrations::applied_migrations(&conn).unwrap();
    assert_eq!(applied.len(), migrations::get_migrations().len());
    assert_eq!(applied[0].migration_id, "001_initial_schema");
    for migration in &applied {
        let checksum = migration.checksum.as_deref().expect("checksum stored");
        assert_eq!(checksum.len(), 64);
    }
}

#[test]
fn test_file_database_persists_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("leaseup.db");
    let config = leaseup_store::StoreConfig::new(path.clone());

    {
        let mut conn = db::open_configured(&config).unwrap();
        migrations::apply_migrations(&mut conn).unwrap();
    }

    let mut conn = db::open(&path).unwrap();
    assert_eq!(migrations::apply_migrations(&mut conn).unwrap(), 0);
    assert!(schema::foreign_keys_enabled(&conn).unwrap());
}
