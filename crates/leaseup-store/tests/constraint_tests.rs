// Integration tests for uniqueness, foreign keys and column defaults

use chrono::NaiveDate;
use leaseup_core::errors::ExErrorKind;
use leaseup_core::model::{
    LeaseRequestStatus, MaintenanceStatus, NewLease, NewLeaseRequest, NewMaintenanceRequest,
    NewProperty, NewTenantUser, NewUnit, UnitStatus,
};
use leaseup_store::{db, migrations, SqliteRepo};
use rusqlite::Connection;

fn setup_test_db() -> Connection {
    let mut conn = db::open_in_memory().unwrap();
    migrations::apply_migrations(&mut conn).unwrap();
    conn
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_duplicate_tenant_email_is_conflict() {
    let conn = setup_test_db();
    SqliteRepo::insert_tenant_user(
        &conn,
        &NewTenantUser::new("alice", "shared@example.com", "hash-a"),
    )
    .unwrap();

    let err = SqliteRepo::insert_tenant_user(
        &conn,
        &NewTenantUser::new("bob", "shared@example.com", "hash-b"),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Conflict);
    assert_eq!(err.code(), "ERR_CONFLICT");
    assert_eq!(err.entity(), Some("tenant_user"));
}

#[test]
fn test_duplicate_lease_request_link_is_conflict() {
    let conn = setup_test_db();
    let request_id = SqliteRepo::insert_lease_request(&conn, &NewLeaseRequest::default()).unwrap();

    let lease = NewLease {
        lease_request_id: Some(request_id),
        monthly_rent: 5000.0,
        ..Default::default()
    };
    SqliteRepo::insert_lease(&conn, &lease).unwrap();

    let err = SqliteRepo::insert_lease(&conn, &lease).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Conflict);
}

#[test]
fn test_leases_without_request_do_not_collide() {
    let conn = setup_test_db();
    let lease = NewLease {
        monthly_rent: 5000.0,
        ..Default::default()
    };

    let first = SqliteRepo::insert_lease(&conn, &lease).unwrap();
    let second = SqliteRepo::insert_lease(&conn, &lease).unwrap();

    assert_ne!(first, second);
    assert_eq!(SqliteRepo::list_leases(&conn).unwrap().len(), 2);
}

#[test]
fn test_lease_for_missing_unit_is_invalid_reference() {
    let conn = setup_test_db();
    let err = SqliteRepo::insert_lease(
        &conn,
        &NewLease {
            unit_id: Some(999),
            monthly_rent: 5000.0,
            ..Default::default()
        },
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidReference);
    assert_eq!(err.code(), "ERR_INVALID_REFERENCE");
}

#[test]
fn test_deleting_referenced_parent_is_invalid_reference() {
    let conn = setup_test_db();
    let property_id = SqliteRepo::insert_property(&conn, &NewProperty::new("Sunrise Residences")).unwrap();
    SqliteRepo::insert_unit(&conn, &NewUnit::new("Room 2", Some(property_id))).unwrap();

    let err = SqliteRepo::delete_property(&conn, property_id).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidReference);

    // The property is still there
    assert!(SqliteRepo::get_property(&conn, property_id).is_ok());
}

#[test]
fn test_defaults_apply_when_omitted() {
    let conn = setup_test_db();

    let unit_id = SqliteRepo::insert_unit(&conn, &NewUnit::new("Room 1", None)).unwrap();
    let maintenance_id =
        SqliteRepo::insert_maintenance_request(&conn, &NewMaintenanceRequest::default()).unwrap();
    let request_id = SqliteRepo::insert_lease_request(
        &conn,
        &NewLeaseRequest {
            unit_id: Some(unit_id),
            start_date: Some(date(2025, 3, 1)),
            end_date: Some(date(2026, 2, 28)),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(SqliteRepo::get_unit(&conn, unit_id).unwrap().status, UnitStatus::Vacant);
    assert_eq!(
        SqliteRepo::get_maintenance_request(&conn, maintenance_id)
            .unwrap()
            .status,
        MaintenanceStatus::Open
    );
    let request = SqliteRepo::get_lease_request(&conn, request_id).unwrap();
    assert_eq!(request.status, LeaseRequestStatus::Pending);
    assert_eq!(request.monthly_rent, None);
}

#[test]
fn test_missing_rows_are_not_found() {
    let conn = setup_test_db();

    let err = SqliteRepo::get_unit(&conn, 7).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.entity(), Some("unit"));
    assert_eq!(err.entity_id(), Some("7"));

    let err = SqliteRepo::set_unit_status(&conn, 7, UnitStatus::Occupied).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);

    let err = SqliteRepo::delete_tenant(&conn, 7).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_invalid_input_rejected_before_write() {
    let conn = setup_test_db();

    let err = SqliteRepo::insert_property(&conn, &NewProperty::new("   ")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);

    let err = SqliteRepo::insert_lease(
        &conn,
        &NewLease {
            start_date: Some(date(2025, 12, 31)),
            end_date: Some(date(2025, 1, 1)),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidDateRange);

    assert!(SqliteRepo::list_properties(&conn).unwrap().is_empty());
    assert!(SqliteRepo::list_leases(&conn).unwrap().is_empty());
}
