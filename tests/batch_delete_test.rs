// ==========================================
// 批量删除集成测试
// ==========================================
// 测试目标: 验证批量删除与未命中 id 回收
// ==========================================


use databridge_core::api::{ApiError, StudentApi};
use databridge_core::logging;
use test_helpers::{count_students, create_test_db, seed_student};

#[tokio::test]
async fn test_batch_delete_reports_missing_ids() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = rusqlite::Connection::open(&db_path).expect("Failed to open db");
    seed_student(&conn, 5, "Alice", 30, "Eng").expect("Failed to seed");
    seed_student(&conn, 7, "Bob", 25, "Sales").expect("Failed to seed");

    let api = StudentApi::new(db_path);
    let result = api
        .delete_students_batch(vec![5, 6, 7])
        .await
        .expect("Batch delete should succeed");

    assert_eq!(result.deleted_rows, 2);
    assert_eq!(result.missing_ids, vec![6]);
    assert_eq!(count_students(&conn), 0);
}

#[tokio::test]
async fn test_batch_delete_conservation_after_dedup() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = rusqlite::Connection::open(&db_path).expect("Failed to open db");
    seed_student(&conn, 1, "Alice", 30, "Eng").expect("Failed to seed");
    seed_student(&conn, 2, "Bob", 25, "Sales").expect("Failed to seed");

    let api = StudentApi::new(db_path);
    // 去重后为 [1, 2, 9]
    let result = api
        .delete_students_batch(vec![1, 2, 1, 9, 2])
        .await
        .expect("Batch delete should succeed");

    assert_eq!(result.deleted_rows + result.missing_ids.len(), 3);
    assert_eq!(result.deleted_rows, 2);
    assert_eq!(result.missing_ids, vec![9]);
}

#[tokio::test]
async fn test_batch_delete_all_missing() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = rusqlite::Connection::open(&db_path).expect("Failed to open db");
    seed_student(&conn, 1, "Alice", 30, "Eng").expect("Failed to seed");

    let api = StudentApi::new(db_path);
    let result = api
        .delete_students_batch(vec![10, 11])
        .await
        .expect("Batch delete should succeed");

    // 零行命中不是错误,区别于空请求
    assert_eq!(result.deleted_rows, 0);
    assert_eq!(result.missing_ids, vec![10, 11]);
    assert_eq!(count_students(&conn), 1);
}

#[tokio::test]
async fn test_batch_delete_missing_ids_keep_request_order() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = rusqlite::Connection::open(&db_path).expect("Failed to open db");
    seed_student(&conn, 4, "Alice", 30, "Eng").expect("Failed to seed");

    let api = StudentApi::new(db_path);
    let result = api
        .delete_students_batch(vec![9, 4, 3, 8])
        .await
        .expect("Batch delete should succeed");

    assert_eq!(result.deleted_rows, 1);
    assert_eq!(result.missing_ids, vec![9, 3, 8]);
}

#[tokio::test]
async fn test_batch_delete_empty_id_set_rejected() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let api = StudentApi::new(db_path);

    let result = api.delete_students_batch(vec![]).await;
    match result {
        Err(ApiError::EmptyIdSet) => {
            assert_eq!(ApiError::EmptyIdSet.to_string(), "no ids provided");
        }
        other => panic!("Expected EmptyIdSet, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_batch_delete_non_positive_id_rejected() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let api = StudentApi::new(db_path);

    let result = api.delete_students_batch(vec![3, 0, 5]).await;
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));

    let result = api.delete_students_batch(vec![-1]).await;
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}
