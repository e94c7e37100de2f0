mod common;

use axum::http::{Method, StatusCode};
use common::{driver_error, get, send, server_error, FakeDatabase};
use league_api::db::{Outcome, Param};
use serde_json::json;

fn player_body(club_id: serde_json::Value) -> serde_json::Value {
    json!({
        "f_name": "Lionel",
        "l_name": "Messi",
        "dob": "1987-06-24",
        "position": "Forward",
        "city": "Rosario",
        "state": "Santa Fe",
        "pincode": "2000",
        "club_id": club_id
    })
}

#[tokio::test]
async fn list_players_reads_the_roster_view() {
    let db = FakeDatabase::new();
    db.push_rows(vec![json!({ "player_id": 1, "full_name": "Lionel Messi" })]);

    let (status, body) = get(&db, "/players").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["full_name"], "Lionel Messi");
    assert_eq!(db.only_statement().sql, "SELECT * FROM player_roster_view");
}

#[tokio::test]
async fn missing_player_is_404() {
    let db = FakeDatabase::new();

    let (status, body) = get(&db, "/players/77").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({}));
    assert_eq!(db.only_statement().params, vec![Param::Int(77)]);
}

#[tokio::test]
async fn existing_player_comes_back_with_iso_dob() {
    let db = FakeDatabase::new();
    db.push_rows(vec![json!({
        "player_id": 10,
        "f_name": "Lionel",
        "l_name": "Messi",
        "dob": "1987-06-24",
        "club_id": null
    })]);

    let (status, body) = get(&db, "/players/10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dob"], "1987-06-24");
    assert!(db.only_statement().sql.contains("DATE_FORMAT(dob, '%Y-%m-%d') AS dob"));
}

#[tokio::test]
async fn create_player_returns_new_id() {
    let db = FakeDatabase::new();
    db.push_outcome(Outcome { last_insert_id: 42 });

    let (status, body) = send(&db, Method::POST, "/players", Some(player_body(json!(3)))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Player created successfully");
    assert_eq!(body["player_id"], 42);
    let stmt = db.only_statement();
    assert!(stmt.sql.starts_with("INSERT INTO player"));
    assert_eq!(stmt.params.len(), 8);
    assert_eq!(stmt.params[7], Param::Int(3));
}

#[tokio::test]
async fn create_player_surfaces_database_rejection() {
    let db = FakeDatabase::new();
    db.push_execute_error(server_error("Player must be at least 15 years old"));

    let (status, body) = send(&db, Method::POST, "/players", Some(player_body(json!(3)))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Player must be at least 15 years old");
}

#[tokio::test]
async fn update_player_with_empty_club_binds_null() {
    let db = FakeDatabase::new();

    let (status, body) = send(&db, Method::PUT, "/players/10", Some(player_body(json!("")))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Player updated successfully");
    let stmt = db.only_statement();
    assert_eq!(stmt.params[7], Param::Null);
    assert_eq!(stmt.params[8], Param::Int(10));
}

#[tokio::test]
async fn update_player_surfaces_database_rejection() {
    let db = FakeDatabase::new();
    db.push_execute_error(server_error("Cannot add or update a child row"));

    let (status, body) = send(&db, Method::PUT, "/players/10", Some(player_body(json!(999)))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot add or update a child row");
}

#[tokio::test]
async fn delete_player_succeeds_when_statement_succeeds() {
    let db = FakeDatabase::new();
    db.push_outcome(Outcome::default());

    let (status, body) = send(&db, Method::DELETE, "/players/10", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Player deleted successfully");
    let stmt = db.only_statement();
    assert_eq!(stmt.sql, "DELETE FROM player WHERE player_id = ?");
    assert_eq!(stmt.params, vec![Param::Int(10)]);
}

#[tokio::test]
async fn search_without_filters_is_unconstrained() {
    let db = FakeDatabase::new();
    db.push_rows(vec![
        json!({ "player_id": 1, "full_name": "Kevin De Bruyne", "salary": 400000, "club_name": "City" }),
        json!({ "player_id": 2, "full_name": "Free Roamer", "salary": 0, "club_name": "Free Agent" }),
    ]);

    let (status, body) = get(&db, "/players/search").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    let stmt = db.only_statement();
    assert!(stmt.params.is_empty());
    assert!(stmt.sql.ends_with("ORDER BY salary DESC, age ASC"));
}

#[tokio::test]
async fn search_name_starts_with() {
    let db = FakeDatabase::new();

    let (status, _) = get(&db, "/players/search?name=Leo&nameMatchType=startsWith").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(db.only_statement().params, vec![Param::Text("Leo%".to_string())]);
}

#[tokio::test]
async fn search_name_exact_and_default() {
    let db = FakeDatabase::new();

    get(&db, "/players/search?name=Leo%20Messi&nameMatchType=exact").await;
    get(&db, "/players/search?name=Leo").await;

    let statements = db.statements();
    assert!(statements[0].sql.contains("CONCAT(p.f_name, ' ', p.l_name) = ?"));
    assert_eq!(statements[0].params, vec![Param::Text("Leo Messi".to_string())]);
    assert_eq!(statements[1].params, vec![Param::Text("%Leo%".to_string())]);
}

#[tokio::test]
async fn search_combines_filters_in_order() {
    let db = FakeDatabase::new();

    let (status, _) = get(
        &db,
        "/players/search?minTrophies=3&minAge=21&position=Defender&club_id=2&maxAge=&minSalary=50000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        db.only_statement().params,
        vec![
            Param::Text("Defender".to_string()),
            Param::Int(2),
            Param::Int(21),
            Param::Float(50000.0),
            Param::Int(3),
        ]
    );
}

#[tokio::test]
async fn search_rejects_non_numeric_filters() {
    let db = FakeDatabase::new();

    let (status, body) = get(&db, "/players/search?minAge=young").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid value for minAge: young");
    assert!(db.statements().is_empty());
}

#[tokio::test]
async fn search_failure_is_generic() {
    let db = FakeDatabase::new();
    db.push_query_error(server_error("Unknown column 'c.total_trophies'"));

    let (status, body) = get(&db, "/players/search?minTrophies=1").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to search players");
}

#[tokio::test]
async fn transfer_calls_the_procedure() {
    let db = FakeDatabase::new();

    let (status, body) = send(
        &db,
        Method::POST,
        "/players/10/transfer",
        Some(json!({
            "new_club_id": "4",
            "new_salary": 250000,
            "start_date": "2024-07-01",
            "end_date": "2027-06-30"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Blockbuster Transfer Completed Successfully!");
    let stmt = db.only_statement();
    assert_eq!(stmt.sql, "CALL transfer_player(?, ?, ?, ?, ?)");
    assert_eq!(
        stmt.params,
        vec![
            Param::Int(10),
            Param::Int(4),
            Param::Float(250000.0),
            Param::Text("2024-07-01".to_string()),
            Param::Text("2027-06-30".to_string()),
        ]
    );
}

#[tokio::test]
async fn transfer_failure_is_generic() {
    let db = FakeDatabase::new();
    db.push_execute_error(driver_error());

    let (status, body) = send(&db, Method::POST, "/players/10/transfer", Some(json!({ "new_club_id": 4 }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to execute transfer");
}

#[tokio::test]
async fn transfer_history_newest_first() {
    let db = FakeDatabase::new();
    db.push_rows(vec![json!({
        "transfer_id": 5,
        "old_club": "Barcelona",
        "new_club": "Inter Miami",
        "transfer_date": "2023-07-15"
    })]);

    let (status, body) = get(&db, "/players/10/transfers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["new_club"], "Inter Miami");
    let stmt = db.only_statement();
    assert!(stmt.sql.ends_with("ORDER BY h.transfer_date DESC"));
    assert_eq!(stmt.params, vec![Param::Int(10)]);
}

#[tokio::test]
async fn health_and_banner() {
    let db = FakeDatabase::new();

    let (status, body) = get(&db, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&db, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "League API - v1.0");
    assert!(db.statements().is_empty());
}

#[tokio::test]
async fn fractional_club_id_is_a_json_400() {
    let db = FakeDatabase::new();

    let (status, body) = send(&db, Method::POST, "/players", Some(player_body(json!(2.5)))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(db.statements().is_empty());
}

#[tokio::test]
async fn whitespace_name_search_still_filters() {
    let db = FakeDatabase::new();

    let (status, _) = get(&db, "/players/search?name=%20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(db.only_statement().params, vec![Param::Text("% %".to_string())]);
}
