use super::search::PlayerSearch;
use super::{Database, DbError, Outcome, Row, Statement};
use crate::models::{PlayerInput, TransferInput};

// Player queries
pub async fn get_all_players(db: &dyn Database) -> Result<Vec<Row>, DbError> {
    db.fetch_all(Statement::new(r#"SELECT * FROM player_roster_view"#))
        .await
}

pub async fn get_player_by_id(db: &dyn Database, player_id: i64) -> Result<Option<Row>, DbError> {
    db.fetch_optional(
        Statement::new(
            r#"SELECT player_id, f_name, l_name, DATE_FORMAT(dob, '%Y-%m-%d') AS dob,
                      position, city, state, pincode, club_id
               FROM player WHERE player_id = ?"#,
        )
        .bind(player_id),
    )
    .await
}

pub async fn insert_player(db: &dyn Database, input: &PlayerInput) -> Result<Outcome, DbError> {
    db.execute(
        Statement::new(
            r#"INSERT INTO player (f_name, l_name, dob, position, city, state, pincode, club_id)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(input.f_name.clone())
        .bind(input.l_name.clone())
        .bind(input.dob.clone())
        .bind(input.position.clone())
        .bind(input.city.clone())
        .bind(input.state.clone())
        .bind(input.pincode.clone())
        .bind(input.club_id),
    )
    .await
}

pub async fn update_player(db: &dyn Database, player_id: i64, input: &PlayerInput) -> Result<Outcome, DbError> {
    db.execute(
        Statement::new(
            r#"UPDATE player
               SET f_name = ?, l_name = ?, dob = ?, position = ?, city = ?, state = ?, pincode = ?, club_id = ?
               WHERE player_id = ?"#,
        )
        .bind(input.f_name.clone())
        .bind(input.l_name.clone())
        .bind(input.dob.clone())
        .bind(input.position.clone())
        .bind(input.city.clone())
        .bind(input.state.clone())
        .bind(input.pincode.clone())
        .bind(input.club_id)
        .bind(player_id),
    )
    .await
}

/// Dependent rows are cleaned up by the database's delete trigger.
pub async fn delete_player(db: &dyn Database, player_id: i64) -> Result<Outcome, DbError> {
    db.execute(Statement::new(r#"DELETE FROM player WHERE player_id = ?"#).bind(player_id))
        .await
}

pub async fn search_players(db: &dyn Database, search: &PlayerSearch) -> Result<Vec<Row>, DbError> {
    db.fetch_all(search.statement()).await
}

// Transfers
pub async fn transfer_player(db: &dyn Database, player_id: i64, input: &TransferInput) -> Result<Outcome, DbError> {
    db.execute(
        Statement::new(r#"CALL transfer_player(?, ?, ?, ?, ?)"#)
            .bind(player_id)
            .bind(input.new_club_id)
            .bind(input.new_salary)
            .bind(input.start_date.clone())
            .bind(input.end_date.clone()),
    )
    .await
}

pub async fn get_transfer_history(db: &dyn Database, player_id: i64) -> Result<Vec<Row>, DbError> {
    db.fetch_all(
        Statement::new(
            r#"SELECT h.transfer_id, c1.club_name AS old_club, c2.club_name AS new_club, h.transfer_date
               FROM player_transfer_history h
               LEFT JOIN club c1 ON h.old_club_id = c1.club_id
               LEFT JOIN club c2 ON h.new_club_id = c2.club_id
               WHERE h.player_id = ?
               ORDER BY h.transfer_date DESC"#,
        )
        .bind(player_id),
    )
    .await
}
