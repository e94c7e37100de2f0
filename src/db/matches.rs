use super::{Database, DbError, Outcome, Row, Statement};
use crate::models::{AppearanceInput, MatchInput};

// Match queries
pub async fn get_all_matches(db: &dyn Database) -> Result<Vec<Row>, DbError> {
    db.fetch_all(Statement::new(
        r#"SELECT
               m.match_id, m.match_type, DATE_FORMAT(m.match_date, '%Y-%m-%d') AS match_date,
               h.club_name AS home_team, a.club_name AS away_team,
               m.home_score, m.away_score, s.stadium_name
           FROM matches m
           INNER JOIN club h ON m.home_club_id = h.club_id
           INNER JOIN club a ON m.away_club_id = a.club_id
           INNER JOIN stadium s ON m.stadium_id = s.stadium_id
           ORDER BY m.match_date DESC"#,
    ))
    .await
}

pub async fn get_match_by_id(db: &dyn Database, match_id: i64) -> Result<Option<Row>, DbError> {
    db.fetch_optional(
        Statement::new(
            r#"SELECT match_id, match_type, DATE_FORMAT(match_date, '%Y-%m-%d') AS match_date,
                      home_club_id, away_club_id, home_score, away_score, stadium_id
               FROM matches WHERE match_id = ?"#,
        )
        .bind(match_id),
    )
    .await
}

pub async fn insert_match(db: &dyn Database, input: &MatchInput) -> Result<Outcome, DbError> {
    db.execute(
        Statement::new(
            r#"INSERT INTO matches (match_type, match_date, home_club_id, away_club_id, home_score, away_score, stadium_id)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(input.match_type.clone())
        .bind(input.match_date.clone())
        .bind(input.home_club_id)
        .bind(input.away_club_id)
        .bind(input.home_score.unwrap_or(0))
        .bind(input.away_score.unwrap_or(0))
        .bind(input.stadium_id),
    )
    .await
}

pub async fn update_match(db: &dyn Database, match_id: i64, input: &MatchInput) -> Result<Outcome, DbError> {
    db.execute(
        Statement::new(
            r#"UPDATE matches
               SET match_type = ?, match_date = ?, home_club_id = ?, away_club_id = ?,
                   home_score = ?, away_score = ?, stadium_id = ?
               WHERE match_id = ?"#,
        )
        .bind(input.match_type.clone())
        .bind(input.match_date.clone())
        .bind(input.home_club_id)
        .bind(input.away_club_id)
        .bind(input.home_score.unwrap_or(0))
        .bind(input.away_score.unwrap_or(0))
        .bind(input.stadium_id)
        .bind(match_id),
    )
    .await
}

pub async fn delete_match(db: &dyn Database, match_id: i64) -> Result<Outcome, DbError> {
    db.execute(Statement::new(r#"DELETE FROM matches WHERE match_id = ?"#).bind(match_id))
        .await
}

pub async fn get_all_stadiums(db: &dyn Database) -> Result<Vec<Row>, DbError> {
    db.fetch_all(Statement::new(r#"SELECT * FROM stadium"#)).await
}

// Lineup queries
pub async fn get_match_lineup(db: &dyn Database, match_id: i64) -> Result<Vec<Row>, DbError> {
    db.fetch_all(
        Statement::new(
            r#"SELECT ma.appearance_id, ma.minutes_played, ma.goals, ma.assists,
                      p.player_id, CONCAT(p.f_name, ' ', p.l_name) AS player_name, p.position
               FROM match_appearances ma
               JOIN player p ON ma.player_id = p.player_id
               WHERE ma.match_id = ?"#,
        )
        .bind(match_id),
    )
    .await
}

/// Missing counters are recorded as zero.
pub async fn insert_appearance(
    db: &dyn Database,
    match_id: i64,
    input: &AppearanceInput,
) -> Result<Outcome, DbError> {
    db.execute(
        Statement::new(
            r#"INSERT INTO match_appearances (match_id, player_id, minutes_played, goals, assists)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(match_id)
        .bind(input.player_id)
        .bind(input.minutes_played.unwrap_or(0))
        .bind(input.goals.unwrap_or(0))
        .bind(input.assists.unwrap_or(0)),
    )
    .await
}
