//! Player search. Each filter that is present contributes one `AND` clause
//! and exactly one parameter; clauses are appended in a fixed order so the
//! parameter list always lines up with the placeholders.

use super::{Param, Statement};

const SEARCH_BASE: &str = r#"SELECT
        p.player_id,
        CONCAT(p.f_name, ' ', p.l_name) AS full_name,
        TIMESTAMPDIFF(YEAR, p.dob, CURDATE()) AS age,
        p.position,
        COALESCE(c.club_name, 'Free Agent') AS club_name,
        COALESCE(c.total_trophies, 0) AS club_trophies,
        COALESCE(con.salary, 0) AS salary
    FROM player p
    LEFT JOIN club c ON p.club_id = c.club_id
    LEFT JOIN contract con ON p.player_id = con.player_id
    WHERE 1=1"#;

const SEARCH_ORDER: &str = " ORDER BY salary DESC, age ASC";

const FULL_NAME: &str = "CONCAT(p.f_name, ' ', p.l_name)";
const AGE: &str = "TIMESTAMPDIFF(YEAR, p.dob, CURDATE())";

/// How the `name` filter is compared against a player's full name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameMatch {
    #[default]
    Contains,
    StartsWith,
    EndsWith,
    Exact,
}

impl NameMatch {
    /// Unknown modes fall back to `Contains`.
    pub fn parse(mode: Option<&str>) -> Self {
        match mode {
            Some("startsWith") => NameMatch::StartsWith,
            Some("endsWith") => NameMatch::EndsWith,
            Some("exact") => NameMatch::Exact,
            _ => NameMatch::Contains,
        }
    }

    fn clause(self, name: &str) -> (String, Param) {
        match self {
            NameMatch::Contains => (format!("{FULL_NAME} LIKE ?"), format!("%{name}%").into()),
            NameMatch::StartsWith => (format!("{FULL_NAME} LIKE ?"), format!("{name}%").into()),
            NameMatch::EndsWith => (format!("{FULL_NAME} LIKE ?"), format!("%{name}").into()),
            NameMatch::Exact => (format!("{FULL_NAME} = ?"), name.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerSearch {
    pub name: Option<String>,
    pub name_match: NameMatch,
    pub position: Option<String>,
    pub club_id: Option<i64>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    pub min_salary: Option<f64>,
    pub min_trophies: Option<i64>,
}

impl PlayerSearch {
    /// The ordered (predicate, parameter) pairs for every present filter.
    fn clauses(&self) -> Vec<(String, Param)> {
        let mut clauses: Vec<(String, Param)> = Vec::new();

        if let Some(name) = &self.name {
            clauses.push(self.name_match.clause(name));
        }
        if let Some(position) = &self.position {
            clauses.push(("p.position = ?".to_string(), position.as_str().into()));
        }
        if let Some(club_id) = self.club_id {
            clauses.push(("p.club_id = ?".to_string(), club_id.into()));
        }
        if let Some(min_age) = self.min_age {
            clauses.push((format!("{AGE} >= ?"), min_age.into()));
        }
        if let Some(max_age) = self.max_age {
            clauses.push((format!("{AGE} <= ?"), max_age.into()));
        }
        if let Some(min_salary) = self.min_salary {
            clauses.push(("con.salary >= ?".to_string(), min_salary.into()));
        }
        if let Some(min_trophies) = self.min_trophies {
            clauses.push(("c.total_trophies >= ?".to_string(), min_trophies.into()));
        }

        clauses
    }

    pub fn statement(&self) -> Statement {
        let mut sql = String::from(SEARCH_BASE);
        let mut params = Vec::new();

        for (predicate, param) in self.clauses() {
            sql.push_str(" AND ");
            sql.push_str(&predicate);
            params.push(param);
        }
        sql.push_str(SEARCH_ORDER);

        Statement { sql, params }
    }
}
