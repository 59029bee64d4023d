//! Store for the chefs table.

use kitchen_core::{
    sort_leaderboard, Chef, ChefId, CookoffResult, KitchenError, LeaderboardSort, NewChef,
    StorageError,
};
use rusqlite::{params, Connection, Row};

use crate::db::Database;
use crate::error::{is_constraint_violation, query_err};

const CHEF_COLUMNS: &str =
    "id, name, specialty, years_experience, signature_dishes, age, wins, cookoffs";

fn chef_from_row(row: &Row<'_>) -> rusqlite::Result<Chef> {
    Ok(Chef {
        id: row.get(0)?,
        name: row.get(1)?,
        specialty: row.get(2)?,
        years_experience: row.get(3)?,
        signature_dishes: row.get(4)?,
        age: row.get(5)?,
        wins: row.get(6)?,
        cookoffs: row.get(7)?,
    })
}

/// CRUD and stat operations over chef rows.
#[derive(Clone)]
pub struct ChefStore {
    db: Database,
}

impl ChefStore {
    pub(crate) fn new(db: Database) -> Self {
        Self { db }
    }

    /// Validate and insert a new chef. Duplicate names are rejected by
    /// the unique name index and surface as [`StorageError::DuplicateChef`].
    pub fn create(&self, new_chef: &NewChef) -> Result<Chef, KitchenError> {
        new_chef.validate()?;

        let id = self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO chefs (name, specialty, years_experience, signature_dishes, age)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    new_chef.name,
                    new_chef.specialty,
                    new_chef.years_experience,
                    new_chef.signature_dishes,
                    new_chef.age,
                ],
            )
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    StorageError::DuplicateChef {
                        name: new_chef.name.clone(),
                    }
                } else {
                    query_err(e)
                }
            })?;
            Ok(conn.last_insert_rowid())
        })?;

        tracing::info!(chef_id = id, name = %new_chef.name, "chef created");
        Ok(self.get(id)?)
    }

    /// Fetch a chef by id.
    pub fn get(&self, id: ChefId) -> Result<Chef, StorageError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM chefs WHERE id = ?1", CHEF_COLUMNS),
                [id],
                chef_from_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StorageError::ChefNotFound { id },
                other => query_err(other),
            })
        })
    }

    /// Fetch a chef by name.
    pub fn get_by_name(&self, name: &str) -> Result<Chef, StorageError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM chefs WHERE name = ?1", CHEF_COLUMNS),
                [name],
                chef_from_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StorageError::ChefNameNotFound {
                    name: name.to_string(),
                },
                other => query_err(other),
            })
        })
    }

    /// All chefs, unordered.
    pub fn list(&self) -> Result<Vec<Chef>, StorageError> {
        self.db.with_conn(|conn| Self::list_inner(conn))
    }

    fn list_inner(conn: &Connection) -> Result<Vec<Chef>, StorageError> {
        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM chefs", CHEF_COLUMNS))
            .map_err(query_err)?;
        let rows = stmt
            .query_map([], chef_from_row)
            .map_err(query_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_err)?;
        Ok(rows)
    }

    /// Delete a chef by id.
    pub fn delete(&self, id: ChefId) -> Result<(), StorageError> {
        let affected = self.db.with_conn(|conn| {
            conn.execute("DELETE FROM chefs WHERE id = ?1", [id])
                .map_err(query_err)
        })?;
        if affected == 0 {
            return Err(StorageError::ChefNotFound { id });
        }
        tracing::info!(chef_id = id, "chef deleted");
        Ok(())
    }

    /// Record a cookoff outcome: a win increments `cookoffs` and `wins`,
    /// a loss increments only `cookoffs`. One UPDATE, so the `wins <=
    /// cookoffs` check sees both columns move together.
    pub fn record_result(&self, id: ChefId, result: CookoffResult) -> Result<(), StorageError> {
        let sql = match result {
            CookoffResult::Win => {
                "UPDATE chefs SET cookoffs = cookoffs + 1, wins = wins + 1 WHERE id = ?1"
            }
            CookoffResult::Loss => "UPDATE chefs SET cookoffs = cookoffs + 1 WHERE id = ?1",
        };
        let affected = self
            .db
            .with_conn(|conn| conn.execute(sql, [id]).map_err(query_err))?;
        if affected == 0 {
            return Err(StorageError::ChefNotFound { id });
        }
        tracing::info!(chef_id = id, result = %result, "cookoff result recorded");
        Ok(())
    }

    /// All chefs in leaderboard order for the given sort key.
    pub fn leaderboard(&self, sort: LeaderboardSort) -> Result<Vec<Chef>, StorageError> {
        let mut chefs = self.list()?;
        sort_leaderboard(&mut chefs, sort);
        Ok(chefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use kitchen_core::ValidationError;

    fn sample_chef() -> NewChef {
        NewChef {
            name: "Gordon Ramsay".to_string(),
            specialty: "British".to_string(),
            years_experience: 25,
            signature_dishes: "Beef Wellington, Scrambled Eggs".to_string(),
            age: 55,
        }
    }

    fn store() -> ChefStore {
        Database::open_in_memory().unwrap().chefs()
    }

    #[test]
    fn test_create_and_get() {
        let store = store();
        let created = store.create(&sample_chef()).unwrap();
        assert_eq!(created.wins, 0);
        assert_eq!(created.cookoffs, 0);

        let fetched = store.get(created.id).unwrap();
        assert_eq!(fetched, created);

        let by_name = store.get_by_name("Gordon Ramsay").unwrap();
        assert_eq!(by_name.id, created.id);
    }

    #[test]
    fn test_create_duplicate_name_rejected() {
        let store = store();
        store.create(&sample_chef()).unwrap();
        let err = store.create(&sample_chef()).unwrap_err();
        assert!(matches!(
            err,
            KitchenError::Storage(StorageError::DuplicateChef { .. })
        ));
    }

    #[test]
    fn test_create_invalid_input_rejected_before_insert() {
        let store = store();
        let mut chef = sample_chef();
        chef.age = 99;
        let err = store.create(&chef).unwrap_err();
        assert!(matches!(
            err,
            KitchenError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_get_missing_chef() {
        let store = store();
        assert_eq!(
            store.get(404).unwrap_err(),
            StorageError::ChefNotFound { id: 404 }
        );
        assert_eq!(
            store.get_by_name("Nobody").unwrap_err(),
            StorageError::ChefNameNotFound {
                name: "Nobody".to_string()
            }
        );
    }

    #[test]
    fn test_delete() {
        let store = store();
        let chef = store.create(&sample_chef()).unwrap();
        store.delete(chef.id).unwrap();
        assert!(matches!(
            store.get(chef.id),
            Err(StorageError::ChefNotFound { .. })
        ));
        assert!(matches!(
            store.delete(chef.id),
            Err(StorageError::ChefNotFound { .. })
        ));
    }

    #[test]
    fn test_record_result_win_and_loss() {
        let store = store();
        let chef = store.create(&sample_chef()).unwrap();

        store.record_result(chef.id, CookoffResult::Win).unwrap();
        store.record_result(chef.id, CookoffResult::Loss).unwrap();

        let chef = store.get(chef.id).unwrap();
        assert_eq!(chef.wins, 1);
        assert_eq!(chef.cookoffs, 2);
    }

    #[test]
    fn test_record_result_unknown_chef() {
        let store = store();
        assert!(matches!(
            store.record_result(7, CookoffResult::Win),
            Err(StorageError::ChefNotFound { id: 7 })
        ));
    }

    #[test]
    fn test_leaderboard_orderings() {
        let store = store();
        let mut a = sample_chef();
        a.name = "Amy".to_string();
        let mut b = sample_chef();
        b.name = "Ben".to_string();

        let amy = store.create(&a).unwrap();
        let ben = store.create(&b).unwrap();

        // Amy: 1 win / 3 cookoffs; Ben: 2 wins / 2 cookoffs.
        store.record_result(amy.id, CookoffResult::Win).unwrap();
        store.record_result(amy.id, CookoffResult::Loss).unwrap();
        store.record_result(amy.id, CookoffResult::Loss).unwrap();
        store.record_result(ben.id, CookoffResult::Win).unwrap();
        store.record_result(ben.id, CookoffResult::Win).unwrap();

        let by_wins = store.leaderboard(LeaderboardSort::Wins).unwrap();
        assert_eq!(by_wins[0].name, "Ben");

        let by_pct = store.leaderboard(LeaderboardSort::WinPct).unwrap();
        assert_eq!(by_pct[0].name, "Ben");
        assert_eq!(by_pct[1].name, "Amy");
    }
}
