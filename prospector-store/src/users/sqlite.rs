// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::UserId;
use sqlx::query;

use crate::sqlite::{SqliteError, SqliteStore, Transaction};
use crate::users::UserStore;

/// Registers the user within an already running transaction, ignoring known ones.
pub(crate) async fn ensure_user(tx: &mut Transaction, id: &UserId) -> Result<bool, SqliteError> {
    let result = query(
        "
        INSERT OR IGNORE
        INTO
            users_v1 (id)
        VALUES
            (?)
        ",
    )
    .bind(id.as_str())
    .execute(&mut **tx)
    .await?;
    Ok(result.rows_affected() > 0)
}

impl UserStore for SqliteStore {
    async fn insert_user(&self, id: &UserId) -> Result<bool, SqliteError> {
        self.write(async |tx| ensure_user(tx, id).await).await
    }

    async fn has_user(&self, id: &UserId) -> Result<bool, SqliteError> {
        let result = self
            .execute(async |pool| {
                query(
                    "
                    SELECT
                        1
                    FROM
                        users_v1
                    WHERE
                        id = ?
                    ",
                )
                .bind(id.as_str())
                .fetch_optional(pool)
                .await
                .map_err(SqliteError::Sqlite)
            })
            .await?;
        Ok(result.is_some())
    }
}
