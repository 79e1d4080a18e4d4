// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::{
    Prospect, ProspectId, ProspectPatch, ProspectPayload, UserId, current_timestamp,
};
use sqlx::{FromRow, query, query_as};

use crate::prospects::ProspectStore;
use crate::sqlite::{
    SqliteError, SqliteStore, Transaction, from_sql_timestamp, to_sql_timestamp,
};
use crate::users::sqlite::ensure_user;

impl ProspectStore for SqliteStore {
    async fn insert_prospect(&self, prospect: &Prospect) -> Result<bool, SqliteError> {
        self.write(async |tx| {
            // Check first, the owner should only be registered if the prospect gets inserted.
            let exists = query(
                "
                SELECT
                    1
                FROM
                    prospects_v1
                WHERE
                    id = ?
                ",
            )
            .bind(prospect.id.as_str())
            .fetch_optional(&mut **tx)
            .await?
            .is_some();

            if exists {
                return Ok(false);
            }

            ensure_user(tx, &prospect.owner).await?;

            query(
                "
                INSERT
                INTO
                    prospects_v1 (
                        id,
                        owner_id,
                        name,
                        status,
                        notes,
                        geometry,
                        created_at,
                        updated_at
                    )
                VALUES
                    (?, ?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(prospect.id.as_str())
            .bind(prospect.owner.as_str())
            .bind(prospect.payload.name.as_str())
            .bind(prospect.payload.status.as_str())
            .bind(prospect.payload.notes.as_deref())
            .bind(prospect.payload.geometry.as_deref())
            .bind(to_sql_timestamp(prospect.created_at)?)
            .bind(to_sql_timestamp(prospect.updated_at)?)
            .execute(&mut **tx)
            .await?;

            Ok(true)
        })
        .await
    }

    async fn get_prospect_owned_by(
        &self,
        owner: &UserId,
        id: &ProspectId,
    ) -> Result<Option<Prospect>, SqliteError> {
        let row = self
            .execute(async |pool| {
                query_as::<_, ProspectRow>(
                    "
                    SELECT
                        id,
                        owner_id,
                        name,
                        status,
                        notes,
                        geometry,
                        created_at,
                        updated_at
                    FROM
                        prospects_v1
                    WHERE
                        id = ?
                        AND owner_id = ?
                    ",
                )
                .bind(id.as_str())
                .bind(owner.as_str())
                .fetch_optional(pool)
                .await
                .map_err(SqliteError::Sqlite)
            })
            .await?;

        row.map(Prospect::try_from).transpose()
    }

    async fn find_prospect_owner(&self, id: &ProspectId) -> Result<Option<UserId>, SqliteError> {
        let row = self
            .execute(async |pool| {
                query_as::<_, (String,)>(
                    "
                    SELECT
                        owner_id
                    FROM
                        prospects_v1
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

        Ok(row.map(|(owner_id,)| UserId::new(owner_id)))
    }

    async fn prospects_owned_by(&self, owner: &UserId) -> Result<Vec<Prospect>, SqliteError> {
        let rows = self
            .execute(async |pool| {
                query_as::<_, ProspectRow>(
                    "
                    SELECT
                        id,
                        owner_id,
                        name,
                        status,
                        notes,
                        geometry,
                        created_at,
                        updated_at
                    FROM
                        prospects_v1
                    WHERE
                        owner_id = ?
                    ORDER BY
                        id
                    ",
                )
                .bind(owner.as_str())
                .fetch_all(pool)
                .await
                .map_err(SqliteError::Sqlite)
            })
            .await?;

        rows.into_iter().map(Prospect::try_from).collect()
    }

    async fn apply_prospect_patch(
        &self,
        owner: &UserId,
        id: &ProspectId,
        patch: &ProspectPatch,
    ) -> Result<Option<Prospect>, SqliteError> {
        self.write(async |tx| {
            let Some(mut prospect) = select_owned(tx, owner, id).await? else {
                return Ok(None);
            };

            patch.apply_to(&mut prospect.payload);
            prospect.updated_at = current_timestamp();

            query(
                "
                UPDATE
                    prospects_v1
                SET
                    name = ?,
                    status = ?,
                    notes = ?,
                    geometry = ?,
                    updated_at = ?
                WHERE
                    id = ?
                    AND owner_id = ?
                ",
            )
            .bind(prospect.payload.name.as_str())
            .bind(prospect.payload.status.as_str())
            .bind(prospect.payload.notes.as_deref())
            .bind(prospect.payload.geometry.as_deref())
            .bind(to_sql_timestamp(prospect.updated_at)?)
            .bind(id.as_str())
            .bind(owner.as_str())
            .execute(&mut **tx)
            .await?;

            Ok(Some(prospect))
        })
        .await
    }

    async fn delete_prospect(&self, owner: &UserId, id: &ProspectId) -> Result<bool, SqliteError> {
        // Links referencing the prospect are removed by the declared `ON DELETE CASCADE`.
        let result = self
            .write(async |tx| {
                query(
                    "
                    DELETE FROM
                        prospects_v1
                    WHERE
                        id = ?
                        AND owner_id = ?
                    ",
                )
                .bind(id.as_str())
                .bind(owner.as_str())
                .execute(&mut **tx)
                .await
                .map_err(SqliteError::Sqlite)
            })
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Reads the owner-scoped prospect within a running transaction.
async fn select_owned(
    tx: &mut Transaction,
    owner: &UserId,
    id: &ProspectId,
) -> Result<Option<Prospect>, SqliteError> {
    let row = query_as::<_, ProspectRow>(
        "
        SELECT
            id,
            owner_id,
            name,
            status,
            notes,
            geometry,
            created_at,
            updated_at
        FROM
            prospects_v1
        WHERE
            id = ?
            AND owner_id = ?
        ",
    )
    .bind(id.as_str())
    .bind(owner.as_str())
    .fetch_optional(&mut **tx)
    .await?;

    row.map(Prospect::try_from).transpose()
}

/// Single prospect row as it is inserted in the SQLite database.
#[derive(Debug, FromRow)]
struct ProspectRow {
    id: String,
    owner_id: String,
    name: String,
    status: String,
    notes: Option<String>,
    geometry: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<ProspectRow> for Prospect {
    type Error = SqliteError;

    fn try_from(row: ProspectRow) -> Result<Self, Self::Error> {
        Ok(Prospect {
            id: ProspectId::new(row.id),
            owner: UserId::new(row.owner_id),
            payload: ProspectPayload {
                name: row.name,
                status: row.status,
                notes: row.notes,
                geometry: row.geometry,
            },
            created_at: from_sql_timestamp("created_at", row.created_at)?,
            updated_at: from_sql_timestamp("updated_at", row.updated_at)?,
        })
    }
}
