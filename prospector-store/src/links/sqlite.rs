// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::{ProspectId, WorkspaceId};
use sqlx::{query, query_as};

use crate::links::LinkStore;
use crate::sqlite::{SqliteError, SqliteStore};

impl LinkStore for SqliteStore {
    async fn upsert_link(
        &self,
        workspace_id: &WorkspaceId,
        prospect_id: &ProspectId,
    ) -> Result<bool, SqliteError> {
        let result = self
            .write(async |tx| {
                // Ignore insertion when the pair already exists (PRIMARY KEY constraint) and skip
                // dangling pairs instead of failing on the foreign keys.
                query(
                    "
                    INSERT OR IGNORE
                    INTO
                        workspace_prospects_v1 (
                            workspace_id,
                            prospect_id
                        )
                    SELECT
                        workspaces_v1.id,
                        prospects_v1.id
                    FROM
                        workspaces_v1,
                        prospects_v1
                    WHERE
                        workspaces_v1.id = ?
                        AND prospects_v1.id = ?
                    ",
                )
                .bind(workspace_id.as_str())
                .bind(prospect_id.as_str())
                .execute(&mut **tx)
                .await
                .map_err(SqliteError::Sqlite)
            })
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_link(
        &self,
        workspace_id: &WorkspaceId,
        prospect_id: &ProspectId,
    ) -> Result<bool, SqliteError> {
        let result = self
            .write(async |tx| {
                query(
                    "
                    DELETE FROM
                        workspace_prospects_v1
                    WHERE
                        workspace_id = ?
                        AND prospect_id = ?
                    ",
                )
                .bind(workspace_id.as_str())
                .bind(prospect_id.as_str())
                .execute(&mut **tx)
                .await
                .map_err(SqliteError::Sqlite)
            })
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn linked_workspaces(&self, prospect_id: &ProspectId) -> Result<Vec<WorkspaceId>, SqliteError> {
        let rows = self
            .execute(async |pool| {
                query_as::<_, (String,)>(
                    "
                    SELECT
                        workspace_id
                    FROM
                        workspace_prospects_v1
                    WHERE
                        prospect_id = ?
                    ORDER BY
                        workspace_id
                    ",
                )
                .bind(prospect_id.as_str())
                .fetch_all(pool)
                .await
                .map_err(SqliteError::Sqlite)
            })
            .await?;

        Ok(rows.into_iter().map(|(id,)| WorkspaceId::new(id)).collect())
    }

    async fn linked_prospects(&self, workspace_id: &WorkspaceId) -> Result<Vec<ProspectId>, SqliteError> {
        let rows = self
            .execute(async |pool| {
                query_as::<_, (String,)>(
                    "
                    SELECT
                        prospect_id
                    FROM
                        workspace_prospects_v1
                    WHERE
                        workspace_id = ?
                    ORDER BY
                        prospect_id
                    ",
                )
                .bind(workspace_id.as_str())
                .fetch_all(pool)
                .await
                .map_err(SqliteError::Sqlite)
            })
            .await?;

        Ok(rows.into_iter().map(|(id,)| ProspectId::new(id)).collect())
    }
}
