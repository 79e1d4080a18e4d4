// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::{MemberRole, Timestamp, UserId, Workspace, WorkspaceId, WorkspaceMember};
use sqlx::{FromRow, query, query_as};

use crate::sqlite::{SqliteError, SqliteStore, from_sql_timestamp, to_sql_timestamp};
use crate::users::sqlite::ensure_user;
use crate::workspaces::WorkspaceStore;

impl WorkspaceStore for SqliteStore {
    async fn insert_workspace(&self, workspace: &Workspace) -> Result<bool, SqliteError> {
        self.write(async |tx| {
            let exists = query(
                "
                SELECT
                    1
                FROM
                    workspaces_v1
                WHERE
                    id = ?
                ",
            )
            .bind(workspace.id.as_str())
            .fetch_optional(&mut **tx)
            .await?
            .is_some();

            if exists {
                return Ok(false);
            }

            ensure_user(tx, &workspace.owner).await?;

            query(
                "
                INSERT
                INTO
                    workspaces_v1 (
                        id,
                        owner_id,
                        name,
                        created_at,
                        archived_at
                    )
                VALUES
                    (?, ?, ?, ?, ?)
                ",
            )
            .bind(workspace.id.as_str())
            .bind(workspace.owner.as_str())
            .bind(workspace.name.as_str())
            .bind(to_sql_timestamp(workspace.created_at)?)
            .bind(workspace.archived_at.map(to_sql_timestamp).transpose()?)
            .execute(&mut **tx)
            .await?;

            Ok(true)
        })
        .await
    }

    async fn get_workspace(&self, id: &WorkspaceId) -> Result<Option<Workspace>, SqliteError> {
        let row = self
            .execute(async |pool| {
                query_as::<_, WorkspaceRow>(
                    "
                    SELECT
                        id,
                        owner_id,
                        name,
                        created_at,
                        archived_at
                    FROM
                        workspaces_v1
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

        row.map(Workspace::try_from).transpose()
    }

    async fn workspaces_for_user(
        &self,
        user: &UserId,
        include_archived: bool,
    ) -> Result<Vec<Workspace>, SqliteError> {
        let rows = self
            .execute(async |pool| {
                query_as::<_, WorkspaceRow>(
                    "
                    SELECT
                        workspaces_v1.id,
                        workspaces_v1.owner_id,
                        workspaces_v1.name,
                        workspaces_v1.created_at,
                        workspaces_v1.archived_at
                    FROM
                        workspaces_v1
                        LEFT JOIN workspace_members_v1
                            ON workspace_members_v1.workspace_id = workspaces_v1.id
                            AND workspace_members_v1.user_id = ?
                    WHERE
                        (
                            workspaces_v1.owner_id = ?
                            OR workspace_members_v1.user_id IS NOT NULL
                        )
                        AND (? OR workspaces_v1.archived_at IS NULL)
                    ORDER BY
                        workspaces_v1.id
                    ",
                )
                .bind(user.as_str())
                .bind(user.as_str())
                .bind(include_archived)
                .fetch_all(pool)
                .await
                .map_err(SqliteError::Sqlite)
            })
            .await?;

        rows.into_iter().map(Workspace::try_from).collect()
    }

    async fn set_workspace_archived(
        &self,
        id: &WorkspaceId,
        archived_at: Option<Timestamp>,
    ) -> Result<bool, SqliteError> {
        let archived_at = archived_at.map(to_sql_timestamp).transpose()?;
        let result = self
            .write(async |tx| {
                query(
                    "
                    UPDATE
                        workspaces_v1
                    SET
                        archived_at = ?
                    WHERE
                        id = ?
                    ",
                )
                .bind(archived_at)
                .bind(id.as_str())
                .execute(&mut **tx)
                .await
                .map_err(SqliteError::Sqlite)
            })
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_workspace(&self, id: &WorkspaceId) -> Result<bool, SqliteError> {
        // Members and links are removed by the declared `ON DELETE CASCADE`.
        let result = self
            .write(async |tx| {
                query(
                    "
                    DELETE FROM
                        workspaces_v1
                    WHERE
                        id = ?
                    ",
                )
                .bind(id.as_str())
                .execute(&mut **tx)
                .await
                .map_err(SqliteError::Sqlite)
            })
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_member(&self, member: &WorkspaceMember) -> Result<bool, SqliteError> {
        self.write(async |tx| {
            // Only register the user if the member row is going to be inserted, to keep the set of
            // known users identical to the memory backend.
            let insertable = query_as::<_, (i64,)>(
                "
                SELECT
                    1
                FROM
                    workspaces_v1
                WHERE
                    id = ?
                    AND owner_id != ?
                    AND NOT EXISTS (
                        SELECT
                            1
                        FROM
                            workspace_members_v1
                        WHERE
                            workspace_id = ?
                            AND user_id = ?
                    )
                ",
            )
            .bind(member.workspace_id.as_str())
            .bind(member.user_id.as_str())
            .bind(member.workspace_id.as_str())
            .bind(member.user_id.as_str())
            .fetch_optional(&mut **tx)
            .await?
            .is_some();

            if !insertable {
                return Ok(false);
            }

            ensure_user(tx, &member.user_id).await?;

            query(
                "
                INSERT
                INTO
                    workspace_members_v1 (
                        workspace_id,
                        user_id,
                        role
                    )
                VALUES
                    (?, ?, ?)
                ",
            )
            .bind(member.workspace_id.as_str())
            .bind(member.user_id.as_str())
            .bind(member.role.as_str())
            .execute(&mut **tx)
            .await?;

            Ok(true)
        })
        .await
    }

    async fn get_member(
        &self,
        workspace_id: &WorkspaceId,
        user_id: &UserId,
    ) -> Result<Option<WorkspaceMember>, SqliteError> {
        let row = self
            .execute(async |pool| {
                query_as::<_, MemberRow>(
                    "
                    SELECT
                        workspace_id,
                        user_id,
                        role
                    FROM
                        workspace_members_v1
                    WHERE
                        workspace_id = ?
                        AND user_id = ?
                    ",
                )
                .bind(workspace_id.as_str())
                .bind(user_id.as_str())
                .fetch_optional(pool)
                .await
                .map_err(SqliteError::Sqlite)
            })
            .await?;

        row.map(WorkspaceMember::try_from).transpose()
    }

    async fn update_member_role(
        &self,
        workspace_id: &WorkspaceId,
        user_id: &UserId,
        role: MemberRole,
    ) -> Result<bool, SqliteError> {
        let result = self
            .write(async |tx| {
                query(
                    "
                    UPDATE
                        workspace_members_v1
                    SET
                        role = ?
                    WHERE
                        workspace_id = ?
                        AND user_id = ?
                    ",
                )
                .bind(role.as_str())
                .bind(workspace_id.as_str())
                .bind(user_id.as_str())
                .execute(&mut **tx)
                .await
                .map_err(SqliteError::Sqlite)
            })
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_member(
        &self,
        workspace_id: &WorkspaceId,
        user_id: &UserId,
    ) -> Result<bool, SqliteError> {
        let result = self
            .write(async |tx| {
                query(
                    "
                    DELETE FROM
                        workspace_members_v1
                    WHERE
                        workspace_id = ?
                        AND user_id = ?
                    ",
                )
                .bind(workspace_id.as_str())
                .bind(user_id.as_str())
                .execute(&mut **tx)
                .await
                .map_err(SqliteError::Sqlite)
            })
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn members(&self, workspace_id: &WorkspaceId) -> Result<Vec<WorkspaceMember>, SqliteError> {
        let rows = self
            .execute(async |pool| {
                query_as::<_, MemberRow>(
                    "
                    SELECT
                        workspace_id,
                        user_id,
                        role
                    FROM
                        workspace_members_v1
                    WHERE
                        workspace_id = ?
                    ORDER BY
                        user_id
                    ",
                )
                .bind(workspace_id.as_str())
                .fetch_all(pool)
                .await
                .map_err(SqliteError::Sqlite)
            })
            .await?;

        rows.into_iter().map(WorkspaceMember::try_from).collect()
    }
}

#[derive(Debug, FromRow)]
struct WorkspaceRow {
    id: String,
    owner_id: String,
    name: String,
    created_at: i64,
    archived_at: Option<i64>,
}

impl TryFrom<WorkspaceRow> for Workspace {
    type Error = SqliteError;

    fn try_from(row: WorkspaceRow) -> Result<Self, Self::Error> {
        Ok(Workspace {
            id: WorkspaceId::new(row.id),
            owner: UserId::new(row.owner_id),
            name: row.name,
            created_at: from_sql_timestamp("created_at", row.created_at)?,
            archived_at: row
                .archived_at
                .map(|value| from_sql_timestamp("archived_at", value))
                .transpose()?,
        })
    }
}

#[derive(Debug, FromRow)]
struct MemberRow {
    workspace_id: String,
    user_id: String,
    role: String,
}

impl TryFrom<MemberRow> for WorkspaceMember {
    type Error = SqliteError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(WorkspaceMember {
            workspace_id: WorkspaceId::new(row.workspace_id),
            user_id: UserId::new(row.user_id),
            role: row
                .role
                .parse()
                .map_err(|err: prospector_core::RoleError| {
                    SqliteError::Decode("role".into(), err.to_string())
                })?,
        })
    }
}
