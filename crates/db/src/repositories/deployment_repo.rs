//! Repository for the `furniture_deployments` table.

use sqlx::{PgConnection, PgPool};
use furnitrack_core::types::DbId;

use crate::models::furniture::FurnitureDeployment;

const COLUMNS: &str = "id, furniture_id, location, deployed_at";

/// Append-only record of where an item has been deployed.
pub struct DeploymentRepo;

impl DeploymentRepo {
    pub async fn create(
        conn: &mut PgConnection,
        furniture_id: DbId,
        location: &str,
    ) -> Result<FurnitureDeployment, sqlx::Error> {
        let query = format!(
            "INSERT INTO furniture_deployments (furniture_id, location)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FurnitureDeployment>(&query)
            .bind(furniture_id)
            .bind(location)
            .fetch_one(conn)
            .await
    }

    /// Deployments of one item, most recent first.
    pub async fn list_by_furniture(
        pool: &PgPool,
        furniture_id: DbId,
    ) -> Result<Vec<FurnitureDeployment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM furniture_deployments \
             WHERE furniture_id = $1 ORDER BY deployed_at DESC, id DESC"
        );
        sqlx::query_as::<_, FurnitureDeployment>(&query)
            .bind(furniture_id)
            .fetch_all(pool)
            .await
    }

    /// Returns the number of rows removed.
    pub async fn delete_by_furniture(
        conn: &mut PgConnection,
        furniture_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM furniture_deployments WHERE furniture_id = $1")
            .bind(furniture_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
