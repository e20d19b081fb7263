use crate::domain::{
    extraction::entity::{extraction, metric},
    output::entity::output,
    project::entity::project,
    rating::entity::rating,
    scenario::entity::scenario,
};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Statement};
use std::env;
use tracing::info;

/// 조회 패턴에 맞춘 보조 인덱스 (이름, 테이블, 컬럼)
const INDEXES: &[(&str, &str, &[&str])] = &[
    ("idx_scenarios_project_order", "scenarios", &["project_id", "\"order\""]),
    ("idx_outputs_scenario_generated", "outputs", &["scenario_id", "generated_at"]),
    ("idx_ratings_output_created", "ratings", &["output_id", "created_at"]),
    ("idx_extractions_project_created", "extractions", &["project_id", "created_at"]),
    ("idx_metrics_project_snapshot", "metrics", &["project_id", "snapshot_time"]),
    ("idx_metrics_extraction", "metrics", &["extraction_id"]),
];

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    info!("Successfully connected to the database.");

    let should_update_schema = env::var("DB_SCHEMA_UPDATE")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid DB_SCHEMA_UPDATE value, defaulting to false. Use 'true' or 'false'."
            );
            false
        });

    if should_update_schema {
        create_tables(&db).await?;
    } else {
        info!("Skipping database schema synchronization (DB_SCHEMA_UPDATE is not true).");
    }

    Ok(db)
}

async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    info!("Starting database schema synchronization...");

    // 외래 키 순서: 부모 테이블 먼저
    create_table_if_not_exists(db, &schema, project::Entity).await?;
    create_table_if_not_exists(db, &schema, scenario::Entity).await?;
    create_table_if_not_exists(db, &schema, output::Entity).await?;
    create_table_if_not_exists(db, &schema, rating::Entity).await?;
    create_table_if_not_exists(db, &schema, extraction::Entity).await?;
    create_table_if_not_exists(db, &schema, metric::Entity).await?;

    for (index_name, table_name, columns) in INDEXES {
        create_index_if_not_exists(db, index_name, table_name, columns).await?;
    }

    info!("Database schema synchronization completed.");
    Ok(())
}

fn create_index_sql(index_name: &str, table_name: &str, columns: &[&str]) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
        index_name,
        table_name,
        columns.join(", ")
    )
}

async fn create_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let stmt = Statement::from_string(
        db.get_database_backend(),
        create_index_sql(index_name, table_name, columns),
    );
    db.execute(stmt).await.map(|_| ()).map_err(|e| {
        tracing::error!("Failed to create index {}: {}", index_name, e);
        e
    })
}

async fn create_table_if_not_exists<E>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr>
where
    E: sea_orm::EntityTrait,
{
    let table_name = entity.table_name().to_string();
    let backend = db.get_database_backend();
    let create_stmt: Statement =
        backend.build(schema.create_table_from_entity(entity).if_not_exists());

    match db.execute(create_stmt).await {
        Ok(_) => {
            info!(table = %table_name, "Table ready");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to create table {}: {}", table_name, e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_sql_should_be_idempotent() {
        let sql = create_index_sql("idx_ratings_output_created", "ratings", &["output_id", "created_at"]);

        assert_eq!(
            sql,
            "CREATE INDEX IF NOT EXISTS idx_ratings_output_created ON ratings (output_id, created_at)"
        );
    }

    #[test]
    fn indexes_should_quote_reserved_order_column() {
        let (_, table, columns) = INDEXES[0];

        assert_eq!(table, "scenarios");
        assert!(columns.contains(&"\"order\""));
    }
}
