use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DbBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

// 唯一索引中 NULL 互不相等，未分配教师的开课需要单独的索引
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let sql = match manager.get_database_backend() {
            DbBackend::MySql => {
                "CREATE UNIQUE INDEX unique_unassigned_subject_offering ON subject_offerings \
                 ((IF(teacher_id IS NULL, department_id, NULL)), \
                 (IF(teacher_id IS NULL, subject_id, NULL)))"
            }
            _ => {
                "CREATE UNIQUE INDEX IF NOT EXISTS unique_unassigned_subject_offering \
                 ON subject_offerings (department_id, subject_id) WHERE teacher_id IS NULL"
            }
        };
        manager.get_connection().execute_unprepared(sql).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("unique_unassigned_subject_offering")
                    .table(SubjectOfferings::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum SubjectOfferings {
    #[sea_orm(iden = "subject_offerings")]
    Table,
}
