//! 教研室存储操作

use super::SeaOrmStorage;
use crate::entity::cathedra_assignments::{
    ActiveModel as AssignmentActiveModel, Column as AssignmentColumn,
    Entity as CathedraAssignments,
};
use crate::entity::cathedras::{ActiveModel, Column, Entity as Cathedras};
use crate::entity::persons::{Column as PersonColumn, Entity as Persons};
use crate::errors::{RecordsError, Result};
use crate::models::{
    cathedras::{entities::Cathedra, requests::CreateCathedraRequest},
    persons::entities::Person,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

async fn insert_cathedra<C: ConnectionTrait>(
    conn: &C,
    req: CreateCathedraRequest,
) -> Result<Cathedra> {
    let model = ActiveModel {
        name: Set(req.name),
        code: Set(req.code),
        credits: Set(req.credits),
        career: Set(req.career.to_string()),
        coordinator_id: Set(None),
        ..Default::default()
    };

    let result = model
        .insert(conn)
        .await
        .map_err(|e| RecordsError::from_db("创建教研室失败", e))?;

    Ok(result.into_cathedra())
}

/// 按代码分配教研室；遇到第一个不存在的代码即返回 NotFound。
/// 不检查重复分配，主任为后写者覆盖。
pub(super) async fn assign_cathedras_in<C: ConnectionTrait>(
    conn: &C,
    professor_id: i64,
    codes: &[String],
    coordinator: bool,
) -> Result<Vec<Cathedra>> {
    let mut assigned = Vec::with_capacity(codes.len());

    for code in codes {
        let cathedra = Cathedras::find()
            .filter(Column::Code.eq(code.as_str()))
            .one(conn)
            .await
            .map_err(|e| RecordsError::from_db("查询教研室失败", e))?
            .ok_or_else(|| RecordsError::not_found(format!("Cathedra {code} not found")))?;

        AssignmentActiveModel {
            professor_id: Set(professor_id),
            cathedra_id: Set(cathedra.id),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| RecordsError::from_db("分配教研室失败", e))?;

        let cathedra = if coordinator {
            let mut active: ActiveModel = cathedra.into();
            active.coordinator_id = Set(Some(professor_id));
            active
                .update(conn)
                .await
                .map_err(|e| RecordsError::from_db("设置教研室主任失败", e))?
        } else {
            cathedra
        };

        assigned.push(cathedra.into_cathedra());
    }

    Ok(assigned)
}

impl SeaOrmStorage {
    /// 创建教研室
    pub async fn create_cathedra_impl(&self, req: CreateCathedraRequest) -> Result<Cathedra> {
        let cathedra = insert_cathedra(&self.db, req).await?;
        info!("Cathedra {} created", cathedra.code);
        Ok(cathedra)
    }

    /// 批量创建教研室，单一事务
    pub async fn create_cathedras_impl(
        &self,
        reqs: Vec<CreateCathedraRequest>,
    ) -> Result<Vec<Cathedra>> {
        let txn = self.begin().await?;

        let mut created = Vec::with_capacity(reqs.len());
        for req in reqs {
            created.push(insert_cathedra(&txn, req).await?);
        }

        txn.commit()
            .await
            .map_err(|e| RecordsError::from_db("提交事务失败", e))?;

        Ok(created)
    }

    pub async fn get_cathedra_by_id_impl(&self, id: i64) -> Result<Option<Cathedra>> {
        let result = Cathedras::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询教研室失败", e))?;

        Ok(result.map(|m| m.into_cathedra()))
    }

    pub async fn get_cathedra_by_code_impl(&self, code: &str) -> Result<Option<Cathedra>> {
        let result = Cathedras::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询教研室失败", e))?;

        Ok(result.map(|m| m.into_cathedra()))
    }

    pub async fn list_cathedras_impl(&self) -> Result<Vec<Cathedra>> {
        let cathedras = Cathedras::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询教研室列表失败", e))?;

        Ok(cathedras.into_iter().map(|m| m.into_cathedra()).collect())
    }

    /// 列出分配到该教研室的教授（重复分配只返回一次）
    pub async fn list_cathedra_professors_impl(&self, cathedra_id: i64) -> Result<Vec<Person>> {
        let professor_ids: Vec<i64> = CathedraAssignments::find()
            .filter(AssignmentColumn::CathedraId.eq(cathedra_id))
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询教研室分配失败", e))?
            .into_iter()
            .map(|a| a.professor_id)
            .collect();

        if professor_ids.is_empty() {
            return Ok(Vec::new());
        }

        let professors = Persons::find()
            .filter(PersonColumn::Id.is_in(professor_ids))
            .order_by_asc(PersonColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询教授失败", e))?;

        Ok(professors.into_iter().map(|m| m.into_person()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::cathedra;
    use super::*;

    #[tokio::test]
    async fn test_duplicate_code_keeps_first() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let first = storage
            .create_cathedra_impl(cathedra("Mecánica", "MEC1"))
            .await
            .unwrap();

        let err = storage
            .create_cathedra_impl(cathedra("Mecánica Cuántica", "MEC1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::AlreadyExists(_)));

        let all = storage.list_cathedras_impl().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[0].name, "Mecánica");
    }

    #[tokio::test]
    async fn test_duplicate_name_is_already_exists() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_cathedra_impl(cathedra("Mecánica", "MEC1"))
            .await
            .unwrap();
        let err = storage
            .create_cathedra_impl(cathedra("Mecánica", "MEC2"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_batch_rolls_back_on_failure() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let err = storage
            .create_cathedras_impl(vec![
                cathedra("A", "A1"),
                cathedra("B", "B1"),
                cathedra("C", "A1"),
                cathedra("D", "D1"),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, RecordsError::AlreadyExists(_)));
        assert!(storage.list_cathedras_impl().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_by_id_and_code() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let created = storage
            .create_cathedra_impl(cathedra("Óptica", "OPT1"))
            .await
            .unwrap();

        let by_id = storage
            .get_cathedra_by_id_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_id.code, "OPT1");
        assert!(
            storage
                .get_cathedra_by_code_impl("NOPE")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            storage
                .list_cathedra_professors_impl(created.id)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
