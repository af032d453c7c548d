use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryFilter,
    QuerySelect, TransactionTrait,
};

use models::sequence;

use crate::sequence::domain::SequenceRow;
use crate::sequence::errors::StorageError;
use crate::sequence::storage::{SequenceStorage, SequenceTxn};

/// Postgres-backed storage. Row locking is `SELECT ... FOR UPDATE`.
#[derive(Clone)]
pub struct SeaOrmSequenceStorage {
    pub db: DatabaseConnection,
}

impl SeaOrmSequenceStorage {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

pub struct SeaOrmSequenceTxn {
    txn: DatabaseTransaction,
}

#[async_trait]
impl SequenceStorage for SeaOrmSequenceStorage {
    type Txn = SeaOrmSequenceTxn;

    async fn begin(&self) -> Result<Self::Txn, StorageError> {
        let txn = self.db.begin().await?;
        Ok(SeaOrmSequenceTxn { txn })
    }
}

#[async_trait]
impl SequenceTxn for SeaOrmSequenceTxn {
    async fn find_for_update(&mut self, name: &str) -> Result<Option<SequenceRow>, StorageError> {
        let res = sequence::Entity::find()
            .filter(sequence::Column::SequenceName.eq(name))
            .lock_exclusive()
            .one(&self.txn)
            .await?;
        Ok(res.map(SequenceRow::from))
    }

    async fn update_count(&mut self, id: i64, count: i64) -> Result<(), StorageError> {
        let res = sequence::Entity::update_many()
            .col_expr(sequence::Column::SequenceCount, Expr::value(count))
            .filter(sequence::Column::Id.eq(id))
            .exec(&self.txn)
            .await?;
        if res.rows_affected != 1 {
            return Err(StorageError(format!("expected 1 row updated for id {id}, got {}", res.rows_affected)));
        }
        Ok(())
    }

    async fn commit(self) -> Result<(), StorageError> {
        self.txn.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StorageError> {
        self.txn.rollback().await?;
        Ok(())
    }
}
