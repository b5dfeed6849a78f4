//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{Connection, ErrorCode, Row};

use crate::{
    database_id::TransactionId,
    resource::{AggregateProcedure, Resource},
    stores::{ListQuery, Page, StoreError, TransactionStore},
    transaction::{NewTransaction, Transaction},
};

/// Stores expenses and incomes in a SQLite database.
///
/// Each resource has its own table. The aggregate procedures are implemented
/// as named SQL queries, see [procedure_sql].
///
/// Queries run on tokio's blocking thread pool while holding the connection
/// lock, so calls are serialised.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// This function will modify the database by adding the tables for
    /// expenses and incomes if they do not exist.
    ///
    /// # Errors
    /// Returns an error if the tables cannot be created.
    pub fn new(connection: Connection) -> Result<Self, StoreError> {
        initialize(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Run `query` against the connection on the blocking thread pool.
    async fn run<T, F>(&self, query: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let connection = self.connection.clone();

        tokio::task::spawn_blocking(move || {
            let connection = connection.lock().map_err(|error| {
                StoreError::Unavailable(format!("could not acquire the database lock: {error}"))
            })?;

            query(&connection)
        })
        .await
        .map_err(|error| StoreError::Unavailable(format!("the query task failed: {error}")))?
    }
}

#[async_trait]
impl TransactionStore for SqliteStore {
    /// Insert a new transaction into the table for `resource`.
    ///
    /// # Errors
    /// This function will return a [StoreError::Rejected] if a table constraint
    /// fails, e.g. the amount is not positive.
    async fn insert(
        &self,
        resource: Resource,
        transaction: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        self.run(move |connection| {
            connection
                .prepare(&format!(
                    "INSERT INTO {} (amount, description, date)
                     VALUES (?1, ?2, ?3)
                     RETURNING id, amount, description, date",
                    resource.table()
                ))?
                .query_row(
                    (transaction.amount, transaction.description, transaction.date),
                    map_transaction_row,
                )
                .map_err(StoreError::from)
        })
        .await
    }

    /// Retrieve a transaction by its `id`.
    ///
    /// # Errors
    /// This function will return a [StoreError::NotFound] if `id` does not
    /// refer to a row in the table for `resource`.
    async fn select_one(
        &self,
        resource: Resource,
        id: TransactionId,
    ) -> Result<Transaction, StoreError> {
        self.run(move |connection| {
            connection
                .prepare(&format!(
                    "SELECT id, amount, description, date FROM {} WHERE id = :id",
                    resource.table()
                ))?
                .query_row(&[(":id", &id)], map_transaction_row)
                .map_err(|error| match error {
                    rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound(id),
                    error => error.into(),
                })
        })
        .await
    }

    /// Retrieve a page of transactions and the number of rows in the table.
    ///
    /// Both queries run under the same lock, so the count is consistent with
    /// the rows.
    async fn select_range(&self, resource: Resource, query: ListQuery) -> Result<Page, StoreError> {
        self.run(move |connection| {
            let order_clause = match query.order {
                Some(column) => format!("ORDER BY {} ASC, id ASC", column.column_name()),
                None => String::new(),
            };
            let pagination = query.pagination;

            let rows = connection
                .prepare(&format!(
                    "SELECT id, amount, description, date FROM {} {order_clause}
                     LIMIT :limit OFFSET :offset",
                    resource.table()
                ))?
                .query_map(
                    &[
                        (":limit", &to_sql_integer(pagination.limit)),
                        (":offset", &to_sql_integer(pagination.offset)),
                    ],
                    map_transaction_row,
                )?
                .collect::<Result<Vec<_>, _>>()?;

            let total_count: i64 = connection.query_row(
                &format!("SELECT COUNT(*) FROM {}", resource.table()),
                [],
                |row| row.get(0),
            )?;

            Ok(Page {
                rows,
                total_count: u64::try_from(total_count).unwrap_or_default(),
            })
        })
        .await
    }

    /// Replace the amount, description and date of the transaction `id`.
    async fn update(
        &self,
        resource: Resource,
        id: TransactionId,
        transaction: NewTransaction,
    ) -> Result<Vec<Transaction>, StoreError> {
        self.run(move |connection| {
            connection
                .prepare(&format!(
                    "UPDATE {} SET amount = ?1, description = ?2, date = ?3
                     WHERE id = ?4
                     RETURNING id, amount, description, date",
                    resource.table()
                ))?
                .query_map(
                    (transaction.amount, transaction.description, transaction.date, id),
                    map_transaction_row,
                )?
                .collect::<Result<Vec<_>, _>>()
                .map_err(StoreError::from)
        })
        .await
    }

    async fn delete(&self, resource: Resource, id: TransactionId) -> Result<(), StoreError> {
        self.run(move |connection| {
            connection.execute(
                &format!("DELETE FROM {} WHERE id = :id", resource.table()),
                &[(":id", &id)],
            )?;

            Ok(())
        })
        .await
    }

    async fn call_aggregate(&self, procedure: AggregateProcedure) -> Result<f64, StoreError> {
        self.run(move |connection| {
            connection
                .query_row(procedure_sql(procedure), [], |row| row.get(0))
                .map_err(StoreError::from)
        })
        .await
    }
}

/// The SQL that implements each aggregate procedure.
///
/// `TOTAL` is used instead of `SUM` so that an empty table sums to 0.0
/// rather than NULL.
fn procedure_sql(procedure: AggregateProcedure) -> &'static str {
    match procedure {
        AggregateProcedure::ExpensesSum => "SELECT TOTAL(amount) FROM expenses",
        AggregateProcedure::TotalIncome => "SELECT TOTAL(amount) FROM incomes",
    }
}

fn to_sql_integer(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Create the tables for every resource in the database.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), StoreError> {
    let transaction = connection.unchecked_transaction()?;

    for resource in [Resource::Expense, Resource::Income] {
        create_transaction_table(resource, &transaction)?;
    }

    transaction.commit()?;

    Ok(())
}

fn create_transaction_table(
    resource: Resource,
    connection: &Connection,
) -> Result<(), rusqlite::Error> {
    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL CHECK (amount > 0),
                description TEXT NOT NULL,
                date TEXT NOT NULL
                )",
            resource.table()
        ),
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let description = row.get(2)?;
    let date = row.get(3)?;

    Ok(Transaction {
        id,
        amount,
        description,
        date,
    })
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(sql_error, description) => {
                let message = description.unwrap_or_else(|| sql_error.to_string());

                match sql_error.code {
                    ErrorCode::ConstraintViolation
                    | ErrorCode::TypeMismatch
                    | ErrorCode::TooBig
                    | ErrorCode::ParameterOutOfRange => StoreError::Rejected(message),
                    _ => StoreError::Unavailable(message),
                }
            }
            error => StoreError::Unavailable(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        pagination::Pagination,
        resource::{AggregateProcedure, Resource},
        stores::{ListQuery, SortColumn, StoreError, TransactionStore},
        transaction::NewTransaction,
    };

    use super::SqliteStore;

    fn get_test_store() -> SqliteStore {
        let connection = Connection::open_in_memory().unwrap();

        SqliteStore::new(connection).unwrap()
    }

    async fn insert_expenses(store: &SqliteStore, rows: &[(f64, &str)]) {
        for (amount, description) in rows {
            store
                .insert(
                    Resource::Expense,
                    NewTransaction::new_unchecked(*amount, description, date!(2024 - 01 - 01)),
                )
                .await
                .expect("Could not insert expense");
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = get_test_store();
        let new = NewTransaction::new_unchecked(50.0, "lunch", date!(2024 - 01 - 01));

        let first = store.insert(Resource::Expense, new.clone()).await.unwrap();
        let second = store.insert(Resource::Expense, new.clone()).await.unwrap();

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert_eq!(first, new.with_id(first.id));
    }

    #[tokio::test]
    async fn insert_rejects_non_positive_amount() {
        let store = get_test_store();

        let result = store
            .insert(
                Resource::Income,
                NewTransaction::new_unchecked(-1.0, "refund", date!(2024 - 01 - 01)),
            )
            .await;

        assert!(
            matches!(result, Err(StoreError::Rejected(_))),
            "want rejected, got {result:?}"
        );
    }

    #[tokio::test]
    async fn resources_use_separate_tables() {
        let store = get_test_store();
        let expense = store
            .insert(
                Resource::Expense,
                NewTransaction::new_unchecked(5.0, "coffee", date!(2024 - 01 - 01)),
            )
            .await
            .unwrap();

        let result = store.select_one(Resource::Income, expense.id).await;

        assert_eq!(result, Err(StoreError::NotFound(expense.id)));
    }

    #[tokio::test]
    async fn select_one_returns_inserted_row() {
        let store = get_test_store();
        let inserted = store
            .insert(
                Resource::Expense,
                NewTransaction::new_unchecked(5.0, "coffee", date!(2024 - 02 - 03)),
            )
            .await
            .unwrap();

        let selected = store.select_one(Resource::Expense, inserted.id).await;

        assert_eq!(selected, Ok(inserted));
    }

    #[tokio::test]
    async fn select_range_pages_and_counts() {
        let store = get_test_store();
        insert_expenses(
            &store,
            &[(30.0, "c"), (10.0, "e"), (50.0, "a"), (20.0, "d"), (40.0, "b")],
        )
        .await;

        let page = store
            .select_range(
                Resource::Expense,
                ListQuery {
                    pagination: Pagination {
                        limit: 2,
                        offset: 1,
                    },
                    order: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(page.total_count, 5);
        let descriptions: Vec<_> = page.rows.iter().map(|row| row.description.as_str()).collect();
        assert_eq!(descriptions, ["e", "a"]);
    }

    #[tokio::test]
    async fn select_range_sorts_by_column() {
        let store = get_test_store();
        insert_expenses(&store, &[(30.0, "c"), (10.0, "e"), (50.0, "a")]).await;

        let by_amount = store
            .select_range(
                Resource::Expense,
                ListQuery {
                    pagination: Pagination::default(),
                    order: Some(SortColumn::Amount),
                },
            )
            .await
            .unwrap();
        let by_description = store
            .select_range(
                Resource::Expense,
                ListQuery {
                    pagination: Pagination::default(),
                    order: Some(SortColumn::Description),
                },
            )
            .await
            .unwrap();

        let amounts: Vec<_> = by_amount.rows.iter().map(|row| row.amount).collect();
        assert_eq!(amounts, [10.0, 30.0, 50.0]);
        let descriptions: Vec<_> = by_description
            .rows
            .iter()
            .map(|row| row.description.as_str())
            .collect();
        assert_eq!(descriptions, ["a", "c", "e"]);
    }

    #[tokio::test]
    async fn select_range_past_the_end_is_empty() {
        let store = get_test_store();
        insert_expenses(&store, &[(1.0, "a"), (2.0, "b")]).await;

        let page = store
            .select_range(
                Resource::Expense,
                ListQuery {
                    pagination: Pagination {
                        limit: 5,
                        offset: 10,
                    },
                    order: None,
                },
            )
            .await
            .unwrap();

        assert!(page.rows.is_empty());
        assert_eq!(page.total_count, 2);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_id() {
        let store = get_test_store();
        let inserted = store
            .insert(
                Resource::Income,
                NewTransaction::new_unchecked(100.0, "salary", date!(2024 - 01 - 31)),
            )
            .await
            .unwrap();
        let replacement = NewTransaction::new_unchecked(120.0, "bonus", date!(2024 - 02 - 29));

        let updated = store
            .update(Resource::Income, inserted.id, replacement.clone())
            .await
            .unwrap();

        assert_eq!(updated, vec![replacement.with_id(inserted.id)]);
    }

    #[tokio::test]
    async fn update_of_missing_row_returns_no_rows() {
        let store = get_test_store();

        let updated = store
            .update(
                Resource::Expense,
                404,
                NewTransaction::new_unchecked(1.0, "x", date!(2024 - 01 - 01)),
            )
            .await;

        assert_eq!(updated, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let store = get_test_store();
        let inserted = store
            .insert(
                Resource::Expense,
                NewTransaction::new_unchecked(1.0, "x", date!(2024 - 01 - 01)),
            )
            .await
            .unwrap();

        store.delete(Resource::Expense, inserted.id).await.unwrap();

        assert_eq!(
            store.select_one(Resource::Expense, inserted.id).await,
            Err(StoreError::NotFound(inserted.id))
        );
    }

    #[tokio::test]
    async fn aggregates_sum_their_own_table() {
        let store = get_test_store();
        insert_expenses(&store, &[(1.5, "a"), (2.5, "b")]).await;
        store
            .insert(
                Resource::Income,
                NewTransaction::new_unchecked(100.0, "salary", date!(2024 - 01 - 01)),
            )
            .await
            .unwrap();

        let expenses = store
            .call_aggregate(AggregateProcedure::ExpensesSum)
            .await
            .unwrap();
        let income = store
            .call_aggregate(AggregateProcedure::TotalIncome)
            .await
            .unwrap();

        assert_eq!(expenses, 4.0);
        assert_eq!(income, 100.0);
    }

    #[tokio::test]
    async fn aggregate_of_empty_table_is_zero() {
        let store = get_test_store();

        let total = store
            .call_aggregate(AggregateProcedure::ExpensesSum)
            .await
            .unwrap();

        assert_eq!(total, 0.0);
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        super::initialize(&connection).unwrap();
        super::initialize(&connection).unwrap();
    }
}
