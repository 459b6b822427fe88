use sqlx::PgConnection;
use time::Date;
use uuid::Uuid;

use kernel::interface::query::BorrowQuery;
use kernel::interface::update::BorrowModifier;
use kernel::prelude::entity::{BookId, Borrow, BorrowDate, BorrowId, ReturnDate, UserId};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBorrowRepository;

#[async_trait::async_trait]
impl BorrowQuery for PostgresBorrowRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BorrowId,
    ) -> error_stack::Result<Option<Borrow>, KernelError> {
        PgBorrowInternal::find_by_id(con, id).await
    }

    async fn find_open_by_book_id(
        &self,
        con: &mut PostgresConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Borrow>, KernelError> {
        PgBorrowInternal::find_open_by_book_id(con, book_id).await
    }

    async fn find_all_open(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Borrow>, KernelError> {
        PgBorrowInternal::find_all_open(con).await
    }
}

#[async_trait::async_trait]
impl BorrowModifier for PostgresBorrowRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        borrow: &Borrow,
    ) -> error_stack::Result<(), KernelError> {
        PgBorrowInternal::create(con, borrow).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        borrow: &Borrow,
    ) -> error_stack::Result<(), KernelError> {
        PgBorrowInternal::update(con, borrow).await
    }
}

#[derive(sqlx::FromRow)]
struct BorrowRow {
    id: Uuid,
    user_id: Uuid,
    book_id: Uuid,
    borrow_date: Date,
    return_date: Option<Date>,
}

impl From<BorrowRow> for Borrow {
    fn from(value: BorrowRow) -> Self {
        Borrow::new(
            BorrowId::new(value.id),
            UserId::new(value.user_id),
            BookId::new(value.book_id),
            BorrowDate::new(value.borrow_date),
            value.return_date.map(ReturnDate::new),
        )
    }
}

pub(in crate::database) struct PgBorrowInternal;

impl PgBorrowInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BorrowId,
    ) -> error_stack::Result<Option<Borrow>, KernelError> {
        let row = sqlx::query_as::<_, BorrowRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, book_id, borrow_date, return_date
            FROM borrows
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Borrow::from))
    }

    async fn find_open_by_book_id(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Borrow>, KernelError> {
        let row = sqlx::query_as::<_, BorrowRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, book_id, borrow_date, return_date
            FROM borrows
            WHERE book_id = $1 AND return_date IS NULL
            FOR UPDATE
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Borrow::from))
    }

    async fn find_all_open(con: &mut PgConnection) -> error_stack::Result<Vec<Borrow>, KernelError> {
        let rows = sqlx::query_as::<_, BorrowRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, book_id, borrow_date, return_date
            FROM borrows
            WHERE return_date IS NULL
            ORDER BY borrow_date, id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Borrow::from).collect())
    }

    async fn create(con: &mut PgConnection, borrow: &Borrow) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO borrows (id, user_id, book_id, borrow_date, return_date)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(borrow.id().as_ref())
        .bind(borrow.user_id().as_ref())
        .bind(borrow.book_id().as_ref())
        .bind(borrow.borrow_date().as_ref())
        .bind(borrow.return_date().map(|date| Date::from(*date)))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, borrow: &Borrow) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE borrows
            SET return_date = $2
            WHERE id = $1 AND return_date IS NULL
            "#,
        )
        .bind(borrow.id().as_ref())
        .bind(borrow.return_date().map(|date| Date::from(*date)))
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(error_stack::Report::new(KernelError::NotFound).attach_printable(
                format!("borrow {} is not open", borrow.id().as_ref()),
            ));
        }
        Ok(())
    }
}
