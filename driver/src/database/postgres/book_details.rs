use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::BookDetailsQuery;
use kernel::interface::update::BookDetailsModifier;
use kernel::prelude::entity::{BookDetails, BookId, Language, NumberOfPages, Publisher};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBookDetailsRepository;

#[async_trait::async_trait]
impl BookDetailsQuery for PostgresBookDetailsRepository {
    type Transaction = PostgresConnection;

    async fn find_by_book_id(
        &self,
        con: &mut PostgresConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Option<BookDetails>, KernelError> {
        PgBookDetailsInternal::find_by_book_id(con, book_id).await
    }
}

#[async_trait::async_trait]
impl BookDetailsModifier for PostgresBookDetailsRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        details: &BookDetails,
    ) -> error_stack::Result<(), KernelError> {
        PgBookDetailsInternal::create(con, details).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        details: &BookDetails,
    ) -> error_stack::Result<(), KernelError> {
        PgBookDetailsInternal::update(con, details).await
    }
}

#[derive(sqlx::FromRow)]
struct BookDetailsRow {
    book_id: Uuid,
    number_of_pages: i32,
    publisher: String,
    language: String,
}

impl From<BookDetailsRow> for BookDetails {
    fn from(value: BookDetailsRow) -> Self {
        BookDetails::new(
            BookId::new(value.book_id),
            NumberOfPages::new(value.number_of_pages),
            Publisher::new(value.publisher),
            Language::new(value.language),
        )
    }
}

pub(in crate::database) struct PgBookDetailsInternal;

impl PgBookDetailsInternal {
    async fn find_by_book_id(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Option<BookDetails>, KernelError> {
        let row = sqlx::query_as::<_, BookDetailsRow>(
            // language=postgresql
            r#"
            SELECT book_id, number_of_pages, publisher, language
            FROM book_details
            WHERE book_id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(BookDetails::from))
    }

    async fn create(
        con: &mut PgConnection,
        details: &BookDetails,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO book_details (book_id, number_of_pages, publisher, language)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(details.book_id().as_ref())
        .bind(details.number_of_pages().as_ref())
        .bind(details.publisher().as_ref())
        .bind(details.language().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(
        con: &mut PgConnection,
        details: &BookDetails,
    ) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE book_details
            SET number_of_pages = $2, publisher = $3, language = $4
            WHERE book_id = $1
            "#,
        )
        .bind(details.book_id().as_ref())
        .bind(details.number_of_pages().as_ref())
        .bind(details.publisher().as_ref())
        .bind(details.language().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(error_stack::Report::new(KernelError::NotFound).attach_printable(
                format!("book {} has no details", details.book_id().as_ref()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::{date, datetime};
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::BookDetailsQuery;
    use kernel::interface::update::{BookDetailsModifier, BookModifier};
    use kernel::prelude::entity::{
        Book, BookDetails, BookGenre, BookId, BookIsbn, BookTitle, CreatedAt, Language,
        NumberOfPages, PublishedDate, Publisher, UpdatedAt,
    };
    use kernel::KernelError;

    use crate::database::postgres::{
        PostgresBookDetailsRepository, PostgresBookRepository, PostgresDatabase,
    };

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let book_id = BookId::new(Uuid::new_v4());
        let book = Book::new(
            book_id.clone(),
            BookTitle::new("details"),
            BookIsbn::new(Uuid::new_v4().simple().to_string()[..20].to_string()),
            PublishedDate::new(date!(2020 - 05 - 01)),
            BookGenre::new("Essay"),
            CreatedAt::new(datetime!(2024-01-01 10:00 UTC)),
            UpdatedAt::new(datetime!(2024-01-01 10:00 UTC)),
        );
        PostgresBookRepository.create(&mut con, &book).await?;

        let found = PostgresBookDetailsRepository
            .find_by_book_id(&mut con, &book_id)
            .await?;
        assert!(found.is_none());

        let mut details = BookDetails::new(
            book_id.clone(),
            NumberOfPages::new(120),
            Publisher::new("Publisher"),
            Language::new("en"),
        );
        PostgresBookDetailsRepository
            .create(&mut con, &details)
            .await?;

        details.substitute(|d| *d.number_of_pages = NumberOfPages::new(300));
        PostgresBookDetailsRepository
            .update(&mut con, &details)
            .await?;

        let found = PostgresBookDetailsRepository
            .find_by_book_id(&mut con, &book_id)
            .await?;
        assert_eq!(found, Some(details));

        con.roll_back().await?;
        Ok(())
    }
}
