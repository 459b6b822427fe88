use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BookDetailsQuery, BookQuery, DependOnBookDetailsQuery, DependOnBookQuery,
};
use kernel::interface::update::{
    BookDetailsModifier, BookModifier, DependOnBookDetailsModifier, DependOnBookModifier,
};
use kernel::prelude::entity::{
    Book, BookDetails, BookGenre, BookId, BookIsbn, BookTitle, CreatedAt, Language,
    NumberOfPages, PublishedDate, Publisher, UpdatedAt,
};
use kernel::KernelError;

use crate::transfer::{
    BookDetailsDto, BookDto, BookWithDetailsDto, CreateBookDto, GetBookDto, UpdateBookDto,
};
use crate::validate::required_text;

const BOOK_NOT_FOUND: &str = "Book not found.";
const ISBN_TAKEN: &str = "A book with this ISBN already exists.";
const NEGATIVE_PAGES: &str = "number_of_pages must be zero or greater.";

#[async_trait::async_trait]
pub trait GetBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookDetailsQuery
{
    async fn get_book(
        &self,
        dto: GetBookDto,
    ) -> error_stack::Result<Option<BookWithDetailsDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let Some(book) = self.book_query().find_by_id(&mut connection, &id).await? else {
            return Ok(None);
        };
        let details = self
            .book_details_query()
            .find_by_book_id(&mut connection, &id)
            .await?;

        Ok(Some(BookWithDetailsDto {
            book: BookDto::from(book),
            details: details.map(BookDetailsDto::from),
        }))
    }

    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let books = self.book_query().find_all(&mut connection).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery + DependOnBookDetailsQuery {}

#[async_trait::async_trait]
pub trait CreateBookService: 'static + Sync + Send + DependOnBookQuery + DependOnBookModifier {
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let title = required_text(&dto.title, "title", 200)?;
        let isbn = BookIsbn::new(required_text(&dto.isbn, "isbn", 20)?);
        let genre = required_text(&dto.genre, "genre", 100)?;

        let mut connection = self.database_connection().transact().await?;

        let registered = self.book_query().find_by_isbn(&mut connection, &isbn).await?;
        if registered.is_some() {
            return Err(Report::new(KernelError::Conflict).attach_printable(ISBN_TAKEN));
        }

        let now = OffsetDateTime::now_utc();
        let book = Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new(title),
            isbn,
            PublishedDate::new(dto.published_date),
            BookGenre::new(genre),
            CreatedAt::new(now),
            UpdatedAt::new(now),
        );
        self.book_modifier()
            .create(&mut connection, &book)
            .await
            .map_err(|report| match report.current_context() {
                KernelError::Conflict => report.attach_printable(ISBN_TAKEN),
                _ => report,
            })?;
        connection.commit().await?;

        tracing::info!(book_id = ?book.id(), "book cataloged");
        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static
    + Sync
    + Send
    + DependOnBookQuery
    + DependOnBookModifier
    + DependOnBookDetailsQuery
    + DependOnBookDetailsModifier
{
    /// Rewrites the book and creates its details when none exist yet.
    async fn update_book(
        &self,
        dto: UpdateBookDto,
    ) -> error_stack::Result<BookWithDetailsDto, KernelError> {
        let title = BookTitle::new(required_text(&dto.title, "title", 200)?);
        let isbn = BookIsbn::new(required_text(&dto.isbn, "isbn", 20)?);
        let genre = BookGenre::new(required_text(&dto.genre, "genre", 100)?);
        let publisher = Publisher::new(required_text(&dto.details.publisher, "publisher", 100)?);
        let language = Language::new(required_text(&dto.details.language, "language", 100)?);
        if dto.details.number_of_pages < 0 {
            return Err(Report::new(KernelError::Validation).attach_printable(NEGATIVE_PAGES));
        }
        let number_of_pages = NumberOfPages::new(dto.details.number_of_pages);

        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let Some(mut book) = self.book_query().find_by_id(&mut connection, &id).await? else {
            return Err(Report::new(KernelError::NotFound).attach_printable(BOOK_NOT_FOUND));
        };

        if book.isbn() != &isbn {
            let holder = self.book_query().find_by_isbn(&mut connection, &isbn).await?;
            if holder.is_some_and(|holder| holder.id() != &id) {
                return Err(Report::new(KernelError::Conflict).attach_printable(ISBN_TAKEN));
            }
        }

        book.substitute(|book| {
            *book.title = title;
            *book.isbn = isbn;
            *book.published_date = PublishedDate::new(dto.published_date);
            *book.genre = genre;
            *book.updated_at = UpdatedAt::new(OffsetDateTime::now_utc());
        });
        self.book_modifier()
            .update(&mut connection, &book)
            .await
            .map_err(|report| match report.current_context() {
                KernelError::Conflict => report.attach_printable(ISBN_TAKEN),
                KernelError::NotFound => report.attach_printable(BOOK_NOT_FOUND),
                _ => report,
            })?;

        let details = match self
            .book_details_query()
            .find_by_book_id(&mut connection, &id)
            .await?
        {
            Some(mut details) => {
                details.substitute(|details| {
                    *details.number_of_pages = number_of_pages;
                    *details.publisher = publisher;
                    *details.language = language;
                });
                self.book_details_modifier()
                    .update(&mut connection, &details)
                    .await?;
                details
            }
            None => {
                let details = BookDetails::new(id, number_of_pages, publisher, language);
                self.book_details_modifier()
                    .create(&mut connection, &details)
                    .await?;
                details
            }
        };
        connection.commit().await?;

        tracing::info!(book_id = ?book.id(), "book updated");
        Ok(BookWithDetailsDto {
            book: BookDto::from(book),
            details: Some(BookDetailsDto::from(details)),
        })
    }
}

impl<T> UpdateBookService for T where
    T: DependOnBookQuery
        + DependOnBookModifier
        + DependOnBookDetailsQuery
        + DependOnBookDetailsModifier
{
}

#[cfg(test)]
mod test {
    use time::macros::date;
    use uuid::Uuid;

    use driver::database::InMemoryDatabase;
    use kernel::KernelError;

    use crate::service::{CreateBookService, GetBookService, UpdateBookService};
    use crate::transfer::{BookDetailsDto, CreateBookDto, GetBookDto, UpdateBookDto};

    fn new_book(title: &str, isbn: &str) -> CreateBookDto {
        CreateBookDto {
            title: title.to_string(),
            isbn: isbn.to_string(),
            published_date: date!(2001 - 09 - 11),
            genre: "Fiction".to_string(),
        }
    }

    fn update(id: Uuid, isbn: &str) -> UpdateBookDto {
        UpdateBookDto {
            id,
            title: "Updated Title".to_string(),
            isbn: isbn.to_string(),
            published_date: date!(2024 - 01 - 30),
            genre: "Genre updated".to_string(),
            details: BookDetailsDto {
                number_of_pages: 100,
                publisher: "Publisher updated".to_string(),
                language: "en".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn create_and_list_newest_first() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let first = db.create_book(new_book("First", "111")).await?;
        let second = db.create_book(new_book("Second", "222")).await?;

        let books = db.get_all_books().await?;
        let ids = books.iter().map(|book| book.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![second.id, first.id]);

        let found = db.get_book(GetBookDto { id: first.id }).await?;
        let found = found.expect("book exists");
        assert_eq!(found.book, first);
        assert!(found.details.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_isbn_conflicts() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        db.create_book(new_book("New Book", "987654321")).await?;
        let duplicate = db
            .create_book(new_book("New Book", "987654321"))
            .await
            .expect_err("isbn is taken");
        assert_eq!(duplicate.current_context(), &KernelError::Conflict);
        assert_eq!(db.get_all_books().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_creates_then_rewrites_details() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let book = db.create_book(new_book("Test Book", "123456789")).await?;

        let updated = db.update_book(update(book.id, "1011")).await?;
        assert_eq!(updated.book.title, "Updated Title");
        assert_eq!(updated.book.isbn, "1011");
        assert_eq!(updated.book.created_at, book.created_at);
        assert!(updated.book.updated_at >= book.updated_at);
        assert_eq!(
            updated.details,
            Some(BookDetailsDto {
                number_of_pages: 100,
                publisher: "Publisher updated".to_string(),
                language: "en".to_string(),
            })
        );

        let mut again = update(book.id, "1011");
        again.details.number_of_pages = 250;
        let updated = db.update_book(again).await?;
        assert_eq!(updated.details.map(|d| d.number_of_pages), Some(250));

        let stored = db.get_book(GetBookDto { id: book.id }).await?;
        let stored = stored.expect("book exists");
        assert_eq!(stored.details.map(|d| d.number_of_pages), Some(250));
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_missing_book_and_taken_isbn() -> error_stack::Result<(), KernelError>
    {
        let db = InMemoryDatabase::default();
        let book = db.create_book(new_book("Mine", "111")).await?;
        db.create_book(new_book("Theirs", "222")).await?;

        let missing = db
            .update_book(update(Uuid::new_v4(), "333"))
            .await
            .expect_err("book does not exist");
        assert_eq!(missing.current_context(), &KernelError::NotFound);

        let taken = db
            .update_book(update(book.id, "222"))
            .await
            .expect_err("isbn belongs to another book");
        assert_eq!(taken.current_context(), &KernelError::Conflict);

        let mut negative = update(book.id, "111");
        negative.details.number_of_pages = -1;
        let negative = db.update_book(negative).await.expect_err("negative pages");
        assert_eq!(negative.current_context(), &KernelError::Validation);
        Ok(())
    }
}
