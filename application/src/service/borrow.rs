use error_stack::Report;
use time::Date;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BookQuery, BorrowQuery, DependOnBookQuery, DependOnBorrowQuery, DependOnUserQuery, UserQuery,
};
use kernel::interface::update::{BorrowModifier, DependOnBorrowModifier};
use kernel::prelude::entity::{BookId, Borrow, BorrowDate, BorrowId, ReturnDate, UserId};
use kernel::KernelError;

use crate::transfer::{BorrowBookDto, BorrowDto, ReturnBookDto};

const USER_NOT_FOUND: &str = "User not found.";
const BOOK_NOT_FOUND: &str = "Book not found.";
const USER_OR_BOOK_NOT_FOUND: &str = "User or book not found.";
const ALREADY_BORROWED: &str = "Book is already borrowed.";
// Shared by every ReturnBook failure: unknown book, never borrowed, already returned.
const NOT_BORROWED: &str = "Book not found or not currently borrowed.";

#[async_trait::async_trait]
pub trait BorrowBookService:
    'static
    + Sync
    + Send
    + DependOnUserQuery
    + DependOnBookQuery
    + DependOnBorrowQuery
    + DependOnBorrowModifier
{
    async fn borrow_book(&self, dto: BorrowBookDto) -> error_stack::Result<BorrowDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        let book_id = BookId::new(dto.book_id);

        let user = self.user_query().find_by_id(&mut connection, &user_id).await?;
        if user.is_none() {
            tracing::warn!(user_id = %dto.user_id, "borrow rejected: unknown user");
            return Err(Report::new(KernelError::NotFound).attach_printable(USER_NOT_FOUND));
        }
        let book = self.book_query().find_by_id(&mut connection, &book_id).await?;
        if book.is_none() {
            tracing::warn!(book_id = %dto.book_id, "borrow rejected: unknown book");
            return Err(Report::new(KernelError::NotFound).attach_printable(BOOK_NOT_FOUND));
        }

        let open = self
            .borrow_query()
            .find_open_by_book_id(&mut connection, &book_id)
            .await?;
        if let Some(open) = open {
            tracing::warn!(
                book_id = %dto.book_id,
                borrow_id = ?open.id(),
                "borrow rejected: book is already out"
            );
            return Err(Report::new(KernelError::Conflict).attach_printable(ALREADY_BORROWED));
        }

        let borrow = Borrow::open(
            BorrowId::new(Uuid::new_v4()),
            user_id,
            book_id,
            BorrowDate::new(dto.borrow_date),
        );
        self.borrow_modifier()
            .create(&mut connection, &borrow)
            .await
            .map_err(|report| match report.current_context() {
                KernelError::Conflict => report.attach_printable(ALREADY_BORROWED),
                KernelError::NotFound => report.attach_printable(USER_OR_BOOK_NOT_FOUND),
                _ => report,
            })?;
        connection.commit().await?;

        tracing::info!(
            borrow_id = ?borrow.id(),
            user_id = %dto.user_id,
            book_id = %dto.book_id,
            "book borrowed"
        );
        Ok(BorrowDto::from(borrow))
    }
}

impl<T> BorrowBookService for T where
    T: DependOnUserQuery + DependOnBookQuery + DependOnBorrowQuery + DependOnBorrowModifier
{
}

#[async_trait::async_trait]
pub trait ReturnBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBorrowQuery + DependOnBorrowModifier
{
    async fn return_book(&self, dto: ReturnBookDto) -> error_stack::Result<BorrowDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book_id = BookId::new(dto.book_id);
        let not_borrowed = || Report::new(KernelError::NotFound).attach_printable(NOT_BORROWED);

        let book = self.book_query().find_by_id(&mut connection, &book_id).await?;
        if book.is_none() {
            tracing::warn!(book_id = %dto.book_id, "return rejected: unknown book");
            return Err(not_borrowed());
        }
        let Some(mut borrow) = self
            .borrow_query()
            .find_open_by_book_id(&mut connection, &book_id)
            .await?
        else {
            tracing::warn!(book_id = %dto.book_id, "return rejected: book is not out");
            return Err(not_borrowed());
        };

        let borrow_date = Date::from(*borrow.borrow_date());
        if dto.return_date < borrow_date {
            tracing::warn!(
                book_id = %dto.book_id,
                %borrow_date,
                return_date = %dto.return_date,
                "return date precedes borrow date"
            );
        }
        if !borrow.close(ReturnDate::new(dto.return_date)) {
            return Err(not_borrowed());
        }

        self.borrow_modifier()
            .update(&mut connection, &borrow)
            .await
            .map_err(|report| match report.current_context() {
                KernelError::NotFound => report.attach_printable(NOT_BORROWED),
                _ => report,
            })?;
        connection.commit().await?;

        tracing::info!(
            borrow_id = ?borrow.id(),
            book_id = %dto.book_id,
            "book returned"
        );
        Ok(BorrowDto::from(borrow))
    }
}

impl<T> ReturnBookService for T where
    T: DependOnBookQuery + DependOnBorrowQuery + DependOnBorrowModifier
{
}

#[async_trait::async_trait]
pub trait GetBorrowService: 'static + Sync + Send + DependOnBorrowQuery {
    async fn get_currently_borrowed(&self) -> error_stack::Result<Vec<BorrowDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let borrows = self.borrow_query().find_all_open(&mut connection).await?;
        tracing::debug!(count = borrows.len(), "listed currently borrowed books");
        Ok(borrows.into_iter().map(BorrowDto::from).collect())
    }
}

impl<T> GetBorrowService for T where T: DependOnBorrowQuery {}

#[cfg(test)]
mod test {
    use error_stack::ResultExt;
    use time::macros::date;
    use time::Date;
    use uuid::Uuid;

    use driver::database::InMemoryDatabase;
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::{BorrowQuery, DependOnBorrowQuery};
    use kernel::prelude::entity::{BorrowId, ReturnDate};
    use kernel::KernelError;

    use crate::service::{
        BorrowBookService, CreateBookService, GetBorrowService, RegisterUserService,
        ReturnBookService,
    };
    use crate::transfer::{BorrowBookDto, CreateBookDto, RegisterUserDto, ReturnBookDto};

    async fn register(db: &InMemoryDatabase, email: &str) -> error_stack::Result<Uuid, KernelError> {
        let user = db
            .register_user(RegisterUserDto {
                name: "reader".to_string(),
                email: email.to_string(),
                membership_date: date!(2023 - 06 - 01),
            })
            .await?;
        Ok(user.id)
    }

    async fn catalog(db: &InMemoryDatabase, isbn: &str) -> error_stack::Result<Uuid, KernelError> {
        let book = db
            .create_book(CreateBookDto {
                title: "The Left Hand of Darkness".to_string(),
                isbn: isbn.to_string(),
                published_date: date!(1969 - 03 - 01),
                genre: "Science Fiction".to_string(),
            })
            .await?;
        Ok(book.id)
    }

    fn borrow(user_id: Uuid, book_id: Uuid, borrow_date: Date) -> BorrowBookDto {
        BorrowBookDto {
            user_id,
            book_id,
            borrow_date,
        }
    }

    fn give_back(book_id: Uuid, return_date: Date) -> ReturnBookDto {
        ReturnBookDto {
            book_id,
            return_date,
        }
    }

    #[tokio::test]
    async fn borrow_available_book() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let user_id = register(&db, "u1@example.com").await?;
        let book_id = catalog(&db, "isbn-1").await?;

        let created = db
            .borrow_book(borrow(user_id, book_id, date!(2024 - 01 - 01)))
            .await?;
        assert_eq!(created.user_id, user_id);
        assert_eq!(created.book_id, book_id);
        assert_eq!(created.borrow_date, date!(2024 - 01 - 01));
        assert_eq!(created.return_date, None);

        let current = db.get_currently_borrowed().await?;
        assert_eq!(current, vec![created]);
        Ok(())
    }

    #[tokio::test]
    async fn borrow_borrowed_book_conflicts() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let first = register(&db, "u1@example.com").await?;
        let second = register(&db, "u2@example.com").await?;
        let book_id = catalog(&db, "isbn-1").await?;

        db.borrow_book(borrow(first, book_id, date!(2024 - 01 - 01)))
            .await?;
        let rejected = db
            .borrow_book(borrow(second, book_id, date!(2024 - 01 - 02)))
            .await
            .expect_err("second borrow must fail");
        assert_eq!(rejected.current_context(), &KernelError::Conflict);

        let current = db.get_currently_borrowed().await?;
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].user_id, first);
        Ok(())
    }

    #[tokio::test]
    async fn borrow_with_unknown_references_creates_nothing(
    ) -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let user_id = register(&db, "u1@example.com").await?;
        let book_id = catalog(&db, "isbn-1").await?;

        let unknown_user = db
            .borrow_book(borrow(Uuid::new_v4(), book_id, date!(2024 - 01 - 01)))
            .await
            .expect_err("unknown user");
        assert_eq!(unknown_user.current_context(), &KernelError::NotFound);

        let unknown_book = db
            .borrow_book(borrow(user_id, Uuid::new_v4(), date!(2024 - 01 - 01)))
            .await
            .expect_err("unknown book");
        assert_eq!(unknown_book.current_context(), &KernelError::NotFound);

        assert!(db.get_currently_borrowed().await?.is_empty());

        // an unknown user is reported even while the book is out
        db.borrow_book(borrow(user_id, book_id, date!(2024 - 01 - 01)))
            .await?;
        let unknown_user = db
            .borrow_book(borrow(Uuid::new_v4(), book_id, date!(2024 - 01 - 02)))
            .await
            .expect_err("unknown user on borrowed book");
        assert_eq!(unknown_user.current_context(), &KernelError::NotFound);
        assert_eq!(db.get_currently_borrowed().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn return_without_open_record_is_not_found() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let book_id = catalog(&db, "isbn-1").await?;

        let never_borrowed = db
            .return_book(give_back(book_id, date!(2024 - 01 - 10)))
            .await
            .expect_err("never borrowed");
        assert_eq!(never_borrowed.current_context(), &KernelError::NotFound);

        let unknown_book = db
            .return_book(give_back(Uuid::new_v4(), date!(2024 - 01 - 10)))
            .await
            .expect_err("unknown book");
        assert_eq!(unknown_book.current_context(), &KernelError::NotFound);

        assert_eq!(
            never_borrowed.downcast_ref::<&'static str>(),
            unknown_book.downcast_ref::<&'static str>()
        );
        Ok(())
    }

    #[tokio::test]
    async fn return_closes_open_record() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let user_id = register(&db, "u1@example.com").await?;
        let book_id = catalog(&db, "isbn-1").await?;
        let other_book = catalog(&db, "isbn-2").await?;

        let opened = db
            .borrow_book(borrow(user_id, book_id, date!(2024 - 01 - 01)))
            .await?;
        db.borrow_book(borrow(user_id, other_book, date!(2024 - 01 - 02)))
            .await?;

        let returned = db
            .return_book(give_back(book_id, date!(2024 - 01 - 10)))
            .await?;
        assert_eq!(returned.id, opened.id);
        assert_eq!(returned.return_date, Some(date!(2024 - 01 - 10)));

        let current = db.get_currently_borrowed().await?;
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].book_id, other_book);
        Ok(())
    }

    #[tokio::test]
    async fn second_return_fails() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let user_id = register(&db, "u1@example.com").await?;
        let book_id = catalog(&db, "isbn-1").await?;

        let opened = db
            .borrow_book(borrow(user_id, book_id, date!(2024 - 01 - 01)))
            .await?;
        db.return_book(give_back(book_id, date!(2024 - 01 - 10)))
            .await?;
        let again = db
            .return_book(give_back(book_id, date!(2024 - 01 - 11)))
            .await
            .expect_err("already returned");
        assert_eq!(again.current_context(), &KernelError::NotFound);

        // the closed record keeps its first return date
        let mut con = db.transact().await?;
        let stored = db
            .borrow_query()
            .find_by_id(&mut con, &BorrowId::new(opened.id))
            .await?
            .expect("record survives");
        assert_eq!(
            stored.return_date(),
            Some(&ReturnDate::new(date!(2024 - 01 - 10)))
        );
        Ok(())
    }

    #[tokio::test]
    async fn book_cycles_between_available_and_borrowed() -> error_stack::Result<(), KernelError>
    {
        let db = InMemoryDatabase::default();
        let first = register(&db, "u1@example.com").await?;
        let second = register(&db, "u2@example.com").await?;
        let book_id = catalog(&db, "isbn-1").await?;

        db.borrow_book(borrow(first, book_id, date!(2024 - 01 - 01)))
            .await?;
        db.return_book(give_back(book_id, date!(2024 - 01 - 10)))
            .await?;
        let reborrowed = db
            .borrow_book(borrow(second, book_id, date!(2024 - 01 - 12)))
            .await?;

        let current = db.get_currently_borrowed().await?;
        assert_eq!(current, vec![reborrowed]);
        Ok(())
    }

    #[tokio::test]
    async fn return_before_borrow_date_is_accepted() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let user_id = register(&db, "u1@example.com").await?;
        let book_id = catalog(&db, "isbn-1").await?;

        db.borrow_book(borrow(user_id, book_id, date!(2024 - 01 - 10)))
            .await?;
        let returned = db
            .return_book(give_back(book_id, date!(2024 - 01 - 01)))
            .await?;
        assert_eq!(returned.return_date, Some(date!(2024 - 01 - 01)));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_borrows_of_one_book_admit_one() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let book_id = catalog(&db, "isbn-1").await?;
        let mut users = Vec::new();
        for index in 0..8 {
            users.push(register(&db, &format!("u{index}@example.com")).await?);
        }

        let handles = users
            .into_iter()
            .map(|user_id| {
                let db = db.clone();
                tokio::spawn(async move {
                    db.borrow_book(borrow(user_id, book_id, date!(2024 - 01 - 01)))
                        .await
                })
            })
            .collect::<Vec<_>>();

        let mut succeeded = 0;
        for handle in handles {
            match handle.await.change_context_lazy(|| KernelError::Internal)? {
                Ok(_) => succeeded += 1,
                Err(report) => assert_eq!(report.current_context(), &KernelError::Conflict),
            }
        }
        assert_eq!(succeeded, 1);
        assert_eq!(db.get_currently_borrowed().await?.len(), 1);
        Ok(())
    }
}
