use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{MembershipDate, User, UserEmail, UserId, UserName};
use kernel::KernelError;

use crate::transfer::{GetUserDto, RegisterUserDto, UserDto};
use crate::validate::required_text;

const INVALID_EMAIL: &str = "Enter a valid email address.";
const EMAIL_TAKEN: &str = "A user with this email already exists.";

#[async_trait::async_trait]
pub trait GetUserService: 'static + Sync + Send + DependOnUserQuery {
    async fn get_user(&self, dto: GetUserDto) -> error_stack::Result<Option<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = UserId::new(dto.id);
        let user = self.user_query().find_by_id(&mut connection, &id).await?;
        Ok(user.map(UserDto::from))
    }

    async fn get_all_users(&self) -> error_stack::Result<Vec<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let users = self.user_query().find_all(&mut connection).await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}

impl<T> GetUserService for T where T: DependOnUserQuery {}

#[async_trait::async_trait]
pub trait RegisterUserService:
    'static + Sync + Send + DependOnUserQuery + DependOnUserModifier
{
    async fn register_user(&self, dto: RegisterUserDto) -> error_stack::Result<UserDto, KernelError> {
        let name = required_text(&dto.name, "name", 150)?;
        let email = UserEmail::normalized(required_text(&dto.email, "email", 200)?);
        if !email.is_well_formed() {
            return Err(Report::new(KernelError::Validation).attach_printable(INVALID_EMAIL));
        }

        let mut connection = self.database_connection().transact().await?;

        let registered = self.user_query().find_by_email(&mut connection, &email).await?;
        if registered.is_some() {
            return Err(Report::new(KernelError::Conflict).attach_printable(EMAIL_TAKEN));
        }

        let user = User::new(
            UserId::new(Uuid::new_v4()),
            UserName::new(name),
            email,
            MembershipDate::new(dto.membership_date),
        );
        self.user_modifier()
            .create(&mut connection, &user)
            .await
            .map_err(|report| match report.current_context() {
                KernelError::Conflict => report.attach_printable(EMAIL_TAKEN),
                _ => report,
            })?;
        connection.commit().await?;

        tracing::info!(user_id = ?user.id(), "user registered");
        Ok(UserDto::from(user))
    }
}

impl<T> RegisterUserService for T where T: DependOnUserQuery + DependOnUserModifier {}
