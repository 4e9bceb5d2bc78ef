use clap::{Args, ValueEnum};
use workhub_app::{
    auth::{Registration, provision_user},
    database,
    domain::users::{PgUsersRepository, records::Role},
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum RoleArg {
    Admin,
    Employee,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Role::Admin,
            RoleArg::Employee => Role::Employee,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Login email; stored trimmed and lower-cased
    #[arg(long)]
    email: String,

    /// Initial password
    #[arg(long, env = "WORKHUB_USER_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long, value_enum, default_value_t = RoleArg::Employee)]
    role: RoleArg,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let users = PgUsersRepository::new(pool);

    let user = provision_user(
        &users,
        Registration {
            name: args.name,
            email: args.email,
            password: args.password,
        },
        args.role.into(),
    )
    .await
    .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_email: {}", user.email);
    println!("user_role: {}", user.role);

    Ok(())
}
