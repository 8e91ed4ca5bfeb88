use std::sync::Arc;

use clap::Args;
use serde_json::json;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config;
use crate::database::models::UserType;
use crate::database::{DatabaseManager, PgUserRepository};
use crate::services::{CreateUserOptions, UserService};

/// Registration only creates regular users, so super admins are bootstrapped here.
#[derive(Args, Debug)]
pub struct CreateSuperAdminArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub phone_number: Option<String>,
}

pub async fn handle(args: CreateSuperAdminArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = config::config();
    let pool = DatabaseManager::connect(&config.database).await?;

    let service = UserService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        config.pagination,
        config.security.bcrypt_cost,
    );

    let user = service
        .create_user(CreateUserOptions {
            email: args.email,
            first_name: args.first_name,
            last_name: args.last_name,
            password: args.password,
            phone_number: args.phone_number,
            user_type: UserType::SuperAdmin,
        })
        .await?;
    pool.close().await;

    output_success(
        output_format,
        "Super admin created",
        Some(json!({
            "id": user.id,
            "email": user.email,
            "user_type": user.user_type,
        })),
    )
}
