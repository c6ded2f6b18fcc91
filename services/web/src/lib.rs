mod admin;
mod cli;
mod infra;
mod public;
mod routes;
mod server;
mod talents;
mod views;

use missionable::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
