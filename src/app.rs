use std::io::{BufRead, Write, stdout};
use std::time::Instant;

use axum::{
    Json, Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
};
use miette::IntoDiagnostic;
use serde::{Deserialize, Serialize};

use crate::evaluate;

pub struct Config {
    pub port: u16,
}

impl Config {
    /// Reads `PORT` from the environment, falling back to 8080.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(8080);
        Config { port }
    }
}

/// Read-eval-print loop over stdin. Stops on the literal `exit` command or
/// on end of input. Blank lines are evaluated like anything else and report
/// an invalid expression.
pub fn run_console() -> miette::Result<()> {
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        write!(stdout(), "> ").into_diagnostic()?;
        stdout().flush().into_diagnostic()?;

        line.clear();
        if stdin.lock().read_line(&mut line).into_diagnostic()? == 0 {
            return Ok(());
        }
        let text = line.trim();
        if text == "exit" {
            return Ok(());
        }

        match evaluate(text) {
            Ok(result) => println!("{result}"),
            Err(e) => eprintln!(
                "{:?}",
                miette::Report::new(e).with_source_code(text.to_string())
            ),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CalculateRequest {
    pub expression: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CalculateResponse {
    pub result: f64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `POST /api/v1/calculate`. Every [`CalcError`](crate::CalcError) kind is a
/// user-input error, so they all map to 422; undecodable bodies and wrong
/// methods get axum's default client-error responses.
async fn calculate(Json(request): Json<CalculateRequest>) -> Response {
    match evaluate(&request.expression) {
        Ok(result) => (StatusCode::OK, Json(CalculateResponse { result })).into_response(),
        Err(e) => {
            tracing::warn!(expression = %request.expression, error = %e, "calculation failed");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();
    let response = next.run(request).await;
    tracing::info!(
        %method,
        %uri,
        status = %response.status(),
        elapsed = ?start.elapsed(),
        "http request"
    );
    response
}

pub fn router() -> Router {
    Router::new()
        .route("/api/v1/calculate", post(calculate))
        .layer(middleware::from_fn(log_request))
}

pub async fn serve(config: Config) -> miette::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .into_diagnostic()?;
    tracing::info!(port = config.port, "starting server");
    axum::serve(listener, router()).await.into_diagnostic()?;
    Ok(())
}
