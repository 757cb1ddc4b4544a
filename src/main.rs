use clap::Parser;
use clap::Subcommand;
use miette::IntoDiagnostic;

#[derive(Parser, Debug)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Evaluate one expression and print the result
    Eval { expression: String },
    /// Print the token stream for an expression
    Tokenize { expression: String },
    /// Interactive read-eval-print loop; `exit` quits
    Repl,
    /// Run the HTTP calculation endpoint
    Serve,
}

fn main() -> miette::Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Eval { expression } => {
            let result = calc::evaluate(&expression)
                .map_err(|e| miette::Report::new(e).with_source_code(expression.clone()))?;
            println!("{result}");
        }
        Commands::Tokenize { expression } => {
            for token in calc::Lexer::new(&expression) {
                let token = token
                    .map_err(|e| miette::Report::new(e).with_source_code(expression.clone()))?;
                println!("{token}");
            }
        }
        Commands::Repl => calc::app::run_console()?,
        Commands::Serve => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "info".into()),
                )
                .init();
            let config = calc::app::Config::from_env();
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .into_diagnostic()?
                .block_on(calc::app::serve(config))?;
        }
    }
    Ok(())
}
