// chattune - chat export to fine-tuning job
// Main entry point

use clap::Parser;

use chattune::cli::{self, Cli, Commands, GlobalArgs, TrainArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Cli::parse();
    init_tracing(&args.global);

    if let Err(err) = run(args).await {
        eprint!("{}", cli::format_error(&err));
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> anyhow::Result<()> {
    let global = args.global;

    match args.command {
        None => cli::handle_train(&global, &TrainArgs::default()).await,
        Some(Commands::Train {
            dataset,
            model,
            suffix,
            n_epochs,
        }) => {
            let train = TrainArgs {
                dataset,
                model,
                suffix,
                n_epochs,
            };
            cli::handle_train(&global, &train).await
        }
        Some(Commands::Prepare { dataset }) => cli::handle_prepare(&global, &dataset),
        Some(Commands::Participants { dataset }) => {
            cli::handle_participants(&global, dataset.as_deref())
        }
        Some(Commands::Chat {
            model,
            responder,
            writer,
            message,
        }) => cli::handle_chat(&global, &model, &responder, &writer, &message.join(" ")).await,
    }
}

fn init_tracing(global: &GlobalArgs) {
    use tracing_subscriber::EnvFilter;

    let default_level = if global.verbose { "chattune=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
