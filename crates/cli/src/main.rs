use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use log::{debug, info};
use rax_core::error::RaxError;

mod compute;
mod creds;
mod providers;
mod spinner;
mod style;

use compute::{NodeOutcome, RaxCompute};
use style::pr_red;

#[derive(Parser, Debug)]
#[command(name = "rax", version, about = "Manage Rackspace public cloud nodes")]
struct Args {
    /// Environment identifier, doubles as the provider region
    env: String,

    /// Use this flag to force the action to occur
    #[arg(short, long)]
    force: bool,

    /// Stop nodes (requires use of -f)
    #[arg(short, long)]
    stop: bool,

    /// Destroy nodes (requires use of -f)
    #[arg(short, long)]
    destroy: bool,

    /// List node statuses
    #[arg(short, long)]
    list: bool,

    /// Nodes to perform actions on
    #[arg(short, long, num_args = 0..)]
    nodes: Vec<String>,

    /// Verbosity (-v, -vv, etc)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Everything the invocation will do, decided before credentials are read
/// or any provider call is attempted.
#[derive(Debug, PartialEq, Eq)]
struct Plan {
    list: bool,
    action: Option<BatchAction>,
}

#[derive(Debug, PartialEq, Eq)]
enum BatchAction {
    Stop(Vec<String>),
    Destroy(Vec<String>),
}

fn plan(args: &Args) -> Result<Plan, RaxError> {
    if args.stop && args.destroy {
        return Err(RaxError::Usage(
            "--stop and --destroy are mutually exclusive".to_string(),
        ));
    }
    if (args.stop || args.destroy) && args.nodes.is_empty() {
        return Err(RaxError::Usage(
            "--stop and --destroy require --nodes".to_string(),
        ));
    }
    if !args.nodes.is_empty() && !args.stop && !args.destroy {
        return Err(RaxError::Usage(
            "--nodes requires either --stop or --destroy".to_string(),
        ));
    }

    let action = if args.stop {
        if !args.force {
            return Err(RaxError::Usage("must use --force to stop nodes".to_string()));
        }
        Some(BatchAction::Stop(args.nodes.clone()))
    } else if args.destroy {
        if !args.force {
            return Err(RaxError::Usage(
                "must use --force to destroy nodes".to_string(),
            ));
        }
        Some(BatchAction::Destroy(args.nodes.clone()))
    } else {
        None
    };

    if !args.list && action.is_none() {
        return Err(RaxError::Usage(
            "nothing to do, pass --list or --stop/--destroy with --nodes".to_string(),
        ));
    }

    Ok(Plan {
        list: args.list,
        action,
    })
}

/// Credentials live in `~/.pyrax.<env>`, one file per environment.
fn credentials_path(env: &str) -> Result<PathBuf, RaxError> {
    let home = dirs::home_dir()
        .ok_or_else(|| RaxError::Validation("unable to determine home directory".to_string()))?;
    Ok(home.join(format!(".pyrax.{}", env)))
}

fn run(args: &Args) -> Result<(), RaxError> {
    info!("entering main function");
    debug!("{:?}", args);

    let plan = plan(args)?;

    debug!("retrieving credentials");
    let path = credentials_path(&args.env)?;
    let creds = creds::load(&path)?;
    debug!("loaded credentials from {}", path.display());

    info!("attempting connection to the Rackspace cloud");
    let sp = spinner::create_spinner(&format!("Connecting to region {}...", args.env));
    let provider = providers::create_provider(&creds, &args.env);
    sp.finish_and_clear();
    let mut compute = RaxCompute::new(provider?);

    dispatch(&plan, &mut compute)
}

fn dispatch(plan: &Plan, compute: &mut RaxCompute) -> Result<(), RaxError> {
    if plan.list {
        compute.list_statuses()?;
    }

    match &plan.action {
        Some(BatchAction::Stop(names)) => {
            info!("stopping nodes: {:?}", names);
            finish_batch(compute.stop_many(names))
        }
        Some(BatchAction::Destroy(names)) => {
            info!("destroying nodes: {:?}", names);
            finish_batch(compute.destroy_many(names))
        }
        None => Ok(()),
    }
}

/// Per-node outcomes were already printed; fold them into the overall
/// process result so any failure shows up in the exit code.
fn finish_batch(outcomes: Vec<NodeOutcome>) -> Result<(), RaxError> {
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        return Err(RaxError::Batch {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

fn exit_code(err: &RaxError) -> i32 {
    match err {
        RaxError::Usage(_) => 2,
        _ => 1,
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("{}", pr_red(&format!("Error: {}", e)));
        process::exit(exit_code(&e));
    }
}
