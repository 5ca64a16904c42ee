use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use spy_cat_agency::{
    breeds::BreedCatalog,
    cli::{target_update, CatCommands, Cli, Commands, MissionCommands},
    config::Config,
    error::AgencyError,
    models::{Mission, NewMission, NewSpyCat, SpyCat},
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// A spy cat together with the mission it holds
#[derive(Serialize)]
struct CatView {
    #[serde(flatten)]
    cat: SpyCat,
    mission: Option<Mission>,
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<AgencyError>()
                .map(|err| err.kind().exit_code())
                .unwrap_or(1);
            eprintln!("Error: {:#}", e);
            ExitCode::from(code)
        }
    }
}

/// Logs go to stderr; stdout carries JSON results only
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("spy_cat_agency=debug")
        } else {
            EnvFilter::new("spy_cat_agency=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_cli(&cli)?;

    match cli.command {
        Commands::Cats { command } => {
            let mut agency = config.open_agency()?;
            match command {
                CatCommands::Create {
                    name,
                    years,
                    breed,
                    salary,
                } => print_json(&agency.create_spy_cat(NewSpyCat {
                    name,
                    years_of_experience: years,
                    breed,
                    salary,
                })?),
                CatCommands::List(page) => print_json(&agency.list_spy_cats(page.into())?),
                CatCommands::Get { id } => {
                    let cat = agency.get_spy_cat(id)?;
                    let mission = agency.mission_for_cat(id)?;
                    print_json(&CatView { cat, mission })
                }
                CatCommands::Salary { id, salary } => {
                    print_json(&agency.update_spy_cat_salary(id, salary)?)
                }
                CatCommands::Delete { id } => {
                    agency.delete_spy_cat(id)?;
                    print_json(&json!({ "detail": "Spy cat deleted" }))
                }
            }
        }

        Commands::Missions { command } => {
            let mut agency = config.open_agency()?;
            match command {
                MissionCommands::Create { targets, file } => {
                    let mission = match file {
                        Some(path) => {
                            let body = std::fs::read_to_string(&path)
                                .with_context(|| format!("Failed to read {:?}", path))?;
                            serde_json::from_str::<NewMission>(&body)
                                .with_context(|| format!("Failed to parse {:?}", path))?
                        }
                        None => NewMission::with_targets(targets),
                    };
                    print_json(&agency.create_mission(mission)?)
                }
                MissionCommands::List(page) => print_json(&agency.list_missions(page.into())?),
                MissionCommands::Get { id } => print_json(&agency.get_mission(id)?),
                MissionCommands::Delete { id } => {
                    agency.delete_mission(id)?;
                    print_json(&json!({ "detail": "Mission deleted" }))
                }
                MissionCommands::Assign { mission_id, cat_id } => {
                    print_json(&agency.assign_cat_to_mission(mission_id, cat_id)?)
                }
                MissionCommands::UpdateTarget {
                    mission_id,
                    target_id,
                    name,
                    country,
                    notes,
                    clear_notes,
                    complete,
                } => {
                    let update = target_update(name, country, notes, clear_notes, complete);
                    print_json(&agency.update_target(mission_id, target_id, update)?)
                }
            }
        }

        Commands::Breeds => {
            let catalog = config.breed_catalog()?;
            for name in catalog.breeds()? {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}
