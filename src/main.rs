use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("init")
                .about("Scaffolds the MVC skeleton into a project root")
                .arg(
                    Arg::new("root")
                        .help("The project root directory")
                        .default_value("."),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("Previews the tree a run would create, without writing anything")
                .arg(
                    Arg::new("root")
                        .help("The project root directory")
                        .default_value("."),
                ),
        )
        .get_matches();

    let is_verbose = matches.get_flag("verbose");

    let level = if is_verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match matches.subcommand() {
        Some(("init", args)) => handle_init(args)?,
        Some(("plan", args)) => handle_plan(args)?,
        // flagless invocation from the project root scaffolds in place
        _ => {
            andaime::api::scaffold_project(".")?;
        }
    }

    Ok(())
}

fn handle_init(args: &ArgMatches) -> miette::Result<()> {
    let root = args.get_one::<String>("root").expect("has default");

    andaime::api::scaffold_project(root)?;

    Ok(())
}

fn handle_plan(args: &ArgMatches) -> miette::Result<()> {
    let root = args.get_one::<String>("root").expect("has default");

    andaime::api::preview_plan(root)?;

    Ok(())
}
