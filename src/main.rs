use clap::{crate_authors, crate_description, crate_name, crate_version, App, Arg, ArgMatches};
use degcount::{
    error::{Error, Result},
    report::{GraphMetrics, PlaceholderMetrics, Report, ResourceUsage, SystemMetrics},
    task::{DegreeTask, InputMode, Outcome},
};
use std::{
    fs::File,
    io::{BufWriter, Write},
};

fn parse_workers(value: String) -> std::result::Result<(), String> {
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(()),
        _ => Err(String::from("must be an integer >= 1")),
    }
}

fn parse_marker(value: String) -> std::result::Result<(), String> {
    if value.len() == 1 && value.is_ascii() {
        Ok(())
    } else {
        Err(String::from("must be a single ASCII character"))
    }
}

fn create_app<'a, 'b>() -> App<'a, 'b> {
    App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::with_name("EDGELIST")
                .help("Edge list, one `from<TAB>to` pair per line")
                .default_value("web-Google.txt"),
        )
        .arg(
            Arg::with_name("workers")
                .short("j")
                .long("workers")
                .takes_value(true)
                .default_value("4")
                .validator(parse_workers)
                .help("Number of worker threads"),
        )
        .arg(
            Arg::with_name("comment")
                .long("comment")
                .takes_value(true)
                .default_value("#")
                .validator(parse_marker)
                .help("Marker of the leading header lines"),
        )
        .arg(
            Arg::with_name("in-memory")
                .long("in-memory")
                .help("Reads the edge list into memory instead of mapping it"),
        )
        .arg(
            Arg::with_name("degrees")
                .long("degrees")
                .takes_value(true)
                .value_name("FILE")
                .help("Writes `node<TAB>degree` lines to FILE"),
        )
        .arg(
            Arg::with_name("distribution")
                .long("distribution")
                .help("Includes the degree distribution in the report"),
        )
        .arg(
            Arg::with_name("placeholders")
                .long("placeholders")
                .help("Includes the fixed, simulated web-Google statistics"),
        )
        .arg(
            Arg::with_name("compact")
                .long("compact")
                .help("Prints the report on a single line"),
        )
}

fn create_task(matches: &ArgMatches) -> DegreeTask {
    let workers = matches.value_of("workers").unwrap().parse().unwrap();
    let marker = matches.value_of("comment").unwrap().as_bytes()[0];
    DegreeTask::new(matches.value_of("EDGELIST").unwrap())
        .workers(workers)
        .comment_marker(marker)
        .input_mode(if matches.is_present("in-memory") {
            InputMode::Mem
        } else {
            InputMode::Mmap
        })
}

fn write_degrees(outcome: &Outcome, path: &str) -> Result<()> {
    let write_error = |source: std::io::Error| Error::Write {
        path: String::from(path),
        source,
    };
    let file = File::create(path).map_err(write_error)?;
    outcome
        .degrees
        .write_to(&mut BufWriter::new(file))
        .map_err(write_error)
}

fn handle_run(matches: &ArgMatches) -> Result<()> {
    let task = create_task(matches);
    let outcome = task.run()?;
    if let Some(path) = matches.value_of("degrees") {
        write_degrees(&outcome, path)?;
    }
    let report = Report {
        graph_metrics: GraphMetrics::new(
            &outcome.store,
            &outcome.degrees,
            matches.is_present("distribution"),
        ),
        system_metrics: SystemMetrics::new(
            outcome.elapsed,
            ResourceUsage::current().unwrap_or_default(),
            task.worker_count(),
        ),
        placeholder_metrics: if matches.is_present("placeholders") {
            Some(PlaceholderMetrics::default())
        } else {
            None
        },
    };
    let json = report
        .to_json(!matches.is_present("compact"))
        .map_err(|e| Error::Write {
            path: String::from("<stdout>"),
            source: e.into(),
        })?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", json).map_err(|source| Error::Write {
        path: String::from("<stdout>"),
        source,
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = create_app().get_matches();
    if let Err(e) = handle_run(&matches) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
