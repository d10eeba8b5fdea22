mod parsers;
mod result;

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use np_reconfig_core::agents::FailureSearchAgent;
use np_reconfig_core::agents::RatingGraphAgent;
use np_reconfig_core::reconfiguration::cut_rating_graph;
use np_reconfig_core::reconfiguration::write_dot;
use np_reconfig_core::reconfiguration::StrategySelection;
use np_reconfig_core::statistics::configure_statistic_logging;
use np_reconfig_core::statistics::log_statistic_postfix;
use np_reconfig_core::statistics::should_log_statistics;
use np_reconfig_core::statistics::Statistic;
use np_reconfig_core::statistics::StatisticLogger;
use np_reconfig_core::verify_solution;
use np_reconfig_core::Manager;
use np_reconfig_core::ReconfigurationOptions;
use np_reconfig_core::ReconfigurationOutcome;
use np_reconfig_core::SchedulingProblem;
use parsers::parse_job_set;
use parsers::parse_precedence_constraints;
use result::NpReconfigResult;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The job set to reconfigure, given as a CSV file with the columns
    /// `Task ID, Job ID, Arrival min, Arrival max, Cost min, Cost max, Deadline, Priority`.
    #[clap(verbatim_doc_comment)]
    jobs_path: PathBuf,

    /// The precedence constraints of the job set, given as a CSV file with the columns
    /// `From TID, From JID, To TID, To JID` and optionally `Sus. min, Sus. max`.
    #[arg(long = "precedence", verbatim_doc_comment)]
    precedence_path: Option<PathBuf>,

    /// Which strategies are used to search for a fix.
    #[arg(long, value_enum, default_value_t)]
    strategy: StrategySelection,

    /// The time limit of every individual exploration pass, in milliseconds.
    ///
    /// Strategies whose passes run out of time report no solutions.
    #[arg(long = "time-limit")]
    time_limit_ms: Option<u64>,

    /// The maximum number of levels of every individual exploration pass.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Writes the rated schedule-abstraction graph of the job set to this path in the DOT format.
    #[arg(long = "dot")]
    dot_path: Option<PathBuf>,

    /// Prints the minimal dispatch sequences which lead to a deadline miss.
    #[arg(long)]
    print_failures: bool,

    /// Skips checking that the found solutions make the job set schedulable.
    #[arg(long)]
    no_verify: bool,

    /// Enables log message output from the engine.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Enables logging of statistics from the engine.
    #[arg(short = 's', long = "log-statistics")]
    log_statistics: bool,
}

fn configure_logging(verbose: bool, log_statistics: bool) {
    if log_statistics {
        configure_statistic_logging("%%", None, None, None);
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> NpReconfigResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics);

    if np_reconfig_core::asserts::NP_ASSERT_LEVEL_DEFINITION
        >= np_reconfig_core::asserts::NP_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.",
            np_reconfig_core::asserts::NP_ASSERT_LEVEL_DEFINITION
        );
    };

    let jobs = parse_job_set(File::open(&args.jobs_path)?)?;
    let precedence_constraints = match &args.precedence_path {
        Some(path) => parse_precedence_constraints(File::open(path)?)?,
        None => Vec::new(),
    };
    let problem = SchedulingProblem::new(jobs, precedence_constraints);
    problem.validate()?;
    info!(
        "Read {} jobs and {} precedence constraints",
        problem.num_jobs(),
        problem.precedence_constraints().len()
    );

    let options = ReconfigurationOptions {
        strategy: args.strategy,
        time_limit: args.time_limit_ms.map(Duration::from_millis),
        max_depth: args.max_depth,
    };

    if let Some(dot_path) = &args.dot_path {
        let rating_graph = RatingGraphAgent::generate(&problem, &options)?;
        let cuts = cut_rating_graph(&rating_graph);

        let mut writer = BufWriter::new(File::create(dot_path)?);
        write_dot(&mut writer, &rating_graph, &problem, &cuts)?;
        writer.flush()?;
    }

    if args.print_failures {
        for failure in FailureSearchAgent::find_all_failures(&problem, &options)? {
            println!("Failure: {failure}");
        }
    }

    let mut manager = Manager::new();
    match manager.run(&problem, &options)? {
        ReconfigurationOutcome::AlreadySchedulable => println!("The job set is schedulable"),
        ReconfigurationOutcome::NoFixFound => println!("No solution was found"),
        ReconfigurationOutcome::Fixed(solutions) => {
            println!("Found {} solutions:", solutions.len());
            for solution in &solutions {
                println!("  {solution}");
            }

            if !args.no_verify {
                if verify_solution(&problem, &solutions, &options)? {
                    println!("The solutions were verified");
                } else {
                    warn!("The job set is not schedulable after applying the solutions");
                    println!("The solutions could not be verified");
                }
            }
        }
    }

    if should_log_statistics() {
        manager
            .statistics()
            .log(StatisticLogger::new("reconfiguration"));
        log_statistic_postfix();
    }

    Ok(())
}
