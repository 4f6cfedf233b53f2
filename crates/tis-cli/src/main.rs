//! `tis100`: grade TIS-100 solutions against the builtin puzzle catalog.
//!
//! Exit codes: 0 on success, 1 if any solution failed validation, 2 on
//! errors.

mod args;
mod logger;

use std::io::IsTerminal as _;
use std::time::{SystemTime, UNIX_EPOCH};

use args::{Args, USAGE, parse_seed_expr};
use tis_grader::{Simulator, stop_requested};

const RED_BOLD: &str = "\x1b[31;1m";
const BLUE_BOLD: &str = "\x1b[94;1m";
const RESET: &str = "\x1b[m";

fn random_seed() -> u32 {
    // No RNG dependency: the clock is plenty for a default seed.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.subsec_nanos() ^ (d.as_secs() as u32))
}

fn configure(sim: &mut Simulator, args: &Args) -> anyhow::Result<()> {
    if !args.seed_exprs.is_empty() {
        for expr in &args.seed_exprs {
            for (begin, end) in parse_seed_expr(expr).map_err(anyhow::Error::msg)? {
                sim.add_seed_range(begin, end.saturating_add(1));
            }
        }
    } else if let Some(count) = args.random {
        let seed = args.seed.unwrap_or_else(|| {
            let s = random_seed();
            log::info!("random seed: {s}");
            s
        });
        sim.add_seed_range(seed, seed.saturating_add(count));
    } else if args.seed.is_some() {
        log::info!("no random tests, --seed value unused");
    }
    log::debug!("total random tests: {}", sim.total_random_tests());

    if let Some(id) = &args.level {
        sim.set_level_by_name(id)?;
    }
    sim.cycles_limit = args.limit;
    sim.total_cycles_limit = args.total_limit;
    sim.set_num_threads(args.threads);
    sim.cheat_rate = args.cheat_rate;
    sim.limit_multiplier = args.limit_multiplier;
    sim.t21_size = args.t21_size;
    sim.t30_size = args.t30_size;
    sim.run_fixed = !args.no_fixed;
    sim.compute_stats = args.stats;
    sim.permissive = args.permissive;
    Ok(())
}

fn run() -> i32 {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("tis100: {message}");
            eprintln!("{USAGE}");
            return 2;
        }
    };
    if args.help {
        println!("{USAGE}");
        return 0;
    }

    let color = args.color || std::io::stdout().is_terminal();
    let log_color = args.log_color || std::io::stderr().is_terminal();
    let Some(filter) = logger::level_from_name(&args.loglevel) else {
        eprintln!("tis100: unknown log level {:?}", args.loglevel);
        return 2;
    };
    logger::install(filter, log_color);

    let mut sim = Simulator::new();
    if let Err(e) = configure(&mut sim, &args) {
        log::error!("{e}");
        return 2;
    }

    let paint = |code: &'static str| if color { code } else { "" };
    let mut exit_code = 0;
    for (i, solution) in args.solutions.iter().enumerate() {
        if args.solutions.len() > 1 {
            if i > 0 {
                println!();
            }
            println!("{solution}:");
        }

        match sim.simulate_file(solution).map(|_| ()) {
            Ok(()) => {
                if sim.score.validated {
                    if args.quiet == 0 {
                        println!("{}validation successful{}", paint(BLUE_BOLD), paint(RESET));
                    }
                } else {
                    exit_code = exit_code.max(1);
                    if args.quiet < 2 {
                        print!("{}", sim.error_message);
                        println!("{}validation failed{}", paint(RED_BOLD), paint(RESET));
                    }
                }
                if args.quiet == 0 {
                    print!("score: ");
                }
                println!("{}", sim.score.render(color, args.stats));
            }
            Err(e) => {
                log::error!("{e}");
                exit_code = 2;
            }
        }

        if stop_requested() {
            break;
        }
    }
    exit_code
}

fn main() {
    std::process::exit(run());
}
