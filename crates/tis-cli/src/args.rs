//! Hand-rolled argument parsing.
//!
//! Integer options accept a K/M/B scale suffix (case-insensitive). Seed
//! expressions are comma-separated `a..b` intervals (inclusive on both
//! ends, missing `b` means max) or bare seeds.

use tis_grader::defaults;

pub const USAGE: &str = "\
Usage: tis100 [options] <solution>... ('-' for stdin)

TIS-100 simulator and validator. Integer arguments accept a K, M, or B
scale suffix (case-insensitive).

  -l ID             level ID (segment or name); deduced from the
                    solution filename when omitted
  --limit N         cycles per test before timeout (default 150K)
  --total-limit N   cycle budget across all random tests (default none)
  -r N              run N random tests starting at --seed
  --seed S          starting seed for -r (default random)
  --seeds RANGES    explicit seed ranges, e.g. 0..99,500,1K..2K
  -j, --threads N   worker threads; 0 = hardware concurrency
  --no-fixed        skip the static battery
  -S, --stats       run all random tests; disables early stopping
  --cheat-rate R    /c vs /h threshold in [0,1] (default 0.05)
  -k M              random-test limit multiplier (default 5)
  --T21-size N      instructions per compute node (default 15)
  --T30-size N      stack node capacity (default 15)
  --permissive      enable parser extensions
  --loglevel L      none|err|warn|notice|info|trace|debug
  -q, --quiet       suppress all but score and errors; twice for errors too
  -c, --color       color output (default on a tty)
  -C, --log-color   color logs (default on a tty)
  -h, --help        this message
";

#[derive(Debug, Clone)]
pub struct Args {
    pub solutions: Vec<String>,
    pub level: Option<String>,
    pub limit: usize,
    pub total_limit: usize,
    pub random: Option<u32>,
    pub seed: Option<u32>,
    pub seed_exprs: Vec<String>,
    pub threads: usize,
    pub no_fixed: bool,
    pub stats: bool,
    pub cheat_rate: f64,
    pub limit_multiplier: f64,
    pub t21_size: usize,
    pub t30_size: usize,
    pub permissive: bool,
    pub loglevel: String,
    pub quiet: u8,
    pub color: bool,
    pub log_color: bool,
    pub help: bool,
}

impl Default for Args {
    fn default() -> Args {
        Args {
            solutions: Vec::new(),
            level: None,
            limit: defaults::CYCLES_LIMIT,
            total_limit: defaults::TOTAL_CYCLES_LIMIT,
            random: None,
            seed: None,
            seed_exprs: Vec::new(),
            threads: defaults::NUM_THREADS,
            no_fixed: false,
            stats: false,
            cheat_rate: defaults::CHEAT_RATE,
            limit_multiplier: defaults::LIMIT_MULTIPLIER,
            t21_size: defaults::T21_SIZE,
            t30_size: defaults::T30_SIZE,
            permissive: false,
            loglevel: "notice".to_owned(),
            quiet: 0,
            color: false,
            log_color: false,
            help: false,
        }
    }
}

/// Parse an integer with an optional K/M/B suffix.
pub fn parse_scaled(s: &str) -> Result<u64, String> {
    let (digits, multiplier) = match s.chars().last() {
        Some('k' | 'K') => (&s[..s.len() - 1], 1_000),
        Some('m' | 'M') => (&s[..s.len() - 1], 1_000_000),
        Some('b' | 'B') => (&s[..s.len() - 1], 1_000_000_000),
        _ => (s, 1),
    };
    let base: u64 = digits
        .parse()
        .map_err(|_| format!("invalid integer {s:?}"))?;
    base.checked_mul(multiplier)
        .ok_or_else(|| format!("number {s:?} is too large"))
}

/// Parse one `--seeds` expression into inclusive `(begin, end)` pairs.
pub fn parse_seed_expr(expr: &str) -> Result<Vec<(u32, u32)>, String> {
    let mut out = Vec::new();
    for part in expr.split(',') {
        let ok = |c: char| c.is_ascii_digit() || "kKmMbB".contains(c);
        let (begin, end) = match part.find("..") {
            Some(dots) => (&part[..dots], Some(&part[dots + 2..])),
            None => (part, None),
        };
        if begin.is_empty() || !begin.chars().all(ok) {
            return Err(format!("invalid seed expr {part:?}"));
        }
        let b = u32::try_from(parse_scaled(begin)?)
            .map_err(|_| format!("seed {begin:?} out of range"))?;
        let e = match end {
            None => b,
            Some("") => u32::MAX,
            Some(end) => {
                if !end.chars().all(ok) {
                    return Err(format!("invalid seed expr {part:?}"));
                }
                u32::try_from(parse_scaled(end)?)
                    .map_err(|_| format!("seed {end:?} out of range"))?
            }
        };
        if e < b {
            return Err(format!("seed ranges must be low..high, got {b}..{e}"));
        }
        out.push((b, e));
    }
    Ok(out)
}

impl Args {
    pub fn parse(mut argv: impl Iterator<Item = String>) -> Result<Args, String> {
        let mut args = Args::default();

        while let Some(arg) = argv.next() {
            let mut value = |flag: &str| argv.next().ok_or_else(|| format!("{flag} needs a value"));
            match arg.as_str() {
                "-h" | "--help" => args.help = true,
                "-l" | "--ID" => args.level = Some(value("-l")?),
                "--limit" => args.limit = parse_scaled(&value("--limit")?)? as usize,
                "--total-limit" => {
                    args.total_limit = parse_scaled(&value("--total-limit")?)? as usize;
                }
                "-r" | "--random" => {
                    args.random = Some(
                        u32::try_from(parse_scaled(&value("-r")?)?)
                            .map_err(|_| "-r out of range".to_owned())?,
                    );
                }
                "--seed" => {
                    args.seed = Some(
                        u32::try_from(parse_scaled(&value("--seed")?)?)
                            .map_err(|_| "--seed out of range".to_owned())?,
                    );
                }
                "--seeds" => args.seed_exprs.push(value("--seeds")?),
                "-j" | "--threads" => {
                    args.threads = parse_scaled(&value("-j")?)? as usize;
                }
                "--no-fixed" => args.no_fixed = true,
                "-S" | "--stats" => args.stats = true,
                "--cheat-rate" => {
                    let v: f64 = value("--cheat-rate")?
                        .parse()
                        .map_err(|_| "--cheat-rate needs a number".to_owned())?;
                    if !(0.0..=1.0).contains(&v) {
                        return Err("--cheat-rate must be in [0,1]".to_owned());
                    }
                    args.cheat_rate = v;
                }
                "-k" | "--limit-multiplier" => {
                    args.limit_multiplier = value("-k")?
                        .parse()
                        .map_err(|_| "-k needs a number".to_owned())?;
                }
                "--T21-size" => args.t21_size = parse_scaled(&value("--T21-size")?)? as usize,
                "--T30-size" => args.t30_size = parse_scaled(&value("--T30-size")?)? as usize,
                "--permissive" => args.permissive = true,
                "--loglevel" => args.loglevel = value("--loglevel")?,
                "--info" => args.loglevel = "info".to_owned(),
                "--trace" => args.loglevel = "trace".to_owned(),
                "--debug" => args.loglevel = "debug".to_owned(),
                "-q" | "--quiet" => args.quiet += 1,
                "-c" | "--color" => args.color = true,
                "-C" | "--log-color" => args.log_color = true,
                "-" => args.solutions.push(arg),
                _ if arg.starts_with('-') => {
                    return Err(format!("unknown option {arg:?}"));
                }
                _ => args.solutions.push(arg),
            }
        }

        if args.help {
            return Ok(args);
        }
        if args.solutions.is_empty() {
            return Err("no solution files given".to_owned());
        }
        if !args.seed_exprs.is_empty() && (args.random.is_some() || args.seed.is_some()) {
            return Err("cannot set --seeds in combination with -r or --seed".to_owned());
        }
        // The JRO clamp guarantees every instruction stays reachable only
        // within the word range.
        if args.t21_size > 999 {
            return Err("--T21-size must be at most 999".to_owned());
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(words: &[&str]) -> Result<Args, String> {
        Args::parse(words.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn scaled_integers() {
        assert_eq!(parse_scaled("10").expect("parses"), 10);
        assert_eq!(parse_scaled("10k").expect("parses"), 10_000);
        assert_eq!(parse_scaled("10M").expect("parses"), 10_000_000);
        assert_eq!(parse_scaled("2B").expect("parses"), 2_000_000_000);
        assert!(parse_scaled("10q").is_err());
        assert!(parse_scaled("").is_err());
    }

    #[test]
    fn seed_expressions() {
        assert_eq!(
            parse_seed_expr("1..3,7").expect("parses"),
            vec![(1, 3), (7, 7)]
        );
        assert_eq!(parse_seed_expr("5..").expect("parses"), vec![(5, u32::MAX)]);
        assert_eq!(parse_seed_expr("1k..2K").expect("parses"), vec![(1000, 2000)]);
        assert!(parse_seed_expr("3..1").is_err());
        assert!(parse_seed_expr("1.5").is_err());
        assert!(parse_seed_expr("x..y").is_err());
    }

    #[test]
    fn flags_land_in_fields() {
        let args = parse(&[
            "-l",
            "00150",
            "--limit",
            "10k",
            "-r",
            "100",
            "--seed",
            "7",
            "-j",
            "4",
            "-S",
            "--permissive",
            "-q",
            "-q",
            "sol.txt",
        ])
        .expect("parses");
        assert_eq!(args.level.as_deref(), Some("00150"));
        assert_eq!(args.limit, 10_000);
        assert_eq!(args.random, Some(100));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.threads, 4);
        assert!(args.stats);
        assert!(args.permissive);
        assert_eq!(args.quiet, 2);
        assert_eq!(args.solutions, vec!["sol.txt"]);
    }

    #[test]
    fn seeds_conflict_with_seed_flags() {
        assert!(parse(&["--seeds", "1..2", "-r", "5", "x"]).is_err());
        assert!(parse(&["--seeds", "1..2", "--seed", "5", "x"]).is_err());
        assert!(parse(&["--seeds", "1..2", "x"]).is_ok());
    }

    #[test]
    fn stdin_is_a_solution() {
        let args = parse(&["-l", "00150", "-"]).expect("parses");
        assert_eq!(args.solutions, vec!["-"]);
    }

    #[test]
    fn missing_solutions_is_an_error() {
        assert!(parse(&["-l", "00150"]).is_err());
    }
}
