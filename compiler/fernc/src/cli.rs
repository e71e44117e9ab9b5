//! Command-line argument model.
//!
//! Hand-rolled, exact-match parsing: subcommands and flags match
//! case-sensitively on the whole token (or, for value-taking flags, on the
//! part before the first `=`). An argument containing `=` whose prefix is
//! not a value-taking flag is passed through as a literal path, even when
//! the prefix matches a known flag name — `--help=x` is a path, not
//! `--help`.

/// Optimization profile selected by `--optimize`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum OptLevel {
    #[default]
    Dev,
    Perf,
    Size,
}

impl OptLevel {
    fn from_value(value: &str) -> Option<Self> {
        match value {
            "perf" => Some(OptLevel::Perf),
            "size" => Some(OptLevel::Size),
            "dev" => Some(OptLevel::Dev),
            _ => None,
        }
    }
}

/// What the invocation asks for.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Mode {
    Version,
    Check,
    Build,
    Help,
    /// No subcommand: remaining tokens are source paths to run.
    Run,
}

/// A parsed invocation.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Invocation {
    pub mode: Mode,
    pub optimize: OptLevel,
    pub main: Option<String>,
    pub time: Option<bool>,
    pub paths: Vec<String>,
}

/// A rejected invocation.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum CliError {
    InvalidFlagValue {
        flag: &'static str,
        value: String,
    },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::InvalidFlagValue { flag, value } => {
                write!(f, "invalid value `{value}` for `{flag}`")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Parse the arguments following the program name.
pub fn parse_args(args: &[String]) -> Result<Invocation, CliError> {
    let mut mode = None;
    let mut optimize = OptLevel::default();
    let mut main = None;
    let mut time = None;
    let mut paths = Vec::new();

    for (i, arg) in args.iter().enumerate() {
        // Subcommands are recognized only in the leading position.
        if i == 0 && mode.is_none() {
            match arg.as_str() {
                "version" => {
                    mode = Some(Mode::Version);
                    continue;
                }
                "check" => {
                    mode = Some(Mode::Check);
                    continue;
                }
                "build" => {
                    mode = Some(Mode::Build);
                    continue;
                }
                "help" => {
                    mode = Some(Mode::Help);
                    continue;
                }
                _ => {}
            }
        }

        match arg.as_str() {
            "--version" | "-v" => {
                mode.get_or_insert(Mode::Version);
                continue;
            }
            "--help" | "-h" => {
                mode.get_or_insert(Mode::Help);
                continue;
            }
            "--optimize" => {
                optimize = OptLevel::Perf;
                continue;
            }
            "--time" => {
                time = Some(true);
                continue;
            }
            _ => {}
        }

        // Value-taking flags: the part before the first `=` must match
        // exactly. Everything else, `=` or not, is a literal path.
        if let Some((prefix, value)) = arg.split_once('=') {
            match prefix {
                "--optimize" => {
                    optimize = OptLevel::from_value(value).ok_or(CliError::InvalidFlagValue {
                        flag: "--optimize",
                        value: value.to_owned(),
                    })?;
                    continue;
                }
                "--main" => {
                    main = Some(value.to_owned());
                    continue;
                }
                "--time" => {
                    time = Some(match value {
                        "true" => true,
                        "false" => false,
                        _ => {
                            return Err(CliError::InvalidFlagValue {
                                flag: "--time",
                                value: value.to_owned(),
                            })
                        }
                    });
                    continue;
                }
                _ => {}
            }
        }

        paths.push(arg.clone());
    }

    let mode = mode.unwrap_or(if paths.is_empty() { Mode::Help } else { Mode::Run });
    Ok(Invocation {
        mode,
        optimize,
        main,
        time,
        paths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn bare_invocation_is_help() {
        let inv = parse_args(&[]).expect("parse");
        assert_eq!(inv.mode, Mode::Help);
    }

    #[test]
    fn subcommands_match_exactly() {
        assert_eq!(parse_args(&args(&["version"])).expect("parse").mode, Mode::Version);
        assert_eq!(parse_args(&args(&["check", "a.fern"])).expect("parse").mode, Mode::Check);
        assert_eq!(parse_args(&args(&["build", "a.fern"])).expect("parse").mode, Mode::Build);
        assert_eq!(parse_args(&args(&["help"])).expect("parse").mode, Mode::Help);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let inv = parse_args(&args(&["Check"])).expect("parse");
        assert_eq!(inv.mode, Mode::Run);
        assert_eq!(inv.paths, vec!["Check".to_owned()]);
    }

    #[test]
    fn subcommand_position_is_leading_only() {
        let inv = parse_args(&args(&["a.fern", "check"])).expect("parse");
        assert_eq!(inv.mode, Mode::Run);
        assert_eq!(inv.paths, vec!["a.fern".to_owned(), "check".to_owned()]);
    }

    #[test]
    fn version_and_help_flags() {
        assert_eq!(parse_args(&args(&["--version"])).expect("parse").mode, Mode::Version);
        assert_eq!(parse_args(&args(&["-v"])).expect("parse").mode, Mode::Version);
        assert_eq!(parse_args(&args(&["-h"])).expect("parse").mode, Mode::Help);
    }

    #[test]
    fn optimize_values() {
        let inv = parse_args(&args(&["--optimize"])).expect("parse");
        assert_eq!(inv.optimize, OptLevel::Perf);
        let inv = parse_args(&args(&["--optimize=size"])).expect("parse");
        assert_eq!(inv.optimize, OptLevel::Size);
        let inv = parse_args(&args(&["--optimize=dev"])).expect("parse");
        assert_eq!(inv.optimize, OptLevel::Dev);
        assert_eq!(
            parse_args(&args(&["--optimize=fast"])),
            Err(CliError::InvalidFlagValue {
                flag: "--optimize",
                value: "fast".to_owned()
            })
        );
    }

    #[test]
    fn main_flag_takes_a_path() {
        let inv = parse_args(&args(&["check", "--main=src/app.fern"])).expect("parse");
        assert_eq!(inv.main, Some("src/app.fern".to_owned()));
    }

    #[test]
    fn time_flag_values() {
        assert_eq!(parse_args(&args(&["--time"])).expect("parse").time, Some(true));
        assert_eq!(parse_args(&args(&["--time=true"])).expect("parse").time, Some(true));
        assert_eq!(parse_args(&args(&["--time=false"])).expect("parse").time, Some(false));
        assert!(parse_args(&args(&["--time=maybe"])).is_err());
    }

    #[test]
    fn equals_argument_with_non_value_flag_prefix_is_a_path() {
        // `--help=x` contains `=` but `--help` takes no value: literal path.
        let inv = parse_args(&args(&["--help=x"])).expect("parse");
        assert_eq!(inv.mode, Mode::Run);
        assert_eq!(inv.paths, vec!["--help=x".to_owned()]);

        let inv = parse_args(&args(&["--version=1"])).expect("parse");
        assert_eq!(inv.mode, Mode::Run);
        assert_eq!(inv.paths, vec!["--version=1".to_owned()]);
    }

    #[test]
    fn unknown_equals_argument_is_a_path() {
        let inv = parse_args(&args(&["key=value"])).expect("parse");
        assert_eq!(inv.mode, Mode::Run);
        assert_eq!(inv.paths, vec!["key=value".to_owned()]);
    }

    #[test]
    fn bare_main_without_value_is_a_path() {
        let inv = parse_args(&args(&["--main"])).expect("parse");
        assert_eq!(inv.mode, Mode::Run);
        assert_eq!(inv.paths, vec!["--main".to_owned()]);
    }

    #[test]
    fn other_tokens_are_source_paths_to_run() {
        let inv = parse_args(&args(&["demo.fern", "--time"])).expect("parse");
        assert_eq!(inv.mode, Mode::Run);
        assert_eq!(inv.paths, vec!["demo.fern".to_owned()]);
        assert_eq!(inv.time, Some(true));
    }
}
